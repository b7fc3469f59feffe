use serde::*;

/// Offset-hex coordinate addressing one cell of the map.
///
/// Coordinates are column-major offset pairs (x = column, y = row) packed
/// into a single u16, which keeps sparse per-hex maps cheap to hash and
/// limits maps to 256x256 hexes.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(transparent)]
pub struct HexCoord {
    packed: u16,
}

impl HexCoord {
    pub fn new(x: u32, y: u32) -> Self {
        HexCoord {
            packed: ((x << 8) | y) as u16,
        }
    }

    #[inline]
    pub fn x(self) -> u8 {
        ((self.packed >> 8) & 0xFF) as u8
    }

    #[inline]
    pub fn y(self) -> u8 {
        (self.packed & 0xFF) as u8
    }

    #[inline]
    pub fn packed_repr(self) -> u16 {
        self.packed
    }

    #[inline]
    pub fn from_packed(packed: u16) -> Self {
        HexCoord { packed }
    }

    /// Hex-grid distance in steps, via cube coordinates.
    ///
    /// This is straight-line adjacency distance and ignores terrain; the
    /// analysis passes use path cost instead. Offset pairs are converted to
    /// axial form assuming odd columns are shifted down.
    pub fn distance_to(self, other: Self) -> u32 {
        let (aq, ar) = self.axial();
        let (bq, br) = other.axial();
        let dq = aq - bq;
        let dr = ar - br;
        let ds = (aq + ar) - (bq + br);
        ((dq.abs() + dr.abs() + ds.abs()) / 2) as u32
    }

    fn axial(self) -> (i32, i32) {
        let col = self.x() as i32;
        let row = self.y() as i32;
        (col, row - (col - (col & 1)) / 2)
    }
}

impl Serialize for HexCoord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.packed_repr().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for HexCoord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        u16::deserialize(deserializer).map(HexCoord::from_packed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packing_roundtrip() {
        let hex = HexCoord::new(37, 201);
        assert_eq!(hex.x(), 37);
        assert_eq!(hex.y(), 201);
        assert_eq!(HexCoord::from_packed(hex.packed_repr()), hex);
    }

    #[test]
    fn distance_is_symmetric_and_zero_on_self() {
        let a = HexCoord::new(2, 3);
        let b = HexCoord::new(7, 1);
        assert_eq!(a.distance_to(a), 0);
        assert_eq!(a.distance_to(b), b.distance_to(a));
    }

    #[test]
    fn distance_along_a_column() {
        let a = HexCoord::new(4, 0);
        let b = HexCoord::new(4, 6);
        assert_eq!(a.distance_to(b), 6);
    }
}
