//! The hex map: terrain cells, political occupiers, detachment stacks, and
//! victory-point markers, plus the adjacency and movement-cost model the
//! analysis passes traverse.
//!
//! The grid uses offset coordinates with odd columns shifted down. Dense
//! state (cell codes, occupiers) lives in `HexGrid`s; sparse state
//! (detachments, victory points) is keyed by `HexCoord`.

use crate::constants::*;
use crate::forces::{OwnerId, UnitId};
use crate::grid::*;
use crate::location::*;
use crate::terrain::*;
use fnv::FnvHashMap;
use serde::{Deserialize, Serialize};

/// Neighbor offsets for even columns, directions N, NE, SE, S, SW, NW.
const NEIGHBORS_EVEN_COL: [(i16, i16); 6] = [(0, -1), (1, -1), (1, 0), (0, 1), (-1, 0), (-1, -1)];

/// Neighbor offsets for odd columns (shifted down), same direction order.
const NEIGHBORS_ODD_COL: [(i16, i16); 6] = [(0, -1), (1, 0), (1, 1), (0, 1), (-1, 1), (-1, 0)];

#[derive(Clone, Serialize, Deserialize)]
pub struct HexMap {
    width: u16,
    height: u16,
    cells: HexGrid<u8>,
    occupiers: HexGrid<OwnerId>,
    victory_points: FnvHashMap<HexCoord, i32>,
    /// Detachment stacks; index 0 is the top of the stack.
    detachments: FnvHashMap<HexCoord, Vec<UnitId>>,
}

impl HexMap {
    /// Create an all-clear, unclaimed, empty map.
    pub fn new(width: u16, height: u16) -> Self {
        HexMap {
            width,
            height,
            cells: HexGrid::new(width, height, pack_cell(TerrainKind::Clear, CellFlags::NONE)),
            occupiers: HexGrid::new(width, height, 0),
            victory_points: FnvHashMap::default(),
            detachments: FnvHashMap::default(),
        }
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    pub fn valid(&self, hex: HexCoord) -> bool {
        (hex.x() as u16) < self.width && (hex.y() as u16) < self.height
    }

    /// Iterate every hex in row-major order.
    pub fn hexes(&self) -> impl Iterator<Item = HexCoord> {
        let (width, height) = (self.width as u32, self.height as u32);
        (0..height).flat_map(move |y| (0..width).map(move |x| HexCoord::new(x, y)))
    }

    pub fn cell(&self, hex: HexCoord) -> u8 {
        self.cells.get(hex)
    }

    pub fn terrain(&self, hex: HexCoord) -> TerrainKind {
        terrain_of(self.cells.get(hex))
    }

    pub fn flags(&self, hex: HexCoord) -> CellFlags {
        flags_of(self.cells.get(hex))
    }

    pub fn set_cell(&mut self, hex: HexCoord, kind: TerrainKind, flags: CellFlags) {
        self.cells.set(hex, pack_cell(kind, flags));
    }

    pub fn occupier(&self, hex: HexCoord) -> OwnerId {
        self.occupiers.get(hex)
    }

    pub fn set_occupier(&mut self, hex: HexCoord, owner: OwnerId) {
        self.occupiers.set(hex, owner);
    }

    /// Claim every hex for one political occupier.
    pub fn set_occupier_all(&mut self, owner: OwnerId) {
        self.occupiers.fill(owner);
    }

    pub fn victory_points(&self, hex: HexCoord) -> i32 {
        self.victory_points.get(&hex).copied().unwrap_or(0)
    }

    pub fn set_victory_points(&mut self, hex: HexCoord, value: i32) {
        if value == 0 {
            self.victory_points.remove(&hex);
        } else {
            self.victory_points.insert(hex, value);
        }
    }

    /// Hexes carrying a non-zero objective value.
    pub fn victory_point_hexes(&self) -> impl Iterator<Item = (HexCoord, i32)> + '_ {
        self.victory_points.iter().map(|(hex, vp)| (*hex, *vp))
    }

    /// The detachment stack on a hex, top first. Empty if unoccupied.
    pub fn detachments(&self, hex: HexCoord) -> &[UnitId] {
        self.detachments
            .get(&hex)
            .map(|stack| stack.as_slice())
            .unwrap_or(&[])
    }

    /// Push a unit onto the bottom of a hex's detachment stack.
    pub fn place_detachment(&mut self, hex: HexCoord, unit: UnitId) {
        self.detachments.entry(hex).or_default().push(unit);
    }

    /// The adjacent hex in direction 0..6 (N, NE, SE, S, SW, NW), or `None`
    /// at the map edge.
    pub fn neighbor(&self, hex: HexCoord, dir: usize) -> Option<HexCoord> {
        let offsets = if hex.x() & 1 == 0 {
            &NEIGHBORS_EVEN_COL
        } else {
            &NEIGHBORS_ODD_COL
        };
        let (dx, dy) = offsets[dir];
        let nx = hex.x() as i16 + dx;
        let ny = hex.y() as i16 + dy;
        if nx < 0 || ny < 0 || nx >= self.width as i16 || ny >= self.height as i16 {
            return None;
        }
        Some(HexCoord::new(nx as u32, ny as u32))
    }

    /// All valid neighbors of a hex.
    pub fn neighbors(&self, hex: HexCoord) -> impl Iterator<Item = HexCoord> + '_ {
        (0..6).filter_map(move |dir| self.neighbor(hex, dir))
    }

    /// Minutes for a foot-track carrier to enter `to`. A road overrides the
    /// terrain rate; a river adds a crossing penalty unless bridged by a
    /// road. Impassable terrain yields `NO_PASSAGE`.
    pub fn entry_minutes(&self, to: HexCoord) -> u32 {
        let code = self.cells.get(to);
        let terrain = terrain_of(code);
        if !terrain.passable() {
            return NO_PASSAGE;
        }
        let flags = flags_of(code);
        if flags.contains(CellFlags::ROAD) {
            return ROAD_RATE_MINUTES;
        }
        let mut minutes = terrain.cross_country_minutes();
        if flags.contains(CellFlags::RIVER) {
            minutes += RIVER_CROSSING_MINUTES;
        }
        minutes
    }
}
