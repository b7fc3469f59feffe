//! Dense per-hex storage sized to the map at construction.

use crate::location::*;
use serde::{Deserialize, Serialize};

/// A width x height array of per-hex data, indexed row-major.
#[derive(Clone, Serialize, Deserialize)]
pub struct HexGrid<T: Copy> {
    width: u16,
    height: u16,
    data: Vec<T>,
}

impl<T: Copy> HexGrid<T> {
    pub fn new(width: u16, height: u16, initial: T) -> Self {
        HexGrid {
            width,
            height,
            data: vec![initial; width as usize * height as usize],
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
    fn index(&self, hex: HexCoord) -> usize {
        hex.y() as usize * self.width as usize + hex.x() as usize
    }

    #[inline]
    pub fn get(&self, hex: HexCoord) -> T {
        self.data[self.index(hex)]
    }

    #[inline]
    pub fn set(&mut self, hex: HexCoord, value: T) {
        let index = self.index(hex);
        self.data[index] = value;
    }

    /// Overwrite every cell with `value`.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (HexCoord, &T)> {
        let width = self.width as usize;
        self.data.iter().enumerate().map(move |(i, v)| {
            let x = (i % width) as u32;
            let y = (i / width) as u32;
            (HexCoord::new(x, y), v)
        })
    }
}
