//! Terrain model for a single cell code.
//!
//! A cell code is one byte: the low nibble selects the terrain class, the
//! high nibble carries feature flags (road, river). Passability and the
//! deep-water test read the terrain class only; the movement-cost model in
//! `map.rs` combines both.

use crate::constants::*;
use bitflags::*;
use serde::{Deserialize, Serialize};

/// Terrain class stored in the low nibble of a cell code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum TerrainKind {
    Clear = 0,
    Rough = 1,
    Woods = 2,
    Hills = 3,
    Swamp = 4,
    Urban = 5,
    Mountain = 6,
    DeepWater = 7,
}

impl TerrainKind {
    /// Decode the low nibble of a cell code. Unassigned nibble values fall
    /// back to `Clear` rather than failing; scenario data is trusted.
    pub fn from_nibble(nibble: u8) -> TerrainKind {
        match nibble & 0x0F {
            1 => TerrainKind::Rough,
            2 => TerrainKind::Woods,
            3 => TerrainKind::Hills,
            4 => TerrainKind::Swamp,
            5 => TerrainKind::Urban,
            6 => TerrainKind::Mountain,
            7 => TerrainKind::DeepWater,
            _ => TerrainKind::Clear,
        }
    }

    pub fn passable(self) -> bool {
        !matches!(self, TerrainKind::Mountain | TerrainKind::DeepWater)
    }

    pub fn is_deep_water(self) -> bool {
        self == TerrainKind::DeepWater
    }

    /// Minutes for a foot-track carrier to enter a hex of this terrain
    /// cross-country (no road).
    pub fn cross_country_minutes(self) -> u32 {
        match self {
            TerrainKind::Clear => 60,
            TerrainKind::Rough => 90,
            TerrainKind::Woods => 120,
            TerrainKind::Hills => 120,
            TerrainKind::Swamp => 180,
            TerrainKind::Urban => 75,
            TerrainKind::Mountain | TerrainKind::DeepWater => NO_PASSAGE,
        }
    }
}

bitflags! {
    /// Feature flags stored in the high nibble of a cell code.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct CellFlags: u8 {
        const NONE = 0;
        const ROAD = 0x10;
        const RIVER = 0x20;
    }
}

/// Terrain class of a cell code.
#[inline]
pub fn terrain_of(code: u8) -> TerrainKind {
    TerrainKind::from_nibble(code & 0x0F)
}

/// Feature flags of a cell code.
#[inline]
pub fn flags_of(code: u8) -> CellFlags {
    CellFlags::from_bits_truncate(code & 0xF0)
}

/// Assemble a cell code from a terrain class and feature flags.
#[inline]
pub fn pack_cell(kind: TerrainKind, flags: CellFlags) -> u8 {
    (kind as u8) | flags.bits()
}
