//! Water-body resolution.
//!
//! A contiguous body of deep water whose shores touch both the friendly
//! interior and enemy territory is navigable by the opponent and must be
//! defended: its friendly Interior shore hexes are reclassified Coast. A
//! landlocked lake leaves its shores untouched.

use super::*;
use crate::location::*;
use log::*;

impl<'a> Actor<'a> {
    /// Flood-fill the deep-water body containing `origin` (which must
    /// already be reclassified DeepWater), reclassifying further impassable
    /// deep-water hexes as it goes, and track which shores it touches.
    ///
    /// Uses an explicit worklist rather than recursion so large bodies
    /// cannot exhaust the call stack.
    pub(crate) fn analyze_deep_water(&mut self, origin: HexCoord) {
        let mut worklist = vec![origin];
        let mut visited: Vec<HexCoord> = Vec::new();
        let mut touches_enemy = false;
        let mut touches_interior = false;

        while let Some(hex) = worklist.pop() {
            visited.push(hex);
            for dir in 0..6 {
                let neighbor = match self.map.neighbor(hex, dir) {
                    Some(n) => n,
                    None => continue,
                };
                match self.threat.get(neighbor) {
                    // Undiscovered part of this body; claiming it here also
                    // guarantees each hex enters the worklist once.
                    ThreatCategory::Impassable if self.map.terrain(neighbor).is_deep_water() => {
                        self.threat.set(neighbor, ThreatCategory::DeepWater);
                        worklist.push(neighbor);
                    }
                    ThreatCategory::EnemyTerritory => touches_enemy = true,
                    ThreatCategory::Interior => touches_interior = true,
                    _ => {}
                }
            }
        }

        if touches_enemy && touches_interior {
            trace!(
                "water body at ({}, {}) ({} hexes) borders both sides; marking coast",
                origin.x(),
                origin.y(),
                visited.len()
            );
            for &hex in &visited {
                for dir in 0..6 {
                    if let Some(neighbor) = self.map.neighbor(hex, dir) {
                        if self.threat.get(neighbor) == ThreatCategory::Interior {
                            self.threat.set(neighbor, ThreatCategory::Coast);
                        }
                    }
                }
            }
        }
    }
}
