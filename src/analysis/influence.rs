//! Influence propagation: one traversal per detachment, accumulating a
//! distance-decayed strength contribution onto every front-line hex it can
//! reach within the planning horizon.

use super::*;
use crate::grid::*;
use crate::location::*;
use crate::map::*;
use crate::visit::*;

/// Path-visitor strategy for one detachment's strength projection.
///
/// Contributions are collected during review and applied to the actor's
/// front-info map by the caller once the traversal is done.
pub(crate) struct InfluenceSweep<'g> {
    threat: &'g HexGrid<ThreatCategory>,
    origin: HexCoord,
    strength: f32,
    horizon: u32,
    contributions: Vec<(HexCoord, f32)>,
}

impl<'g> InfluenceSweep<'g> {
    pub fn new(
        threat: &'g HexGrid<ThreatCategory>,
        origin: HexCoord,
        strength: f32,
        horizon: u32,
    ) -> Self {
        InfluenceSweep {
            threat,
            origin,
            strength,
            horizon,
            contributions: Vec::new(),
        }
    }

    pub fn into_contributions(self) -> Vec<(HexCoord, f32)> {
        self.contributions
    }
}

impl PathVisitor for InfluenceSweep<'_> {
    /// Strength cannot be projected through an occupied hex unless that hex
    /// is enemy territory; the occupied hex itself still receives its share.
    fn visit(&mut self, map: &HexMap, hex: HexCoord) -> VisitFlow {
        if hex != self.origin
            && self.threat.get(hex) != ThreatCategory::EnemyTerritory
            && !map.detachments(hex).is_empty()
        {
            return VisitFlow::SkipBranch;
        }
        VisitFlow::Continue
    }

    /// Cross-country movement for a generic foot-track carrier, so the
    /// projection respects terrain difficulty rather than straight-line
    /// distance.
    fn cost(&mut self, map: &HexMap, _from: HexCoord, _dir: usize, to: HexCoord) -> u32 {
        map.entry_minutes(to)
    }

    fn review(&mut self, _map: &HexMap, hex: HexCoord, cost: u32) {
        if cost > self.horizon {
            return;
        }
        if matches!(
            self.threat.get(hex),
            ThreatCategory::Front | ThreatCategory::Coast | ThreatCategory::Border
        ) {
            let decay = (self.horizon - cost) as f32 / self.horizon as f32;
            self.contributions.push((hex, self.strength * decay));
        }
    }
}
