//! Victory-value propagation.
//!
//! Each hex carrying objective value radiates it toward the front line,
//! decayed over path cost with a horizon of the minutes remaining in the
//! scenario. Value flows up to the front but never through it. Attribution
//! follows the ORIGIN hex's side: an objective in enemy territory feeds
//! enemy victory value wherever it reaches, and anything else feeds
//! friendly victory value, regardless of who holds the receiving hex.

use super::*;
use crate::grid::*;
use crate::location::*;
use crate::map::*;
use crate::visit::*;
use log::*;

impl<'a> Actor<'a> {
    /// Propagate objective value from every victory-point hex.
    pub fn calculate_vp_values(&mut self) {
        let horizon = self.game.remaining_minutes();
        if horizon == 0 {
            debug!("scenario clock expired; skipping victory-value propagation");
            return;
        }
        let map = self.map;
        for (hex, vp) in map.victory_point_hexes() {
            if vp == 0 {
                continue;
            }
            let category = self.threat.get(hex);
            if matches!(
                category,
                ThreatCategory::Neutral | ThreatCategory::Impassable | ThreatCategory::DeepWater
            ) {
                continue;
            }
            let origin_enemy = category == ThreatCategory::EnemyTerritory;
            let contributions = {
                let mut sweep = VictorySweep::new(&self.threat, hex, vp as f32, horizon);
                visit(map, hex, horizon, self.config.influence_node_cap, &mut sweep);
                sweep.into_contributions()
            };
            for (target, amount) in contributions {
                let info = self.front_info_mut(target);
                if origin_enemy {
                    info.enemy_victory += amount;
                } else {
                    info.friendly_victory += amount;
                }
            }
        }
    }
}

/// Path-visitor strategy for one objective hex's value projection.
struct VictorySweep<'g> {
    threat: &'g HexGrid<ThreatCategory>,
    origin: HexCoord,
    value: f32,
    horizon: u32,
    contributions: Vec<(HexCoord, f32)>,
}

impl<'g> VictorySweep<'g> {
    fn new(threat: &'g HexGrid<ThreatCategory>, origin: HexCoord, value: f32, horizon: u32) -> Self {
        VictorySweep {
            threat,
            origin,
            value,
            horizon,
            contributions: Vec::new(),
        }
    }

    fn into_contributions(self) -> Vec<(HexCoord, f32)> {
        self.contributions
    }
}

impl PathVisitor for VictorySweep<'_> {
    /// Value reaches the front line but does not tunnel through it. The
    /// origin itself is always allowed to expand, so an objective sitting
    /// on the front still radiates.
    fn visit(&mut self, _map: &HexMap, hex: HexCoord) -> VisitFlow {
        if hex != self.origin
            && matches!(
                self.threat.get(hex),
                ThreatCategory::Front | ThreatCategory::Coast | ThreatCategory::Border
            )
        {
            return VisitFlow::SkipBranch;
        }
        VisitFlow::Continue
    }

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
            self.contributions.push((hex, self.value * decay));
        }
    }
}
