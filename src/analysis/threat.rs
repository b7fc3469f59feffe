//! Threat classification: the first pass of an analysis cycle.
//!
//! A single sweep over the grid assigns every hex a category from terrain,
//! political ownership, and adjacency. A second sweep splits deep water out
//! of the impassable set and resolves each contiguous body; influence is
//! then propagated from enemy territory and from the friendly interior, and
//! a final fix-up distributes flanking support along the front line.

use super::influence::InfluenceSweep;
use super::*;
use crate::location::*;
use crate::visit::visit;
use log::*;

impl<'a> Actor<'a> {
    /// Classify every hex and seed/propagate combat strength onto the front.
    pub fn compute_threat(&mut self) {
        self.classify_all();
        self.resolve_deep_water();
        self.propagate_influence(ThreatCategory::EnemyTerritory);
        self.propagate_influence(ThreatCategory::Interior);
        self.distribute_flank_support();
        self.log_category_counts();
    }

    fn classify_all(&mut self) {
        for hex in self.map.hexes() {
            if !self.map.terrain(hex).passable() {
                self.threat.set(hex, ThreatCategory::Impassable);
                continue;
            }
            let category = match self.game.theater.combatant_force(self.map.occupier(hex)) {
                None => ThreatCategory::Neutral,
                Some(force) if force != self.force => ThreatCategory::EnemyTerritory,
                Some(_) => self.classify_held_hex(hex),
            };
            self.threat.set(hex, category);
            if category == ThreatCategory::Front {
                self.seed_front_strength(hex);
            }
        }
    }

    /// Classify a hex held by the analyzed force from its neighbors.
    /// An enemy neighbor makes it Front (short-circuits); an unclaimed
    /// neighbor makes it Border; otherwise it is Interior.
    fn classify_held_hex(&self, hex: HexCoord) -> ThreatCategory {
        let mut category = ThreatCategory::Interior;
        for dir in 0..6 {
            let neighbor = match self.map.neighbor(hex, dir) {
                Some(n) => n,
                None => continue,
            };
            if !self.map.terrain(neighbor).passable() {
                continue;
            }
            match self.game.theater.combatant_force(self.map.occupier(neighbor)) {
                Some(force) if force != self.force => return ThreatCategory::Front,
                None => category = ThreatCategory::Border,
                Some(_) => {}
            }
        }
        category
    }

    /// Seed a front hex's info with the strength of its occupants.
    ///
    /// Only the side of the topmost detachment is summed: an enemy top unit
    /// seeds enemy attack, a friendly top unit seeds friendly defense. A
    /// mixed stack therefore undercounts the other side; downstream balance
    /// depends on this, so it is preserved.
    fn seed_front_strength(&mut self, hex: HexCoord) {
        let stack = self.map.detachments(hex);
        let top = match stack.first().and_then(|id| self.game.unit(*id)) {
            Some(unit) => unit,
            None => return,
        };
        if top.opposes(self.force) {
            let attack: f32 = stack
                .iter()
                .filter_map(|id| self.game.unit(*id))
                .filter(|unit| unit.opposes(self.force))
                .map(|unit| unit.attack)
                .sum();
            self.front_info_mut(hex).enemy_attack += attack;
        } else {
            let defense: f32 = stack
                .iter()
                .filter_map(|id| self.game.unit(*id))
                .filter(|unit| !unit.opposes(self.force))
                .map(|unit| unit.defense)
                .sum();
            self.front_info_mut(hex).friendly_attack += defense;
        }
    }

    /// Re-scan for impassable hexes whose terrain is specifically deep
    /// water, reclassify them, and resolve each contiguous body as it is
    /// first encountered.
    fn resolve_deep_water(&mut self) {
        for hex in self.map.hexes() {
            if self.threat.get(hex) == ThreatCategory::Impassable
                && self.map.terrain(hex).is_deep_water()
            {
                self.threat.set(hex, ThreatCategory::DeepWater);
                self.analyze_deep_water(hex);
            }
        }
    }

    /// Project strength from every detachment standing in a hex of the
    /// given category: enemy attack from EnemyTerritory origins, friendly
    /// defense from Interior origins.
    fn propagate_influence(&mut self, must_match: ThreatCategory) {
        let horizon = self.config.planning_horizon;
        if horizon == 0 {
            return;
        }
        let enemy = must_match == ThreatCategory::EnemyTerritory;
        let map = self.map;
        for hex in map.hexes() {
            if self.threat.get(hex) != must_match {
                continue;
            }
            for &id in map.detachments(hex) {
                let strength = match self.game.unit(id) {
                    Some(unit) if enemy => unit.attack,
                    Some(unit) => unit.defense,
                    None => continue,
                };
                let contributions = {
                    let mut sweep = InfluenceSweep::new(&self.threat, hex, strength, horizon);
                    visit(map, hex, horizon, self.config.influence_node_cap, &mut sweep);
                    sweep.into_contributions()
                };
                for (target, amount) in contributions {
                    let info = self.front_info_mut(target);
                    if enemy {
                        info.enemy_attack += amount;
                    } else {
                        info.friendly_attack += amount;
                    }
                }
            }
        }
    }

    /// Flanking support fix-up: every friendly unit standing on the front
    /// line grants a quarter of its defense to each adjacent empty Front
    /// hex.
    fn distribute_flank_support(&mut self) {
        let map = self.map;
        for hex in map.hexes() {
            if !matches!(
                self.threat.get(hex),
                ThreatCategory::Front | ThreatCategory::Coast | ThreatCategory::Border
            ) {
                continue;
            }
            for &id in map.detachments(hex) {
                let unit = match self.game.unit(id) {
                    Some(unit) => unit,
                    None => continue,
                };
                if unit.opposes(self.force) {
                    continue;
                }
                let support = unit.defense * self.config.flank_support_factor;
                for dir in 0..6 {
                    if let Some(neighbor) = map.neighbor(hex, dir) {
                        if self.threat.get(neighbor) == ThreatCategory::Front
                            && map.detachments(neighbor).is_empty()
                        {
                            self.front_info_mut(neighbor).friendly_attack += support;
                        }
                    }
                }
            }
        }
    }

    /// Informational per-category counts.
    fn log_category_counts(&self) {
        if !log_enabled!(Level::Debug) {
            return;
        }
        let mut counts = [0usize; 8];
        for (_, category) in self.threat.iter() {
            counts[*category as usize] += 1;
        }
        debug!(
            "threat categories: impassable={} deep_water={} neutral={} enemy={} interior={} border={} coast={} front={}",
            counts[ThreatCategory::Impassable as usize],
            counts[ThreatCategory::DeepWater as usize],
            counts[ThreatCategory::Neutral as usize],
            counts[ThreatCategory::EnemyTerritory as usize],
            counts[ThreatCategory::Interior as usize],
            counts[ThreatCategory::Border as usize],
            counts[ThreatCategory::Coast as usize],
            counts[ThreatCategory::Front as usize],
        );
    }
}
