//! Per-force territorial analysis.
//!
//! An `Actor` is bound to one (game, map, force) triple and classifies every
//! hex into a threat category, projects distance-decayed combat strength and
//! objective value onto the front line, and attributes each front hex to a
//! representative owning unit. `run` executes the passes in a fixed order:
//! release, threat classification (with deep-water resolution and influence
//! propagation), victory-value propagation, front ownership, statistics.
//!
//! The pass is synchronous and recomputed wholesale each decision cycle;
//! results are invalid once map or unit state changes.

mod influence;
mod ownership;
mod threat;
mod victory;
mod water;

use crate::constants::*;
use crate::forces::*;
use crate::grid::*;
use crate::location::*;
use crate::map::*;
use fnv::FnvHashMap;
use itertools::{Itertools, MinMaxResult};
use log::*;
use serde::{Deserialize, Serialize};

/// Coarse per-hex classification produced by the threat pass.
///
/// Interior, Border, Front, and Coast all denote hexes controlled by the
/// analyzed force, distinguished by what they border.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum ThreatCategory {
    /// Terrain no ground unit can enter.
    Impassable,
    /// Impassable deep water, split out for the water-body resolver.
    DeepWater,
    /// Unclaimed territory.
    Neutral,
    /// Controlled by an opposing force.
    EnemyTerritory,
    /// Friendly territory with no hostile or unclaimed neighbor.
    Interior,
    /// Friendly territory adjacent to unclaimed territory.
    Border,
    /// Friendly interior adjacent to a contested water body.
    Coast,
    /// Friendly territory adjacent to enemy territory.
    Front,
}

/// Accumulated per-hex analysis results, created lazily on first touch.
///
/// A record exists for a hex if and only if some classification,
/// propagation, or ownership step touched it this cycle.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FrontInfo {
    /// Distance-decayed attack strength projected by enemy detachments.
    pub enemy_attack: f32,
    /// Distance-decayed defense strength projected by friendly detachments.
    pub friendly_attack: f32,
    /// Objective value flowing from enemy-held hexes.
    pub enemy_victory: f32,
    /// Objective value flowing from friendly or neutral-side hexes.
    pub friendly_victory: f32,
    /// Representative owning unit, resolved last. `None` for isolated
    /// pockets that cannot reach any owned front hex.
    pub owner: Option<UnitId>,
}

/// Min/max victory values observed across Front-category hexes, for
/// downstream normalization. All zero when no front exists.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FrontStats {
    pub min_friendly_vp: f32,
    pub max_friendly_vp: f32,
    pub min_enemy_vp: f32,
    pub max_enemy_vp: f32,
}

/// Tunables for one analysis pass. Passed in explicitly so a pass is pure
/// and reproducible under test.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Influence propagation horizon in minutes of movement cost.
    pub planning_horizon: u32,
    /// Node-visit cap for influence and victory propagation.
    pub influence_node_cap: usize,
    /// Node-visit cap for the front-ownership search.
    pub ownership_node_cap: usize,
    /// Fraction of a defender's value granted to empty front neighbors.
    pub flank_support_factor: f32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            planning_horizon: PLANNING_HORIZON_MINUTES,
            influence_node_cap: INFLUENCE_NODE_CAP,
            ownership_node_cap: OWNERSHIP_NODE_CAP,
            flank_support_factor: FLANK_SUPPORT_FACTOR,
        }
    }
}

/// One force's situational-awareness pass over the map.
///
/// The actor owns its dense category grid and sparse front-info map; it
/// holds only shared references to the game, map, and units, which must not
/// be mutated while a pass runs.
pub struct Actor<'a> {
    pub(crate) game: &'a Game,
    pub(crate) map: &'a HexMap,
    pub(crate) force: ForceId,
    pub(crate) config: AnalysisConfig,
    pub(crate) threat: HexGrid<ThreatCategory>,
    pub(crate) front: FnvHashMap<HexCoord, FrontInfo>,
    pub(crate) stats: FrontStats,
}

impl<'a> Actor<'a> {
    pub fn new(game: &'a Game, map: &'a HexMap, force: ForceId, config: AnalysisConfig) -> Self {
        Actor {
            game,
            map,
            force,
            config,
            threat: HexGrid::new(map.width(), map.height(), ThreatCategory::Impassable),
            front: FnvHashMap::default(),
            stats: FrontStats::default(),
        }
    }

    /// Run one full analysis cycle.
    pub fn run(&mut self) {
        debug!("analysis pass for force {:?}", self.force);
        self.release();
        self.compute_threat();
        self.calculate_vp_values();
        self.calculate_front_ownership();
        self.compute_stats();
    }

    /// Reset all per-cycle state ahead of a new pass.
    pub fn release(&mut self) {
        self.threat.fill(ThreatCategory::Impassable);
        self.front.clear();
        self.stats = FrontStats::default();
    }

    pub fn force(&self) -> ForceId {
        self.force
    }

    pub fn threat(&self, hex: HexCoord) -> ThreatCategory {
        self.threat.get(hex)
    }

    pub fn front_info(&self, hex: HexCoord) -> Option<&FrontInfo> {
        self.front.get(&hex)
    }

    /// All hexes touched this cycle, in no particular order.
    pub fn front_hexes(&self) -> impl Iterator<Item = (HexCoord, &FrontInfo)> {
        self.front.iter().map(|(hex, info)| (*hex, info))
    }

    pub fn stats(&self) -> FrontStats {
        self.stats
    }

    /// Fetch or lazily create the front-info record for a hex.
    pub(crate) fn front_info_mut(&mut self, hex: HexCoord) -> &mut FrontInfo {
        self.front.entry(hex).or_default()
    }

    fn compute_stats(&mut self) {
        let friendly = minmax(
            self.front
                .iter()
                .filter(|(hex, _)| self.threat.get(**hex) == ThreatCategory::Front)
                .map(|(_, info)| info.friendly_victory),
        );
        let enemy = minmax(
            self.front
                .iter()
                .filter(|(hex, _)| self.threat.get(**hex) == ThreatCategory::Front)
                .map(|(_, info)| info.enemy_victory),
        );
        self.stats = FrontStats {
            min_friendly_vp: friendly.0,
            max_friendly_vp: friendly.1,
            min_enemy_vp: enemy.0,
            max_enemy_vp: enemy.1,
        };
        debug!(
            "front stats: friendly vp [{:.1}, {:.1}], enemy vp [{:.1}, {:.1}]",
            friendly.0, friendly.1, enemy.0, enemy.1
        );
    }
}

/// Min and max of an f32 stream; (0, 0) when empty.
fn minmax(values: impl Iterator<Item = f32>) -> (f32, f32) {
    match values.minmax_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal)) {
        MinMaxResult::NoElements => (0.0, 0.0),
        MinMaxResult::OneElement(v) => (v, v),
        MinMaxResult::MinMax(min, max) => (min, max),
    }
}
