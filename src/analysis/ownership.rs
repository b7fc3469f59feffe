//! Front ownership resolution.
//!
//! Every Front hex is attributed to a representative owning unit. Occupied
//! hexes take their strongest defender; empty hexes inherit the owner of
//! the nearest owned front hex, found by a best-first search that may only
//! move along the front line. A front pocket with no reachable owner stays
//! unowned, which consumers must tolerate.

use super::*;
use crate::constants::*;
use crate::forces::*;
use crate::grid::*;
use fnv::FnvHashMap;
use crate::location::*;
use crate::map::*;
use crate::visit::*;
use log::*;

impl<'a> Actor<'a> {
    /// Two-phase sweep over the hexes touched this cycle.
    pub fn calculate_front_ownership(&mut self) {
        let recorded: Vec<HexCoord> = self.front.keys().copied().collect();

        // Phase 1: occupied front hexes take the single detachment with the
        // highest defense value. Strict comparison, so ties resolve to the
        // first maximal unit in stack order.
        for &hex in &recorded {
            if self.threat.get(hex) != ThreatCategory::Front {
                continue;
            }
            let mut owner: Option<(UnitId, f32)> = None;
            for &id in self.map.detachments(hex) {
                if let Some(unit) = self.game.unit(id) {
                    let stronger = match owner {
                        None => true,
                        Some((_, best)) => unit.defense > best,
                    };
                    if stronger {
                        owner = Some((id, unit.defense));
                    }
                }
            }
            if let Some((id, _)) = owner {
                self.front_info_mut(hex).owner = Some(id);
            }
        }

        // Phase 2: empty front hexes inherit the owner of the first owned
        // hex in least-cumulative-cost order along the front line. Applied
        // immediately, so later origins can inherit through earlier ones.
        let mut inherited = 0usize;
        let mut isolated = 0usize;
        for &hex in &recorded {
            if self.threat.get(hex) != ThreatCategory::Front {
                continue;
            }
            if self.front.get(&hex).and_then(|info| info.owner).is_some() {
                continue;
            }
            let found = {
                let mut search = OwnershipSearch::new(&self.threat, &self.front, hex);
                visit(
                    self.map,
                    hex,
                    u32::MAX,
                    self.config.ownership_node_cap,
                    &mut search,
                );
                search.found
            };
            match found {
                Some(id) => {
                    self.front_info_mut(hex).owner = Some(id);
                    inherited += 1;
                }
                None => {
                    trace!(
                        "front hex ({}, {}) is an isolated pocket, left unowned",
                        hex.x(),
                        hex.y()
                    );
                    isolated += 1;
                }
            }
        }
        debug!(
            "front ownership: {} hexes inherited, {} isolated",
            inherited, isolated
        );
    }
}

/// Best-first search for the nearest owned front hex. Transitions off the
/// front line are forbidden outright; front transitions move at the road
/// rate.
struct OwnershipSearch<'g> {
    threat: &'g HexGrid<ThreatCategory>,
    front: &'g FnvHashMap<HexCoord, FrontInfo>,
    origin: HexCoord,
    found: Option<UnitId>,
}

impl<'g> OwnershipSearch<'g> {
    fn new(
        threat: &'g HexGrid<ThreatCategory>,
        front: &'g FnvHashMap<HexCoord, FrontInfo>,
        origin: HexCoord,
    ) -> Self {
        OwnershipSearch {
            threat,
            front,
            origin,
            found: None,
        }
    }
}

impl PathVisitor for OwnershipSearch<'_> {
    fn cost(&mut self, _map: &HexMap, _from: HexCoord, _dir: usize, to: HexCoord) -> u32 {
        if self.threat.get(to) == ThreatCategory::Front {
            ROAD_RATE_MINUTES
        } else {
            NO_PASSAGE
        }
    }

    /// Settled hexes arrive in increasing cost order, so the first owned
    /// one is the nearest.
    fn review(&mut self, _map: &HexMap, hex: HexCoord, _cost: u32) {
        if self.found.is_some() || hex == self.origin {
            return;
        }
        if let Some(info) = self.front.get(&hex) {
            if info.owner.is_some() {
                self.found = info.owner;
            }
        }
    }
}
