//! Forces, units, and the scenario clock.
//!
//! The theater maps political occupier ids (as stored on the map) to the
//! forces contesting the scenario. Units carry the combat values the
//! analysis engine projects; they are owned by the `Game` and referenced
//! everywhere else by `UnitId`.

use fnv::FnvHashMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Political occupier id as stored in the map's occupier grid. 0 = unclaimed.
pub type OwnerId = u8;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub struct ForceId(pub u16);

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub struct UnitId(Uuid);

/// One side of the scenario.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Force {
    pub id: ForceId,
    pub name: String,
}

/// Maps political occupiers to forces and holds the force roster.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Theater {
    forces: FnvHashMap<ForceId, Force>,
    combatants: FnvHashMap<OwnerId, ForceId>,
    next_force: u16,
}

impl Theater {
    pub fn new() -> Self {
        Theater::default()
    }

    pub fn add_force(&mut self, name: impl Into<String>) -> ForceId {
        let id = ForceId(self.next_force);
        self.next_force += 1;
        self.forces.insert(
            id,
            Force {
                id,
                name: name.into(),
            },
        );
        id
    }

    /// Declare that map hexes occupied by `owner` belong to `force`.
    pub fn assign_owner(&mut self, owner: OwnerId, force: ForceId) {
        self.combatants.insert(owner, force);
    }

    /// The force controlling a political occupier, if any. Unclaimed and
    /// unassigned occupiers resolve to `None`.
    pub fn combatant_force(&self, owner: OwnerId) -> Option<ForceId> {
        if owner == 0 {
            return None;
        }
        self.combatants.get(&owner).copied()
    }

    pub fn force(&self, id: ForceId) -> Option<&Force> {
        self.forces.get(&id)
    }
}

/// A combat unit. Attack and defense are the projected strengths the
/// influence propagator decays over distance.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub name: String,
    pub attack: f32,
    pub defense: f32,
    pub force: ForceId,
}

impl Unit {
    pub fn opposes(&self, force: ForceId) -> bool {
        self.force != force
    }
}

/// Scenario-level state: the theater, the unit roster, and the clock.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Game {
    pub theater: Theater,
    units: FnvHashMap<UnitId, Unit>,
    /// Current scenario time in minutes.
    pub current_minute: u32,
    /// Scenario end time in minutes.
    pub end_minute: u32,
}

impl Game {
    pub fn new(theater: Theater, end_minute: u32) -> Self {
        Game {
            theater,
            units: FnvHashMap::default(),
            current_minute: 0,
            end_minute,
        }
    }

    pub fn add_unit(
        &mut self,
        name: impl Into<String>,
        attack: f32,
        defense: f32,
        force: ForceId,
    ) -> UnitId {
        let id = UnitId(Uuid::new_v4());
        self.units.insert(
            id,
            Unit {
                id,
                name: name.into(),
                attack,
                defense,
                force,
            },
        );
        id
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(&id)
    }

    /// Minutes remaining until the scenario ends; zero once past the end.
    pub fn remaining_minutes(&self) -> u32 {
        self.end_minute.saturating_sub(self.current_minute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unclaimed_owner_has_no_force() {
        let mut theater = Theater::new();
        let force = theater.add_force("Blue");
        theater.assign_owner(1, force);
        assert_eq!(theater.combatant_force(0), None);
        assert_eq!(theater.combatant_force(1), Some(force));
        assert_eq!(theater.combatant_force(9), None);
    }

    #[test]
    fn opposition_is_force_inequality() {
        let mut theater = Theater::new();
        let blue = theater.add_force("Blue");
        let red = theater.add_force("Red");
        let mut game = Game::new(theater, 1000);
        let id = game.add_unit("1st Rifles", 4.0, 6.0, blue);
        let unit = game.unit(id).unwrap();
        assert!(unit.opposes(red));
        assert!(!unit.opposes(blue));
    }

    #[test]
    fn remaining_minutes_saturates() {
        let mut game = Game::new(Theater::new(), 100);
        game.current_minute = 250;
        assert_eq!(game.remaining_minutes(), 0);
    }
}
