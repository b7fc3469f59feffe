//! End-to-end scenarios for the per-force analysis pass.

use hexfront::constants::*;
use hexfront::terrain::{CellFlags, TerrainKind};
use hexfront::*;

const BLUE_OWNER: u8 = 1;
const RED_OWNER: u8 = 2;

struct Scenario {
    game: Game,
    map: HexMap,
    blue: ForceId,
    red: ForceId,
}

/// A width x height map fully claimed by Blue, with Red in the theater.
fn scenario(width: u16, height: u16, end_minute: u32) -> Scenario {
    let mut theater = Theater::new();
    let blue = theater.add_force("Blue");
    let red = theater.add_force("Red");
    theater.assign_owner(BLUE_OWNER, blue);
    theater.assign_owner(RED_OWNER, red);
    let game = Game::new(theater, end_minute);
    let mut map = HexMap::new(width, height);
    map.set_occupier_all(BLUE_OWNER);
    Scenario {
        game,
        map,
        blue,
        red,
    }
}

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

#[test]
fn enemy_held_center_makes_its_six_neighbors_front() {
    init_logs();
    let mut s = scenario(3, 3, 10_000);
    let center = HexCoord::new(1, 1);
    s.map.set_occupier(center, RED_OWNER);
    let red_unit = s.game.add_unit("red rifles", 7.0, 3.0, s.red);
    s.map.place_detachment(center, red_unit);

    let mut actor = Actor::new(&s.game, &s.map, s.blue, AnalysisConfig::default());
    actor.run();

    assert_eq!(actor.threat(center), ThreatCategory::EnemyTerritory);

    let fronts = [
        HexCoord::new(1, 0),
        HexCoord::new(2, 1),
        HexCoord::new(2, 2),
        HexCoord::new(1, 2),
        HexCoord::new(0, 2),
        HexCoord::new(0, 1),
    ];
    // One step of clear terrain from the enemy stack.
    let expected =
        7.0 * (PLANNING_HORIZON_MINUTES - 60) as f32 / PLANNING_HORIZON_MINUTES as f32;
    for hex in fronts {
        assert_eq!(actor.threat(hex), ThreatCategory::Front, "{:?}", hex);
        let info = actor.front_info(hex).expect("front hex must be touched");
        assert!(
            approx(info.enemy_attack, expected),
            "{:?}: {} != {}",
            hex,
            info.enemy_attack,
            expected
        );
    }

    // The two corners not adjacent to the center stay interior, untouched.
    for corner in [HexCoord::new(0, 0), HexCoord::new(2, 0)] {
        assert_eq!(actor.threat(corner), ThreatCategory::Interior);
        assert!(actor.front_info(corner).is_none());
    }
}

#[test]
fn impassable_terrain_is_never_given_a_political_category() {
    let mut s = scenario(4, 4, 10_000);
    s.map
        .set_cell(HexCoord::new(1, 1), TerrainKind::Mountain, CellFlags::NONE);
    s.map.set_occupier(HexCoord::new(3, 3), RED_OWNER);

    let mut actor = Actor::new(&s.game, &s.map, s.blue, AnalysisConfig::default());
    actor.run();

    assert_eq!(actor.threat(HexCoord::new(1, 1)), ThreatCategory::Impassable);
    // Neighbors of the mountain skip it when classifying and stay interior.
    assert_eq!(actor.threat(HexCoord::new(0, 0)), ThreatCategory::Interior);
}

#[test]
fn unclaimed_neighbors_make_border_but_enemy_takes_priority() {
    let mut s = scenario(3, 1, 10_000);
    s.map.set_occupier(HexCoord::new(0, 0), 0);
    s.map.set_occupier(HexCoord::new(2, 0), RED_OWNER);

    let mut actor = Actor::new(&s.game, &s.map, s.blue, AnalysisConfig::default());
    actor.run();

    // (1, 0) borders unclaimed ground on one side and the enemy on the
    // other; Front wins.
    assert_eq!(actor.threat(HexCoord::new(0, 0)), ThreatCategory::Neutral);
    assert_eq!(actor.threat(HexCoord::new(1, 0)), ThreatCategory::Front);

    // Without the enemy hex it is merely a border hex.
    let mut s = scenario(3, 1, 10_000);
    s.map.set_occupier(HexCoord::new(0, 0), 0);
    let mut actor = Actor::new(&s.game, &s.map, s.blue, AnalysisConfig::default());
    actor.run();
    assert_eq!(actor.threat(HexCoord::new(1, 0)), ThreatCategory::Border);
    assert_eq!(actor.threat(HexCoord::new(2, 0)), ThreatCategory::Interior);
}

#[test]
fn rerunning_without_map_changes_is_idempotent() {
    let mut s = scenario(5, 4, 2_000);
    for y in 0..4 {
        s.map.set_occupier(HexCoord::new(0, y), RED_OWNER);
    }
    let red_unit = s.game.add_unit("red guards", 6.0, 4.0, s.red);
    s.map.place_detachment(HexCoord::new(0, 1), red_unit);
    let blue_unit = s.game.add_unit("blue line", 3.0, 5.0, s.blue);
    s.map.place_detachment(HexCoord::new(1, 2), blue_unit);
    s.map.set_victory_points(HexCoord::new(3, 1), 40);

    let mut actor = Actor::new(&s.game, &s.map, s.blue, AnalysisConfig::default());
    actor.run();
    let threat_a: Vec<ThreatCategory> = s.map.hexes().map(|h| actor.threat(h)).collect();
    let mut front_a: Vec<(u16, FrontInfo)> = actor
        .front_hexes()
        .map(|(h, i)| (h.packed_repr(), i.clone()))
        .collect();
    front_a.sort_by_key(|(packed, _)| *packed);
    let stats_a = actor.stats();

    actor.run();
    let threat_b: Vec<ThreatCategory> = s.map.hexes().map(|h| actor.threat(h)).collect();
    let mut front_b: Vec<(u16, FrontInfo)> = actor
        .front_hexes()
        .map(|(h, i)| (h.packed_repr(), i.clone()))
        .collect();
    front_b.sort_by_key(|(packed, _)| *packed);

    assert_eq!(threat_a, threat_b);
    assert_eq!(front_a, front_b);
    assert_eq!(stats_a, actor.stats());
}

#[test]
fn dual_shore_water_body_turns_interior_shore_into_coast() {
    init_logs();
    let mut s = scenario(5, 5, 10_000);
    for y in 0..5 {
        s.map
            .set_cell(HexCoord::new(2, y), TerrainKind::DeepWater, CellFlags::NONE);
        s.map.set_occupier(HexCoord::new(3, y), RED_OWNER);
        s.map.set_occupier(HexCoord::new(4, y), RED_OWNER);
    }

    let mut actor = Actor::new(&s.game, &s.map, s.blue, AnalysisConfig::default());
    actor.run();

    for y in 0..5 {
        assert_eq!(
            actor.threat(HexCoord::new(2, y)),
            ThreatCategory::DeepWater
        );
        // The friendly shore must now be defended.
        assert_eq!(actor.threat(HexCoord::new(1, y)), ThreatCategory::Coast);
        assert_eq!(
            actor.threat(HexCoord::new(3, y)),
            ThreatCategory::EnemyTerritory
        );
    }
    // One column inland is still interior.
    assert_eq!(actor.threat(HexCoord::new(0, 2)), ThreatCategory::Interior);
}

#[test]
fn landlocked_lake_leaves_its_shore_interior() {
    let mut s = scenario(5, 5, 10_000);
    s.map
        .set_cell(HexCoord::new(2, 2), TerrainKind::DeepWater, CellFlags::NONE);

    let mut actor = Actor::new(&s.game, &s.map, s.blue, AnalysisConfig::default());
    actor.run();

    assert_eq!(actor.threat(HexCoord::new(2, 2)), ThreatCategory::DeepWater);
    for n in s.map.neighbors(HexCoord::new(2, 2)) {
        assert_eq!(actor.threat(n), ThreatCategory::Interior);
    }
}

#[test]
fn influence_decays_linearly_and_vanishes_at_the_horizon() {
    let mut s = scenario(2, 1, 10_000);
    s.map.set_occupier(HexCoord::new(0, 0), RED_OWNER);
    let red_unit = s.game.add_unit("red column", 10.0, 2.0, s.red);
    s.map.place_detachment(HexCoord::new(0, 0), red_unit);

    // One clear hex is 60 minutes away; at a 120-minute horizon it gets
    // half the attack value.
    let config = AnalysisConfig {
        planning_horizon: 120,
        ..Default::default()
    };
    let mut actor = Actor::new(&s.game, &s.map, s.blue, config);
    actor.run();
    let info = actor.front_info(HexCoord::new(1, 0)).unwrap();
    assert!(approx(info.enemy_attack, 5.0), "{}", info.enemy_attack);

    // At a horizon equal to the path cost the contribution decays to zero.
    let config = AnalysisConfig {
        planning_horizon: 60,
        ..Default::default()
    };
    let mut actor = Actor::new(&s.game, &s.map, s.blue, config);
    actor.run();
    let info = actor.front_info(HexCoord::new(1, 0)).unwrap();
    assert!(approx(info.enemy_attack, 0.0), "{}", info.enemy_attack);
}

#[test]
fn friendly_interior_units_project_defense_onto_the_front() {
    let mut s = scenario(4, 1, 10_000);
    s.map.set_occupier(HexCoord::new(0, 0), RED_OWNER);
    let blue_unit = s.game.add_unit("blue reserve", 2.0, 8.0, s.blue);
    // (2, 0) is interior: its neighbors (1, 0) and (3, 0) are both friendly.
    s.map.place_detachment(HexCoord::new(2, 0), blue_unit);

    let config = AnalysisConfig {
        planning_horizon: 120,
        ..Default::default()
    };
    let mut actor = Actor::new(&s.game, &s.map, s.blue, config);
    actor.run();

    assert_eq!(actor.threat(HexCoord::new(2, 0)), ThreatCategory::Interior);
    let info = actor.front_info(HexCoord::new(1, 0)).unwrap();
    assert!(approx(info.friendly_attack, 4.0), "{}", info.friendly_attack);
}

#[test]
fn seeds_only_the_side_of_the_top_detachment() {
    let mut s = scenario(2, 2, 10_000);
    s.map.set_occupier(HexCoord::new(0, 0), RED_OWNER);
    s.map.set_occupier(HexCoord::new(0, 1), RED_OWNER);

    let front_hex = HexCoord::new(1, 0);
    let blue_unit = s.game.add_unit("blue line", 3.0, 8.0, s.blue);
    let red_straggler = s.game.add_unit("red straggler", 9.0, 1.0, s.red);
    s.map.place_detachment(front_hex, blue_unit);
    s.map.place_detachment(front_hex, red_straggler);

    let mut actor = Actor::new(&s.game, &s.map, s.blue, AnalysisConfig::default());
    actor.run();

    assert_eq!(actor.threat(front_hex), ThreatCategory::Front);
    let info = actor.front_info(front_hex).unwrap();
    // Top of the stack is friendly, so only friendly defense is seeded; the
    // enemy straggler in the same stack is not counted anywhere.
    assert!(approx(info.friendly_attack, 8.0), "{}", info.friendly_attack);
    assert!(approx(info.enemy_attack, 0.0), "{}", info.enemy_attack);
}

#[test]
fn front_units_grant_flank_support_to_empty_front_neighbors() {
    let mut s = scenario(2, 2, 10_000);
    s.map.set_occupier(HexCoord::new(0, 0), RED_OWNER);
    s.map.set_occupier(HexCoord::new(0, 1), RED_OWNER);
    let blue_unit = s.game.add_unit("blue line", 3.0, 8.0, s.blue);
    s.map.place_detachment(HexCoord::new(1, 0), blue_unit);

    let mut actor = Actor::new(&s.game, &s.map, s.blue, AnalysisConfig::default());
    actor.run();

    assert_eq!(actor.threat(HexCoord::new(1, 1)), ThreatCategory::Front);
    let info = actor.front_info(HexCoord::new(1, 1)).unwrap();
    // No friendly interior units exist, so the only friendly contribution
    // is a quarter of the neighboring defender's value.
    assert!(approx(info.friendly_attack, 2.0), "{}", info.friendly_attack);
}

#[test]
fn victory_value_attributed_by_origin_side() {
    let mut s = scenario(3, 1, 1_000);
    s.map.set_occupier(HexCoord::new(0, 0), RED_OWNER);
    s.map.set_victory_points(HexCoord::new(0, 0), 50);
    s.map.set_victory_points(HexCoord::new(2, 0), 100);

    let mut actor = Actor::new(&s.game, &s.map, s.blue, AnalysisConfig::default());
    actor.run();

    let front_hex = HexCoord::new(1, 0);
    assert_eq!(actor.threat(front_hex), ThreatCategory::Front);
    let info = actor.front_info(front_hex).unwrap();
    // The enemy-held objective feeds enemy value, the friendly-held one
    // feeds friendly value, both decayed by 60 of 1000 minutes.
    assert!(approx(info.enemy_victory, 50.0 * 0.94), "{}", info.enemy_victory);
    assert!(
        approx(info.friendly_victory, 100.0 * 0.94),
        "{}",
        info.friendly_victory
    );

    let stats = actor.stats();
    assert!(approx(stats.min_friendly_vp, 100.0 * 0.94));
    assert!(approx(stats.max_friendly_vp, 100.0 * 0.94));
    assert!(approx(stats.min_enemy_vp, 50.0 * 0.94));
    assert!(approx(stats.max_enemy_vp, 50.0 * 0.94));
}

#[test]
fn objective_on_the_front_line_keeps_full_value() {
    let mut s = scenario(2, 1, 500);
    s.map.set_occupier(HexCoord::new(0, 0), RED_OWNER);
    s.map.set_victory_points(HexCoord::new(1, 0), 100);

    let mut actor = Actor::new(&s.game, &s.map, s.blue, AnalysisConfig::default());
    actor.run();

    let info = actor.front_info(HexCoord::new(1, 0)).unwrap();
    // Distance zero: decay factor 1.0.
    assert!(approx(info.friendly_victory, 100.0), "{}", info.friendly_victory);
}

#[test]
fn victory_propagation_skipped_when_scenario_has_ended() {
    let mut s = scenario(3, 1, 1_000);
    s.game.current_minute = 1_000;
    s.map.set_occupier(HexCoord::new(0, 0), RED_OWNER);
    s.map.set_victory_points(HexCoord::new(2, 0), 100);

    let mut actor = Actor::new(&s.game, &s.map, s.blue, AnalysisConfig::default());
    actor.run();

    // No propagation at all: the front hex was never touched by VP flow.
    let info = actor.front_info(HexCoord::new(1, 0));
    assert!(info.map_or(true, |i| approx(i.friendly_victory, 0.0)));
}

#[test]
fn strongest_defender_owns_an_occupied_front_hex() {
    let mut s = scenario(2, 1, 10_000);
    s.map.set_occupier(HexCoord::new(0, 0), RED_OWNER);
    let front_hex = HexCoord::new(1, 0);
    let weak = s.game.add_unit("weak", 1.0, 5.0, s.blue);
    let strong = s.game.add_unit("strong", 1.0, 8.0, s.blue);
    let rear = s.game.add_unit("rear", 1.0, 3.0, s.blue);
    s.map.place_detachment(front_hex, weak);
    s.map.place_detachment(front_hex, strong);
    s.map.place_detachment(front_hex, rear);

    let mut actor = Actor::new(&s.game, &s.map, s.blue, AnalysisConfig::default());
    actor.run();

    assert_eq!(actor.front_info(front_hex).unwrap().owner, Some(strong));
}

#[test]
fn ownership_ties_resolve_to_the_first_in_stack_order() {
    let mut s = scenario(2, 1, 10_000);
    s.map.set_occupier(HexCoord::new(0, 0), RED_OWNER);
    let front_hex = HexCoord::new(1, 0);
    let first = s.game.add_unit("first", 1.0, 8.0, s.blue);
    let second = s.game.add_unit("second", 1.0, 8.0, s.blue);
    s.map.place_detachment(front_hex, first);
    s.map.place_detachment(front_hex, second);

    let mut actor = Actor::new(&s.game, &s.map, s.blue, AnalysisConfig::default());
    actor.run();

    assert_eq!(actor.front_info(front_hex).unwrap().owner, Some(first));
}

#[test]
fn empty_front_hexes_inherit_the_nearest_owner_along_the_front() {
    init_logs();
    let mut s = scenario(2, 3, 10_000);
    for y in 0..3 {
        s.map.set_occupier(HexCoord::new(0, y), RED_OWNER);
    }
    // An enemy detachment so influence touches every front hex.
    let red_unit = s.game.add_unit("red column", 4.0, 2.0, s.red);
    s.map.place_detachment(HexCoord::new(0, 1), red_unit);
    let defender = s.game.add_unit("blue anchor", 2.0, 5.0, s.blue);
    s.map.place_detachment(HexCoord::new(1, 0), defender);

    let mut actor = Actor::new(&s.game, &s.map, s.blue, AnalysisConfig::default());
    actor.run();

    for y in 0..3 {
        let hex = HexCoord::new(1, y);
        assert_eq!(actor.threat(hex), ThreatCategory::Front);
        assert_eq!(
            actor.front_info(hex).unwrap().owner,
            Some(defender),
            "hex (1, {})",
            y
        );
    }
}

#[test]
fn isolated_front_pocket_is_left_unowned() {
    let mut s = scenario(2, 3, 10_000);
    for y in 0..3 {
        s.map.set_occupier(HexCoord::new(0, y), RED_OWNER);
    }
    let red_unit = s.game.add_unit("red column", 4.0, 2.0, s.red);
    s.map.place_detachment(HexCoord::new(0, 1), red_unit);
    // No friendly units anywhere: nothing to inherit from.

    let mut actor = Actor::new(&s.game, &s.map, s.blue, AnalysisConfig::default());
    actor.run();

    for y in 0..3 {
        let info = actor.front_info(HexCoord::new(1, y)).unwrap();
        assert_eq!(info.owner, None);
    }
}

#[test]
fn stats_ignore_values_accumulated_on_coast_and_border_hexes() {
    let mut s = scenario(5, 5, 1_000);
    for y in 0..5 {
        s.map
            .set_cell(HexCoord::new(2, y), TerrainKind::DeepWater, CellFlags::NONE);
        s.map.set_occupier(HexCoord::new(3, y), RED_OWNER);
        s.map.set_occupier(HexCoord::new(4, y), RED_OWNER);
    }
    s.map.set_victory_points(HexCoord::new(0, 2), 80);

    let mut actor = Actor::new(&s.game, &s.map, s.blue, AnalysisConfig::default());
    actor.run();

    // The water line means there are coast hexes but no front hexes; the
    // objective reaches the coast, yet the front statistics stay empty.
    let coast = HexCoord::new(1, 2);
    assert_eq!(actor.threat(coast), ThreatCategory::Coast);
    assert!(actor.front_info(coast).unwrap().friendly_victory > 0.0);
    assert_eq!(actor.stats(), FrontStats::default());
}
