//! Falling out of the world kills the local entity with no killer, so the
//! death is counted but nobody receives credit.

mod common;

use bevy::prelude::*;

use arena_fps::match_flow::MatchRoster;
use arena_fps::net::{PropertyKey, PropertyStore};
use arena_fps::player::{Dead, Health};

use common::{paired_apps, player_entity, settle, ANNA, BO};

#[test]
fn falling_below_the_floor_is_an_uncredited_death() {
    let (mut anna, mut bo) = paired_apps();
    settle(&mut anna, &mut bo, 3);

    let faller = player_entity(&anna, ANNA);
    anna.world_mut()
        .entity_mut(faller)
        .get_mut::<Transform>()
        .unwrap()
        .translation
        .y = -50.0;

    settle(&mut anna, &mut bo, 4);

    assert!(anna.world().entity(faller).get::<Dead>().is_some());
    // The hazard kills outright without draining health.
    let health = anna.world().entity(faller).get::<Health>().unwrap();
    assert_eq!(health.current, 100.0);

    let roster = anna.world().resource::<MatchRoster>();
    assert_eq!(roster.record(ANNA).unwrap().deaths, 1);

    // Death tally replicates, but no kill is credited anywhere.
    let bo_store = bo.world().resource::<PropertyStore>();
    assert_eq!(bo_store.get_int(ANNA, PropertyKey::Deaths), Some(1));
    let bo_roster = bo.world().resource::<MatchRoster>();
    assert_eq!(bo_roster.record(BO).unwrap().kills, 0);
    assert_eq!(roster.record(ANNA).unwrap().kills, 0);
}
