//! Damage crosses sessions: the shooter's process forwards a request, the
//! victim's process applies it, and the kill flows back as credit.

mod common;

use arena_fps::match_flow::{MatchRoster, RespawnTimer};
use arena_fps::net::{PropertyKey, PropertyStore, Session};
use arena_fps::player::{request_damage, Dead, Health};

use common::{paired_apps, player_entity, settle, ANNA, BO};

#[test]
fn damage_is_applied_on_the_victims_process() {
    let (mut anna, mut bo) = paired_apps();
    settle(&mut anna, &mut bo, 3);

    let victim = player_entity(&bo, BO);

    {
        let mut session = anna.world_mut().resource_mut::<Session>();
        request_damage(&mut *session, BO, 30.0);
    }
    settle(&mut anna, &mut bo, 2);

    let health = bo.world().entity(victim).get::<Health>().unwrap();
    assert_eq!(health.current, 70.0);
    assert!(bo.world().entity(victim).get::<Dead>().is_none());

    // The shooter's local copy never mutates; health does not replicate.
    let remote_copy = player_entity(&anna, BO);
    let remote_health = anna.world().entity(remote_copy).get::<Health>().unwrap();
    assert_eq!(remote_health.current, 100.0);
}

#[test]
fn overkill_leaves_negative_health_and_credits_the_shooter() {
    let (mut anna, mut bo) = paired_apps();
    settle(&mut anna, &mut bo, 3);

    let victim = player_entity(&bo, BO);

    {
        let mut session = anna.world_mut().resource_mut::<Session>();
        request_damage(&mut *session, BO, 30.0);
    }
    settle(&mut anna, &mut bo, 2);
    {
        let mut session = anna.world_mut().resource_mut::<Session>();
        request_damage(&mut *session, BO, 80.0);
    }
    settle(&mut anna, &mut bo, 5);

    // No floor on health: 100 - 30 - 80 stays at -10 until respawn.
    let health = bo.world().entity(victim).get::<Health>().unwrap();
    assert_eq!(health.current, -10.0);
    assert!(bo.world().entity(victim).get::<Dead>().is_some());
    assert!(bo.world().entity(victim).get::<RespawnTimer>().is_some());

    // Victim's process counted one death and published the tally.
    let roster = bo.world().resource::<MatchRoster>();
    assert_eq!(roster.record(BO).unwrap().deaths, 1);
    let anna_store = anna.world().resource::<PropertyStore>();
    assert_eq!(anna_store.get_int(BO, PropertyKey::Deaths), Some(1));

    // Credit went to the sender of the lethal directive and replicated out.
    let anna_roster = anna.world().resource::<MatchRoster>();
    assert_eq!(anna_roster.record(ANNA).unwrap().kills, 1);
    let bo_store = bo.world().resource::<PropertyStore>();
    assert_eq!(bo_store.get_int(ANNA, PropertyKey::Kills), Some(1));
}

#[test]
fn two_lethal_directives_in_one_drain_die_once() {
    let (mut anna, mut bo) = paired_apps();
    settle(&mut anna, &mut bo, 3);

    let victim = player_entity(&bo, BO);

    // Both directives leave in a single outbox drain and arrive in the
    // same tick on the victim's process.
    {
        let mut session = anna.world_mut().resource_mut::<Session>();
        request_damage(&mut *session, BO, 120.0);
        request_damage(&mut *session, BO, 110.0);
    }
    settle(&mut anna, &mut bo, 5);

    // Both applied, one death, one credit.
    let health = bo.world().entity(victim).get::<Health>().unwrap();
    assert_eq!(health.current, -130.0);
    assert!(bo.world().entity(victim).get::<Dead>().is_some());
    let roster = bo.world().resource::<MatchRoster>();
    assert_eq!(roster.record(BO).unwrap().deaths, 1);
    let anna_roster = anna.world().resource::<MatchRoster>();
    assert_eq!(anna_roster.record(ANNA).unwrap().kills, 1);
}

#[test]
fn a_dead_entity_dies_only_once() {
    let (mut anna, mut bo) = paired_apps();
    settle(&mut anna, &mut bo, 3);

    let victim = player_entity(&bo, BO);

    {
        let mut session = anna.world_mut().resource_mut::<Session>();
        request_damage(&mut *session, BO, 150.0);
    }
    settle(&mut anna, &mut bo, 5);
    {
        // A second lethal directive after death.
        let mut session = anna.world_mut().resource_mut::<Session>();
        request_damage(&mut *session, BO, 25.0);
    }
    settle(&mut anna, &mut bo, 5);

    let health = bo.world().entity(victim).get::<Health>().unwrap();
    assert_eq!(health.current, -75.0);

    // No second death, no second credit.
    let roster = bo.world().resource::<MatchRoster>();
    assert_eq!(roster.record(BO).unwrap().deaths, 1);
    let anna_roster = anna.world().resource::<MatchRoster>();
    assert_eq!(anna_roster.record(ANNA).unwrap().kills, 1);
}
