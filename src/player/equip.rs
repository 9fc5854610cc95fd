//! Equipped-item state machine and its replication.
//!
//! The transition rule is a pure function; systems wrap it twice with a
//! deliberate asymmetry: the owner's process applies input triggers and
//! publishes the result through the property store, while replicas never
//! originate a transition and only apply property updates for their
//! entity's owner. One writer per register means the state converges to
//! whatever the owner last published with no conflict resolution.

use bevy::input::mouse::MouseWheel;
use bevy::prelude::*;

use super::components::{Dead, Player};
use crate::net::{
    publish_property, Authority, PropertiesChanged, PropertyKey, PropertyStore, PropertyValue,
    Replicated, Session,
};

/// Fixed item slots of a player entity, one child entity per slot.
#[derive(Component, Debug)]
pub struct ItemSlots {
    slots: Vec<Entity>,
    equipped: Option<usize>,
}

impl ItemSlots {
    pub fn new(slots: Vec<Entity>) -> Self {
        Self {
            slots,
            equipped: None,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn equipped(&self) -> Option<usize> {
        self.equipped
    }

    pub fn slot(&self, index: usize) -> Option<Entity> {
        self.slots.get(index).copied()
    }

    /// Entity of the currently equipped slot, if any.
    pub fn equipped_entity(&self) -> Option<Entity> {
        self.equipped.and_then(|i| self.slot(i))
    }
}

/// What asked for an equip change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquipTrigger {
    /// Explicit slot selection (numeric key).
    Select(usize),
    /// Scroll-wheel cycling, wrapping modulo slot count.
    CycleForward,
    CycleBackward,
}

/// The visual effect of an accepted transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EquipTransition {
    /// Previously equipped slot to deactivate, absent on the first equip.
    pub hide: Option<usize>,
    /// Slot to activate and record as equipped.
    pub show: usize,
}

/// Decide the transition for a trigger, or `None` when nothing changes.
///
/// Re-selecting the equipped slot is an accepted no-op; an out-of-range
/// selection is rejected before any state change.
pub fn equip_transition(
    equipped: Option<usize>,
    trigger: EquipTrigger,
    slot_count: usize,
) -> Option<EquipTransition> {
    if slot_count == 0 {
        return None;
    }
    let target = match trigger {
        EquipTrigger::Select(index) => {
            if index >= slot_count {
                return None;
            }
            index
        }
        EquipTrigger::CycleForward => equipped.map_or(0, |i| (i + 1) % slot_count),
        EquipTrigger::CycleBackward => equipped.map_or(0, |i| (i + slot_count - 1) % slot_count),
    };
    if equipped == Some(target) {
        return None;
    }
    Some(EquipTransition {
        hide: equipped,
        show: target,
    })
}

/// Flip slot visuals and record the new equipped index.
fn apply_transition(
    slots: &mut ItemSlots,
    transition: EquipTransition,
    visibility: &mut Query<&mut Visibility>,
) {
    if let Some(hide) = transition.hide.and_then(|i| slots.slot(i)) {
        if let Ok(mut vis) = visibility.get_mut(hide) {
            *vis = Visibility::Hidden;
        }
    }
    if let Some(show) = slots.slot(transition.show) {
        if let Ok(mut vis) = visibility.get_mut(show) {
            *vis = Visibility::Inherited;
        }
    }
    slots.equipped = Some(transition.show);
}

/// Equip slot 0 on freshly spawned authoritative entities and publish it,
/// so replicas on other processes converge to the starting loadout.
pub fn equip_first_slot(
    mut session: ResMut<Session>,
    mut players: Query<(&Authority, &mut ItemSlots), (With<Player>, Added<ItemSlots>)>,
    mut visibility: Query<&mut Visibility>,
) {
    for (authority, mut slots) in players.iter_mut() {
        if *authority != Authority::Authoritative {
            continue;
        }
        if let Some(transition) =
            equip_transition(slots.equipped(), EquipTrigger::Select(0), slots.len())
        {
            apply_transition(&mut slots, transition, &mut visibility);
            publish_property(
                &mut session,
                PropertyKey::EquippedItem,
                PropertyValue::Int(transition.show as i64),
            );
        }
    }
}

/// Translate slot keys and scroll wheel into transitions on the
/// authoritative entity, publishing each accepted change.
pub fn equip_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut wheel: EventReader<MouseWheel>,
    mut session: ResMut<Session>,
    mut players: Query<(&Authority, &mut ItemSlots), (With<Player>, Without<Dead>)>,
    mut visibility: Query<&mut Visibility>,
) {
    const SLOT_KEYS: [KeyCode; 9] = [
        KeyCode::Digit1,
        KeyCode::Digit2,
        KeyCode::Digit3,
        KeyCode::Digit4,
        KeyCode::Digit5,
        KeyCode::Digit6,
        KeyCode::Digit7,
        KeyCode::Digit8,
        KeyCode::Digit9,
    ];

    let mut triggers: Vec<EquipTrigger> = Vec::new();
    for (index, key) in SLOT_KEYS.iter().enumerate() {
        if keyboard.just_pressed(*key) {
            triggers.push(EquipTrigger::Select(index));
            break;
        }
    }
    let scroll: f32 = wheel.read().map(|event| event.y).sum();
    if scroll > 0.0 {
        triggers.push(EquipTrigger::CycleForward);
    } else if scroll < 0.0 {
        triggers.push(EquipTrigger::CycleBackward);
    }
    if triggers.is_empty() {
        return;
    }

    for (authority, mut slots) in players.iter_mut() {
        if *authority != Authority::Authoritative {
            continue;
        }
        for trigger in &triggers {
            let Some(transition) = equip_transition(slots.equipped(), *trigger, slots.len())
            else {
                continue;
            };
            apply_transition(&mut slots, transition, &mut visibility);
            publish_property(
                &mut session,
                PropertyKey::EquippedItem,
                PropertyValue::Int(transition.show as i64),
            );
        }
    }
}

/// Apply equip property updates to replica entities.
///
/// Only updates belonging to the entity's owning participant are applied,
/// and the latest stored value wins regardless of how many intermediate
/// updates this process missed.
pub fn apply_equip_updates(
    mut changes: EventReader<PropertiesChanged>,
    store: Res<PropertyStore>,
    mut replicas: Query<(&Authority, &Replicated, &mut ItemSlots), With<Player>>,
    mut visibility: Query<&mut Visibility>,
) {
    for change in changes.read() {
        if !change.changed.contains(&PropertyKey::EquippedItem) {
            continue;
        }
        for (authority, replicated, mut slots) in replicas.iter_mut() {
            if *authority != Authority::Replica || replicated.owner != change.participant {
                continue;
            }
            let Some(raw) = store.get_int(change.participant, PropertyKey::EquippedItem) else {
                continue;
            };
            let Ok(index) = usize::try_from(raw) else {
                warn!("ignoring negative equip index {raw} from {:?}", change.participant);
                continue;
            };
            if index >= slots.len() {
                warn!(
                    "ignoring equip index {index} beyond {} slots from {:?}",
                    slots.len(),
                    change.participant
                );
                continue;
            }
            if let Some(transition) =
                equip_transition(slots.equipped(), EquipTrigger::Select(index), slots.len())
            {
                apply_transition(&mut slots, transition, &mut visibility);
            }
        }
    }
}
