//! Net plugin - session events, transport pumps, and property application.

use bevy::prelude::*;

use super::codec;
use super::directive::Directive;
use super::properties::{PropertiesChanged, PropertyStore};
use super::session::{Delivery, DirectiveReceived, Session};
use super::transport::NetLink;

/// Ordering inside `PreUpdate`: move bytes first, then fold property
/// directives into the store so `Update` systems observe a settled view.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum NetSet {
    Pump,
    Apply,
}

/// Net plugin - must be added before any plugin that sends or receives
/// directives.
///
/// The plugin does not open a session itself; the demo binary (or a test)
/// inserts a [`Session`] and a [`NetLink`] once membership is known. All
/// systems no-op until then.
pub struct NetPlugin;

impl Plugin for NetPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PropertyStore>()
            .add_event::<DirectiveReceived>()
            .add_event::<PropertiesChanged>()
            .configure_sets(PreUpdate, (NetSet::Pump, NetSet::Apply).chain())
            .add_systems(
                PreUpdate,
                (pump_outbox, pump_inbox)
                    .chain()
                    .in_set(NetSet::Pump)
                    .run_if(resource_exists::<Session>),
            )
            .add_systems(
                PreUpdate,
                apply_property_directives
                    .in_set(NetSet::Apply)
                    .run_if(resource_exists::<Session>),
            );
    }
}

/// Drain the session outbox: deliver self-addressed envelopes immediately
/// and hand everything with a remote audience to the transport.
fn pump_outbox(
    mut session: ResMut<Session>,
    link: Option<Res<NetLink>>,
    mut received: EventWriter<DirectiveReceived>,
) {
    for envelope in session.drain_outbox() {
        let local = session.local_id();
        let (deliver_here, deliver_remote) = match envelope.delivery {
            Delivery::All => (true, true),
            Delivery::To(target) => (target == local, target != local),
        };

        if deliver_here {
            received.send(DirectiveReceived {
                from: envelope.from,
                directive: envelope.directive.clone(),
            });
        }

        if deliver_remote {
            let Some(link) = link.as_ref() else {
                debug!("no transport attached, dropping {:?}", envelope.directive);
                continue;
            };
            match codec::encode_envelope(&envelope) {
                Ok(bytes) => {
                    if let Err(err) = link.transport.try_send(bytes) {
                        warn!("transport refused envelope: {err:?}");
                    }
                }
                Err(err) => error!("failed to encode envelope: {err}"),
            }
        }
    }
}

/// Decode incoming bytes into directive events addressed to this process.
fn pump_inbox(
    session: Res<Session>,
    link: Option<Res<NetLink>>,
    mut received: EventWriter<DirectiveReceived>,
) {
    let Some(link) = link else {
        return;
    };
    while let Some(bytes) = link.transport.try_recv() {
        let envelope = match codec::decode_envelope(&bytes) {
            Ok(envelope) => envelope,
            Err(err) => {
                warn!("dropping undecodable envelope: {err}");
                continue;
            }
        };
        match envelope.delivery {
            Delivery::To(target) if !session.is_local(target) => continue,
            _ => {}
        }
        received.send(DirectiveReceived {
            from: envelope.from,
            directive: envelope.directive,
        });
    }
}

/// Fold `SetProperty` directives into the store and notify readers.
///
/// The envelope sender is the owner of the written key by construction, so
/// a write can never fail here; the guard stays for misrouted traffic.
fn apply_property_directives(
    mut received: EventReader<DirectiveReceived>,
    mut store: ResMut<PropertyStore>,
    mut changed: EventWriter<PropertiesChanged>,
) {
    for event in received.read() {
        let Directive::SetProperty { key, value } = &event.directive else {
            continue;
        };
        match store.set(event.from, event.from, *key, value.clone()) {
            Ok(()) => {
                changed.send(PropertiesChanged {
                    participant: event.from,
                    changed: vec![*key],
                });
            }
            Err(err) => warn!("rejected property write: {err}"),
        }
    }
}

/// Publish a property of the local participant: apply it locally and
/// broadcast it so every other process converges to this value.
///
/// The broadcast also loops back to this process, which re-applies the same
/// value idempotently and fires the local change notification.
pub fn publish_property(
    session: &mut Session,
    key: super::properties::PropertyKey,
    value: super::properties::PropertyValue,
) {
    session.send_all(Directive::SetProperty { key, value });
}
