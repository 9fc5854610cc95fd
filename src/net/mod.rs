//! Session layer: participants, authority, directives, replicated
//! properties, and the transport boundary.

mod codec;
mod directive;
mod plugin;
mod properties;
mod session;
mod transport;

pub use codec::{decode_envelope, encode_envelope, CodecError};
pub use directive::Directive;
pub use plugin::{publish_property, NetPlugin, NetSet};
pub use properties::{
    PropertiesChanged, PropertyError, PropertyKey, PropertyStore, PropertyValue,
};
pub use session::{
    Authority, Delivery, DirectiveReceived, Envelope, Participant, ParticipantId, Replicated,
    Session,
};
pub use transport::{LoopbackTransport, NetLink, Transport, TrySendError};
