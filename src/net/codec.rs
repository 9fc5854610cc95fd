//! Wire format for envelopes crossing the transport.
//!
//! One frame carries exactly one envelope; a frame that decodes short or
//! leaves trailing bytes is rejected whole.

use thiserror::Error;

use super::session::Envelope;

/// Errors from framing envelopes.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The envelope would not serialize.
    #[error("envelope failed to encode: {0}")]
    Encode(#[from] bincode::error::EncodeError),

    /// The received bytes are not a valid envelope.
    #[error("bytes are not a valid envelope: {0}")]
    Decode(#[from] bincode::error::DecodeError),

    /// A valid envelope followed by bytes that belong to no envelope.
    #[error("envelope used {used} of {len} frame bytes")]
    TrailingBytes { used: usize, len: usize },
}

/// Encode one envelope into a frame.
pub fn encode_envelope(envelope: &Envelope) -> Result<Vec<u8>, CodecError> {
    Ok(bincode::serde::encode_to_vec(
        envelope,
        bincode::config::standard(),
    )?)
}

/// Decode one frame into its envelope.
pub fn decode_envelope(data: &[u8]) -> Result<Envelope, CodecError> {
    let (envelope, used) =
        bincode::serde::decode_from_slice(data, bincode::config::standard())?;
    if used != data.len() {
        return Err(CodecError::TrailingBytes {
            used,
            len: data.len(),
        });
    }
    Ok(envelope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::{Delivery, Directive, ParticipantId};

    #[test]
    fn damage_envelope_roundtrip() {
        let envelope = Envelope {
            from: ParticipantId(3),
            delivery: Delivery::To(ParticipantId(7)),
            directive: Directive::TakeDamage { amount: 30.0 },
        };
        let bytes = encode_envelope(&envelope).unwrap();
        assert_eq!(decode_envelope(&bytes).unwrap(), envelope);
    }

    #[test]
    fn every_directive_kind_roundtrips() {
        use crate::net::{PropertyKey, PropertyValue};

        let directives = [
            Directive::TakeDamage { amount: 12.5 },
            Directive::KillCredit,
            Directive::Impact {
                point: [1.0, 2.0, 3.0],
                normal: [0.0, 1.0, 0.0],
            },
            Directive::SetProperty {
                key: PropertyKey::EquippedItem,
                value: PropertyValue::Int(2),
            },
        ];
        for directive in directives {
            let envelope = Envelope {
                from: ParticipantId(5),
                delivery: Delivery::All,
                directive,
            };
            let bytes = encode_envelope(&envelope).unwrap();
            assert_eq!(decode_envelope(&bytes).unwrap(), envelope);
        }
    }

    #[test]
    fn truncated_bytes_are_a_decode_error() {
        let envelope = Envelope {
            from: ParticipantId(1),
            delivery: Delivery::All,
            directive: Directive::Impact {
                point: [1.0, 2.0, 3.0],
                normal: [0.0, 1.0, 0.0],
            },
        };
        let bytes = encode_envelope(&envelope).unwrap();
        assert!(matches!(
            decode_envelope(&bytes[..bytes.len() - 1]),
            Err(CodecError::Decode(_))
        ));
    }

    #[test]
    fn trailing_bytes_fail_the_whole_frame() {
        let envelope = Envelope {
            from: ParticipantId(2),
            delivery: Delivery::All,
            directive: Directive::KillCredit,
        };
        let mut bytes = encode_envelope(&envelope).unwrap();
        bytes.push(0);
        assert!(matches!(
            decode_envelope(&bytes),
            Err(CodecError::TrailingBytes { .. })
        ));
    }
}
