//! Fixed-tag, fixed-shape move codec.
//!
//! Each variant registers its move type under a distinct event tag. Payloads
//! are bincode with fixed-width little-endian integers, so a move always
//! serializes to the same number of bytes.

use crate::WireError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::instrument;

/// A move that can travel over the relay's event channel.
pub trait WireMove: Serialize + DeserializeOwned + std::fmt::Debug {
    /// Event tag used to demultiplex inbound events.
    const TAG: u8;

    /// Serializes the move into an event payload.
    #[instrument(level = "trace")]
    fn encode(&self) -> Result<Vec<u8>, WireError> {
        bincode::serialize(self).map_err(|e| WireError::Encode(e.to_string()))
    }

    /// Deserializes a move from an event carrying `tag`.
    #[instrument(level = "trace", skip(payload), fields(len = payload.len()))]
    fn decode(tag: u8, payload: &[u8]) -> Result<Self, WireError> {
        if tag != Self::TAG {
            return Err(WireError::UnexpectedTag {
                expected: Self::TAG,
                found: tag,
            });
        }
        bincode::deserialize(payload).map_err(|e| WireError::Decode(e.to_string()))
    }
}
