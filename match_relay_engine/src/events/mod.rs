//! Provider notifications, decoded once at the boundary into exhaustive sum types.
//!
//! The delivery envelope is unwrapped by the server. What arrives here is the `detail` object of the inner message,
//! which carries a `type` discriminator and an event-specific payload.
mod errors;
mod matchmaking;
mod placement;

pub use errors::EventDecodeError;
pub use matchmaking::{GameSessionInfo, MatchmakingEvent, MatchmakingNotification};
pub use placement::{PlacementEvent, PlacementNotification};
use serde_json::Value;

/// Reads the `type` discriminator of a notification `detail` object.
pub fn event_type(detail: &Value) -> Result<&str, EventDecodeError> {
    detail.get("type").and_then(Value::as_str).ok_or(EventDecodeError::MissingField("type"))
}
