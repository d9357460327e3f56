use serde_json::Value;

use super::{event_type, EventDecodeError};

pub const PLACEMENT_FULFILLED: &str = "PlacementFulfilled";

#[derive(Debug, Clone, PartialEq)]
pub enum PlacementEvent {
    Fulfilled { placement_id: String },
    /// `PlacementCancelled`, `PlacementTimedOut`, `PlacementFailed` and anything else the queue reports. None of these
    /// produce a session directory entry.
    Other(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacementNotification {
    pub event: PlacementEvent,
    /// The raw `detail` object. It becomes part of the stored session document.
    pub detail: Value,
}

impl PlacementNotification {
    pub fn from_detail(detail: Value) -> Result<Self, EventDecodeError> {
        let event = match event_type(&detail)? {
            PLACEMENT_FULFILLED => {
                let placement_id = detail
                    .get("placementId")
                    .and_then(Value::as_str)
                    .filter(|s| !s.is_empty())
                    .ok_or(EventDecodeError::MissingField("placementId"))?;
                PlacementEvent::Fulfilled { placement_id: placement_id.to_string() }
            },
            other => PlacementEvent::Other(other.to_string()),
        };
        Ok(Self { event, detail })
    }
}
