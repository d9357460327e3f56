use std::fmt::Display;

use serde::Deserialize;
use serde_json::Value;

use super::{event_type, EventDecodeError};

pub const MATCHMAKING_SEARCHING: &str = "MatchmakingSearching";
pub const POTENTIAL_MATCH_CREATED: &str = "PotentialMatchCreated";
pub const MATCHMAKING_SUCCEEDED: &str = "MatchmakingSucceeded";
pub const MATCHMAKING_TIMED_OUT: &str = "MatchmakingTimedOut";
pub const MATCHMAKING_CANCELLED: &str = "MatchmakingCancelled";

/// Where the players of a successful match should connect.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSessionInfo {
    pub game_session_arn: String,
    pub ip_address: String,
    pub port: i64,
}

/// A matchmaking event. Every ticket listed in the notification is subject to the same event.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchmakingEvent {
    Searching,
    PotentialMatchCreated { match_id: String, acceptance_required: bool },
    Succeeded { match_id: String, game_session: GameSessionInfo },
    TimedOut,
    Cancelled,
    /// Event types with no effect on the ticket projection, e.g. `AcceptMatch` or `MatchmakingFailed`.
    Unknown(String),
}

impl Display for MatchmakingEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Searching => f.write_str(MATCHMAKING_SEARCHING),
            Self::PotentialMatchCreated { .. } => f.write_str(POTENTIAL_MATCH_CREATED),
            Self::Succeeded { .. } => f.write_str(MATCHMAKING_SUCCEEDED),
            Self::TimedOut => f.write_str(MATCHMAKING_TIMED_OUT),
            Self::Cancelled => f.write_str(MATCHMAKING_CANCELLED),
            Self::Unknown(t) => write!(f, "{t} (unhandled)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchmakingNotification {
    pub event: MatchmakingEvent,
    /// One entry per element of the `tickets` array. Entries are decoded independently so that a malformed entry
    /// does not hide its siblings.
    pub tickets: Vec<Result<String, EventDecodeError>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PotentialMatchPayload {
    match_id: String,
    #[serde(default)]
    acceptance_required: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SucceededPayload {
    match_id: String,
    game_session_info: GameSessionInfo,
}

impl MatchmakingNotification {
    /// Decodes the `detail` object of a matchmaking notification.
    ///
    /// A payload that does not fit its event type fails the whole notification, since every ticket in it would be
    /// written from the same payload. Individual ticket entries are decoded separately.
    pub fn from_detail(detail: &Value) -> Result<Self, EventDecodeError> {
        let kind = event_type(detail)?;
        let event = match kind {
            MATCHMAKING_SEARCHING => MatchmakingEvent::Searching,
            POTENTIAL_MATCH_CREATED => {
                let p = decode_payload::<PotentialMatchPayload>(kind, detail)?;
                MatchmakingEvent::PotentialMatchCreated {
                    match_id: p.match_id,
                    acceptance_required: p.acceptance_required,
                }
            },
            MATCHMAKING_SUCCEEDED => {
                let p = decode_payload::<SucceededPayload>(kind, detail)?;
                MatchmakingEvent::Succeeded { match_id: p.match_id, game_session: p.game_session_info }
            },
            MATCHMAKING_TIMED_OUT => MatchmakingEvent::TimedOut,
            MATCHMAKING_CANCELLED => MatchmakingEvent::Cancelled,
            other => MatchmakingEvent::Unknown(other.to_string()),
        };
        let tickets = match detail.get("tickets") {
            Some(Value::Array(entries)) => entries.iter().map(ticket_id).collect(),
            Some(_) => {
                return Err(EventDecodeError::InvalidPayload {
                    event_type: kind.to_string(),
                    reason: "'tickets' is not an array".into(),
                })
            },
            None => vec![],
        };
        Ok(Self { event, tickets })
    }
}

fn decode_payload<T: for<'de> Deserialize<'de>>(kind: &str, detail: &Value) -> Result<T, EventDecodeError> {
    T::deserialize(detail)
        .map_err(|e| EventDecodeError::InvalidPayload { event_type: kind.to_string(), reason: e.to_string() })
}

fn ticket_id(entry: &Value) -> Result<String, EventDecodeError> {
    match entry.get("ticketId") {
        Some(Value::String(id)) if !id.is_empty() => Ok(id.clone()),
        Some(Value::String(_)) => Err(EventDecodeError::InvalidTicket("ticketId is empty".into())),
        Some(v) => Err(EventDecodeError::InvalidTicket(format!("ticketId is not a string: {v}"))),
        None => Err(EventDecodeError::InvalidTicket("ticketId is missing".into())),
    }
}
