//! Request and response bodies of the client-facing endpoints.
//!
//! Client request fields are all optional at the type level. Each handler decides which are required and reports the
//! missing ones with its own status code. A body that is not a JSON object of the expected shape reads as one with every
//! field absent.
use log::*;
use match_relay_engine::db_types::{SessionSummary, Ticket};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ServerError;

/// Decodes a request body, falling back to the all-absent default.
pub fn parse_body<T: DeserializeOwned + Default>(body: &[u8]) -> T {
    serde_json::from_slice(body).unwrap_or_else(|e| {
        debug!("💻️ Request body could not be read ({e}). Treating every field as missing.");
        T::default()
    })
}

/// Empty strings count as missing.
pub fn required(value: Option<String>, name: &'static str) -> Result<String, ServerError> {
    value.filter(|s| !s.is_empty()).ok_or(ServerError::MissingField(name))
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CloseSessionRequest {
    pub game_session_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateSessionRequest {
    pub creator_id: Option<String>,
    pub session_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QueueSessionRequest {
    pub session_name: Option<String>,
    pub placement_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StartMatchmakingRequest {
    /// Passed through to the provider as `Players`
    pub player_data: Option<Value>,
    /// The matchmaking configuration name
    pub config: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StopMatchmakingRequest {
    pub ticket_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreatePlayerSessionRequest {
    #[serde(rename = "PlayerID")]
    pub player_id: Option<String>,
    pub game_session_id: Option<String>,
    pub player_data: Option<Value>,
}

impl CreatePlayerSessionRequest {
    /// Player data is an opaque string to the provider. Structured values are sent as their JSON text.
    pub fn player_data_string(&self) -> Option<String> {
        match self.player_data.as_ref()? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            v => Some(v.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CheckTicketsRequest {
    pub ticket_ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchSessionsResponse {
    pub game_sessions: Vec<SessionSummary>,
}

/// One slot per requested id, in request order. Unknown tickets are `null`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CheckTicketsResponse {
    pub ticket_list: Vec<Option<Ticket>>,
}
