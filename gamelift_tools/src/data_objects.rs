use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::GameLiftApiError;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateGameSessionRequest {
    pub fleet_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub creator_id: String,
    pub name: String,
    pub maximum_player_session_count: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct StartGameSessionPlacementRequest {
    pub placement_id: String,
    pub game_session_queue_name: String,
    pub game_session_name: String,
    pub maximum_player_session_count: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeGameSessionPlacementRequest {
    pub placement_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TerminateGameSessionRequest {
    pub game_session_id: String,
    pub termination_mode: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct StartMatchmakingRequest {
    pub configuration_name: String,
    pub players: Value,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct StopMatchmakingRequest {
    pub ticket_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreatePlayerSessionRequest {
    pub game_session_id: String,
    pub player_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_data: Option<String>,
}

/// Lets the game server finish its current work before the session is torn down.
pub const TERMINATION_MODE: &str = "TRIGGER_ON_PROCESS_TERMINATE";

/// The subset of a `GameSessionPlacement` that the session directory cares about.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GameSessionPlacement {
    pub placement_id: Option<String>,
    pub game_session_queue_name: Option<String>,
    pub status: Option<String>,
    pub game_session_name: Option<String>,
    pub game_session_id: Option<String>,
    pub game_session_arn: Option<String>,
    pub game_session_region: Option<String>,
    pub maximum_player_session_count: Option<i64>,
    /// Epoch seconds
    pub start_time: Option<f64>,
    /// Epoch seconds
    pub end_time: Option<f64>,
    pub ip_address: Option<String>,
    pub dns_name: Option<String>,
    pub port: Option<i64>,
}

impl GameSessionPlacement {
    /// Extracts the placement from a raw `DescribeGameSessionPlacement` response.
    pub fn from_response(response: &Value) -> Result<Self, GameLiftApiError> {
        let placement = response
            .get("GameSessionPlacement")
            .ok_or_else(|| GameLiftApiError::JsonError("Response has no GameSessionPlacement".into()))?;
        serde_json::from_value(placement.clone()).map_err(|e| GameLiftApiError::JsonError(e.to_string()))
    }

    /// The identifier clients use to refer to the game session. GameLift reports the ARN in both fields, but older
    /// responses may only carry one of them.
    pub fn session_identifier(&self) -> Option<&str> {
        self.game_session_arn.as_deref().or(self.game_session_id.as_deref())
    }
}

/// The body of a non-2xx GameLift response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceErrorBody {
    #[serde(rename = "__type", default)]
    pub error_type: String,
    #[serde(alias = "Message", default)]
    pub message: String,
}
