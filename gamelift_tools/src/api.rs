use std::sync::Arc;

use chrono::Utc;
use log::*;
use reqwest::{Client, Url};
use serde::Serialize;
use serde_json::Value;

use crate::{
    config::GameLiftConfig,
    data_objects::{
        CreateGameSessionRequest,
        CreatePlayerSessionRequest,
        DescribeGameSessionPlacementRequest,
        ServiceErrorBody,
        StartGameSessionPlacementRequest,
        StartMatchmakingRequest,
        StopMatchmakingRequest,
        TerminateGameSessionRequest,
        TERMINATION_MODE,
    },
    error::short_error_code,
    signing::{sign_request, SigningParams},
    GameLiftApiError,
    SessionProvider,
};

const SERVICE_NAME: &str = "gamelift";

/// HTTP client for GameLift. Cheap to clone; the underlying connection pool is shared.
#[derive(Clone)]
pub struct GameLiftApi {
    config: GameLiftConfig,
    host: String,
    client: Arc<Client>,
}

impl GameLiftApi {
    pub fn new(config: GameLiftConfig) -> Result<Self, GameLiftApiError> {
        let url = Url::parse(&config.endpoint)
            .map_err(|e| GameLiftApiError::Initialization(format!("Invalid endpoint {}: {e}", config.endpoint)))?;
        let host = match (url.host_str(), url.port()) {
            (Some(h), Some(p)) => format!("{h}:{p}"),
            (Some(h), None) => h.to_string(),
            (None, _) => {
                return Err(GameLiftApiError::Initialization(format!("Endpoint {} has no host", config.endpoint)))
            },
        };
        let client = Client::builder().build().map_err(|e| GameLiftApiError::Initialization(e.to_string()))?;
        Ok(Self { config, host, client: Arc::new(client) })
    }

    pub fn config(&self) -> &GameLiftConfig {
        &self.config
    }

    /// Sends a single GameLift action, e.g. `"StopMatchmaking"`, and returns the raw JSON response.
    pub async fn send<B: Serialize>(&self, action: &str, body: &B) -> Result<Value, GameLiftApiError> {
        let target = format!("GameLift.{action}");
        let payload = serde_json::to_vec(body).map_err(|e| GameLiftApiError::JsonError(e.to_string()))?;
        let params = SigningParams {
            access_key_id: &self.config.access_key_id,
            secret_access_key: self.config.secret_access_key.reveal(),
            session_token: self.config.session_token.as_ref().map(|t| t.reveal().as_str()),
            region: &self.config.region,
            service: SERVICE_NAME,
            timestamp: Utc::now(),
        };
        let headers = sign_request(&params, &self.host, &target, &payload)?;
        trace!("🕹️ Sending {target} to {}", self.config.endpoint);
        let mut req = self.client.post(&self.config.endpoint).body(payload);
        for (name, value) in headers.into_iter().filter(|(name, _)| name != "host") {
            req = req.header(name, value);
        }
        let response = req.send().await.map_err(|e| GameLiftApiError::RequestError(e.to_string()))?;
        let status = response.status();
        let text = response.text().await.map_err(|e| GameLiftApiError::ResponseError(e.to_string()))?;
        if status.is_success() {
            trace!("🕹️ {target} succeeded. {status}");
            if text.trim().is_empty() {
                return Ok(Value::Object(Default::default()));
            }
            serde_json::from_str(&text).map_err(|e| GameLiftApiError::JsonError(e.to_string()))
        } else {
            let body = serde_json::from_str::<ServiceErrorBody>(&text).unwrap_or_default();
            let code = if body.error_type.is_empty() { "UnknownError" } else { short_error_code(&body.error_type) };
            debug!("🕹️ {target} failed with {status}. {code}: {}", body.message);
            Err(GameLiftApiError::ServiceError {
                status: status.as_u16(),
                code: code.to_string(),
                message: body.message,
            })
        }
    }
}

impl SessionProvider for GameLiftApi {
    async fn create_game_session(&self, creator_id: &str, name: &str) -> Result<Value, GameLiftApiError> {
        let req = CreateGameSessionRequest {
            fleet_id: self.config.fleet_id.clone(),
            location: self.config.location.clone(),
            creator_id: creator_id.to_string(),
            name: name.to_string(),
            maximum_player_session_count: self.config.max_players,
        };
        debug!("🕹️ Creating game session '{name}' for {creator_id}");
        self.send("CreateGameSession", &req).await
    }

    async fn start_game_session_placement(&self, placement_id: &str, name: &str) -> Result<Value, GameLiftApiError> {
        let req = StartGameSessionPlacementRequest {
            placement_id: placement_id.to_string(),
            game_session_queue_name: self.config.queue_name.clone(),
            game_session_name: name.to_string(),
            maximum_player_session_count: self.config.max_players,
        };
        debug!("🕹️ Queueing placement {placement_id} on {}", self.config.queue_name);
        self.send("StartGameSessionPlacement", &req).await
    }

    async fn describe_game_session_placement(&self, placement_id: &str) -> Result<Value, GameLiftApiError> {
        let req = DescribeGameSessionPlacementRequest { placement_id: placement_id.to_string() };
        self.send("DescribeGameSessionPlacement", &req).await
    }

    async fn terminate_game_session(&self, game_session_id: &str) -> Result<Value, GameLiftApiError> {
        let req = TerminateGameSessionRequest {
            game_session_id: game_session_id.to_string(),
            termination_mode: TERMINATION_MODE.to_string(),
        };
        debug!("🕹️ Terminating game session {game_session_id}");
        self.send("TerminateGameSession", &req).await
    }

    async fn start_matchmaking(&self, configuration_name: &str, players: Value) -> Result<Value, GameLiftApiError> {
        let req = StartMatchmakingRequest { configuration_name: configuration_name.to_string(), players };
        debug!("🕹️ Starting matchmaking with configuration {configuration_name}");
        self.send("StartMatchmaking", &req).await
    }

    async fn stop_matchmaking(&self, ticket_id: &str) -> Result<Value, GameLiftApiError> {
        let req = StopMatchmakingRequest { ticket_id: ticket_id.to_string() };
        debug!("🕹️ Stopping matchmaking ticket {ticket_id}");
        self.send("StopMatchmaking", &req).await
    }

    async fn create_player_session(
        &self,
        game_session_id: &str,
        player_id: &str,
        player_data: Option<String>,
    ) -> Result<Value, GameLiftApiError> {
        let req = CreatePlayerSessionRequest {
            game_session_id: game_session_id.to_string(),
            player_id: player_id.to_string(),
            player_data,
        };
        debug!("🕹️ Creating player session for {player_id} in {game_session_id}");
        self.send("CreatePlayerSession", &req).await
    }
}
