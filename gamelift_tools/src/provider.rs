use serde_json::Value;

use crate::GameLiftApiError;

/// The Session Orchestration Provider contract.
///
/// Every method is a single synchronous request/response exchange from the caller's point of view. No timeouts or
/// retries are layered on top. A stalled provider stalls the request that is waiting on it.
///
/// Fleet, location and queue selection are properties of the implementation, not of the caller.
#[allow(async_fn_in_trait)]
pub trait SessionProvider {
    /// Creates a game session directly on the configured fleet.
    async fn create_game_session(&self, creator_id: &str, name: &str) -> Result<Value, GameLiftApiError>;

    /// Queues a game session placement request on the configured queue. Fulfillment is reported asynchronously.
    async fn start_game_session_placement(&self, placement_id: &str, name: &str) -> Result<Value, GameLiftApiError>;

    /// Fetches the current state of a placement, including the game session details once it has been fulfilled.
    async fn describe_game_session_placement(&self, placement_id: &str) -> Result<Value, GameLiftApiError>;

    async fn terminate_game_session(&self, game_session_id: &str) -> Result<Value, GameLiftApiError>;

    async fn start_matchmaking(&self, configuration_name: &str, players: Value) -> Result<Value, GameLiftApiError>;

    async fn stop_matchmaking(&self, ticket_id: &str) -> Result<Value, GameLiftApiError>;

    async fn create_player_session(
        &self,
        game_session_id: &str,
        player_id: &str,
        player_data: Option<String>,
    ) -> Result<Value, GameLiftApiError>;
}
