use gamelift_tools::{GameLiftApiError, SessionProvider};
use match_relay_engine::{
    db_types::{GameSession, NewGameSession, Ticket, TicketUpdate},
    SessionManagement,
    SessionStoreError,
    TicketManagement,
    TicketStoreError,
};
use mockall::mock;
use serde_json::Value;

mock! {
    pub TicketStore {}
    impl TicketManagement for TicketStore {
        async fn fetch_ticket(&self, ticket_id: &str) -> Result<Option<Ticket>, TicketStoreError>;
        async fn insert_ticket(&self, ticket: Ticket) -> Result<(), TicketStoreError>;
        async fn update_ticket(&self, ticket_id: &str, update: TicketUpdate) -> Result<Ticket, TicketStoreError>;
    }
}

mock! {
    pub SessionStore {}
    impl SessionManagement for SessionStore {
        async fn insert_game_session(&self, session: NewGameSession) -> Result<GameSession, SessionStoreError>;
        async fn fetch_game_sessions(&self) -> Result<Vec<GameSession>, SessionStoreError>;
        async fn fetch_game_session_for_placement(&self, placement_id: &str) -> Result<Option<GameSession>, SessionStoreError>;
        async fn delete_game_sessions(&self, game_session_id: &str) -> Result<u64, SessionStoreError>;
    }
}

mock! {
    pub Provider {}
    impl SessionProvider for Provider {
        async fn create_game_session(&self, creator_id: &str, name: &str) -> Result<Value, GameLiftApiError>;
        async fn start_game_session_placement(&self, placement_id: &str, name: &str) -> Result<Value, GameLiftApiError>;
        async fn describe_game_session_placement(&self, placement_id: &str) -> Result<Value, GameLiftApiError>;
        async fn terminate_game_session(&self, game_session_id: &str) -> Result<Value, GameLiftApiError>;
        async fn start_matchmaking(&self, configuration_name: &str, players: Value) -> Result<Value, GameLiftApiError>;
        async fn stop_matchmaking(&self, ticket_id: &str) -> Result<Value, GameLiftApiError>;
        async fn create_player_session(&self, game_session_id: &str, player_id: &str, player_data: Option<String>) -> Result<Value, GameLiftApiError>;
    }
}
