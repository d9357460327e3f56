use thiserror::Error;

use crate::db_types::{GameSession, NewGameSession};

#[derive(Debug, Clone, Error)]
pub enum SessionStoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("A session for placement {0} already exists")]
    DuplicateSession(String),
}

impl From<sqlx::Error> for SessionStoreError {
    fn from(e: sqlx::Error) -> Self {
        SessionStoreError::DatabaseError(e.to_string())
    }
}

#[allow(async_fn_in_trait)]
pub trait SessionManagement {
    /// Creates the directory entry for a fulfilled placement. A second insert for the same placement id is rejected
    /// with [`SessionStoreError::DuplicateSession`] and leaves the first entry unchanged.
    async fn insert_game_session(&self, session: NewGameSession) -> Result<GameSession, SessionStoreError>;

    /// All directory entries, in insertion order.
    async fn fetch_game_sessions(&self) -> Result<Vec<GameSession>, SessionStoreError>;

    async fn fetch_game_session_for_placement(
        &self,
        placement_id: &str,
    ) -> Result<Option<GameSession>, SessionStoreError>;

    /// Deletes every entry whose `game_session_id` matches, returning the number of entries removed.
    async fn delete_game_sessions(&self, game_session_id: &str) -> Result<u64, SessionStoreError>;
}
