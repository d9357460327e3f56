//! `SqliteDatabase` is the SQLite backend for the match relay engine.
//!
//! It implements both [`TicketManagement`] and [`SessionManagement`]. Reads acquire a connection from the pool. Writes
//! run in their own transaction, which is committed before the method returns, so that every other connection sees the
//! change. No transaction spans more than one ticket or session.
use std::fmt::Debug;

use log::*;
use sqlx::{migrate, SqlitePool};

use super::db::{game_sessions, new_pool, tickets};
use crate::{
    db_types::{GameSession, NewGameSession, Ticket, TicketUpdate},
    traits::{SessionManagement, SessionStoreError, TicketManagement, TicketStoreError},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl TicketManagement for SqliteDatabase {
    async fn fetch_ticket(&self, ticket_id: &str) -> Result<Option<Ticket>, TicketStoreError> {
        let mut conn = self.pool.acquire().await?;
        tickets::fetch_ticket(ticket_id, &mut conn).await
    }

    async fn insert_ticket(&self, ticket: Ticket) -> Result<(), TicketStoreError> {
        let mut tx = self.pool.begin().await?;
        tickets::insert_ticket(ticket, &mut tx).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn update_ticket(&self, ticket_id: &str, update: TicketUpdate) -> Result<Ticket, TicketStoreError> {
        let mut tx = self.pool.begin().await?;
        let ticket = tickets::update_ticket(ticket_id, update, &mut tx).await?;
        tx.commit().await?;
        Ok(ticket)
    }
}

impl SessionManagement for SqliteDatabase {
    async fn insert_game_session(&self, session: NewGameSession) -> Result<GameSession, SessionStoreError> {
        let mut tx = self.pool.begin().await?;
        let session = game_sessions::insert_game_session(session, &mut tx).await?;
        tx.commit().await?;
        Ok(session)
    }

    async fn fetch_game_sessions(&self) -> Result<Vec<GameSession>, SessionStoreError> {
        let mut conn = self.pool.acquire().await?;
        game_sessions::fetch_game_sessions(&mut conn).await
    }

    async fn fetch_game_session_for_placement(
        &self,
        placement_id: &str,
    ) -> Result<Option<GameSession>, SessionStoreError> {
        let mut conn = self.pool.acquire().await?;
        game_sessions::fetch_game_session_for_placement(placement_id, &mut conn).await
    }

    async fn delete_game_sessions(&self, game_session_id: &str) -> Result<u64, SessionStoreError> {
        let mut tx = self.pool.begin().await?;
        let count = game_sessions::delete_game_sessions(game_session_id, &mut tx).await?;
        tx.commit().await?;
        Ok(count)
    }
}

impl SqliteDatabase {
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        trace!("🗃️ Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections).await?;
        let url = url.to_string();
        Ok(Self { url, pool })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Brings the schema up to date. Migrations are embedded in the binary.
    pub async fn run_migrations(&self) -> Result<(), sqlx::Error> {
        migrate!("./src/sqlite/migrations").run(&self.pool).await?;
        info!("🗃️ Database migrations complete");
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
