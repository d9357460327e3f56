use thiserror::Error;

use crate::db_types::{Ticket, TicketUpdate};

#[derive(Debug, Clone, Error)]
pub enum TicketStoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Ticket {0} already exists")]
    DuplicateTicket(String),
    #[error("Ticket {0} does not exist")]
    TicketNotFound(String),
}

impl From<sqlx::Error> for TicketStoreError {
    fn from(e: sqlx::Error) -> Self {
        TicketStoreError::DatabaseError(e.to_string())
    }
}

#[allow(async_fn_in_trait)]
pub trait TicketManagement {
    /// Fetches the ticket with the given id. If the ticket has never been seen, `None` is returned.
    async fn fetch_ticket(&self, ticket_id: &str) -> Result<Option<Ticket>, TicketStoreError>;

    /// Creates a new ticket. If a ticket with the same id already exists, nothing is written and
    /// [`TicketStoreError::DuplicateTicket`] is returned.
    async fn insert_ticket(&self, ticket: Ticket) -> Result<(), TicketStoreError>;

    /// Applies `update` to an existing ticket in place and returns the result. Fields that are `None` in the update
    /// keep their stored values. Fails with [`TicketStoreError::TicketNotFound`] if the ticket does not exist.
    async fn update_ticket(&self, ticket_id: &str, update: TicketUpdate) -> Result<Ticket, TicketStoreError>;
}
