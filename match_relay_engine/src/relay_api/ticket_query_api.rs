use std::fmt::Debug;

use futures_util::future::try_join_all;
use log::*;

use crate::{db_types::Ticket, relay_api::errors::TicketApiError, traits::TicketManagement};

/// Batch ticket lookups for polling clients.
pub struct TicketQueryApi<B> {
    db: B,
}

impl<B> Debug for TicketQueryApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TicketQueryApi")
    }
}

impl<B> TicketQueryApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> TicketQueryApi<B>
where B: TicketManagement
{
    /// Looks up every id concurrently. The result has one slot per id, in the same order, holding `None` for tickets
    /// that have never been seen. A failed read fails the whole query.
    pub async fn fetch_tickets(&self, ticket_ids: &[String]) -> Result<Vec<Option<Ticket>>, TicketApiError> {
        if ticket_ids.is_empty() {
            return Err(TicketApiError::EmptyQuery);
        }
        let lookups = ticket_ids.iter().map(|id| self.db.fetch_ticket(id));
        let tickets = try_join_all(lookups).await?;
        let found = tickets.iter().filter(|t| t.is_some()).count();
        debug!("🎟️ Ticket query for {} ids found {found}", ticket_ids.len());
        Ok(tickets)
    }
}
