use log::{debug, trace};
use sqlx::SqliteConnection;

use super::is_duplicate_key;
use crate::{
    db_types::{Ticket, TicketUpdate},
    traits::TicketStoreError,
};

const TICKET_COLUMNS: &str =
    "ticket_id, status, timestamp, match_id, acceptance_required, ip_address, port, game_session_arn";

pub async fn fetch_ticket(ticket_id: &str, conn: &mut SqliteConnection) -> Result<Option<Ticket>, TicketStoreError> {
    let sql = format!("SELECT {TICKET_COLUMNS} FROM tickets WHERE ticket_id = $1");
    let ticket = sqlx::query_as::<_, Ticket>(&sql).bind(ticket_id).fetch_optional(conn).await?;
    trace!("🗃️ Ticket {ticket_id} lookup: {}", if ticket.is_some() { "found" } else { "not found" });
    Ok(ticket)
}

/// Inserts a new ticket. The primary key on `ticket_id` turns a second insert into
/// [`TicketStoreError::DuplicateTicket`].
pub async fn insert_ticket(ticket: Ticket, conn: &mut SqliteConnection) -> Result<(), TicketStoreError> {
    let sql = format!("INSERT INTO tickets ({TICKET_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)");
    sqlx::query(&sql)
        .bind(&ticket.ticket_id)
        .bind(ticket.status)
        .bind(ticket.timestamp)
        .bind(&ticket.match_id)
        .bind(ticket.acceptance_required)
        .bind(&ticket.ip_address)
        .bind(ticket.port)
        .bind(&ticket.game_session_arn)
        .execute(conn)
        .await
        .map_err(|e| {
            if is_duplicate_key(&e) {
                TicketStoreError::DuplicateTicket(ticket.ticket_id.clone())
            } else {
                e.into()
            }
        })?;
    debug!("🗃️ Ticket {} created with status {}", ticket.ticket_id, ticket.status);
    Ok(())
}

/// Applies `update` to an existing ticket and returns the stored result. `None` fields keep their current values.
///
/// The statement is stepped to completion (`fetch_all`) so that SQLite releases it before the caller commits.
pub async fn update_ticket(
    ticket_id: &str,
    update: TicketUpdate,
    conn: &mut SqliteConnection,
) -> Result<Ticket, TicketStoreError> {
    let sql = format!(
        r#"
        UPDATE tickets SET
            status = $1,
            timestamp = $2,
            match_id = COALESCE($3, match_id),
            acceptance_required = COALESCE($4, acceptance_required),
            ip_address = COALESCE($5, ip_address),
            port = COALESCE($6, port),
            game_session_arn = COALESCE($7, game_session_arn)
        WHERE ticket_id = $8
        RETURNING {TICKET_COLUMNS}"#
    );
    let ticket = sqlx::query_as::<_, Ticket>(&sql)
        .bind(update.status)
        .bind(update.timestamp)
        .bind(update.match_id)
        .bind(update.acceptance_required)
        .bind(update.ip_address)
        .bind(update.port)
        .bind(update.game_session_arn)
        .bind(ticket_id)
        .fetch_all(conn)
        .await?
        .pop()
        .ok_or_else(|| TicketStoreError::TicketNotFound(ticket_id.to_string()))?;
    debug!("🗃️ Ticket {ticket_id} updated to {}", ticket.status);
    Ok(ticket)
}
