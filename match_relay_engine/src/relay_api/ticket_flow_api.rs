use std::fmt::Debug;

use chrono::Utc;
use futures_util::future::join_all;
use log::*;

use crate::{
    events::{EventDecodeError, MatchmakingEvent, MatchmakingNotification},
    relay_api::batch_objects::{BatchReport, TicketOutcome},
    ticket_machine::{transition, SkipReason, WriteIntent},
    traits::{TicketManagement, TicketStoreError},
};

/// `TicketFlowApi` folds matchmaking notifications into the ticket projection.
pub struct TicketFlowApi<B> {
    db: B,
}

impl<B> Debug for TicketFlowApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TicketFlowApi")
    }
}

impl<B> TicketFlowApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> TicketFlowApi<B>
where B: TicketManagement
{
    /// Applies the notification's event to every ticket it lists.
    ///
    /// Tickets are processed concurrently and independently. A store failure or an unreadable entry is recorded in the
    /// report and does not stop its siblings from being written. This method never fails as a whole.
    pub async fn process_notification(&self, notification: MatchmakingNotification) -> BatchReport {
        let MatchmakingNotification { event, tickets } = notification;
        let work = tickets.into_iter().enumerate().map(|(index, entry)| self.process_ticket(index, entry, &event));
        let outcomes = join_all(work).await;
        let report = BatchReport { event: event.to_string(), outcomes };
        if report.is_partial_failure() {
            warn!("🎟️ {report}");
            report
                .outcomes
                .iter()
                .filter(|o| matches!(o, TicketOutcome::Failed { .. } | TicketOutcome::Rejected { .. }))
                .for_each(|o| warn!("🎟️ {o}"));
        } else {
            info!("🎟️ {report}");
        }
        report
    }

    async fn process_ticket(
        &self,
        index: usize,
        entry: Result<String, EventDecodeError>,
        event: &MatchmakingEvent,
    ) -> TicketOutcome {
        let ticket_id = match entry {
            Ok(id) => id,
            Err(error) => return TicketOutcome::Rejected { index, error },
        };
        if let MatchmakingEvent::Unknown(kind) = event {
            return TicketOutcome::Skipped { ticket_id, reason: SkipReason::UnhandledEvent(kind.clone()) };
        }
        let exists = match self.db.fetch_ticket(&ticket_id).await {
            Ok(ticket) => ticket.is_some(),
            Err(error) => return TicketOutcome::Failed { ticket_id, error },
        };
        match transition(&ticket_id, exists, event, Utc::now()) {
            WriteIntent::Create(ticket) => {
                let status = ticket.status;
                match self.db.insert_ticket(ticket).await {
                    Ok(()) => TicketOutcome::Applied { ticket_id, status },
                    // Lost a race with a concurrent delivery of the same event
                    Err(TicketStoreError::DuplicateTicket(_)) => {
                        TicketOutcome::Skipped { ticket_id, reason: SkipReason::AlreadyExists }
                    },
                    Err(error) => TicketOutcome::Failed { ticket_id, error },
                }
            },
            WriteIntent::Update { ticket_id, update } => match self.db.update_ticket(&ticket_id, update).await {
                Ok(ticket) => {
                    if ticket.status.is_terminal() {
                        debug!("🎟️ Ticket {ticket_id} finished with {}", ticket.status);
                    } else {
                        trace!("🎟️ Ticket {ticket_id} is now {}", ticket.status);
                    }
                    TicketOutcome::Applied { ticket_id, status: ticket.status }
                },
                Err(TicketStoreError::TicketNotFound(_)) => {
                    TicketOutcome::Skipped { ticket_id, reason: SkipReason::DoesNotExist }
                },
                Err(error) => TicketOutcome::Failed { ticket_id, error },
            },
            WriteIntent::Skip(reason) => {
                debug!("🎟️ {event} for ticket {ticket_id} ignored: {reason}");
                TicketOutcome::Skipped { ticket_id, reason }
            },
        }
    }
}
