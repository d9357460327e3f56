use std::fmt::Display;

use crate::{
    db_types::TicketStatus,
    events::EventDecodeError,
    ticket_machine::SkipReason,
    traits::TicketStoreError,
};

/// What happened to a single ticket entry of a matchmaking notification.
#[derive(Debug, Clone)]
pub enum TicketOutcome {
    Applied { ticket_id: String, status: TicketStatus },
    Skipped { ticket_id: String, reason: SkipReason },
    Failed { ticket_id: String, error: TicketStoreError },
    /// The entry at `index` of the `tickets` array could not be read at all.
    Rejected { index: usize, error: EventDecodeError },
}

impl TicketOutcome {
    /// The ticket id, or `tickets[i]` for entries that have none.
    pub fn key(&self) -> String {
        match self {
            Self::Applied { ticket_id, .. } | Self::Skipped { ticket_id, .. } | Self::Failed { ticket_id, .. } => {
                ticket_id.clone()
            },
            Self::Rejected { index, .. } => format!("tickets[{index}]"),
        }
    }
}

impl Display for TicketOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Applied { ticket_id, status } => write!(f, "{ticket_id}: {status}"),
            Self::Skipped { ticket_id, reason } => write!(f, "{ticket_id}: skipped, {reason}"),
            Self::Failed { ticket_id, error } => write!(f, "{ticket_id}: failed, {error}"),
            Self::Rejected { index, error } => write!(f, "tickets[{index}]: rejected, {error}"),
        }
    }
}

/// The per-ticket record of one notification. The batch is not atomic, so any mix of outcomes is possible.
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub event: String,
    pub outcomes: Vec<TicketOutcome>,
}

impl BatchReport {
    pub fn applied(&self) -> usize {
        self.outcomes.iter().filter(|o| matches!(o, TicketOutcome::Applied { .. })).count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes.iter().filter(|o| matches!(o, TicketOutcome::Skipped { .. })).count()
    }

    /// Store failures plus unreadable entries.
    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, TicketOutcome::Failed { .. } | TicketOutcome::Rejected { .. }))
            .count()
    }

    pub fn is_partial_failure(&self) -> bool {
        self.failed() > 0
    }
}

impl Display for BatchReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} for {} tickets. {} applied, {} skipped, {} failed",
            self.event,
            self.outcomes.len(),
            self.applied(),
            self.skipped(),
            self.failed()
        )
    }
}
