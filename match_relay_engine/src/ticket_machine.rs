//! The matchmaking ticket state machine.
//!
//! [`transition`] is a pure function of (does the ticket exist, event, now) and yields a [`WriteIntent`]:
//!
//! | Event                 | Ticket must  | Status                   | Extra fields                                 | Verb   |
//! |-----------------------|--------------|--------------------------|----------------------------------------------|--------|
//! | MatchmakingSearching  | not exist    | `SEARCHING`              |                                              | create |
//! | PotentialMatchCreated | exist        | `POTENTIAL_MATCH`        | matchId, acceptanceRequired                  | update, only if acceptance is required |
//! | MatchmakingSucceeded  | exist        | `MATCHMAKING_SUCCESSFUL` | matchId, ipAddress, port, gameSessionArn     | update |
//! | MatchmakingTimedOut   | exist        | `TIMEOUT`                |                                              | update |
//! | MatchmakingCancelled  | exist        | `CANCELLED`              |                                              | update |
//! | anything else         |              |                          |                                              | none   |
//!
//! Every write stamps the ticket with `now`, the local arrival time. The provider's own event time is ignored, so the
//! projection follows delivery order: a redelivered or reordered notification can overwrite a later state, terminal
//! ones included. Terminal statuses are not enforced here.
//!
//! A `PotentialMatchCreated` without required acceptance leaves the ticket untouched, so it stays `SEARCHING` until
//! the match succeeds or fails.
use std::fmt::Display;

use chrono::{DateTime, Utc};

use crate::{
    db_types::{Ticket, TicketStatus, TicketUpdate},
    events::MatchmakingEvent,
};

#[derive(Debug, Clone, PartialEq)]
pub enum WriteIntent {
    Create(Ticket),
    Update { ticket_id: String, update: TicketUpdate },
    Skip(SkipReason),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// A `MatchmakingSearching` event for a ticket that is already being tracked.
    AlreadyExists,
    /// Any other event for a ticket that was never created.
    DoesNotExist,
    /// `PotentialMatchCreated` with `acceptanceRequired = false`.
    AcceptanceNotRequired,
    UnhandledEvent(String),
}

impl Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::AlreadyExists => f.write_str("ticket already exists"),
            SkipReason::DoesNotExist => f.write_str("ticket does not exist"),
            SkipReason::AcceptanceNotRequired => f.write_str("match acceptance is not required"),
            SkipReason::UnhandledEvent(t) => write!(f, "{t} events are not tracked"),
        }
    }
}

pub fn transition(ticket_id: &str, exists: bool, event: &MatchmakingEvent, now: DateTime<Utc>) -> WriteIntent {
    let update = |update: TicketUpdate| WriteIntent::Update { ticket_id: ticket_id.to_string(), update };
    match (event, exists) {
        (MatchmakingEvent::Unknown(kind), _) => WriteIntent::Skip(SkipReason::UnhandledEvent(kind.clone())),
        (MatchmakingEvent::Searching, false) => WriteIntent::Create(Ticket::searching(ticket_id, now)),
        (MatchmakingEvent::Searching, true) => WriteIntent::Skip(SkipReason::AlreadyExists),
        (_, false) => WriteIntent::Skip(SkipReason::DoesNotExist),
        (MatchmakingEvent::PotentialMatchCreated { acceptance_required: false, .. }, true) => {
            WriteIntent::Skip(SkipReason::AcceptanceNotRequired)
        },
        (MatchmakingEvent::PotentialMatchCreated { match_id, acceptance_required: true }, true) => {
            update(TicketUpdate {
                match_id: Some(match_id.clone()),
                acceptance_required: Some(true),
                ..TicketUpdate::status(TicketStatus::PotentialMatch, now)
            })
        },
        (MatchmakingEvent::Succeeded { match_id, game_session }, true) => update(TicketUpdate {
            match_id: Some(match_id.clone()),
            ip_address: Some(game_session.ip_address.clone()),
            port: Some(game_session.port),
            game_session_arn: Some(game_session.game_session_arn.clone()),
            ..TicketUpdate::status(TicketStatus::MatchmakingSuccessful, now)
        }),
        (MatchmakingEvent::TimedOut, true) => update(TicketUpdate::status(TicketStatus::Timeout, now)),
        (MatchmakingEvent::Cancelled, true) => update(TicketUpdate::status(TicketStatus::Cancelled, now)),
    }
}
