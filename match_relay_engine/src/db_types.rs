use std::fmt::Display;

use chrono::{DateTime, Utc};
use mrs_common::helpers::epoch_millis;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::{types::Json, FromRow, Type};

//--------------------------------------     TicketStatus      ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    /// The ticket has been entered into matchmaking.
    Searching,
    /// A match has been proposed and is waiting for players to accept it.
    PotentialMatch,
    /// A game session has been placed for the match. Terminal.
    MatchmakingSuccessful,
    /// Terminal.
    Timeout,
    /// Terminal.
    Cancelled,
}

impl TicketStatus {
    /// Nothing is expected to follow a terminal status, although a late or duplicated notification can still
    /// overwrite one.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::MatchmakingSuccessful | Self::Timeout | Self::Cancelled)
    }
}

impl Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TicketStatus::Searching => write!(f, "SEARCHING"),
            TicketStatus::PotentialMatch => write!(f, "POTENTIAL_MATCH"),
            TicketStatus::MatchmakingSuccessful => write!(f, "MATCHMAKING_SUCCESSFUL"),
            TicketStatus::Timeout => write!(f, "TIMEOUT"),
            TicketStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

//--------------------------------------        Ticket         ---------------------------------------------------------
/// The projected state of a matchmaking ticket, as polled by clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub ticket_id: String,
    pub status: TicketStatus,
    /// The time this subsystem recorded the last transition. It is not the provider's event time.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acceptance_required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_session_arn: Option<String>,
}

impl Ticket {
    pub fn searching(ticket_id: &str, timestamp: DateTime<Utc>) -> Self {
        Self {
            ticket_id: ticket_id.to_string(),
            status: TicketStatus::Searching,
            timestamp,
            match_id: None,
            acceptance_required: None,
            ip_address: None,
            port: None,
            game_session_arn: None,
        }
    }
}

/// A partial update to an existing ticket. `None` fields leave the stored value untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct TicketUpdate {
    pub status: TicketStatus,
    pub timestamp: DateTime<Utc>,
    pub match_id: Option<String>,
    pub acceptance_required: Option<bool>,
    pub ip_address: Option<String>,
    pub port: Option<i64>,
    pub game_session_arn: Option<String>,
}

impl TicketUpdate {
    pub fn status(status: TicketStatus, timestamp: DateTime<Utc>) -> Self {
        Self {
            status,
            timestamp,
            match_id: None,
            acceptance_required: None,
            ip_address: None,
            port: None,
            game_session_arn: None,
        }
    }
}

//--------------------------------------      GameSession      ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct GameSession {
    pub id: i64,
    pub placement_id: String,
    /// The provider's game session identifier (its ARN). This is what clients pass to `close-session`.
    pub game_session_id: String,
    pub name: Option<String>,
    pub ip_address: Option<String>,
    pub port: Option<i64>,
    /// Epoch seconds, as reported by the provider
    pub creation_time: Option<f64>,
    pub maximum_player_session_count: Option<i64>,
    /// Ingestion time
    pub time: Option<DateTime<Utc>>,
    /// The placement notification merged with the provider's placement description
    pub details: Json<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewGameSession {
    pub placement_id: String,
    pub game_session_id: String,
    pub name: Option<String>,
    pub ip_address: Option<String>,
    pub port: Option<i64>,
    pub creation_time: Option<f64>,
    pub maximum_player_session_count: Option<i64>,
    pub time: Option<DateTime<Utc>>,
    pub details: Value,
}

/// The client-facing shape of a session directory entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SessionSummary {
    /// Ingestion time in epoch milliseconds; `0` if it was never recorded.
    pub time: i64,
    pub creation_time: Option<f64>,
    pub game_session_id: String,
    pub ip_address: Option<String>,
    pub port: Option<i64>,
    pub name: Option<String>,
}

impl From<&GameSession> for SessionSummary {
    fn from(session: &GameSession) -> Self {
        Self {
            time: session.time.as_ref().map(epoch_millis).unwrap_or(0),
            creation_time: session.creation_time,
            game_session_id: session.game_session_id.clone(),
            ip_address: session.ip_address.clone(),
            port: session.port,
            name: session.name.clone(),
        }
    }
}
