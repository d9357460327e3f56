use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EventDecodeError {
    #[error("The event detail is missing the '{0}' field")]
    MissingField(&'static str),
    #[error("Invalid {event_type} payload. {reason}")]
    InvalidPayload { event_type: String, reason: String },
    #[error("Invalid ticket entry. {0}")]
    InvalidTicket(String),
}
