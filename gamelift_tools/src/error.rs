use thiserror::Error;

/// The error code GameLift returns when the fleet has no room for another game session.
pub const CAPACITY_EXCEEDED_CODE: &str = "FleetCapacityExceededException";

#[derive(Debug, Clone, Error)]
pub enum GameLiftApiError {
    #[error("Could not initialize client: {0}")]
    Initialization(String),
    #[error("Could not sign request: {0}")]
    SigningError(String),
    #[error("Invalid request: {0}")]
    RequestError(String),
    #[error("Invalid response: {0}")]
    ResponseError(String),
    #[error("Could not deserialize JSON: {0}")]
    JsonError(String),
    #[error("GameLift returned {code} (HTTP {status}). {message}")]
    ServiceError { status: u16, code: String, message: String },
}

impl GameLiftApiError {
    /// True if the fleet cannot host a new session right now. Callers should back off rather than retry immediately.
    pub fn is_capacity_error(&self) -> bool {
        match self {
            Self::ServiceError { code, .. } => short_error_code(code) == CAPACITY_EXCEEDED_CODE,
            _ => false,
        }
    }
}

/// GameLift error types may arrive fully qualified, e.g. `com.amazonaws.gamelift#FleetCapacityExceededException`.
pub(crate) fn short_error_code(code: &str) -> &str {
    code.rsplit('#').next().unwrap_or(code)
}
