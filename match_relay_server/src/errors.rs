use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use gamelift_tools::GameLiftApiError;
use log::*;
use match_relay_engine::{SessionDirectoryError, TicketApiError};
use thiserror::Error;

/// Every failure a handler can report. The [`ResponseError`] implementation is the only place where outcomes are
/// mapped to HTTP status codes.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
    #[error("Missing {0}")]
    MissingField(&'static str),
    /// create-player-session reports a missing game session with its own status code
    #[error("Missing GameSessionID")]
    MissingGameSessionId,
    #[error("Missing TicketIds")]
    EmptyTicketList,
    #[error("FleetCapacityExceededException")]
    CapacityExceeded,
    /// Provider failures are logged when they are converted. Clients only see a generic message.
    #[error("An error occurred")]
    ProviderError(String),
    #[error("Invalid notification envelope. {0}")]
    InvalidEnvelope(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingField(_) => StatusCode::UNAUTHORIZED,
            Self::MissingGameSessionId => StatusCode::PAYMENT_REQUIRED,
            Self::EmptyTicketList => StatusCode::FORBIDDEN,
            Self::CapacityExceeded => StatusCode::FORBIDDEN,
            Self::ProviderError(_) => StatusCode::BAD_REQUEST,
            Self::InvalidEnvelope(_) => StatusCode::BAD_REQUEST,
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BackendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).insert_header(ContentType::plaintext()).body(self.to_string())
    }
}

impl From<GameLiftApiError> for ServerError {
    fn from(e: GameLiftApiError) -> Self {
        if e.is_capacity_error() {
            info!("🕹️ The fleet has no capacity for new game sessions. {e}");
            Self::CapacityExceeded
        } else {
            warn!("🕹️ Provider request failed. {e}");
            Self::ProviderError(e.to_string())
        }
    }
}

impl From<SessionDirectoryError> for ServerError {
    fn from(e: SessionDirectoryError) -> Self {
        match e {
            SessionDirectoryError::StoreError(e) => {
                error!("🏟️ Session directory store error. {e}");
                Self::BackendError(e.to_string())
            },
            SessionDirectoryError::ProviderError(e) => e.into(),
        }
    }
}

impl From<TicketApiError> for ServerError {
    fn from(e: TicketApiError) -> Self {
        match e {
            TicketApiError::EmptyQuery => Self::EmptyTicketList,
            TicketApiError::StoreError(e) => {
                error!("🎟️ Ticket store error. {e}");
                Self::BackendError(e.to_string())
            },
        }
    }
}
