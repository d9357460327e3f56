use gamelift_tools::GameLiftApiError;
use thiserror::Error;

use crate::traits::{SessionStoreError, TicketStoreError};

#[derive(Debug, Clone, Error)]
pub enum TicketApiError {
    #[error("No ticket ids were given")]
    EmptyQuery,
    #[error("{0}")]
    StoreError(#[from] TicketStoreError),
}

#[derive(Debug, Clone, Error)]
pub enum SessionDirectoryError {
    #[error("{0}")]
    StoreError(#[from] SessionStoreError),
    #[error("{0}")]
    ProviderError(#[from] GameLiftApiError),
}
