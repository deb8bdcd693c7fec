use thiserror::Error;

/// Failure of a single round trip to the reservation service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("invalid API address {address}: {reason}")]
    InvalidAddress { address: String, reason: String },
    #[error("{0}")]
    Transport(String),
    #[error("request failed with status code {status}")]
    Status { status: u16 },
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

/// The user action a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    FetchList,
    Save,
    Delete,
}

impl Operation {
    pub fn description(&self) -> &'static str {
        match self {
            Operation::FetchList => "Failed to fetch reservations",
            Operation::Save => "Failed to save reservation",
            Operation::Delete => "Failed to remove reservation",
        }
    }
}

/// A failed user action. `Display` is the text shown in the error banner.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}: {source}", .operation.description())]
pub struct OperationError {
    pub operation: Operation,
    #[source]
    pub source: ApiError,
}

impl OperationError {
    pub fn new(operation: Operation, source: ApiError) -> Self {
        Self { operation, source }
    }
}
