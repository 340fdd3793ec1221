use std::fmt;

use async_trait::async_trait;

use super::types::{AuthResponse, BookRecord, CardNumber, Credentials};

/// Errors that can occur while talking to the library backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Client could not be built (bad base URL, TLS backend init).
    Config(String),
    /// No response received: connection refused, DNS, timeout.
    Network(String),
    /// Backend answered with a non-2xx status. `message` is the text
    /// recovered from the error body, if any.
    Status { status: u16, message: Option<String> },
    /// A 2xx body that did not match the expected shape.
    Decode { status: u16, detail: String },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Config(msg) => write!(f, "config error: {msg}"),
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Status {
                status,
                message: Some(message),
            } => write!(f, "HTTP {status}: {message}"),
            ApiError::Status {
                status,
                message: None,
            } => write!(f, "HTTP {status}"),
            ApiError::Decode { status, detail } => {
                write!(f, "could not decode HTTP {status} body: {detail}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// The two backend operations this client uses.
///
/// Implementations make exactly one attempt per call. Screens hold an
/// `Arc<dyn LibraryApi>`, so tests can swap in a fake.
#[async_trait]
pub trait LibraryApi: Send + Sync {
    /// Authenticates a card holder.
    async fn login(&self, credentials: Credentials) -> Result<AuthResponse, ApiError>;

    /// Lists the books currently checked out on the given card.
    async fn fetch_reader_books(&self, card_number: CardNumber)
    -> Result<Vec<BookRecord>, ApiError>;
}
