//! # Client Errors
//!
//! What the user gets told. Every failure a screen can hit ends up as one
//! of these four and is shown as a short toast; none of them end the
//! process.

use std::fmt;

use crate::api::ApiError;

pub const DECODE_FAILED_MESSAGE: &str = "Ошибка чтения ответа сервера.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Bad local input. No request was made.
    Validation(String),
    /// No response received.
    Transport(String),
    /// Non-2xx response, with the message recovered from its body if any.
    Server { status: u16, message: Option<String> },
    /// Well-formed response that says no (`success=false`, wrong role).
    Rejected(String),
}

impl ClientError {
    /// Maps a transport-level error. `transport` words the network case,
    /// which differs between the login and book screens.
    pub fn from_api(error: ApiError, transport: impl FnOnce(&str) -> String) -> Self {
        match error {
            ApiError::Network(detail) | ApiError::Config(detail) => {
                ClientError::Transport(transport(&detail))
            }
            ApiError::Status { status, message } => ClientError::Server { status, message },
            ApiError::Decode { status, .. } => ClientError::Server {
                status,
                message: Some(DECODE_FAILED_MESSAGE.to_string()),
            },
        }
    }

    /// Text for the toast line.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Validation(msg)
            | ClientError::Transport(msg)
            | ClientError::Rejected(msg) => msg.clone(),
            ClientError::Server {
                message: Some(msg), ..
            } => msg.clone(),
            ClientError::Server {
                status,
                message: None,
            } => format!("Ошибка сервера: {status}."),
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Validation(msg) => write!(f, "validation: {msg}"),
            ClientError::Transport(msg) => write!(f, "transport: {msg}"),
            ClientError::Server { status, .. } => {
                write!(f, "server ({status}): {}", self.user_message())
            }
            ClientError::Rejected(msg) => write!(f, "rejected: {msg}"),
        }
    }
}

impl std::error::Error for ClientError {}
