//! # Login Screen
//!
//! ```text
//! Idle ──submit──▶ Submitting(id) ──resolve(id)──▶ Accepted
//!  ▲                    │
//!  └─────── error ──────┘   (last_error set)
//! ```
//!
//! Validation failures never leave `Idle` and never hit the network.
//! Only a `Reader` gets through; administrators and unknown roles are
//! turned away with a message.

use log::{debug, info};

use crate::api::{ApiError, AuthResponse, CardNumber, Credentials, Role, UserProfile};
use crate::core::error::ClientError;
use crate::core::state::RequestId;

pub const EMPTY_INPUT_MESSAGE: &str = "Пожалуйста, заполните поле.";
pub const INVALID_CARD_MESSAGE: &str = "Некорректный номер билета.";
pub const ADMINISTRATOR_MESSAGE: &str =
    "Администратор не может пользоваться клиентским приложением.";
pub const UNKNOWN_ROLE_MESSAGE: &str = "Доступ запрещён: неизвестная роль пользователя.";
pub const REFUSED_MESSAGE: &str = "Вход отклонён сервером.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginPhase {
    Idle,
    Submitting(RequestId),
    Accepted,
}

/// What a submit did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Send these credentials.
    Send(Credentials),
    /// A login is already pending; nothing new was sent.
    InFlight,
}

#[derive(Debug)]
pub struct LoginScreen {
    phase: LoginPhase,
    last_error: Option<ClientError>,
}

impl Default for LoginScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginScreen {
    pub fn new() -> Self {
        Self {
            phase: LoginPhase::Idle,
            last_error: None,
        }
    }

    pub fn phase(&self) -> &LoginPhase {
        &self.phase
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, LoginPhase::Submitting(_))
    }

    pub fn last_error(&self) -> Option<&ClientError> {
        self.last_error.as_ref()
    }

    /// Validates the typed card number and, if valid, starts a login.
    pub fn submit(&mut self, raw: &str, request: RequestId) -> Result<Submission, ClientError> {
        if self.is_submitting() {
            debug!("Login submit ignored: request already in flight");
            return Ok(Submission::InFlight);
        }

        let card_number = match parse_card_number(raw) {
            Ok(card_number) => card_number,
            Err(e) => {
                self.last_error = Some(e.clone());
                return Err(e);
            }
        };

        self.phase = LoginPhase::Submitting(request);
        self.last_error = None;
        Ok(Submission::Send(Credentials::new(card_number)))
    }

    /// Applies a login response. Returns `None` for a response that is not
    /// the one this screen is waiting for.
    pub fn resolve(
        &mut self,
        request: RequestId,
        result: Result<AuthResponse, ApiError>,
    ) -> Option<Result<UserProfile, ClientError>> {
        if self.phase != LoginPhase::Submitting(request) {
            debug!("Dropping stale login response (request {})", request);
            return None;
        }

        let outcome = result
            .map_err(|e| ClientError::from_api(e, |detail| format!("Ошибка сети: {detail}.")))
            .and_then(authorize);

        match &outcome {
            Ok(profile) => {
                info!("Reader {} signed in", profile.card_number);
                self.phase = LoginPhase::Accepted;
                self.last_error = None;
            }
            Err(e) => {
                info!("Login failed: {}", e);
                self.phase = LoginPhase::Idle;
                self.last_error = Some(e.clone());
            }
        }
        Some(outcome)
    }
}

/// Parses trimmed input as a non-negative card number.
pub fn parse_card_number(raw: &str) -> Result<CardNumber, ClientError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ClientError::Validation(EMPTY_INPUT_MESSAGE.to_string()));
    }
    trimmed
        .parse::<CardNumber>()
        .map_err(|_| ClientError::Validation(INVALID_CARD_MESSAGE.to_string()))
}

/// Decides whether a 2xx login response lets the user in.
pub fn authorize(response: AuthResponse) -> Result<UserProfile, ClientError> {
    let (true, Some(user)) = (response.success, response.user) else {
        return Err(ClientError::Rejected(refusal_text(response.message)));
    };
    match user.role {
        Role::Reader => Ok(user),
        Role::Administrator => Err(ClientError::Rejected(ADMINISTRATOR_MESSAGE.to_string())),
        Role::Unrecognized(ref role) => {
            info!("Denying unrecognized role {:?}", role);
            Err(ClientError::Rejected(UNKNOWN_ROLE_MESSAGE.to_string()))
        }
    }
}

/// The backend's own wording, or a fixed text when it sent none.
fn refusal_text(message: String) -> String {
    if message.trim().is_empty() {
        REFUSED_MESSAGE.to_string()
    } else {
        message
    }
}
