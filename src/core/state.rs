//! # Application State
//!
//! Core state for Bookshelf. Domain logic only, no terminal types.
//! Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── api: Arc<dyn LibraryApi>   // injected backend client
//! ├── screen: Screen             // Login or Books, exactly one alive
//! ├── toast: Option<Toast>       // transient message line
//! ├── status_message: String     // title bar text
//! ├── next_request_id: RequestId // source of unique request ids
//! └── base_url: String           // shown on the login screen
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::api::LibraryApi;
use crate::core::book_screen::BookListScreen;
use crate::core::login::LoginScreen;

/// Identifies one network request. Unique for the life of the `App`.
pub type RequestId = u64;

pub const SHORT_TOAST: Duration = Duration::from_secs(3);
pub const LONG_TOAST: Duration = Duration::from_secs(5);

#[derive(Debug)]
pub enum Screen {
    Login(LoginScreen),
    Books(BookListScreen),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub text: String,
    pub kind: ToastKind,
    pub shown_at: Instant,
    pub duration: Duration,
}

impl Toast {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= self.duration
    }
}

pub struct App {
    pub api: Arc<dyn LibraryApi>,
    pub screen: Screen,
    pub toast: Option<Toast>,
    pub status_message: String,
    pub base_url: String,
    next_request_id: RequestId,
}

impl App {
    pub fn new(api: Arc<dyn LibraryApi>, base_url: String) -> Self {
        Self {
            api,
            screen: Screen::Login(LoginScreen::new()),
            toast: None,
            status_message: String::from("Введите номер читательского билета"),
            base_url,
            next_request_id: 1,
        }
    }

    pub fn next_request_id(&mut self) -> RequestId {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    pub fn show_toast(&mut self, text: impl Into<String>, kind: ToastKind, duration: Duration) {
        self.toast = Some(Toast {
            text: text.into(),
            kind,
            shown_at: Instant::now(),
            duration,
        });
    }

    pub fn books_screen(&self) -> Option<&BookListScreen> {
        match &self.screen {
            Screen::Books(screen) => Some(screen),
            Screen::Login(_) => None,
        }
    }

    pub fn login_screen(&self) -> Option<&LoginScreen> {
        match &self.screen {
            Screen::Login(screen) => Some(screen),
            Screen::Books(_) => None,
        }
    }
}
