//! # Actions
//!
//! Everything that can happen in Bookshelf becomes an `Action`.
//! User presses Enter on the login form? That's `Action::SubmitLogin(text)`.
//! Backend answers? That's `Action::LoginFinished { id, result }`.
//!
//! `update()` takes the current state and an action, mutates the state,
//! and returns an `Effect` describing the I/O the caller should run. No
//! I/O happens here; `perform()` is the only place a request is sent.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//!                                          │
//!                  Effect::Spawn(request) ──┴─▶ perform() ─▶ Action
//! ```

use std::time::Instant;

use log::{debug, info};

use crate::api::{ApiError, AuthResponse, BookRecord, CardNumber, Credentials, LibraryApi};
use crate::core::book_screen::BookListScreen;
use crate::core::error::ClientError;
use crate::core::login::Submission;
use crate::core::state::{App, LONG_TOAST, RequestId, SHORT_TOAST, Screen, ToastKind};

#[derive(Debug)]
pub enum Action {
    SubmitLogin(String),
    LoginFinished {
        id: RequestId,
        result: Result<AuthResponse, ApiError>,
    },
    Refresh,
    SearchChanged(String),
    BooksFetched {
        id: RequestId,
        result: Result<Vec<BookRecord>, ApiError>,
    },
    Tick(Instant),
    Quit,
}

/// A network request the caller should run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Login {
        id: RequestId,
        credentials: Credentials,
    },
    FetchBooks {
        id: RequestId,
        card_number: CardNumber,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    Spawn(Request),
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::SubmitLogin(text) => submit_login(app, &text),
        Action::LoginFinished { id, result } => finish_login(app, id, result),
        Action::Refresh => start_fetch(app),
        Action::SearchChanged(query) => {
            if let Screen::Books(screen) = &mut app.screen
                && screen.search(&query)
            {
                app.status_message = search_status(screen);
            }
            Effect::None
        }
        Action::BooksFetched { id, result } => finish_fetch(app, id, result),
        Action::Tick(now) => {
            if app.toast.as_ref().is_some_and(|t| t.is_expired(now)) {
                app.toast = None;
            }
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn submit_login(app: &mut App, text: &str) -> Effect {
    let id = app.next_request_id();
    let Screen::Login(screen) = &mut app.screen else {
        return Effect::None;
    };
    match screen.submit(text, id) {
        Ok(Submission::Send(credentials)) => {
            app.status_message = String::from("Вход...");
            Effect::Spawn(Request::Login { id, credentials })
        }
        Ok(Submission::InFlight) => Effect::None,
        Err(e) => {
            app.show_toast(e.user_message(), ToastKind::Error, SHORT_TOAST);
            Effect::None
        }
    }
}

fn finish_login(app: &mut App, id: RequestId, result: Result<AuthResponse, ApiError>) -> Effect {
    let Screen::Login(screen) = &mut app.screen else {
        debug!("Login response {} arrived after leaving the login screen", id);
        return Effect::None;
    };
    match screen.resolve(id, result) {
        None => Effect::None,
        Some(Ok(profile)) => {
            app.show_toast(
                format!("Добро пожаловать, {}!", profile.display_name()),
                ToastKind::Info,
                SHORT_TOAST,
            );
            info!("Navigating to book list for card {}", profile.card_number);
            app.screen = Screen::Books(BookListScreen::for_reader(profile));
            start_fetch(app)
        }
        Some(Err(e)) => {
            app.status_message = String::from("Введите номер читательского билета");
            // Long only when the server worded the message itself
            let duration = match e {
                ClientError::Server {
                    message: Some(_), ..
                } => LONG_TOAST,
                _ => SHORT_TOAST,
            };
            app.show_toast(e.user_message(), ToastKind::Error, duration);
            Effect::None
        }
    }
}

fn start_fetch(app: &mut App) -> Effect {
    let id = app.next_request_id();
    let Screen::Books(screen) = &mut app.screen else {
        return Effect::None;
    };
    match screen.begin_fetch(id) {
        Ok(Some(card_number)) => {
            app.status_message = String::from("Загрузка...");
            Effect::Spawn(Request::FetchBooks { id, card_number })
        }
        Ok(None) => Effect::None,
        Err(e) => {
            app.show_toast(e.user_message(), ToastKind::Error, SHORT_TOAST);
            Effect::None
        }
    }
}

fn finish_fetch(
    app: &mut App,
    id: RequestId,
    result: Result<Vec<BookRecord>, ApiError>,
) -> Effect {
    let Screen::Books(screen) = &mut app.screen else {
        debug!("Book list response {} arrived without a book screen", id);
        return Effect::None;
    };
    match screen.resolve(id, result) {
        None => {}
        Some(Ok(())) => app.status_message = search_status(screen),
        Some(Err(e)) => {
            app.status_message = String::from("Не удалось загрузить список");
            app.show_toast(e.user_message(), ToastKind::Error, LONG_TOAST);
        }
    }
    Effect::None
}

fn search_status(screen: &BookListScreen) -> String {
    let books = screen.books();
    if books.query().trim().is_empty() {
        format!("Книг: {}", books.total())
    } else {
        format!("Найдено: {} из {}", books.len(), books.total())
    }
}

/// Runs one request against the backend and wraps the result as the
/// matching completion action.
pub async fn perform(api: &dyn LibraryApi, request: Request) -> Action {
    match request {
        Request::Login { id, credentials } => Action::LoginFinished {
            id,
            result: api.login(credentials).await,
        },
        Request::FetchBooks { id, card_number } => Action::BooksFetched {
            id,
            result: api.fetch_reader_books(card_number).await,
        },
    }
}
