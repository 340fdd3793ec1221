//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Requests
//!
//! `update()` hands back `Effect::Spawn(request)`; the loop runs it on the
//! tokio runtime and the finished `Action` comes back over an mpsc channel
//! drained once per frame. The loop itself never waits on the network.
//!
//! ## Redraw Strategy
//!
//! - **Animating** (login or fetch in flight): draws every ~80ms for the spinner.
//! - **Idle**: sleeps up to 500ms, only redraws on events, completions,
//!   or an expiring toast.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;

use crate::api::{HttpLibraryClient, LibraryApi};
use crate::core::action::{Action, Effect, Request, perform, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::{App, Screen};
use crate::tui::component::EventHandler;
use crate::tui::components::{BookListState, InputBox, InputEvent};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub login_input: InputBox,
    pub search_input: InputBox,
    pub book_list: BookListState,
    pub detail_open: bool,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            login_input: InputBox::new(" Номер билета ", "например, 12345"),
            search_input: InputBox::new(" Поиск ", "название, автор или код"),
            book_list: BookListState::new(),
            detail_open: false,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableBracketedPaste,
            Show,                        // Show cursor for input editing
            SetCursorStyle::SteadyBlock, // Non-blinking: redraws reset the blink timer
        )?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableBracketedPaste, Hide);
    }
}

/// Build the backend client from a resolved config.
pub fn build_api(config: &ResolvedConfig) -> std::io::Result<Arc<dyn LibraryApi>> {
    let client =
        HttpLibraryClient::new(&config.base_url, config.timeout).map_err(std::io::Error::other)?;
    info!(
        "Backend: {} (timeout {}s)",
        client.base_url(),
        config.timeout.as_secs()
    );
    Ok(Arc::new(client))
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let api = build_api(&config)?;
    let mut app = App::new(api, config.base_url.clone());
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for completed requests
    let (tx, rx) = mpsc::channel();

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        let animating = is_busy(&app);
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let effect = handle_event(&mut app, &mut tui, event);
            if apply_effect(&app, effect, &tx) {
                should_quit = true;
            }
        }
        if should_quit {
            break;
        }

        // Completed requests
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            apply_effect(&app, effect, &tx);
        }

        let had_toast = app.toast.is_some();
        update(&mut app, Action::Tick(Instant::now()));
        if had_toast && app.toast.is_none() {
            needs_redraw = true;
        }
    }

    info!("Shutting down");
    ratatui::restore();
    Ok(())
}

fn is_busy(app: &App) -> bool {
    match &app.screen {
        Screen::Login(screen) => screen.is_submitting(),
        Screen::Books(screen) => screen.is_loading(),
    }
}

/// Runs an effect. Returns true when the app should quit.
fn apply_effect(app: &App, effect: Effect, tx: &mpsc::Sender<Action>) -> bool {
    match effect {
        Effect::None => false,
        Effect::Quit => true,
        Effect::Spawn(request) => {
            spawn_request(app.api.clone(), request, tx.clone());
            false
        }
    }
}

/// Translates one terminal event for the active screen.
fn handle_event(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> Effect {
    match event {
        TuiEvent::Resize => Effect::None,
        TuiEvent::ForceQuit => update(app, Action::Quit),
        _ => match app.screen {
            Screen::Login(_) => handle_login_event(app, tui, event),
            Screen::Books(_) => handle_books_event(app, tui, event),
        },
    }
}

fn handle_login_event(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> Effect {
    if event == TuiEvent::Escape {
        return update(app, Action::Quit);
    }
    match tui.login_input.handle_event(&event) {
        Some(InputEvent::Submit(text)) => update(app, Action::SubmitLogin(text)),
        Some(InputEvent::ContentChanged) | None => Effect::None,
    }
}

fn handle_books_event(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> Effect {
    let Some(screen) = app.books_screen() else {
        return Effect::None;
    };
    let len = screen.books().len();
    let list_visible = screen.list_visible();
    let search_enabled = screen.search_enabled();

    // Detail popup swallows everything but close
    if tui.detail_open {
        if matches!(event, TuiEvent::Escape | TuiEvent::Submit) {
            tui.detail_open = false;
        }
        return Effect::None;
    }

    match event {
        TuiEvent::Refresh => {
            if is_busy(app) {
                return Effect::None;
            }
            tui.search_input.clear();
            update(app, Action::Refresh)
        }
        TuiEvent::Escape => {
            if tui.search_input.text().is_empty() {
                return Effect::None;
            }
            tui.search_input.clear();
            search(app, tui, String::new())
        }
        TuiEvent::CursorUp => {
            tui.book_list.up(len);
            Effect::None
        }
        TuiEvent::CursorDown => {
            tui.book_list.down(len);
            Effect::None
        }
        TuiEvent::PageUp => {
            tui.book_list.page_up(len);
            Effect::None
        }
        TuiEvent::PageDown => {
            tui.book_list.page_down(len);
            Effect::None
        }
        TuiEvent::Submit => {
            if list_visible && tui.book_list.selected().is_some_and(|i| i < len) {
                tui.detail_open = true;
            }
            Effect::None
        }
        _ if search_enabled => match tui.search_input.handle_event(&event) {
            Some(InputEvent::ContentChanged) => {
                let query = tui.search_input.text().to_string();
                search(app, tui, query)
            }
            _ => Effect::None,
        },
        _ => Effect::None,
    }
}

/// Refilters and resets the selection before any further key in the batch
/// can act on it.
fn search(app: &mut App, tui: &mut TuiState, query: String) -> Effect {
    let effect = update(app, Action::SearchChanged(query));
    if let Some(screen) = app.books_screen() {
        tui.book_list.sync(screen.books());
    }
    effect
}

fn spawn_request(api: Arc<dyn LibraryApi>, request: Request, tx: mpsc::Sender<Action>) {
    info!("Spawning request: {:?}", request);
    tokio::spawn(async move {
        let action = perform(api.as_ref(), request).await;
        if tx.send(action).is_err() {
            warn!("Failed to deliver request result: receiver dropped");
        }
    });
}
