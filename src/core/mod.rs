//! # Core Application Logic
//!
//! This module contains Bookshelf's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Screens (login/books)│
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    └───────────┬─────────────┘
//!                                │
//!                   ┌────────────┴────────────┐
//!                   ▼                         ▼
//!            ┌────────────┐            ┌────────────┐
//!            │    TUI     │            │    API     │
//!            │  Adapter   │            │  (reqwest) │
//!            │ (ratatui)  │            │            │
//!            └────────────┘            └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct — all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`login`] / [`book_screen`]: the two screen state machines
//! - [`books`]: the filterable book list behind the book screen
//! - [`error`]: user-facing error taxonomy
//! - [`config`]: layered configuration

pub mod action;
pub mod book_screen;
pub mod books;
pub mod config;
pub mod error;
pub mod login;
pub mod state;
