//! # TUI Components
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: Top status line with reader, status, refresh time
//! - `BookDetail`: Popup with all fields of one book
//!
//! ### Stateful Components
//!
//! - `InputBox`: Single-line text field (card number, search)
//! - `BookListView` + `BookListState`: Selectable list of books
//!
//! Each component file holds its state type, events, rendering and tests.
//! Components receive external data as props, never by reaching into
//! `App`, which keeps them testable against a `TestBackend`.

pub mod book_detail;
pub mod book_list;
pub mod input_box;
pub mod title_bar;

pub use book_detail::BookDetail;
pub use book_list::{BookListState, BookListView};
pub use input_box::{InputBox, InputEvent};
pub use title_bar::TitleBar;
