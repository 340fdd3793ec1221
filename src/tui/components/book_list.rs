//! # Book List Component
//!
//! Renders the display subset of a `BookList` with a selection bar.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `BookListState` lives in `TuiState`
//! - `BookListView` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding};

use crate::api::BookRecord;
use crate::core::books::BookList;
use crate::tui::component::Component;

/// Rows moved by PageUp/PageDown.
const PAGE: usize = 5;

/// Persistent selection state for the book list.
#[derive(Default)]
pub struct BookListState {
    pub list_state: ListState,
    /// Revision of the `BookList` the selection was computed for.
    seen_revision: Option<u64>,
}

impl BookListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets the selection to the top whenever the list changed.
    pub fn sync(&mut self, books: &BookList) {
        if self.seen_revision == Some(books.revision()) {
            return;
        }
        self.seen_revision = Some(books.revision());
        self.list_state
            .select(if books.is_empty() { None } else { Some(0) });
    }

    pub fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }

    /// Moves the selection by `delta` rows, clamped to the list.
    pub fn move_by(&mut self, delta: isize, len: usize) {
        if len == 0 {
            self.list_state.select(None);
            return;
        }
        let current = self.list_state.selected().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, len as isize - 1) as usize;
        self.list_state.select(Some(next));
    }

    pub fn up(&mut self, len: usize) {
        self.move_by(-1, len);
    }

    pub fn down(&mut self, len: usize) {
        self.move_by(1, len);
    }

    pub fn page_up(&mut self, len: usize) {
        self.move_by(-(PAGE as isize), len);
    }

    pub fn page_down(&mut self, len: usize) {
        self.move_by(PAGE as isize, len);
    }
}

/// Transient render wrapper for the book list.
pub struct BookListView<'a> {
    books: &'a BookList,
    state: &'a mut BookListState,
}

impl<'a> BookListView<'a> {
    pub fn new(books: &'a BookList, state: &'a mut BookListState) -> Self {
        Self { books, state }
    }
}

/// Two lines per book: title, then author, code and year.
fn book_item(book: &BookRecord) -> ListItem<'_> {
    let dim = Style::default().fg(Color::Gray);
    ListItem::new(vec![
        Line::from(Span::styled(
            book.title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(format!("Автор: {}", book.author), dim),
            Span::styled("  ·  ", Style::default().fg(Color::DarkGray)),
            Span::styled(format!("Код: {}", book.code), dim),
            Span::styled("  ·  ", Style::default().fg(Color::DarkGray)),
            Span::styled(format!("{} г.", book.year_published), dim),
        ]),
    ])
}

impl Component for BookListView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.sync(self.books);

        let title = if self.books.query().trim().is_empty() {
            format!(" Мои книги ({}) ", self.books.total())
        } else {
            format!(" Мои книги ({} из {}) ", self.books.len(), self.books.total())
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(title)
            .padding(Padding::horizontal(1));

        let items: Vec<ListItem> = self.books.display().map(book_item).collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().fg(Color::Black).bg(Color::Cyan))
            .highlight_symbol("▌");

        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}
