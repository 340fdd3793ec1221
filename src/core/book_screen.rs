//! # Book List Screen
//!
//! ```text
//!            begin_fetch()                 resolve(id)
//! (entry) ───────────────▶ Loading(id) ──┬──▶ Populated   list shown
//!    ▲                                   ├──▶ Empty       empty state shown
//!    │          refresh                  └──▶ Failed      nothing shown
//!    └───────────────────────────────────────────┘
//! ```
//!
//! Without a card number the screen goes straight to `MissingCard` and
//! never fetches. Search only refilters the `BookList`; it never changes
//! the phase.

use chrono::{DateTime, Local};
use log::{debug, info};

use crate::api::{ApiError, BookRecord, CardNumber, UserProfile};
use crate::core::books::BookList;
use crate::core::error::ClientError;
use crate::core::state::RequestId;

pub const MISSING_CARD_MESSAGE: &str = "Ошибка: неверный ID пользователя.";
pub const NO_CONNECTION_MESSAGE: &str = "Нет связи с сервером.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BooksPhase {
    /// Created, nothing requested yet.
    Idle,
    MissingCard,
    Loading(RequestId),
    Populated,
    Empty,
    Failed(ClientError),
}

#[derive(Debug)]
pub struct BookListScreen {
    card_number: Option<CardNumber>,
    reader: Option<UserProfile>,
    phase: BooksPhase,
    books: BookList,
    fetched_at: Option<DateTime<Local>>,
}

impl BookListScreen {
    pub fn new(card_number: Option<CardNumber>, reader: Option<UserProfile>) -> Self {
        Self {
            card_number,
            reader,
            phase: BooksPhase::Idle,
            books: BookList::new(),
            fetched_at: None,
        }
    }

    /// Screen for a reader who just signed in.
    pub fn for_reader(reader: UserProfile) -> Self {
        Self::new(Some(reader.card_number), Some(reader))
    }

    pub fn card_number(&self) -> Option<CardNumber> {
        self.card_number
    }

    pub fn reader(&self) -> Option<&UserProfile> {
        self.reader.as_ref()
    }

    pub fn phase(&self) -> &BooksPhase {
        &self.phase
    }

    pub fn books(&self) -> &BookList {
        &self.books
    }

    pub fn fetched_at(&self) -> Option<DateTime<Local>> {
        self.fetched_at
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, BooksPhase::Loading(_))
    }

    pub fn loading_visible(&self) -> bool {
        self.is_loading()
    }

    pub fn list_visible(&self) -> bool {
        self.phase == BooksPhase::Populated
    }

    pub fn empty_visible(&self) -> bool {
        self.phase == BooksPhase::Empty
    }

    /// Starts a fetch on entry or refresh, clearing the search.
    ///
    /// Returns the card to fetch, or the reason no fetch was issued:
    /// `Ok(None)` while a fetch is already pending, `Err` without a card.
    pub fn begin_fetch(&mut self, request: RequestId) -> Result<Option<CardNumber>, ClientError> {
        let Some(card_number) = self.card_number else {
            self.phase = BooksPhase::MissingCard;
            return Err(ClientError::Validation(MISSING_CARD_MESSAGE.to_string()));
        };
        if self.is_loading() {
            debug!("Refresh ignored: fetch already in flight");
            return Ok(None);
        }

        self.books.filter("");
        self.phase = BooksPhase::Loading(request);
        Ok(Some(card_number))
    }

    /// Applies a fetch result. Returns `None` for a result this screen is
    /// not waiting for, otherwise the error to surface, if any.
    pub fn resolve(
        &mut self,
        request: RequestId,
        result: Result<Vec<BookRecord>, ApiError>,
    ) -> Option<Result<(), ClientError>> {
        if self.phase != BooksPhase::Loading(request) {
            debug!("Dropping stale book list response (request {})", request);
            return None;
        }

        match result {
            Ok(books) => {
                info!("Showing {} books", books.len());
                self.phase = if books.is_empty() {
                    BooksPhase::Empty
                } else {
                    BooksPhase::Populated
                };
                self.books.set_books(books);
                self.fetched_at = Some(Local::now());
                Some(Ok(()))
            }
            Err(e) => {
                let error = ClientError::from_api(e, |_| NO_CONNECTION_MESSAGE.to_string());
                info!("Book fetch failed: {}", error);
                self.phase = BooksPhase::Failed(error.clone());
                Some(Err(error))
            }
        }
    }

    /// Whether the search box accepts input right now.
    pub fn search_enabled(&self) -> bool {
        matches!(self.phase, BooksPhase::Populated | BooksPhase::Empty)
    }

    /// Refilters the list for the search box contents. Ignored unless a
    /// list has been loaded, so a fetch result never lands under a stale
    /// query.
    pub fn search(&mut self, query: &str) -> bool {
        if !self.search_enabled() {
            return false;
        }
        self.books.filter(query);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{reader_profile, sample_books};

    fn loaded_screen() -> BookListScreen {
        let mut screen = BookListScreen::for_reader(reader_profile());
        screen.begin_fetch(1).unwrap();
        screen.resolve(1, Ok(sample_books())).unwrap().unwrap();
        screen
    }

    #[test]
    fn test_missing_card_never_fetches() {
        let mut screen = BookListScreen::new(None, None);
        let err = screen.begin_fetch(1).unwrap_err();
        assert_eq!(err.user_message(), MISSING_CARD_MESSAGE);
        assert_eq!(screen.phase(), &BooksPhase::MissingCard);
        assert!(!screen.loading_visible());
        assert!(!screen.list_visible());
    }

    #[test]
    fn test_entry_starts_loading() {
        let mut screen = BookListScreen::for_reader(reader_profile());
        assert_eq!(screen.begin_fetch(1), Ok(Some(12345)));
        assert!(screen.loading_visible());
        assert!(!screen.list_visible());
        assert!(!screen.empty_visible());
    }

    #[test]
    fn test_books_populate_list() {
        let screen = loaded_screen();
        assert_eq!(screen.phase(), &BooksPhase::Populated);
        assert!(screen.list_visible());
        assert!(!screen.loading_visible());
        assert_eq!(screen.books().len(), 3);
        assert!(screen.fetched_at().is_some());
    }

    #[test]
    fn test_empty_result_shows_empty_state() {
        let mut screen = BookListScreen::for_reader(reader_profile());
        screen.begin_fetch(1).unwrap();
        screen.resolve(1, Ok(vec![])).unwrap().unwrap();
        assert!(screen.empty_visible());
        assert!(!screen.list_visible());
    }

    #[test]
    fn test_server_error_hides_list() {
        let mut screen = BookListScreen::for_reader(reader_profile());
        screen.begin_fetch(1).unwrap();
        let err = screen
            .resolve(
                1,
                Err(ApiError::Status {
                    status: 500,
                    message: None,
                }),
            )
            .unwrap()
            .unwrap_err();
        assert_eq!(err.user_message(), "Ошибка сервера: 500.");
        assert!(!screen.list_visible());
        assert!(!screen.empty_visible());
    }

    #[test]
    fn test_network_error_hides_list() {
        let mut screen = loaded_screen();
        screen.begin_fetch(2).unwrap();
        let err = screen
            .resolve(2, Err(ApiError::Network("operation timed out".to_string())))
            .unwrap()
            .unwrap_err();
        assert_eq!(err, ClientError::Transport(NO_CONNECTION_MESSAGE.to_string()));
        assert!(!screen.list_visible());
        assert!(!screen.loading_visible());
    }

    #[test]
    fn test_refresh_clears_search() {
        let mut screen = loaded_screen();
        screen.search("пушкин");
        assert_eq!(screen.books().len(), 1);
        screen.begin_fetch(2).unwrap();
        assert_eq!(screen.books().query(), "");
        assert_eq!(screen.books().len(), 3);
    }

    #[test]
    fn test_refresh_while_loading_is_ignored() {
        let mut screen = BookListScreen::for_reader(reader_profile());
        screen.begin_fetch(1).unwrap();
        assert_eq!(screen.begin_fetch(2), Ok(None));
        assert_eq!(screen.phase(), &BooksPhase::Loading(1));
    }

    #[test]
    fn test_stale_result_is_dropped() {
        let mut screen = loaded_screen();
        screen.begin_fetch(2).unwrap();
        assert_eq!(screen.resolve(1, Ok(vec![])), None);
        assert!(screen.loading_visible());
    }

    #[test]
    fn test_search_ignored_while_loading() {
        let mut screen = BookListScreen::for_reader(reader_profile());
        screen.begin_fetch(1).unwrap();
        assert!(!screen.search("пушкин"));
        screen.resolve(1, Ok(sample_books())).unwrap().unwrap();
        assert_eq!(screen.books().len(), 3);
    }

    #[test]
    fn test_search_does_not_change_phase() {
        let mut screen = loaded_screen();
        screen.search("пушкин");
        assert_eq!(screen.phase(), &BooksPhase::Populated);
        let codes: Vec<&str> = screen.books().display().map(|b| b.code.as_str()).collect();
        assert_eq!(codes, vec!["B-001"]);
    }
}
