//! # Book List
//!
//! The fetched books plus the subset currently on screen.
//!
//! ```text
//! full:    [A, B, C, D]      // replaced wholesale by set_books()
//! display: [0, 2]            // indices into full, ascending
//! ```
//!
//! `display` always points into the last `full` list in original order.
//! Every mutation bumps `revision` so a view can tell the list changed.

use crate::api::BookRecord;

#[derive(Debug, Default, Clone)]
pub struct BookList {
    full: Vec<BookRecord>,
    display: Vec<usize>,
    query: String,
    revision: u64,
}

impl BookList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the list and shows all of it.
    pub fn set_books(&mut self, books: Vec<BookRecord>) {
        self.display = (0..books.len()).collect();
        self.full = books;
        self.query.clear();
        self.revision += 1;
    }

    /// Recomputes the display list for `query`.
    pub fn filter(&mut self, query: &str) {
        self.query = query.to_string();
        self.display = matching_indices(&self.full, query);
        self.revision += 1;
    }

    /// Books on screen, in fetch order.
    pub fn display(&self) -> impl ExactSizeIterator<Item = &BookRecord> + '_ {
        self.display.iter().map(|&i| &self.full[i])
    }

    /// The book at a display position.
    pub fn get(&self, display_index: usize) -> Option<&BookRecord> {
        self.display.get(display_index).map(|&i| &self.full[i])
    }

    /// Number of books on screen.
    pub fn len(&self) -> usize {
        self.display.len()
    }

    pub fn is_empty(&self) -> bool {
        self.display.is_empty()
    }

    /// Number of books fetched, filtered or not.
    pub fn total(&self) -> usize {
        self.full.len()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}

/// Indices of the books whose title, author or code contains `query`,
/// ignoring case and surrounding whitespace. An empty query matches all.
pub fn matching_indices(books: &[BookRecord], query: &str) -> Vec<usize> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return (0..books.len()).collect();
    }

    books
        .iter()
        .enumerate()
        .filter(|(_, book)| matches(book, &needle))
        .map(|(i, _)| i)
        .collect()
}

/// `needle` must already be lowercased.
fn matches(book: &BookRecord, needle: &str) -> bool {
    [&book.title, &book.author, &book.code]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{book, sample_books};

    fn filtered(books: &[BookRecord], query: &str) -> Vec<BookRecord> {
        matching_indices(books, query)
            .into_iter()
            .map(|i| books[i].clone())
            .collect()
    }

    fn is_subsequence(sub: &[BookRecord], of: &[BookRecord]) -> bool {
        let mut rest = of.iter();
        sub.iter().all(|b| rest.any(|candidate| candidate == b))
    }

    #[test]
    fn test_empty_query_shows_everything() {
        let books = sample_books();
        assert_eq!(filtered(&books, ""), books);
        assert_eq!(filtered(&books, "   "), books);
    }

    #[test]
    fn test_set_books_then_clear_filter_reproduces_input() {
        let books = sample_books();
        let mut list = BookList::new();
        list.set_books(books.clone());
        list.filter("толстой");
        list.filter("");
        let shown: Vec<BookRecord> = list.display().cloned().collect();
        assert_eq!(shown, books);
        assert_eq!(list.len(), list.total());
    }

    #[test]
    fn test_search_by_author_lowercase() {
        let mut list = BookList::new();
        list.set_books(sample_books());
        list.filter("пушкин");
        let shown: Vec<&str> = list.display().map(|b| b.code.as_str()).collect();
        assert_eq!(shown, vec!["B-001"]);
    }

    #[test]
    fn test_search_by_title_and_code() {
        let books = sample_books();
        assert_eq!(filtered(&books, "война")[0].code, "B-002");
        assert_eq!(filtered(&books, "b-003")[0].title, "Мастер и Маргарита");
    }

    #[test]
    fn test_case_insensitive() {
        let books = sample_books();
        for query in ["ПУШКИН", "пушкин", "ПуШкИн", "B-00", "b-00", "МАСТЕР"] {
            assert_eq!(
                filtered(&books, &query.to_uppercase()),
                filtered(&books, &query.to_lowercase()),
                "query {query}"
            );
        }
    }

    #[test]
    fn test_filter_is_idempotent_and_order_preserving() {
        let books = sample_books();
        for query in ["", "а", "о", "b-", "лев", "nothing"] {
            let once = filtered(&books, query);
            let twice = filtered(&once, query);
            assert_eq!(once, twice, "query {query}");
            assert!(is_subsequence(&once, &books), "query {query}");
        }
    }

    #[test]
    fn test_no_match_gives_empty_display() {
        let mut list = BookList::new();
        list.set_books(sample_books());
        list.filter("стругацкие");
        assert!(list.is_empty());
        assert_eq!(list.total(), 3);
        assert!(list.get(0).is_none());
    }

    #[test]
    fn test_set_books_replaces_and_resets_query() {
        let mut list = BookList::new();
        list.set_books(sample_books());
        list.filter("пушкин");

        let replacement = vec![book("X-1", "Н.В. Гоголь", "Мёртвые души")];
        list.set_books(replacement.clone());
        assert_eq!(list.query(), "");
        assert_eq!(list.display().cloned().collect::<Vec<_>>(), replacement);
    }

    #[test]
    fn test_every_change_bumps_revision() {
        let mut list = BookList::new();
        let start = list.revision();
        list.set_books(sample_books());
        list.filter("");
        list.filter("");
        assert_eq!(list.revision(), start + 3);
    }

    #[test]
    fn test_get_maps_display_position() {
        let mut list = BookList::new();
        list.set_books(sample_books());
        list.filter("б-00"); // cyrillic "б" does not match latin "B"
        assert!(list.is_empty());
        list.filter("Маргарита");
        assert_eq!(list.get(0).map(|b| b.code.as_str()), Some("B-003"));
    }
}
