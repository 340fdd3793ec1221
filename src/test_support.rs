//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use async_trait::async_trait;

use crate::api::{
    ApiError, AuthResponse, BookRecord, CardNumber, Credentials, LibraryApi, Role, UserProfile,
};

/// An API that answers every call with the same canned result.
pub struct StaticApi {
    login: Result<AuthResponse, ApiError>,
    books: Result<Vec<BookRecord>, ApiError>,
}

impl StaticApi {
    pub fn new(
        login: Result<AuthResponse, ApiError>,
        books: Result<Vec<BookRecord>, ApiError>,
    ) -> Self {
        Self { login, books }
    }
}

#[async_trait]
impl LibraryApi for StaticApi {
    async fn login(&self, _credentials: Credentials) -> Result<AuthResponse, ApiError> {
        self.login.clone()
    }

    async fn fetch_reader_books(
        &self,
        _card_number: CardNumber,
    ) -> Result<Vec<BookRecord>, ApiError> {
        self.books.clone()
    }
}

/// Creates a test App whose API is never expected to be called.
pub fn test_app() -> crate::core::state::App {
    let api = StaticApi::new(
        Err(ApiError::Network("no network in tests".to_string())),
        Err(ApiError::Network("no network in tests".to_string())),
    );
    crate::core::state::App::new(Arc::new(api), "http://test.invalid".to_string())
}

pub fn reader_profile() -> UserProfile {
    UserProfile {
        card_number: 12345,
        surname: Some("Иванов".to_string()),
        name: "Иван".to_string(),
        patronymic: "Иванович".to_string(),
        role: Role::Reader,
    }
}

pub fn auth_ok(user: UserProfile) -> AuthResponse {
    AuthResponse {
        success: true,
        message: format!("Добро пожаловать, {}!", user.display_name()),
        user: Some(user),
    }
}

pub fn book(code: &str, author: &str, title: &str) -> BookRecord {
    BookRecord {
        code: code.to_string(),
        author: author.to_string(),
        title: title.to_string(),
        year_published: 1900,
        novelty_annotation: String::new(),
    }
}

pub fn sample_books() -> Vec<BookRecord> {
    vec![
        book("B-001", "А.С. Пушкин", "Евгений Онегин"),
        book("B-002", "Л.Н. Толстой", "Война и мир"),
        book("B-003", "М.А. Булгаков", "Мастер и Маргарита"),
    ]
}
