//! reqwest-backed implementation of [`LibraryApi`].
//!
//! One `reqwest::Client` is built up front with the request timeout and
//! shared by every call. Error bodies are decoded the same way on both
//! endpoints: an `AuthResponse`-shaped `message`, else a FastAPI `detail`
//! string, else nothing.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::client::{ApiError, LibraryApi};
use super::types::{AuthResponse, BookRecord, CardNumber, Credentials};

/// Loose shape of a backend error body.
#[derive(Deserialize, Debug, Default)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        let message = self.message.filter(|m| !m.trim().is_empty());
        let detail = match self.detail {
            Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s),
            _ => None,
        };
        message.or(detail)
    }
}

/// Recovers a user-facing message from a non-2xx body. Never fails.
fn decode_error_body(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.into_message(),
        Err(e) => {
            debug!("Error body is not JSON we understand: {}", e);
            None
        }
    }
}

pub struct HttpLibraryClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpLibraryClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends a prepared request and decodes a 2xx body into `T`.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        label: &str,
    ) -> Result<T, ApiError> {
        let response = request.send().await.map_err(|e| {
            warn!("{} failed before a response arrived: {}", label, e);
            ApiError::Network(e.to_string())
        })?;

        let status = response.status().as_u16();
        debug!("{} response status: {}", label, status);

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = decode_error_body(&body);
            warn!("{} returned HTTP {} ({:?})", label, status, message);
            return Err(ApiError::Status { status, message });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| {
            warn!("{} returned an undecodable body: {}", label, e);
            ApiError::Decode {
                status,
                detail: e.to_string(),
            }
        })
    }
}

#[async_trait]
impl LibraryApi for HttpLibraryClient {
    async fn login(&self, credentials: Credentials) -> Result<AuthResponse, ApiError> {
        info!("POST /auth/login card_number={}", credentials.card_number);
        let request = self
            .client
            .post(format!("{}/auth/login", self.base_url))
            .json(&credentials);
        self.execute(request, "login").await
    }

    async fn fetch_reader_books(
        &self,
        card_number: CardNumber,
    ) -> Result<Vec<BookRecord>, ApiError> {
        info!("GET /tickets/{}/books", card_number);
        let request = self
            .client
            .get(format!("{}/tickets/{}/books", self.base_url, card_number));
        let books: Vec<BookRecord> = self.execute(request, "fetch_reader_books").await?;
        info!("Fetched {} books for card {}", books.len(), card_number);
        Ok(books)
    }
}
