pub mod client;
pub mod http;
pub mod types;

pub use client::{ApiError, LibraryApi};
pub use http::HttpLibraryClient;
pub use types::{AuthResponse, BookRecord, CardNumber, Credentials, Role, UserProfile};
