//! Wire types for the library backend.
//!
//! Field names on the wire are snake_case and some differ from ours
//! (`name` is the book title, `year_publication` the year). Serde renames
//! keep the round trip exact.

use serde::{Deserialize, Serialize};

/// A library card number, the patron's primary key on the backend.
pub type CardNumber = u32;

/// Login request body.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Credentials {
    pub card_number: CardNumber,
}

impl Credentials {
    pub fn new(card_number: CardNumber) -> Self {
        Self { card_number }
    }
}

/// Backend-assigned role of a user.
///
/// Decoding never fails on an unknown role: anything that is not one of the
/// two known strings lands in `Unrecognized` and is denied access.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Reader,
    Administrator,
    Unrecognized(String),
}

pub const ROLE_READER: &str = "Читатель";
pub const ROLE_ADMINISTRATOR: &str = "Администратор";

impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.as_str() {
            ROLE_READER => Role::Reader,
            ROLE_ADMINISTRATOR => Role::Administrator,
            _ => Role::Unrecognized(value),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Reader => ROLE_READER.to_string(),
            Role::Administrator => ROLE_ADMINISTRATOR.to_string(),
            Role::Unrecognized(value) => value,
        }
    }
}

/// The user carried in a successful login response.
///
/// The backend sends the whole reader record (address, phone, login...);
/// only the fields below are kept.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub card_number: CardNumber,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    pub name: String,
    pub patronymic: String,
    pub role: Role,
}

impl UserProfile {
    /// "Name Patronymic", the polite form used in greetings.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.name, self.patronymic)
    }
}

/// Login response. Also the shape of most backend error bodies.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AuthResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub user: Option<UserProfile>,
}

/// A book checked out to the reader. Identity is `code`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BookRecord {
    pub code: String,
    pub author: String,
    #[serde(rename = "name")]
    pub title: String,
    #[serde(rename = "year_publication")]
    pub year_published: i32,
    #[serde(rename = "sign_novelty_and_annotations")]
    pub novelty_annotation: String,
}
