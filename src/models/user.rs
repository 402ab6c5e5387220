use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

lazy_static! {
    // Display names: anything printable, no control characters.
    static ref NAME_REGEX: Regex = Regex::new(r"^[^\p{Cc}]+$").unwrap();
}

/// Public view of a user account. The password hash never leaves the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "userId")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Registration payload.
#[derive(Debug, Deserialize, Validate)]
pub struct UserInput {
    /// Stored trimmed, so a name made only of whitespace is rejected.
    #[validate(
        length(min = 1, max = 100),
        custom = "not_blank",
        regex(path = "NAME_REGEX", message = "Name must not contain control characters")
    )]
    pub name: String,
    #[validate(email)]
    pub email: String,
    /// bcrypt only looks at the first 72 bytes, so longer passwords are rejected.
    #[validate(length(min = 8, max = 72))]
    pub password: String,
}

/// A user about to be inserted, with the password already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Row shape of the `users` table, including the stored hash.
#[derive(Debug, Clone, FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            email: record.email,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("Name must not be blank".into());
        return Err(error);
    }
    Ok(())
}

/// Emails are unique case-insensitively; they are stored and looked up in this form.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
