//! User data model.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;
use uuid::Uuid;

/// Maximum number of characters in a user's name.
pub const NAME_MAX: usize = 256;
/// Maximum number of characters in a user's email address.
pub const EMAIL_MAX: usize = 256;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // One `@`, no whitespace or control characters, and a dot somewhere
        // in the domain part.
        Regex::new(r"^[^\s@\p{Cc}]+@[^\s@\p{Cc}]+\.[^\s@\p{Cc}]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Field-level problems found while validating user input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// The id is not a UUID.
    #[error("user id must be a valid UUID")]
    InvalidId,
    /// The name is empty once trimmed.
    #[error("name must not be empty")]
    EmptyName,
    /// The name exceeds [`NAME_MAX`] characters.
    #[error("Maximum of {max} characters")]
    NameTooLong {
        /// Largest accepted length.
        max: usize,
    },
    /// The name contains control characters such as NUL.
    #[error("name must not contain control characters")]
    NameControlCharacters,
    /// The email exceeds [`EMAIL_MAX`] characters.
    #[error("Maximum of {max} characters")]
    EmailTooLong {
        /// Largest accepted length.
        max: usize,
    },
    /// The email is not shaped like an address.
    #[error("Invalid email")]
    InvalidEmail,
}

impl UserValidationError {
    /// Name of the input field the problem refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::InvalidId => "user_id",
            Self::EmptyName | Self::NameTooLong { .. } | Self::NameControlCharacters => "name",
            Self::EmailTooLong { .. } | Self::InvalidEmail => "email",
        }
    }
}

/// Stable user identifier assigned by the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Parse an identifier from its textual form.
    ///
    /// # Errors
    ///
    /// Returns [`UserValidationError::InvalidId`] unless `id` is a UUID.
    ///
    /// ```
    /// use backend::domain::UserId;
    ///
    /// assert!(UserId::parse("7f1e5a9c-3b52-4c3e-9d7a-2f0b6c1d8e44").is_ok());
    /// assert!(UserId::parse("42").is_err());
    /// ```
    pub fn parse(id: &str) -> Result<Self, UserValidationError> {
        Uuid::parse_str(id)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Generate a new random [`UserId`].
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for UserId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Caller-supplied part of a user, used for create and update.
///
/// ## Invariants
/// - `name` is trimmed, holds `1..=NAME_MAX` characters, and has no
///   control characters.
/// - `email` is trimmed, holds at most `EMAIL_MAX` characters, and is shaped
///   like `local@domain.tld`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    name: String,
    email: String,
}

impl UserDraft {
    /// Validate and construct a draft.
    ///
    /// # Errors
    ///
    /// Returns every field problem found, in field order.
    ///
    /// ```
    /// use backend::domain::UserDraft;
    ///
    /// let draft = UserDraft::new("Ann", "ann@x.com").expect("valid draft");
    /// assert_eq!(draft.name(), "Ann");
    /// assert!(UserDraft::new("a", "not-an-email").is_err());
    /// ```
    pub fn new(
        name: impl AsRef<str>,
        email: impl AsRef<str>,
    ) -> Result<Self, Vec<UserValidationError>> {
        let trimmed_name = name.as_ref().trim();
        let trimmed_email = email.as_ref().trim();
        let mut problems = Vec::new();

        if trimmed_name.is_empty() {
            problems.push(UserValidationError::EmptyName);
        } else if trimmed_name.chars().count() > NAME_MAX {
            problems.push(UserValidationError::NameTooLong { max: NAME_MAX });
        } else if trimmed_name.chars().any(char::is_control) {
            problems.push(UserValidationError::NameControlCharacters);
        }
        if trimmed_email.chars().count() > EMAIL_MAX {
            problems.push(UserValidationError::EmailTooLong { max: EMAIL_MAX });
        } else if !email_regex().is_match(trimmed_email) {
            problems.push(UserValidationError::InvalidEmail);
        }

        if problems.is_empty() {
            Ok(Self {
                name: trimmed_name.to_owned(),
                email: trimmed_email.to_owned(),
            })
        } else {
            Err(problems)
        }
    }

    /// The user's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The user's email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}

/// A persisted user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Identifier assigned on insert.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Contact address.
    pub email: String,
    /// Insert time, set by the database.
    pub created_at: DateTime<Utc>,
    /// Time of the latest update; `None` until the first update.
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests;
