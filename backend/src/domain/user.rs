//! User identity as resolved by the identity provider.
//!
//! The aggregate only ever references users; it never creates or deletes
//! them. Rows are upserted on login before any aggregate operation runs.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Maximum username length accepted from the identity provider.
pub const USERNAME_MAX: usize = 255;

/// Validation errors returned by the user constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    InvalidId,
    EmptyUsername,
    UsernameTooLong { max: usize },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "user id must be a non-negative integer"),
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::UsernameTooLong { max } => {
                write!(f, "username must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable external user identifier.
///
/// The identity provider issues non-negative integers; zero is a valid id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct UserId(i64);

impl UserId {
    /// Validate and construct a [`UserId`].
    ///
    /// # Examples
    /// ```
    /// use scheduler::domain::UserId;
    ///
    /// assert_eq!(UserId::new(0).expect("zero is valid").value(), 0);
    /// assert!(UserId::new(-1).is_err());
    /// ```
    pub fn new(value: i64) -> Result<Self, UserValidationError> {
        if value < 0 {
            return Err(UserValidationError::InvalidId);
        }
        Ok(Self(value))
    }

    /// Parse an identifier from path or session text.
    pub fn parse(raw: &str) -> Result<Self, UserValidationError> {
        let value = raw
            .trim()
            .parse::<i64>()
            .map_err(|_| UserValidationError::InvalidId)?;
        Self::new(value)
    }

    /// Wrap a value already validated by the storage layer.
    pub(crate) fn from_db(value: i64) -> Self {
        Self(value)
    }

    /// Raw integer value.
    pub fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<UserId> for i64 {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<i64> for UserId {
    type Error = UserValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Display name supplied by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(raw: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if raw.chars().count() > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Authenticated participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[schema(value_type = i64, example = 0)]
    user_id: UserId,
    #[schema(value_type = String, example = "testuser")]
    username: Username,
}

impl User {
    /// Build a user from validated components.
    pub fn new(user_id: UserId, username: Username) -> Self {
        Self { user_id, username }
    }

    /// Stable identifier.
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Display name.
    pub fn username(&self) -> &Username {
        &self.username
    }
}
