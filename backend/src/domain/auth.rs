//! Login credentials accepted by the fixture identity provider.
//!
//! Handlers convert raw form or JSON fields into [`LoginCredentials`] before
//! calling the [`crate::domain::ports::LoginService`] port.

use thiserror::Error;
use zeroize::Zeroizing;

/// Rejected login payload values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginValidationError {
    #[error("username must not be empty")]
    EmptyUsername,
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Username and password pair.
///
/// The username is trimmed; the password is kept exactly as typed and wiped
/// from memory on drop.
///
/// # Examples
/// ```
/// use scheduler::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" testuser ", "password")
///     .expect("valid credentials");
/// assert_eq!(creds.username(), "testuser");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Validate raw inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username: username.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Submitted username, trimmed.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Submitted password, verbatim.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}
