//! Login credentials accepted by the [`crate::domain::ports::LoginService`].

use zeroize::Zeroizing;

/// Validation failures for raw login payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Password was empty.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Username and password pair submitted at login.
///
/// The username is trimmed; the password is kept verbatim and wiped from
/// memory on drop.
///
/// # Examples
/// ```
/// use bookstore::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" reader ", "secret").expect("valid");
/// assert_eq!(creds.username(), "reader");
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

    /// Submitted username.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Submitted password.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}
