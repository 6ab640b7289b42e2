//! Credential primitives: plain passwords, stored hashes, and sign-in input.
//!
//! Plain passwords live in [`Zeroizing`] buffers and never implement
//! `Display`, so they cannot leak through formatting.

use std::fmt;

use serde_json::json;
use zeroize::Zeroizing;

use super::Error;

/// Minimum password length accepted at registration.
pub const PASSWORD_MIN: usize = 8;

/// Domain error returned when credential values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was empty.
    EmptyPassword,
    /// Password is shorter than the registration minimum.
    PasswordTooShort { min: usize },
}

impl CredentialValidationError {
    /// Request field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyUsername => "username",
            Self::EmptyPassword | Self::PasswordTooShort { .. } => "password",
        }
    }

    /// Stable machine-readable code for adapters.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyUsername | Self::EmptyPassword => "empty",
            Self::PasswordTooShort { .. } => "too_short",
        }
    }
}

impl fmt::Display for CredentialValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::PasswordTooShort { min } => {
                write!(f, "password must be at least {min} characters")
            }
        }
    }
}

impl std::error::Error for CredentialValidationError {}

impl From<CredentialValidationError> for Error {
    fn from(err: CredentialValidationError) -> Self {
        Error::invalid_request(err.to_string())
            .with_details(json!({ "field": err.field(), "code": err.code() }))
    }
}

/// Plain-text password held in a zeroizing buffer.
///
/// Whitespace is preserved exactly as supplied.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Accept any non-empty password. Used for sign-in.
    pub fn new(raw: &str) -> Result<Self, CredentialValidationError> {
        if raw.is_empty() {
            return Err(CredentialValidationError::EmptyPassword);
        }
        Ok(Self(Zeroizing::new(raw.to_owned())))
    }

    /// Accept a password for a new account, enforcing [`PASSWORD_MIN`].
    ///
    /// # Examples
    /// ```
    /// use leavedesk::domain::Password;
    ///
    /// assert!(Password::for_registration("short").is_err());
    /// assert!(Password::for_registration("long enough").is_ok());
    /// ```
    pub fn for_registration(raw: &str) -> Result<Self, CredentialValidationError> {
        let password = Self::new(raw)?;
        if raw.chars().count() < PASSWORD_MIN {
            return Err(CredentialValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        Ok(password)
    }

    /// Expose the secret for hashing or verification.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(**redacted**)")
    }
}

/// Encoded password hash in PHC string format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash read from storage or produced by a hasher.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }
}

impl AsRef<str> for PasswordHash {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Validated sign-in credentials.
///
/// # Examples
/// ```
/// use leavedesk::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("  ada ", "secret").expect("valid credentials");
/// assert_eq!(creds.username(), "ada");
/// assert_eq!(creds.password().expose(), "secret");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Password,
}

impl LoginCredentials {
    /// Construct credentials from raw inputs; the username is trimmed.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, CredentialValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(CredentialValidationError::EmptyUsername);
        }
        Ok(Self {
            username: normalized.to_owned(),
            password: Password::new(password)?,
        })
    }

    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    pub fn password(&self) -> &Password {
        &self.password
    }
}
