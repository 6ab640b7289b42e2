//! User data model.
//!
//! A user has a unique username and email, a display name, and an optional
//! manager drawn from the same table. The manager relation here is the
//! organisational hierarchy; leave applications carry their own approving
//! manager and never consult it.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use super::Error;

/// Validation errors raised while constructing user values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    InvalidId,
    EmptyUsername,
    UsernameLength { min: usize, max: usize },
    UsernameInvalidCharacters,
    EmptyEmail,
    InvalidEmail,
    EmailTooLong { max: usize },
    EmptyDisplayName,
    DisplayNameTooLong { max: usize },
    SelfManaged,
}

impl UserValidationError {
    /// Request field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidId => "id",
            Self::EmptyUsername | Self::UsernameLength { .. } | Self::UsernameInvalidCharacters => {
                "username"
            }
            Self::EmptyEmail | Self::InvalidEmail | Self::EmailTooLong { .. } => "email",
            Self::EmptyDisplayName | Self::DisplayNameTooLong { .. } => "name",
            Self::SelfManaged => "manager",
        }
    }

    /// Stable machine-readable code for adapters.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidId => "invalid_id",
            Self::EmptyUsername | Self::EmptyEmail | Self::EmptyDisplayName => "empty",
            Self::UsernameLength { .. } => "length",
            Self::EmailTooLong { .. } | Self::DisplayNameTooLong { .. } => "too_long",
            Self::UsernameInvalidCharacters => "invalid_characters",
            Self::InvalidEmail => "invalid_format",
            Self::SelfManaged => "self_managed",
        }
    }
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::UsernameLength { min, max } => {
                write!(f, "username must be between {min} and {max} characters")
            }
            Self::UsernameInvalidCharacters => write!(
                f,
                "username may only contain letters, digits, and the characters _ . @ + -",
            ),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "email must look like local@domain"),
            Self::EmailTooLong { max } => write!(f, "email must be at most {max} characters"),
            Self::EmptyDisplayName => write!(f, "name must not be empty"),
            Self::DisplayNameTooLong { max } => {
                write!(f, "name must be at most {max} characters")
            }
            Self::SelfManaged => write!(f, "a user cannot be their own manager"),
        }
    }
}

impl std::error::Error for UserValidationError {}

impl From<UserValidationError> for Error {
    fn from(err: UserValidationError) -> Self {
        Error::invalid_request(err.to_string())
            .with_details(json!({ "field": err.field(), "code": err.code() }))
    }
}

/// Stable user identifier stored as a UUID.
///
/// Ordering follows the UUID byte order, which the leave report relies on for
/// deterministic output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Parse a [`UserId`] from its hyphenated string form.
    ///
    /// # Examples
    /// ```
    /// use leavedesk::domain::UserId;
    ///
    /// let id = UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid id");
    /// assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    /// assert!(UserId::new(" 3fa85f64-5717-4562-b3fc-2c963f66afa6").is_err());
    /// ```
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = id.as_ref();
        if raw.trim() != raw {
            return Err(UserValidationError::InvalidId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Minimum allowed length for a username.
pub const USERNAME_MIN: usize = 3;
/// Maximum allowed length for a username.
pub const USERNAME_MAX: usize = 150;
/// Maximum allowed length for an email address.
pub const EMAIL_MAX: usize = 254;
/// Maximum allowed length for a display name.
pub const DISPLAY_NAME_MAX: usize = 255;

static USERNAME_RE: OnceLock<Regex> = OnceLock::new();

fn username_regex() -> &'static Regex {
    USERNAME_RE.get_or_init(|| {
        // Length is enforced separately.
        Regex::new(r"^[A-Za-z0-9_.@+\-]+$")
            .unwrap_or_else(|error| panic!("username regex failed to compile: {error}"))
    })
}

/// Unique login handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`]; surrounding whitespace is trimmed.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let value = raw.as_ref().trim();
        if value.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        let length = value.chars().count();
        if !(USERNAME_MIN..=USERNAME_MAX).contains(&length) {
            return Err(UserValidationError::UsernameLength {
                min: USERNAME_MIN,
                max: USERNAME_MAX,
            });
        }
        if !username_regex().is_match(value) {
            return Err(UserValidationError::UsernameInvalidCharacters);
        }
        Ok(Self(value.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Unique contact address, stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and normalise an email address.
    ///
    /// # Examples
    /// ```
    /// use leavedesk::domain::EmailAddress;
    ///
    /// let email = EmailAddress::new(" Ada@Example.COM ").expect("valid email");
    /// assert_eq!(email.as_ref(), "ada@example.com");
    /// assert!(EmailAddress::new("no-at-sign").is_err());
    /// ```
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let value = raw.as_ref().trim();
        if value.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if value.chars().count() > EMAIL_MAX {
            return Err(UserValidationError::EmailTooLong { max: EMAIL_MAX });
        }
        let (local, domain) = value
            .split_once('@')
            .ok_or(UserValidationError::InvalidEmail)?;
        if local.is_empty()
            || domain.is_empty()
            || domain.contains('@')
            || value.chars().any(char::is_whitespace)
        {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(value.to_lowercase()))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Human readable name shown on reports.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DisplayName(String);

impl DisplayName {
    /// Validate and construct a [`DisplayName`]; surrounding whitespace is trimmed.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let value = raw.as_ref().trim();
        if value.is_empty() {
            return Err(UserValidationError::EmptyDisplayName);
        }
        if value.chars().count() > DISPLAY_NAME_MAX {
            return Err(UserValidationError::DisplayNameTooLong {
                max: DISPLAY_NAME_MAX,
            });
        }
        Ok(Self(value.to_owned()))
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Validated components used to build a [`User`].
#[derive(Debug, Clone)]
pub struct UserDraft {
    pub id: UserId,
    pub username: Username,
    pub email: EmailAddress,
    pub display_name: DisplayName,
    pub manager: Option<UserId>,
}

/// Application user.
///
/// ## Invariants
/// - `manager`, when set, differs from `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: Username,
    email: EmailAddress,
    display_name: DisplayName,
    manager: Option<UserId>,
}

impl User {
    /// Build a user, rejecting self-management.
    pub fn new(draft: UserDraft) -> Result<Self, UserValidationError> {
        let UserDraft {
            id,
            username,
            email,
            display_name,
            manager,
        } = draft;
        if manager == Some(id) {
            return Err(UserValidationError::SelfManaged);
        }
        Ok(Self {
            id,
            username,
            email,
            display_name,
            manager,
        })
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn display_name(&self) -> &DisplayName {
        &self.display_name
    }

    /// Organisational manager, if any.
    pub fn manager(&self) -> Option<UserId> {
        self.manager
    }

    /// Apply a profile edit. Fields left as `None` are kept.
    pub fn with_profile(self, update: UserProfileUpdate) -> Result<Self, UserValidationError> {
        let UserProfileUpdate {
            email,
            display_name,
            manager,
        } = update;
        Self::new(UserDraft {
            id: self.id,
            username: self.username,
            email: email.unwrap_or(self.email),
            display_name: display_name.unwrap_or(self.display_name),
            manager: manager.unwrap_or(self.manager),
        })
    }
}

/// Partial profile edit.
///
/// `manager` is doubly optional: `None` keeps the current manager while
/// `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct UserProfileUpdate {
    pub email: Option<EmailAddress>,
    pub display_name: Option<DisplayName>,
    pub manager: Option<Option<UserId>>,
}

impl UserProfileUpdate {
    /// True when the edit changes nothing.
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.display_name.is_none() && self.manager.is_none()
    }
}
