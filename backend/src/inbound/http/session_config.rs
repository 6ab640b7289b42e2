//! Session cookie settings read from the environment.
//!
//! Debug builds fall back to permissive defaults with a warning; release
//! builds require every toggle to be present and valid.

use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use mockable::Env;
use tracing::warn;
use zeroize::Zeroize;

const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/session_key";
const SESSION_KEY_MIN_LEN: usize = 64;
const KEY_FILE_ENV: &str = "SESSION_KEY_FILE";
const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
const SAMESITE_ENV: &str = "SESSION_SAMESITE";
const ALLOW_EPHEMERAL_ENV: &str = "SESSION_ALLOW_EPHEMERAL";
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// Build mode controlling how strictly toggles are validated.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    Debug,
    Release,
}

impl BuildMode {
    /// Mode matching `cfg!(debug_assertions)`.
    ///
    /// # Examples
    /// ```
    /// use leavedesk::inbound::http::session_config::BuildMode;
    ///
    /// let expected = if cfg!(debug_assertions) { BuildMode::Debug } else { BuildMode::Release };
    /// assert_eq!(BuildMode::from_debug_assertions(), expected);
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }

    /// In debug builds log `warning` and use `fallback`; otherwise fail.
    fn lenient<T>(
        self,
        fallback: T,
        error: SessionConfigError,
        warning: &str,
    ) -> Result<T, SessionConfigError> {
        if self.is_debug() {
            warn!("{warning}");
            Ok(fallback)
        } else {
            Err(error)
        }
    }
}

/// Validated session cookie settings.
pub struct SessionSettings {
    pub key: Key,
    pub cookie_secure: bool,
    pub same_site: SameSite,
}

/// Errors raised while validating session configuration.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    #[error("SESSION_SAMESITE=None requires SESSION_COOKIE_SECURE=1")]
    InsecureSameSiteNone,
    #[error("SESSION_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Read and validate session settings.
///
/// # Errors
/// Returns [`SessionConfigError`] when a release build is missing a toggle,
/// a toggle is malformed, or the key file is unreadable or too short.
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let cookie_secure = bool_toggle(env, mode, COOKIE_SECURE_ENV, true)?;
    let same_site = same_site_from_env(env, mode, cookie_secure)?;
    let allow_ephemeral = bool_toggle(env, mode, ALLOW_EPHEMERAL_ENV, false)?;
    if allow_ephemeral && !mode.is_debug() {
        return Err(SessionConfigError::EphemeralNotAllowed);
    }
    let key = session_key(env, mode, allow_ephemeral)?;

    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
    })
}

fn bool_toggle<E: Env>(
    env: &E,
    mode: BuildMode,
    name: &'static str,
    default: bool,
) -> Result<bool, SessionConfigError> {
    let Some(value) = env.string(name) else {
        return mode.lenient(
            default,
            SessionConfigError::MissingEnv { name },
            &format!("{name} not set; defaulting to {default}"),
        );
    };
    match parse_bool(&value) {
        Some(flag) => Ok(flag),
        None => {
            let warning = format!("invalid {name}='{value}'; defaulting to {default}");
            mode.lenient(
                default,
                SessionConfigError::InvalidEnv {
                    name,
                    value,
                    expected: BOOL_EXPECTED,
                },
                &warning,
            )
        }
    }
}

fn same_site_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
    cookie_secure: bool,
) -> Result<SameSite, SessionConfigError> {
    let default = if mode.is_debug() {
        SameSite::Lax
    } else {
        SameSite::Strict
    };
    let Some(value) = env.string(SAMESITE_ENV) else {
        return mode.lenient(
            default,
            SessionConfigError::MissingEnv { name: SAMESITE_ENV },
            "SESSION_SAMESITE not set; using default",
        );
    };

    match value.to_ascii_lowercase().as_str() {
        "lax" => Ok(SameSite::Lax),
        "strict" => Ok(SameSite::Strict),
        "none" if cookie_secure => Ok(SameSite::None),
        "none" => mode.lenient(
            SameSite::None,
            SessionConfigError::InsecureSameSiteNone,
            "SESSION_SAMESITE=None with insecure cookies; browsers may reject the cookie",
        ),
        _ => {
            let warning = format!("invalid SESSION_SAMESITE='{value}'; using default");
            mode.lenient(
                default,
                SessionConfigError::InvalidEnv {
                    name: SAMESITE_ENV,
                    value,
                    expected: SAMESITE_EXPECTED,
                },
                &warning,
            )
        }
    }
}

fn session_key<E: Env>(
    env: &E,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Key, SessionConfigError> {
    let path = PathBuf::from(
        env.string(KEY_FILE_ENV)
            .unwrap_or_else(|| SESSION_KEY_DEFAULT_PATH.to_owned()),
    );

    match std::fs::read(&path) {
        Ok(mut bytes) => {
            let length = bytes.len();
            if length < SESSION_KEY_MIN_LEN {
                bytes.zeroize();
                // `Key::derive_from` panics below 32 bytes.
                return mode.lenient(
                    Key::generate(),
                    SessionConfigError::KeyTooShort {
                        path,
                        length,
                        min_len: SESSION_KEY_MIN_LEN,
                    },
                    "session key file too short; using temporary key",
                );
            }
            let key = Key::derive_from(&bytes);
            bytes.zeroize();
            Ok(key)
        }
        Err(source) if mode.is_debug() || allow_ephemeral => {
            warn!(path = %path.display(), error = %source, "using temporary session key (dev only)");
            Ok(Key::generate())
        }
        Err(source) => Err(SessionConfigError::KeyRead { path, source }),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
