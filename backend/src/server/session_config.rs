//! Session cookie settings read from the environment.
//!
//! Debug builds tolerate missing or malformed toggles and fall back to safe
//! defaults with a warning. Release builds require every toggle and a signing
//! key of at least [`SESSION_KEY_MIN_LEN`] bytes.

use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use mockable::Env;
use tracing::warn;
use zeroize::Zeroize;

const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/session_key";
pub(crate) const SESSION_KEY_MIN_LEN: usize = 64;
const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
const SAMESITE_ENV: &str = "SESSION_SAMESITE";
const ALLOW_EPHEMERAL_ENV: &str = "SESSION_ALLOW_EPHEMERAL";
const KEY_FILE_ENV: &str = "SESSION_KEY_FILE";
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// Which validation rules apply.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    Debug,
    Release,
}

impl BuildMode {
    /// Mode matching `cfg!(debug_assertions)`.
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }
}

/// Validated cookie session settings.
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

/// Build session settings from the environment.
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let cookie_secure = read_toggle(env, mode, COOKIE_SECURE_ENV, BOOL_EXPECTED, true, parse_bool)?;
    let same_site = read_same_site(env, mode, cookie_secure)?;
    let allow_ephemeral =
        read_toggle(env, mode, ALLOW_EPHEMERAL_ENV, BOOL_EXPECTED, false, parse_bool)?;
    if allow_ephemeral && mode == BuildMode::Release {
        return Err(SessionConfigError::EphemeralNotAllowed);
    }
    let key = read_key(env, mode, allow_ephemeral)?;
    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
    })
}

/// Read and parse one variable.
///
/// Debug builds replace a missing or unparseable value with `fallback`;
/// release builds reject both.
fn read_toggle<E, T>(
    env: &E,
    mode: BuildMode,
    name: &'static str,
    expected: &'static str,
    fallback: T,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T, SessionConfigError>
where
    E: Env,
    T: std::fmt::Debug,
{
    let Some(value) = env.string(name) else {
        return match mode {
            BuildMode::Debug => {
                warn!(variable = name, default = ?fallback, "session toggle not set; using default");
                Ok(fallback)
            }
            BuildMode::Release => Err(SessionConfigError::MissingEnv { name }),
        };
    };
    match (parse(&value), mode) {
        (Some(parsed), _) => Ok(parsed),
        (None, BuildMode::Debug) => {
            warn!(variable = name, %value, default = ?fallback, "invalid session toggle; using default");
            Ok(fallback)
        }
        (None, BuildMode::Release) => Err(SessionConfigError::InvalidEnv {
            name,
            value,
            expected,
        }),
    }
}

fn read_same_site<E: Env>(
    env: &E,
    mode: BuildMode,
    cookie_secure: bool,
) -> Result<SameSite, SessionConfigError> {
    let fallback = match mode {
        BuildMode::Debug => SameSite::Lax,
        BuildMode::Release => SameSite::Strict,
    };
    let same_site = read_toggle(env, mode, SAMESITE_ENV, SAMESITE_EXPECTED, fallback, parse_same_site)?;
    if same_site == SameSite::None && !cookie_secure {
        match mode {
            BuildMode::Debug => {
                warn!("SESSION_SAMESITE=None without secure cookies; browsers may drop the cookie")
            }
            BuildMode::Release => return Err(SessionConfigError::InsecureSameSiteNone),
        }
    }
    Ok(same_site)
}

fn read_key<E: Env>(
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
            if mode == BuildMode::Release && length < SESSION_KEY_MIN_LEN {
                bytes.zeroize();
                return Err(SessionConfigError::KeyTooShort {
                    path,
                    length,
                    min_len: SESSION_KEY_MIN_LEN,
                });
            }
            let key = Key::derive_from(&bytes);
            bytes.zeroize();
            Ok(key)
        }
        Err(error) if mode == BuildMode::Debug || allow_ephemeral => {
            warn!(path = %path.display(), %error, "using temporary session key (dev only)");
            Ok(Key::generate())
        }
        Err(source) => Err(SessionConfigError::KeyRead { path, source }),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

fn parse_same_site(value: &str) -> Option<SameSite> {
    match value.to_ascii_lowercase().as_str() {
        "lax" => Some(SameSite::Lax),
        "strict" => Some(SameSite::Strict),
        "none" => Some(SameSite::None),
        _ => None,
    }
}
