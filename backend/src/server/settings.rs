//! Environment-driven application settings.
//!
//! Everything the process reads from the environment is parsed here, once,
//! before any adapter is built. Reads go through [`mockable::Env`] so the
//! rules can be exercised with `MockEnv`.

use std::fmt;

use mockable::Env;
use tracing::warn;

use contacts_backend::outbound::security::{DEFAULT_TOKEN_TTL_SECONDS, TokenSettings};

const DATABASE_URL_ENV: &str = "DATABASE_URL";
const JWT_SECRET_ENV: &str = "JWT_SECRET";
const TOKEN_TTL_ENV: &str = "TOKEN_TTL_SECONDS";
const BCRYPT_COST_ENV: &str = "BCRYPT_COST";
const PORT_ENV: &str = "PORT";

const DEFAULT_BCRYPT_COST: u32 = 10;
const DEFAULT_PORT: u16 = 5000;
const BCRYPT_COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;

/// Build mode for settings validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds fall back to in-memory storage and tolerate a missing
    /// signing secret.
    Debug,
    /// Release builds require a database and a signing secret.
    Release,
}

impl BuildMode {
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
}

/// Errors raised while reading settings.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum SettingsError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Validated process configuration.
#[derive(Clone)]
pub struct AppSettings {
    /// PostgreSQL URL; `None` selects the in-memory repositories.
    pub database_url: Option<String>,
    pub tokens: TokenSettings,
    pub bcrypt_cost: u32,
    pub port: u16,
}

impl fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppSettings")
            .field("database_url", &self.database_url.as_ref().map(|_| "<set>"))
            .field("tokens", &self.tokens)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("port", &self.port)
            .finish()
    }
}

impl AppSettings {
    /// Read and validate settings.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when a value fails to parse, or when a
    /// release build lacks `DATABASE_URL` or `JWT_SECRET`.
    pub fn from_env<E: Env>(env: &E, mode: BuildMode) -> Result<Self, SettingsError> {
        let database_url = database_url_from_env(env, mode)?;
        let tokens = token_settings_from_env(env, mode)?;
        let bcrypt_cost = parse_or_default(
            env,
            BCRYPT_COST_ENV,
            DEFAULT_BCRYPT_COST,
            "an integer between 4 and 31",
            |cost: &u32| BCRYPT_COST_RANGE.contains(cost),
        )?;
        let port = parse_or_default(env, PORT_ENV, DEFAULT_PORT, "a TCP port", |port: &u16| {
            *port > 0
        })?;

        Ok(Self {
            database_url,
            tokens,
            bcrypt_cost,
            port,
        })
    }
}

fn non_blank<E: Env>(env: &E, name: &str) -> Option<String> {
    env.string(name).filter(|value| !value.trim().is_empty())
}

fn database_url_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<Option<String>, SettingsError> {
    match non_blank(env, DATABASE_URL_ENV) {
        Some(url) => Ok(Some(url)),
        None if mode.is_debug() => {
            warn!("DATABASE_URL not set; using in-memory repositories (dev only)");
            Ok(None)
        }
        None => Err(SettingsError::MissingEnv {
            name: DATABASE_URL_ENV,
        }),
    }
}

fn token_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<TokenSettings, SettingsError> {
    let secret = non_blank(env, JWT_SECRET_ENV);
    if secret.is_none() {
        if mode.is_debug() {
            warn!("JWT_SECRET not set; token issuance will fail (dev only)");
        } else {
            return Err(SettingsError::MissingEnv {
                name: JWT_SECRET_ENV,
            });
        }
    }
    let ttl = parse_or_default(
        env,
        TOKEN_TTL_ENV,
        DEFAULT_TOKEN_TTL_SECONDS,
        "a positive number of seconds",
        |ttl: &u64| *ttl > 0,
    )?;
    Ok(TokenSettings::new(secret, ttl))
}

fn parse_or_default<E, T>(
    env: &E,
    name: &'static str,
    default: T,
    expected: &'static str,
    valid: impl Fn(&T) -> bool,
) -> Result<T, SettingsError>
where
    E: Env,
    T: std::str::FromStr,
{
    let Some(raw) = non_blank(env, name) else {
        return Ok(default);
    };
    raw.trim()
        .parse::<T>()
        .ok()
        .filter(|value| valid(value))
        .ok_or(SettingsError::InvalidEnv {
            name,
            value: raw,
            expected,
        })
}
