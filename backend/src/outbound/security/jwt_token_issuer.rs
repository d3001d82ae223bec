//! HS256 JSON Web Token adapter for the [`TokenIssuer`] port.
//!
//! Tokens carry `{ sub, iat, exp }`. Expiry is compared against the injected
//! clock rather than the library's wall-clock check so tests can move time.

use std::fmt;
use std::sync::Arc;

use chrono::DateTime;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use serde::{Deserialize, Serialize};

use crate::domain::ports::{TokenError, TokenIssuer};
use crate::domain::{AuthToken, Identity, UserId};

/// Default token lifetime in seconds.
pub const DEFAULT_TOKEN_TTL_SECONDS: u64 = 3600;

/// Signing secret and token lifetime, read once at startup.
#[derive(Clone)]
pub struct TokenSettings {
    secret: Option<String>,
    ttl_seconds: u64,
}

impl TokenSettings {
    /// A blank secret is treated as absent.
    pub fn new(secret: Option<String>, ttl_seconds: u64) -> Self {
        Self {
            secret: secret.filter(|value| !value.trim().is_empty()),
            ttl_seconds,
        }
    }

    pub fn has_secret(&self) -> bool {
        self.secret.is_some()
    }

    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }
}

impl fmt::Debug for TokenSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSettings")
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

/// Issues and verifies HS256 identity tokens.
pub struct JwtTokenIssuer {
    keys: Option<Keys>,
    ttl_seconds: i64,
    clock: Arc<dyn Clock>,
}

impl JwtTokenIssuer {
    pub fn new(settings: TokenSettings, clock: Arc<dyn Clock>) -> Self {
        let keys = settings.secret.as_deref().map(|secret| Keys {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        });
        Self {
            keys,
            ttl_seconds: i64::try_from(settings.ttl_seconds).unwrap_or(i64::MAX),
            clock,
        }
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, user_id: &UserId) -> Result<AuthToken, TokenError> {
        let keys = self
            .keys
            .as_ref()
            .ok_or_else(|| TokenError::signing("no signing secret configured"))?;
        let iat = self.clock.utc().timestamp();
        let exp = iat
            .checked_add(self.ttl_seconds)
            .ok_or_else(|| TokenError::signing("token lifetime overflows"))?;
        let claims = Claims {
            sub: user_id.to_string(),
            iat,
            exp,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &keys.encoding)
            .map(AuthToken::new)
            .map_err(|err| TokenError::signing(err.to_string()))
    }

    fn verify(&self, token: &str) -> Result<Identity, TokenError> {
        let keys = self
            .keys
            .as_ref()
            .ok_or_else(|| TokenError::invalid("no signing secret configured"))?;
        let claims = decode::<Claims>(token, &keys.decoding, &Self::validation())
            .map_err(|err| TokenError::invalid(err.to_string()))?
            .claims;

        let now = self.clock.utc().timestamp();
        if claims.exp <= now {
            return Err(TokenError::invalid("token expired"));
        }
        let user_id = UserId::new(&claims.sub).map_err(|err| TokenError::invalid(err.to_string()))?;
        let issued_at = DateTime::from_timestamp(claims.iat, 0)
            .ok_or_else(|| TokenError::invalid("issued-at out of range"))?;
        let expires_at = DateTime::from_timestamp(claims.exp, 0)
            .ok_or_else(|| TokenError::invalid("expiry out of range"))?;

        Ok(Identity::new(user_id, issued_at, expires_at))
    }
}
