//! Driven port for issuing and verifying identity tokens.

use crate::domain::{AuthToken, Identity, UserId};

use super::define_port_error;

define_port_error! {
    /// Token failures.
    pub enum TokenError {
        /// The token could not be signed, usually because no secret is set.
        Signing { message: String } => "token signing failed: {message}",
        /// The presented token is malformed, forged or expired.
        Invalid { message: String } => "token is invalid: {message}",
    }
}

/// Signs and verifies time-limited identity tokens.
#[cfg_attr(test, mockall::automock)]
pub trait TokenIssuer: Send + Sync {
    /// Issue a token whose subject is `user_id`.
    fn issue(&self, user_id: &UserId) -> Result<AuthToken, TokenError>;

    /// Verify a presented token and recover the identity it carries.
    fn verify(&self, token: &str) -> Result<Identity, TokenError>;
}
