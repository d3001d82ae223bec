//! bcrypt-backed [`CredentialHasher`].
//!
//! bcrypt is deliberately slow, so both operations move to Tokio's blocking
//! pool instead of stalling an executor thread.

use async_trait::async_trait;
use tracing::warn;
use zeroize::Zeroizing;

use crate::domain::PasswordHash;
use crate::domain::ports::{CredentialHasher, CredentialHasherError};

/// Salted bcrypt hashing with a fixed work factor.
#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    /// Create a hasher using `cost` rounds (valid range 4..=31).
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

fn join_error(error: tokio::task::JoinError) -> CredentialHasherError {
    CredentialHasherError::hashing(format!("hashing task failed: {error}"))
}

#[async_trait]
impl CredentialHasher for BcryptHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, CredentialHasherError> {
        let password = Zeroizing::new(password.to_owned());
        let cost = self.cost;
        let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(password.as_str(), cost))
            .await
            .map_err(join_error)?
            .map_err(|err| CredentialHasherError::hashing(err.to_string()))?;
        PasswordHash::new(hashed).map_err(|err| CredentialHasherError::hashing(err.to_string()))
    }

    async fn verify(
        &self,
        password: &str,
        hash: &PasswordHash,
    ) -> Result<bool, CredentialHasherError> {
        let password = Zeroizing::new(password.to_owned());
        let hash = hash.as_str().to_owned();
        tokio::task::spawn_blocking(move || bcrypt::verify(password.as_str(), &hash))
            .await
            .map_err(join_error)?
            .map_err(|err| {
                warn!(error = %err, "stored password hash could not be parsed");
                CredentialHasherError::malformed_hash(err.to_string())
            })
    }
}
