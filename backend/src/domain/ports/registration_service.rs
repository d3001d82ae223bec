//! Driving port for self-service registration.
//!
//! Inbound adapters validate the payload into a [`RegistrationForm`] and hand
//! it over; the service decides uniqueness, hashes the password and issues the
//! first token.

use async_trait::async_trait;

use crate::domain::{AuthToken, Error, RegistrationForm};

/// Domain use-case port for creating accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Register a new user and return a token for them.
    async fn register(&self, form: &RegistrationForm) -> Result<AuthToken, Error>;
}
