//! Account domain service.
//!
//! Implements registration, login and the current-user lookup on top of the
//! user repository, the credential hasher and the token issuer.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::ports::{
    CredentialHasher, CredentialHasherError, LoginService, RegistrationService, TokenError,
    TokenIssuer, UserPersistenceError, UserProfileQuery, UserRepository,
};
use crate::domain::{AuthToken, Error, LoginCredentials, RegistrationForm, User, UserId};

const DUPLICATE_USER: &str = "User with that email already exists!";
const UNKNOWN_EMAIL: &str = "No account was found with this email id!";
const WRONG_PASSWORD: &str = "Wrong Password!";
const USER_NOT_FOUND: &str = "User Not Found!";

/// Account service implementing the registration, login and profile ports.
pub struct AccountService<U: ?Sized, H: ?Sized, T: ?Sized> {
    users: Arc<U>,
    hasher: Arc<H>,
    tokens: Arc<T>,
    clock: Arc<dyn Clock>,
}

impl<U: ?Sized, H: ?Sized, T: ?Sized> Clone for AccountService<U, H, T> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            hasher: Arc::clone(&self.hasher),
            tokens: Arc::clone(&self.tokens),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<U: ?Sized, H: ?Sized, T: ?Sized> AccountService<U, H, T> {
    /// Create a service over the given adapters.
    ///
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use contacts_backend::domain::AccountService;
    /// # use contacts_backend::outbound::memory::InMemoryUserRepository;
    /// # use contacts_backend::outbound::security::{BcryptHasher, JwtTokenIssuer, TokenSettings};
    /// # use mockable::DefaultClock;
    /// let clock = Arc::new(DefaultClock);
    /// let service = AccountService::new(
    ///     Arc::new(InMemoryUserRepository::default()),
    ///     Arc::new(BcryptHasher::new(4)),
    ///     Arc::new(JwtTokenIssuer::new(TokenSettings::new(Some("secret".into()), 3600), clock.clone())),
    ///     clock,
    /// );
    /// ```
    pub fn new(users: Arc<U>, hasher: Arc<H>, tokens: Arc<T>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            hasher,
            tokens,
            clock,
        }
    }
}

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::DuplicateEmail => Error::duplicate(DUPLICATE_USER),
        UserPersistenceError::Connection { message } => {
            Error::internal(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

fn map_hasher_error(error: CredentialHasherError) -> Error {
    Error::internal(format!("credential hasher failed: {error}"))
}

fn map_token_error(error: TokenError) -> Error {
    Error::internal(format!("token issuance failed: {error}"))
}

impl<U, H, T> AccountService<U, H, T>
where
    U: UserRepository + ?Sized,
    H: CredentialHasher + ?Sized,
    T: TokenIssuer + ?Sized,
{
    fn issue_token(&self, user_id: &UserId) -> Result<AuthToken, Error> {
        self.tokens.issue(user_id).map_err(map_token_error)
    }
}

#[async_trait]
impl<U, H, T> RegistrationService for AccountService<U, H, T>
where
    U: UserRepository + ?Sized,
    H: CredentialHasher + ?Sized,
    T: TokenIssuer + ?Sized,
{
    async fn register(&self, form: &RegistrationForm) -> Result<AuthToken, Error> {
        if self
            .users
            .find_by_email(form.email())
            .await
            .map_err(map_user_error)?
            .is_some()
        {
            debug!(email = %form.email(), "registration rejected: email taken");
            return Err(Error::duplicate(DUPLICATE_USER));
        }

        let password_hash = self
            .hasher
            .hash(form.password())
            .await
            .map_err(map_hasher_error)?;
        let user = User::new(
            UserId::random(),
            form.name().clone(),
            form.email().clone(),
            password_hash,
            self.clock.utc(),
        );
        // The unique index still catches a registration that raced the lookup.
        self.users.insert(&user).await.map_err(map_user_error)?;
        info!(user_id = %user.id(), "user registered");

        self.issue_token(user.id())
    }
}

#[async_trait]
impl<U, H, T> LoginService for AccountService<U, H, T>
where
    U: UserRepository + ?Sized,
    H: CredentialHasher + ?Sized,
    T: TokenIssuer + ?Sized,
{
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthToken, Error> {
        let Some(user) = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_user_error)?
        else {
            return Err(Error::invalid_credentials(UNKNOWN_EMAIL));
        };

        let matches = self
            .hasher
            .verify(credentials.password(), user.password_hash())
            .await
            .map_err(map_hasher_error)?;
        if !matches {
            debug!(user_id = %user.id(), "login rejected: wrong password");
            return Err(Error::invalid_credentials(WRONG_PASSWORD));
        }

        self.issue_token(user.id())
    }
}

#[async_trait]
impl<U, H, T> UserProfileQuery for AccountService<U, H, T>
where
    U: UserRepository + ?Sized,
    H: CredentialHasher + ?Sized,
    T: TokenIssuer + ?Sized,
{
    async fn fetch_profile(&self, user_id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND))
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
