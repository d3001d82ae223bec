//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    ContactsCommand, ContactsQuery, LoginService, RegistrationService, TokenIssuer,
    UserProfileQuery,
};

/// Dependency bundle for HTTP handlers.
///
/// # Examples
/// ```no_run
/// use std::sync::Arc;
///
/// use contacts_backend::domain::{AccountService, ContactsService};
/// use contacts_backend::inbound::http::state::HttpState;
/// use contacts_backend::outbound::memory::{InMemoryContactRepository, InMemoryUserRepository};
/// use contacts_backend::outbound::security::{BcryptHasher, JwtTokenIssuer, TokenSettings};
/// use mockable::DefaultClock;
///
/// let clock = Arc::new(DefaultClock);
/// let tokens = Arc::new(JwtTokenIssuer::new(
///     TokenSettings::new(Some("secret".into()), 3600),
///     clock.clone(),
/// ));
/// let accounts = Arc::new(AccountService::new(
///     Arc::new(InMemoryUserRepository::default()),
///     Arc::new(BcryptHasher::new(10)),
///     tokens.clone(),
///     clock.clone(),
/// ));
/// let contacts = Arc::new(ContactsService::new(
///     Arc::new(InMemoryContactRepository::default()),
///     clock,
/// ));
/// let state = HttpState {
///     registration: accounts.clone(),
///     login: accounts.clone(),
///     profile: accounts,
///     contacts: contacts.clone(),
///     contacts_query: contacts,
///     tokens,
/// };
/// let _login = state.login.clone();
/// ```
#[derive(Clone)]
pub struct HttpState {
    pub registration: Arc<dyn RegistrationService>,
    pub login: Arc<dyn LoginService>,
    pub profile: Arc<dyn UserProfileQuery>,
    pub contacts: Arc<dyn ContactsCommand>,
    pub contacts_query: Arc<dyn ContactsQuery>,
    /// Used by the [`AuthenticatedUser`](super::identity::AuthenticatedUser)
    /// extractor to verify request tokens.
    pub tokens: Arc<dyn TokenIssuer>,
}
