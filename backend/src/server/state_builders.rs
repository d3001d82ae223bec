//! Wiring of domain services to their driven adapters.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::info;

use contacts_backend::domain::ports::{ContactRepository, TokenIssuer, UserRepository};
use contacts_backend::domain::{AccountService, ContactsService};
use contacts_backend::inbound::http::state::HttpState;
use contacts_backend::outbound::memory::{InMemoryContactRepository, InMemoryUserRepository};
use contacts_backend::outbound::persistence::{DieselContactRepository, DieselUserRepository};
use contacts_backend::outbound::security::{BcryptHasher, JwtTokenIssuer};

use super::ServerConfig;

type Repositories = (Arc<dyn UserRepository>, Arc<dyn ContactRepository>);

fn build_repositories(config: &ServerConfig) -> Repositories {
    match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL repositories");
            (
                Arc::new(DieselUserRepository::new(pool.clone())),
                Arc::new(DieselContactRepository::new(pool.clone())),
            )
        }
        None => {
            info!("using in-memory repositories");
            (
                Arc::new(InMemoryUserRepository::default()),
                Arc::new(InMemoryContactRepository::default()),
            )
        }
    }
}

/// Build the handler state for the configured storage backend.
pub(crate) fn build_http_state(config: &ServerConfig) -> HttpState {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let (users, contacts) = build_repositories(config);
    let tokens: Arc<dyn TokenIssuer> = Arc::new(JwtTokenIssuer::new(
        config.settings.tokens.clone(),
        Arc::clone(&clock),
    ));
    let hasher = Arc::new(BcryptHasher::new(config.settings.bcrypt_cost));

    let accounts = Arc::new(AccountService::new(
        users,
        hasher,
        Arc::clone(&tokens),
        Arc::clone(&clock),
    ));
    let contacts = Arc::new(ContactsService::new(contacts, clock));

    HttpState {
        registration: accounts.clone(),
        login: accounts.clone(),
        profile: accounts,
        contacts: contacts.clone(),
        contacts_query: contacts,
        tokens,
    }
}
