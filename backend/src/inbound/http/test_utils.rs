//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use chrono::{TimeZone, Utc};

use crate::Trace;
use crate::domain::ports::{
    MockContactsCommand, MockContactsQuery, MockLoginService, MockRegistrationService,
    MockTokenIssuer, MockUserProfileQuery,
};
use crate::domain::{Identity, UserId};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{api_scope, validation::json_config};

/// Token accepted by [`StateBuilder::authenticated_as`].
pub(crate) const TEST_TOKEN: &str = "test-token";

/// Identity with fixed issue and expiry times.
pub(crate) fn identity_for(user_id: UserId) -> Identity {
    let issued_at = Utc
        .with_ymd_and_hms(2024, 1, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp");
    Identity::new(user_id, issued_at, issued_at + chrono::Duration::hours(1))
}

/// Assemble an [`HttpState`] from mocks. Ports left unset reject every call.
#[derive(Default)]
pub(crate) struct StateBuilder {
    registration: MockRegistrationService,
    login: MockLoginService,
    profile: MockUserProfileQuery,
    contacts: MockContactsCommand,
    contacts_query: MockContactsQuery,
    tokens: MockTokenIssuer,
}

impl StateBuilder {
    pub(crate) fn registration(mut self, registration: MockRegistrationService) -> Self {
        self.registration = registration;
        self
    }

    pub(crate) fn login(mut self, login: MockLoginService) -> Self {
        self.login = login;
        self
    }

    pub(crate) fn profile(mut self, profile: MockUserProfileQuery) -> Self {
        self.profile = profile;
        self
    }

    pub(crate) fn contacts(mut self, contacts: MockContactsCommand) -> Self {
        self.contacts = contacts;
        self
    }

    pub(crate) fn contacts_query(mut self, contacts_query: MockContactsQuery) -> Self {
        self.contacts_query = contacts_query;
        self
    }

    pub(crate) fn tokens(mut self, tokens: MockTokenIssuer) -> Self {
        self.tokens = tokens;
        self
    }

    /// Accept [`TEST_TOKEN`] as `user_id` and reject anything else.
    pub(crate) fn authenticated_as(self, user_id: UserId) -> Self {
        let identity = identity_for(user_id);
        let mut tokens = MockTokenIssuer::new();
        tokens.expect_verify().returning(move |token| {
            if token == TEST_TOKEN {
                Ok(identity)
            } else {
                Err(crate::domain::ports::TokenError::invalid("unknown test token"))
            }
        });
        self.tokens(tokens)
    }

    pub(crate) fn build(self) -> HttpState {
        HttpState {
            registration: Arc::new(self.registration),
            login: Arc::new(self.login),
            profile: Arc::new(self.profile),
            contacts: Arc::new(self.contacts),
            contacts_query: Arc::new(self.contacts_query),
            tokens: Arc::new(self.tokens),
        }
    }
}

/// Application with the production routing, middleware and JSON config.
pub(crate) fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(json_config())
        .wrap(Trace)
        .service(api_scope())
}
