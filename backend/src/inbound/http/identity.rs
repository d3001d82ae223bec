//! Token authentication extractor.
//!
//! Protected handlers take an [`AuthenticatedUser`] argument. Extraction reads
//! the `x-auth-token` header and verifies it through the [`TokenIssuer`] port
//! held in [`HttpState`]; handlers without the argument are public.
//!
//! [`TokenIssuer`]: crate::domain::ports::TokenIssuer

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};
use tracing::debug;

use crate::domain::{Error, Identity, TraceId};
use crate::inbound::http::state::HttpState;

/// Request header carrying the identity token.
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

pub(crate) const MISSING_TOKEN_MESSAGE: &str = "Access Denied! No token!";
pub(crate) const INVALID_TOKEN_MESSAGE: &str = "Invalid Token!";

/// The verified caller of a protected endpoint.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser(Identity);

impl AuthenticatedUser {
    pub fn identity(&self) -> &Identity {
        &self.0
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, Error> {
    let trace_id = TraceId::current().map(|id| id.to_string()).unwrap_or_default();
    let raw = req
        .headers()
        .get(AUTH_TOKEN_HEADER)
        .map(|value| value.to_str().map(str::trim));
    let token = match raw {
        None | Some(Ok("")) => {
            debug!(%trace_id, "request rejected: no token");
            return Err(Error::unauthorized(MISSING_TOKEN_MESSAGE));
        }
        Some(Err(_)) => {
            debug!(%trace_id, "request rejected: token header is not ASCII");
            return Err(Error::unauthorized(INVALID_TOKEN_MESSAGE));
        }
        Some(Ok(token)) => token,
    };

    let state = req.app_data::<web::Data<HttpState>>().ok_or_else(|| {
        Error::internal("HttpState is not registered with the application")
    })?;
    state
        .tokens
        .verify(token)
        .map(AuthenticatedUser)
        .map_err(|err| {
            debug!(%trace_id, error = %err, "request rejected: token failed verification");
            Error::unauthorized(INVALID_TOKEN_MESSAGE)
        })
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}
