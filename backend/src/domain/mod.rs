//! Domain primitives, services and ports.
//!
//! Purpose: define strongly typed entities used by the API and persistence
//! layers, the services that enforce authentication and contact ownership,
//! and the ports those services talk through. Keep types immutable and
//! document invariants in each type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - User / Contact: the two persisted aggregates.
//! - AccountService / ContactsService: implementations of the driving ports.

pub mod account_service;
pub mod auth;
pub mod contact;
pub mod contacts_service;
pub mod email;
pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountService;
pub use self::auth::{
    AuthToken, Identity, LoginCredentials, LoginValidationError, PASSWORD_MIN_CHARS,
    RegistrationForm, RegistrationValidationError,
};
pub use self::contact::{
    Contact, ContactId, ContactPatch, ContactValidationError, DEFAULT_CONTACT_TYPE, NewContact,
};
pub use self::contacts_service::{CONTACT_NOT_FOUND, ContactsService};
pub use self::email::{EmailAddress, InvalidEmail};
pub use self::error::{Error, ErrorBody, ErrorCode, ErrorValidationError, FieldError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{PasswordHash, User, UserId, UserName, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use contacts_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("Un-Authorized Attempt!"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
