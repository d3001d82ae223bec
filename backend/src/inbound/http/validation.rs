//! Request-body decoding failures.
//!
//! Actix rejects unreadable JSON before a handler runs. The handler installed
//! here reports those failures in the same envelope as domain validation so
//! clients only ever parse one error shape.

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, web};
use tracing::debug;

use crate::domain::{Error, FieldError};

pub(crate) const BODY_FIELD: &str = "body";
pub(crate) const MALFORMED_BODY_MESSAGE: &str = "Request body must be valid JSON!";
pub(crate) const UNSUPPORTED_CONTENT_TYPE_MESSAGE: &str =
    "Request body must be sent as application/json!";
pub(crate) const BODY_TOO_LARGE_MESSAGE: &str = "Request body is too large!";

/// Largest accepted JSON body in bytes.
pub const MAX_JSON_BODY_BYTES: usize = 16 * 1024;

fn message_for(error: &JsonPayloadError) -> &'static str {
    match error {
        JsonPayloadError::ContentType => UNSUPPORTED_CONTENT_TYPE_MESSAGE,
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            BODY_TOO_LARGE_MESSAGE
        }
        _ => MALFORMED_BODY_MESSAGE,
    }
}

/// Map a JSON extraction failure onto an `invalid_request` error.
pub(crate) fn json_error(error: &JsonPayloadError) -> Error {
    debug!(%error, "rejected request body");
    Error::validation(vec![FieldError::new(BODY_FIELD, message_for(error))])
}

/// JSON extractor configuration shared by every route.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(MAX_JSON_BODY_BYTES)
        .error_handler(|error, _req: &HttpRequest| json_error(&error).into())
}
