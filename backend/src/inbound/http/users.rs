//! Account registration handler.
//!
//! ```text
//! POST /api/users {"name":"Ann","email":"a@x.com","password":"secret"}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, RegistrationForm};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::TokenResponse;
use crate::inbound::http::state::HttpState;

/// Registration request body.
///
/// Fields are optional at the wire level so missing values are reported by
/// domain validation with the same messages as blank ones.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "Ann Example")]
    pub name: Option<String>,
    #[schema(example = "ann@example.com")]
    pub email: Option<String>,
    #[schema(example = "secret")]
    pub password: Option<String>,
}

impl TryFrom<RegisterRequest> for RegistrationForm {
    type Error = Error;

    fn try_from(value: RegisterRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            value.name.as_deref().unwrap_or_default(),
            value.email.as_deref().unwrap_or_default(),
            value.password.as_deref().unwrap_or_default(),
        )
    }
}

/// Register a new user and return their first token.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account created", body = TokenResponse),
        (status = 400, description = "Validation failure or email already registered", body = crate::domain::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::domain::ErrorBody)
    ),
    tags = ["users"],
    operation_id = "registerUser"
)]
#[post("/users")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<web::Json<TokenResponse>> {
    let form = RegistrationForm::try_from(payload.into_inner())?;
    let token = state.registration.register(&form).await?;
    Ok(web::Json(TokenResponse::from(token)))
}
