//! Login and current-user handlers.
//!
//! ```text
//! POST /api/auth {"email":"a@x.com","password":"secret"}
//! GET  /api/auth            (x-auth-token required)
//! ```

use actix_web::{get, post, web};
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{AuthToken, Error, LoginCredentials, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::identity::AuthenticatedUser;
use crate::inbound::http::state::HttpState;

/// Login request body.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "ann@example.com")]
    pub email: Option<String>,
    #[schema(example = "secret")]
    pub password: Option<String>,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = Error;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            value.email.as_deref().unwrap_or_default(),
            value.password.as_deref().unwrap_or_default(),
        )
    }
}

/// Token issued by registration and login.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

impl From<AuthToken> for TokenResponse {
    fn from(token: AuthToken) -> Self {
        Self {
            token: token.into_inner(),
        }
    }
}

/// Public view of an account. The password hash never leaves the domain.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    #[schema(example = "2024-01-01T12:00:00.000Z")]
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id().to_string(),
            name: user.name().as_ref().to_owned(),
            email: user.email().as_ref().to_owned(),
            created_at: user
                .created_at()
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Exchange credentials for a token.
#[utoipa::path(
    post,
    path = "/api/auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = TokenResponse),
        (status = 400, description = "Validation failure or invalid credentials", body = crate::domain::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::domain::ErrorBody)
    ),
    tags = ["auth"],
    operation_id = "login"
)]
#[post("/auth")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<TokenResponse>> {
    let credentials = LoginCredentials::try_from(payload.into_inner())?;
    let token = state.login.login(&credentials).await?;
    Ok(web::Json(TokenResponse::from(token)))
}

/// Fetch the account behind the presented token.
#[utoipa::path(
    get,
    path = "/api/auth",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Missing or invalid token", body = crate::domain::ErrorBody),
        (status = 404, description = "Account no longer exists", body = crate::domain::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::domain::ErrorBody)
    ),
    tags = ["auth"],
    operation_id = "currentUser",
    security(("AuthToken" = []))
)]
#[get("/auth")]
pub async fn current_user(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<UserResponse>> {
    let profile = state.profile.fetch_profile(user.identity().user_id()).await?;
    Ok(web::Json(UserResponse::from(profile)))
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
