//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects every HTTP endpoint and the request, response and
//! error schemas they reference. Swagger UI serves it at `/docs` in debug
//! builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{ErrorBody, ErrorCode, FieldError};
use crate::inbound::http::auth::{LoginRequest, TokenResponse, UserResponse};
use crate::inbound::http::contacts::{ContactRequest, ContactResponse};
use crate::inbound::http::health::ProbeStatus;
use crate::inbound::http::identity::AUTH_TOKEN_HEADER;
use crate::inbound::http::users::RegisterRequest;

/// Registers the token header as an API key scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "AuthToken",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                AUTH_TOKEN_HEADER,
                "Token issued by POST /api/users or POST /api/auth.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Contacts API",
        description = "Token-authenticated personal contact book with per-user ownership."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::current_user,
        crate::inbound::http::contacts::list_contacts,
        crate::inbound::http::contacts::create_contact,
        crate::inbound::http::contacts::update_contact,
        crate::inbound::http::contacts::delete_contact,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        RegisterRequest,
        LoginRequest,
        TokenResponse,
        UserResponse,
        ContactRequest,
        ContactResponse,
        ProbeStatus,
        ErrorBody,
        ErrorCode,
        FieldError,
    )),
    tags(
        (name = "users", description = "Account registration"),
        (name = "auth", description = "Login and the current account"),
        (name = "contacts", description = "The caller's contacts"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Checks on the generated document's shape.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn schema_named<'a>(doc: &'a utoipa::openapi::OpenApi, name: &str) -> &'a RefOr<Schema> {
        let schemas = &doc.components.as_ref().expect("components").schemas;
        schemas
            .iter()
            .find(|(key, _)| key.rsplit(['.', ':']).next() == Some(name))
            .map(|(_, schema)| schema)
            .unwrap_or_else(|| panic!("schema {name} registered"))
    }

    fn assert_has_fields(schema: &RefOr<Schema>, fields: &[&str]) {
        let RefOr::T(Schema::Object(obj)) = schema else {
            panic!("expected Object schema");
        };
        for field in fields {
            assert!(obj.properties.contains_key(*field), "missing field '{field}'");
        }
    }

    #[rstest]
    #[case("ErrorBody", &["code", "msg", "traceId", "errors"])]
    #[case("ContactResponse", &["id", "owner", "name", "email", "phone", "type", "createdAt"])]
    #[case("UserResponse", &["id", "name", "email", "createdAt"])]
    #[case("ContactRequest", &["name", "email", "phone", "type"])]
    fn wire_schemas_use_client_field_names(#[case] name: &str, #[case] fields: &[&str]) {
        let doc = ApiDoc::openapi();
        assert_has_fields(schema_named(&doc, name), fields);
    }

    #[rstest]
    #[case("/api/users")]
    #[case("/api/auth")]
    #[case("/api/contacts")]
    #[case("/api/contacts/{id}")]
    #[case("/health/ready")]
    fn every_route_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "{path} missing");
    }

    #[rstest]
    fn token_header_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("AuthToken"));
    }
}
