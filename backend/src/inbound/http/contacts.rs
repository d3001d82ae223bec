//! Contact handlers. Every route requires a token and only ever touches the
//! caller's own contacts.
//!
//! ```text
//! GET    /api/contacts
//! POST   /api/contacts      {"name":"Bob","email":"b@x.com","phone":"555","type":"work"}
//! PUT    /api/contacts/{id} {"phone":"556"}
//! DELETE /api/contacts/{id}
//! ```

use actix_web::{delete, get, post, put, web};
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{CONTACT_NOT_FOUND, Contact, ContactId, ContactPatch, Error, NewContact};
use crate::inbound::http::ApiResult;
use crate::inbound::http::identity::AuthenticatedUser;
use crate::inbound::http::state::HttpState;

/// Request body for creating or updating a contact.
///
/// On create `name`, `email` and `phone` are required; on update any subset
/// may be sent and absent fields keep their stored values.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct ContactRequest {
    #[schema(example = "Bob Example")]
    pub name: Option<String>,
    #[schema(example = "bob@example.com")]
    pub email: Option<String>,
    #[schema(example = "555-0100")]
    pub phone: Option<String>,
    /// Free-form category; defaults to `personal` on create. Blank on update
    /// keeps the stored value.
    #[serde(rename = "type")]
    #[schema(example = "work")]
    pub kind: Option<String>,
}

impl TryFrom<ContactRequest> for NewContact {
    type Error = Error;

    fn try_from(value: ContactRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            value.name.as_deref().unwrap_or_default(),
            value.email.as_deref().unwrap_or_default(),
            value.phone.as_deref().unwrap_or_default(),
            value.kind.as_deref(),
        )
    }
}

impl TryFrom<ContactRequest> for ContactPatch {
    type Error = Error;

    fn try_from(value: ContactRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            value.name.as_deref(),
            value.email.as_deref(),
            value.phone.as_deref(),
            value.kind.as_deref(),
        )
    }
}

/// Contact as returned to its owner.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    pub id: String,
    /// Identifier of the owning user.
    pub owner: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(rename = "type")]
    #[schema(example = "personal")]
    pub kind: String,
    #[schema(example = "2024-01-01T12:00:00.000Z")]
    pub created_at: String,
}

impl From<Contact> for ContactResponse {
    fn from(contact: Contact) -> Self {
        Self {
            id: contact.id().to_string(),
            owner: contact.owner().to_string(),
            name: contact.name().to_owned(),
            email: contact.email().as_ref().to_owned(),
            phone: contact.phone().to_owned(),
            kind: contact.kind().to_owned(),
            created_at: contact
                .created_at()
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// A path segment that is not a UUID cannot name a stored contact.
fn parse_contact_id(raw: &str) -> Result<ContactId, Error> {
    ContactId::new(raw).map_err(|_| Error::not_found(CONTACT_NOT_FOUND))
}

/// List the caller's contacts, newest first.
#[utoipa::path(
    get,
    path = "/api/contacts",
    responses(
        (status = 200, description = "Caller's contacts", body = [ContactResponse]),
        (status = 400, description = "The caller has no contacts (code `no_contacts`)", body = crate::domain::ErrorBody),
        (status = 401, description = "Missing or invalid token", body = crate::domain::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::domain::ErrorBody)
    ),
    tags = ["contacts"],
    operation_id = "listContacts",
    security(("AuthToken" = []))
)]
#[get("/contacts")]
pub async fn list_contacts(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<Vec<ContactResponse>>> {
    let contacts = state.contacts_query.list(user.identity()).await?;
    Ok(web::Json(
        contacts.into_iter().map(ContactResponse::from).collect(),
    ))
}

/// Create a contact owned by the caller.
#[utoipa::path(
    post,
    path = "/api/contacts",
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Contact created", body = ContactResponse),
        (status = 400, description = "Validation failure or duplicate email/phone", body = crate::domain::ErrorBody),
        (status = 401, description = "Missing or invalid token", body = crate::domain::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::domain::ErrorBody)
    ),
    tags = ["contacts"],
    operation_id = "createContact",
    security(("AuthToken" = []))
)]
#[post("/contacts")]
pub async fn create_contact(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<ContactRequest>,
) -> ApiResult<web::Json<ContactResponse>> {
    let draft = NewContact::try_from(payload.into_inner())?;
    let contact = state.contacts.create(user.identity(), draft).await?;
    Ok(web::Json(ContactResponse::from(contact)))
}

/// Update any subset of a contact's fields.
#[utoipa::path(
    put,
    path = "/api/contacts/{id}",
    params(("id" = String, Path, description = "Contact identifier")),
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Contact updated", body = ContactResponse),
        (status = 400, description = "Validation failure or duplicate email/phone", body = crate::domain::ErrorBody),
        (status = 401, description = "Missing token, invalid token or not the owner", body = crate::domain::ErrorBody),
        (status = 404, description = "Contact not found", body = crate::domain::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::domain::ErrorBody)
    ),
    tags = ["contacts"],
    operation_id = "updateContact",
    security(("AuthToken" = []))
)]
#[put("/contacts/{id}")]
pub async fn update_contact(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<ContactRequest>,
) -> ApiResult<web::Json<ContactResponse>> {
    let id = parse_contact_id(&path)?;
    let patch = ContactPatch::try_from(payload.into_inner())?;
    let contact = state.contacts.update(user.identity(), &id, patch).await?;
    Ok(web::Json(ContactResponse::from(contact)))
}

/// Delete a contact and return what was removed.
#[utoipa::path(
    delete,
    path = "/api/contacts/{id}",
    params(("id" = String, Path, description = "Contact identifier")),
    responses(
        (status = 200, description = "Contact deleted", body = ContactResponse),
        (status = 401, description = "Missing token, invalid token or not the owner", body = crate::domain::ErrorBody),
        (status = 404, description = "Contact not found", body = crate::domain::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::domain::ErrorBody)
    ),
    tags = ["contacts"],
    operation_id = "deleteContact",
    security(("AuthToken" = []))
)]
#[delete("/contacts/{id}")]
pub async fn delete_contact(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<ContactResponse>> {
    let id = parse_contact_id(&path)?;
    let contact = state.contacts.delete(user.identity(), &id).await?;
    Ok(web::Json(ContactResponse::from(contact)))
}

#[cfg(test)]
#[path = "contacts_tests.rs"]
mod tests;
