//! Contact aggregate and the validated inputs used to create or change one.
//!
//! A contact always belongs to exactly one user. Within one owner's contacts
//! no two entries share an email address or a phone number; the service and
//! the repositories enforce that together.

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{EmailAddress, Error, FieldError, UserId};

/// Classification applied when a new contact omits one.
pub const DEFAULT_CONTACT_TYPE: &str = "personal";

const NAME_REQUIRED: &str = "Name is required!";
const PHONE_REQUIRED: &str = "Phone Number is required!";
const EMAIL_INVALID: &str = "Please include a valid Email id!";

/// Errors raised when a stored contact row fails validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactValidationError {
    #[error("contact id must be a valid UUID")]
    InvalidId,
    #[error("contact name must not be empty")]
    EmptyName,
    #[error("contact phone must not be empty")]
    EmptyPhone,
    #[error("contact email must be well-formed")]
    InvalidEmail,
}

/// Stable contact identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContactId(Uuid);

impl ContactId {
    /// Parse a path segment; anything other than a UUID is rejected.
    pub fn new(id: impl AsRef<str>) -> Result<Self, ContactValidationError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| ContactValidationError::InvalidId)
    }

    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored contact.
///
/// ## Invariants
/// - `name` and `phone` are trimmed and non-empty.
/// - `owner` never changes after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    id: ContactId,
    owner: UserId,
    name: String,
    email: EmailAddress,
    phone: String,
    kind: String,
    created_at: DateTime<Utc>,
}

impl Contact {
    /// Bind a validated draft to its owner.
    pub fn create(
        id: ContactId,
        owner: UserId,
        draft: NewContact,
        created_at: DateTime<Utc>,
    ) -> Self {
        let NewContact {
            name,
            email,
            phone,
            kind,
        } = draft;
        Self {
            id,
            owner,
            name,
            email,
            phone,
            kind,
            created_at,
        }
    }

    /// Fallible constructor for rows loaded from storage.
    pub fn try_from_parts(
        id: Uuid,
        owner: Uuid,
        name: &str,
        email: &str,
        phone: &str,
        kind: &str,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ContactValidationError> {
        let name = required(name).ok_or(ContactValidationError::EmptyName)?;
        let phone = required(phone).ok_or(ContactValidationError::EmptyPhone)?;
        let email = EmailAddress::new(email).map_err(|_| ContactValidationError::InvalidEmail)?;
        Ok(Self {
            id: ContactId::from_uuid(id),
            owner: UserId::from_uuid(owner),
            name,
            email,
            phone,
            kind: kind.to_owned(),
            created_at,
        })
    }

    pub fn id(&self) -> &ContactId {
        &self.id
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn phone(&self) -> &str {
        self.phone.as_str()
    }

    /// Free-form classification, serialised as `type`.
    pub fn kind(&self) -> &str {
        self.kind.as_str()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether `user` may read or change this contact.
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.owner == user
    }
}

/// Validated input for a new contact.
///
/// # Examples
/// ```
/// use contacts_backend::domain::NewContact;
///
/// let draft = NewContact::try_from_parts("Bob", "b@x.com", "555", None).unwrap();
/// assert_eq!(draft.kind(), "personal");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
    name: String,
    email: EmailAddress,
    phone: String,
    kind: String,
}

impl NewContact {
    /// Validate raw inputs, reporting every failing rule.
    pub fn try_from_parts(
        name: &str,
        email: &str,
        phone: &str,
        kind: Option<&str>,
    ) -> Result<Self, Error> {
        let mut failures = Vec::new();
        let name = required(name);
        if name.is_none() {
            failures.push(FieldError::new("name", NAME_REQUIRED));
        }
        let phone = required(phone);
        if phone.is_none() {
            failures.push(FieldError::new("phone", PHONE_REQUIRED));
        }
        let parsed_email = EmailAddress::new(email).ok();
        if parsed_email.is_none() {
            failures.push(FieldError::new("email", EMAIL_INVALID).with_value(email));
        }

        match (name, parsed_email, phone) {
            (Some(name), Some(email), Some(phone)) => Ok(Self {
                name,
                email,
                phone,
                kind: contact_type(kind),
            }),
            _ => Err(Error::validation(failures)),
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn phone(&self) -> &str {
        self.phone.as_str()
    }

    pub fn kind(&self) -> &str {
        self.kind.as_str()
    }
}

/// Validated partial update. Absent fields keep their stored values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactPatch {
    name: Option<String>,
    email: Option<EmailAddress>,
    phone: Option<String>,
    kind: Option<String>,
}

impl ContactPatch {
    /// Validate only the supplied fields, reporting every failing rule.
    pub fn try_from_parts(
        name: Option<&str>,
        email: Option<&str>,
        phone: Option<&str>,
        kind: Option<&str>,
    ) -> Result<Self, Error> {
        let mut failures = Vec::new();
        let name = match name {
            Some(raw) => {
                let value = required(raw);
                if value.is_none() {
                    failures.push(FieldError::new("name", NAME_REQUIRED));
                }
                value
            }
            None => None,
        };
        let phone = match phone {
            Some(raw) => {
                let value = required(raw);
                if value.is_none() {
                    failures.push(FieldError::new("phone", PHONE_REQUIRED));
                }
                value
            }
            None => None,
        };
        let email = match email {
            Some(raw) => {
                let value = EmailAddress::new(raw).ok();
                if value.is_none() {
                    failures.push(FieldError::new("email", EMAIL_INVALID).with_value(raw));
                }
                value
            }
            None => None,
        };

        if !failures.is_empty() {
            return Err(Error::validation(failures));
        }
        Ok(Self {
            name,
            email,
            phone,
            // A blank type counts as not supplied.
            kind: kind.and_then(required),
        })
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none() && self.kind.is_none()
    }

    /// Produce the post-update contact. Identity, owner and creation time are
    /// carried over unchanged.
    pub fn apply_to(&self, contact: &Contact) -> Contact {
        let mut updated = contact.clone();
        if let Some(name) = &self.name {
            updated.name.clone_from(name);
        }
        if let Some(email) = &self.email {
            updated.email = email.clone();
        }
        if let Some(phone) = &self.phone {
            updated.phone.clone_from(phone);
        }
        if let Some(kind) = &self.kind {
            updated.kind.clone_from(kind);
        }
        updated
    }
}

fn required(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

// Blank classifications fall back to the default.
fn contact_type(raw: Option<&str>) -> String {
    raw.and_then(required)
        .unwrap_or_else(|| DEFAULT_CONTACT_TYPE.to_owned())
}
