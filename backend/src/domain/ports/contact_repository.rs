//! Port for contact persistence.
//!
//! The [`ContactRepository`] trait stores contacts keyed by owner. Adapters
//! enforce per-owner uniqueness of email and phone: the conflict scan lets the
//! service report a friendly error up front, and the write methods report the
//! same conflict when a concurrent request slipped in between.

use async_trait::async_trait;

use crate::domain::{Contact, ContactId, EmailAddress, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by contact repository adapters.
    pub enum ContactRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "contact repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "contact repository query failed: {message}",
        /// The owner already has a contact with this email.
        DuplicateEmail => "owner already has a contact with this email",
        /// The owner already has a contact with this phone number.
        DuplicatePhone => "owner already has a contact with this phone number",
        /// The contact disappeared between lookup and write.
        Missing { id: String } => "contact {id} does not exist",
    }
}

/// Field on which an existing contact collides with a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactConflict {
    Email,
    Phone,
}

/// Port for contact storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// All contacts of `owner`, newest first.
    async fn list_for_owner(&self, owner: &UserId)
    -> Result<Vec<Contact>, ContactRepositoryError>;

    /// Fetch a contact regardless of owner; callers check ownership.
    async fn find_by_id(&self, id: &ContactId) -> Result<Option<Contact>, ContactRepositoryError>;

    /// Look for another contact of `owner` sharing `email` or `phone`.
    ///
    /// An email collision is reported in preference to a phone collision.
    /// `exclude` skips the contact being updated so it never conflicts with
    /// itself.
    async fn find_conflict(
        &self,
        owner: &UserId,
        email: &EmailAddress,
        phone: &str,
        exclude: Option<ContactId>,
    ) -> Result<Option<ContactConflict>, ContactRepositoryError>;

    /// Persist a new contact.
    async fn insert(&self, contact: &Contact) -> Result<(), ContactRepositoryError>;

    /// Overwrite the mutable fields of an existing contact.
    async fn update(&self, contact: &Contact) -> Result<(), ContactRepositoryError>;

    /// Remove a contact.
    async fn delete(&self, id: &ContactId) -> Result<(), ContactRepositoryError>;
}
