//! Driving port for changing a caller's contacts.
//!
//! Every operation is scoped to the caller. Updates and deletes report a
//! missing contact before an ownership mismatch, so callers probing foreign
//! identifiers learn nothing beyond "exists".

use async_trait::async_trait;

use crate::domain::{Contact, ContactId, ContactPatch, Error, Identity, NewContact};

/// Domain use-case port for contact mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactsCommand: Send + Sync {
    /// Create a contact owned by the caller.
    async fn create(&self, identity: &Identity, draft: NewContact) -> Result<Contact, Error>;

    /// Apply a partial update and return the stored result.
    async fn update(
        &self,
        identity: &Identity,
        id: &ContactId,
        patch: ContactPatch,
    ) -> Result<Contact, Error>;

    /// Delete a contact and return its prior state.
    async fn delete(&self, identity: &Identity, id: &ContactId) -> Result<Contact, Error>;
}
