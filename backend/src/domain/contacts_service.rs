//! Contact ownership and deduplication service.
//!
//! Every operation is scoped to the caller's identity. Before any write the
//! service scans the caller's other contacts for a matching email or phone;
//! repositories back this up with uniqueness checks of their own so a racing
//! request receives the same duplicate error.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::ports::{
    ContactConflict, ContactRepository, ContactRepositoryError, ContactsCommand, ContactsQuery,
};
use crate::domain::{
    Contact, ContactId, ContactPatch, EmailAddress, Error, Identity, NewContact, UserId,
};

const DUPLICATE_EMAIL: &str = "Contact with this Email already exists!";
const DUPLICATE_PHONE: &str = "Contact with this Phone Number already exists!";
/// Reported for unknown or malformed contact identifiers.
pub const CONTACT_NOT_FOUND: &str = "Contact Not Found!";
const NOT_OWNER: &str = "Un-Authorized Attempt!";
const NO_CONTACTS: &str = "No Contacts Found!";

/// Contacts service implementing the command and query driving ports.
pub struct ContactsService<R: ?Sized> {
    contacts: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R: ?Sized> Clone for ContactsService<R> {
    fn clone(&self) -> Self {
        Self {
            contacts: Arc::clone(&self.contacts),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R: ?Sized> ContactsService<R> {
    /// Create a new service over the given repository.
    pub fn new(contacts: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { contacts, clock }
    }
}

fn map_repository_error(error: ContactRepositoryError) -> Error {
    match error {
        ContactRepositoryError::DuplicateEmail => Error::duplicate(DUPLICATE_EMAIL),
        ContactRepositoryError::DuplicatePhone => Error::duplicate(DUPLICATE_PHONE),
        ContactRepositoryError::Missing { .. } => Error::not_found(CONTACT_NOT_FOUND),
        ContactRepositoryError::Connection { message } => {
            Error::internal(format!("contact repository unavailable: {message}"))
        }
        ContactRepositoryError::Query { message } => {
            Error::internal(format!("contact repository error: {message}"))
        }
    }
}

fn conflict_error(conflict: ContactConflict) -> Error {
    match conflict {
        ContactConflict::Email => Error::duplicate(DUPLICATE_EMAIL),
        ContactConflict::Phone => Error::duplicate(DUPLICATE_PHONE),
    }
}

impl<R> ContactsService<R>
where
    R: ContactRepository + ?Sized,
{
    async fn ensure_unique(
        &self,
        owner: &UserId,
        email: &EmailAddress,
        phone: &str,
        exclude: Option<ContactId>,
    ) -> Result<(), Error> {
        match self
            .contacts
            .find_conflict(owner, email, phone, exclude)
            .await
            .map_err(map_repository_error)?
        {
            Some(conflict) => {
                debug!(owner = %owner, ?conflict, "contact rejected as duplicate");
                Err(conflict_error(conflict))
            }
            None => Ok(()),
        }
    }

    /// Load a contact the caller owns. A missing contact is reported before
    /// an ownership mismatch.
    async fn owned_contact(&self, identity: &Identity, id: &ContactId) -> Result<Contact, Error> {
        let contact = self
            .contacts
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(CONTACT_NOT_FOUND))?;
        if !contact.is_owned_by(identity.user_id()) {
            debug!(contact_id = %id, caller = %identity.user_id(), "contact owned by another user");
            return Err(Error::forbidden(NOT_OWNER));
        }
        Ok(contact)
    }
}

#[async_trait]
impl<R> ContactsQuery for ContactsService<R>
where
    R: ContactRepository + ?Sized,
{
    async fn list(&self, identity: &Identity) -> Result<Vec<Contact>, Error> {
        let contacts = self
            .contacts
            .list_for_owner(identity.user_id())
            .await
            .map_err(map_repository_error)?;
        if contacts.is_empty() {
            return Err(Error::no_contacts(NO_CONTACTS));
        }
        Ok(contacts)
    }
}

#[async_trait]
impl<R> ContactsCommand for ContactsService<R>
where
    R: ContactRepository + ?Sized,
{
    async fn create(&self, identity: &Identity, draft: NewContact) -> Result<Contact, Error> {
        let owner = identity.user_id();
        self.ensure_unique(owner, draft.email(), draft.phone(), None)
            .await?;

        let contact = Contact::create(ContactId::random(), *owner, draft, self.clock.utc());
        self.contacts
            .insert(&contact)
            .await
            .map_err(map_repository_error)?;
        info!(contact_id = %contact.id(), owner = %owner, "contact created");
        Ok(contact)
    }

    async fn update(
        &self,
        identity: &Identity,
        id: &ContactId,
        patch: ContactPatch,
    ) -> Result<Contact, Error> {
        let existing = self.owned_contact(identity, id).await?;
        let updated = patch.apply_to(&existing);
        self.ensure_unique(
            identity.user_id(),
            updated.email(),
            updated.phone(),
            Some(*id),
        )
        .await?;

        self.contacts
            .update(&updated)
            .await
            .map_err(map_repository_error)?;
        info!(contact_id = %id, "contact updated");
        Ok(updated)
    }

    async fn delete(&self, identity: &Identity, id: &ContactId) -> Result<Contact, Error> {
        let existing = self.owned_contact(identity, id).await?;
        self.contacts
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        info!(contact_id = %id, "contact deleted");
        Ok(existing)
    }
}

#[cfg(test)]
#[path = "contacts_service_tests.rs"]
mod tests;
