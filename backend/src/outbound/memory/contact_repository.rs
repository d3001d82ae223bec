//! In-memory `ContactRepository`.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{ContactConflict, ContactRepository, ContactRepositoryError};
use crate::domain::{Contact, ContactId, EmailAddress, UserId};

/// Contacts in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryContactRepository {
    contacts: Mutex<Vec<Contact>>,
}

impl InMemoryContactRepository {
    fn contacts(&self) -> Result<MutexGuard<'_, Vec<Contact>>, ContactRepositoryError> {
        self.contacts
            .lock()
            .map_err(|_| ContactRepositoryError::query("contact store poisoned"))
    }
}

fn conflict_in(
    contacts: &[Contact],
    owner: &UserId,
    email: &EmailAddress,
    phone: &str,
    exclude: Option<ContactId>,
) -> Option<ContactConflict> {
    let others = contacts
        .iter()
        .filter(|c| c.is_owned_by(owner) && Some(*c.id()) != exclude);
    let mut phone_clash = false;
    for contact in others {
        if contact.email() == email {
            return Some(ContactConflict::Email);
        }
        phone_clash |= contact.phone() == phone;
    }
    phone_clash.then_some(ContactConflict::Phone)
}

fn conflict_error(conflict: ContactConflict) -> ContactRepositoryError {
    match conflict {
        ContactConflict::Email => ContactRepositoryError::duplicate_email(),
        ContactConflict::Phone => ContactRepositoryError::duplicate_phone(),
    }
}

#[async_trait]
impl ContactRepository for InMemoryContactRepository {
    async fn list_for_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<Contact>, ContactRepositoryError> {
        let contacts = self.contacts()?;
        // Newest insert first among equal timestamps.
        let mut owned: Vec<Contact> = contacts
            .iter()
            .rev()
            .filter(|c| c.is_owned_by(owner))
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(owned)
    }

    async fn find_by_id(&self, id: &ContactId) -> Result<Option<Contact>, ContactRepositoryError> {
        Ok(self.contacts()?.iter().find(|c| c.id() == id).cloned())
    }

    async fn find_conflict(
        &self,
        owner: &UserId,
        email: &EmailAddress,
        phone: &str,
        exclude: Option<ContactId>,
    ) -> Result<Option<ContactConflict>, ContactRepositoryError> {
        Ok(conflict_in(&self.contacts()?, owner, email, phone, exclude))
    }

    async fn insert(&self, contact: &Contact) -> Result<(), ContactRepositoryError> {
        let mut contacts = self.contacts()?;
        if let Some(conflict) = conflict_in(
            &contacts,
            contact.owner(),
            contact.email(),
            contact.phone(),
            None,
        ) {
            return Err(conflict_error(conflict));
        }
        contacts.push(contact.clone());
        Ok(())
    }

    async fn update(&self, contact: &Contact) -> Result<(), ContactRepositoryError> {
        let mut contacts = self.contacts()?;
        if let Some(conflict) = conflict_in(
            &contacts,
            contact.owner(),
            contact.email(),
            contact.phone(),
            Some(*contact.id()),
        ) {
            return Err(conflict_error(conflict));
        }
        let slot = contacts
            .iter_mut()
            .find(|c| c.id() == contact.id())
            .ok_or_else(|| ContactRepositoryError::missing(contact.id().to_string()))?;
        *slot = contact.clone();
        Ok(())
    }

    async fn delete(&self, id: &ContactId) -> Result<(), ContactRepositoryError> {
        let mut contacts = self.contacts()?;
        let index = contacts
            .iter()
            .position(|c| c.id() == id)
            .ok_or_else(|| ContactRepositoryError::missing(id.to_string()))?;
        contacts.remove(index);
        Ok(())
    }
}
