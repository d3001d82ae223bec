//! Driving port for reading a caller's contacts.

use async_trait::async_trait;

use crate::domain::{Contact, Error, Identity};

/// Domain use-case port for listing contacts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactsQuery: Send + Sync {
    /// All contacts owned by the caller, newest first.
    ///
    /// An empty list is reported as [`crate::domain::ErrorCode::NoContacts`].
    async fn list(&self, identity: &Identity) -> Result<Vec<Contact>, Error>;
}
