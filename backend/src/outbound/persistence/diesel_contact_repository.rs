//! PostgreSQL-backed `ContactRepository` implementation using Diesel ORM.
//!
//! Per-owner uniqueness is enforced twice: `find_conflict` gives the service
//! a precise answer up front, and the `contacts_owner_email_key` /
//! `contacts_owner_phone_key` constraints catch writes that race it.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::{ContactConflict, ContactRepository, ContactRepositoryError};
use crate::domain::{Contact, ContactId, EmailAddress, UserId};

use super::error_mapping::{
    CONTACTS_OWNER_EMAIL_KEY, CONTACTS_OWNER_PHONE_KEY, map_diesel_error, map_pool_error,
    violated_unique_constraint,
};
use super::models::{ContactRow, ContactUpdate, NewContactRow};
use super::pool::{DbPool, PoolError};
use super::schema::contacts;

/// Diesel-backed implementation of the [`ContactRepository`] port.
#[derive(Clone)]
pub struct DieselContactRepository {
    pool: DbPool,
}

impl DieselContactRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> ContactRepositoryError {
    map_pool_error(error, ContactRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> ContactRepositoryError {
    match violated_unique_constraint(&error) {
        Some(CONTACTS_OWNER_EMAIL_KEY) => return ContactRepositoryError::duplicate_email(),
        Some(CONTACTS_OWNER_PHONE_KEY) => return ContactRepositoryError::duplicate_phone(),
        _ => {}
    }
    map_diesel_error(
        error,
        ContactRepositoryError::query,
        ContactRepositoryError::connection,
    )
}

fn row_to_contact(row: ContactRow) -> Result<Contact, ContactRepositoryError> {
    Contact::try_from_parts(
        row.id,
        row.owner_id,
        &row.name,
        &row.email,
        &row.phone,
        &row.contact_type,
        row.created_at,
    )
    .map_err(|err| {
        warn!(contact_id = %row.id, error = %err, "stored contact row failed validation");
        ContactRepositoryError::query(format!("invalid contact row: {err}"))
    })
}

/// Classify matching `(email, phone)` pairs, preferring an email collision.
fn classify_conflict(
    rows: &[(String, String)],
    email: &EmailAddress,
) -> Option<ContactConflict> {
    if rows.is_empty() {
        None
    } else if rows.iter().any(|(candidate, _)| candidate == email.as_ref()) {
        Some(ContactConflict::Email)
    } else {
        Some(ContactConflict::Phone)
    }
}

#[async_trait]
impl ContactRepository for DieselContactRepository {
    async fn list_for_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<Contact>, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<ContactRow> = contacts::table
            .filter(contacts::owner_id.eq(owner.as_uuid()))
            .order((contacts::created_at.desc(), contacts::id.desc()))
            .select(ContactRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows.into_iter().map(row_to_contact).collect()
    }

    async fn find_by_id(&self, id: &ContactId) -> Result<Option<Contact>, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<ContactRow> = contacts::table
            .find(id.as_uuid())
            .select(ContactRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(row_to_contact).transpose()
    }

    async fn find_conflict(
        &self,
        owner: &UserId,
        email: &EmailAddress,
        phone: &str,
        exclude: Option<ContactId>,
    ) -> Result<Option<ContactConflict>, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        // Generated ids are v4, so the nil UUID never matches a stored row.
        let excluded = exclude.map_or(Uuid::nil(), |id| *id.as_uuid());

        let rows: Vec<(String, String)> = contacts::table
            .filter(contacts::owner_id.eq(owner.as_uuid()))
            .filter(contacts::id.ne(excluded))
            .filter(
                contacts::email
                    .eq(email.as_ref())
                    .or(contacts::phone.eq(phone)),
            )
            .select((contacts::email, contacts::phone))
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(classify_conflict(&rows, email))
    }

    async fn insert(&self, contact: &Contact) -> Result<(), ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = NewContactRow {
            id: *contact.id().as_uuid(),
            owner_id: *contact.owner().as_uuid(),
            name: contact.name(),
            email: contact.email().as_ref(),
            phone: contact.phone(),
            contact_type: contact.kind(),
            created_at: contact.created_at(),
        };

        diesel::insert_into(contacts::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn update(&self, contact: &Contact) -> Result<(), ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let changes = ContactUpdate {
            name: contact.name(),
            email: contact.email().as_ref(),
            phone: contact.phone(),
            contact_type: contact.kind(),
        };

        let affected = diesel::update(contacts::table.find(contact.id().as_uuid()))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        if affected == 0 {
            return Err(ContactRepositoryError::missing(contact.id().to_string()));
        }
        Ok(())
    }

    async fn delete(&self, id: &ContactId) -> Result<(), ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let affected = diesel::delete(contacts::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        if affected == 0 {
            return Err(ContactRepositoryError::missing(id.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Row conversion and conflict classification coverage.
    use super::*;
    use chrono::Utc;
    use rstest::rstest;

    fn pair(email: &str, phone: &str) -> (String, String) {
        (email.to_owned(), phone.to_owned())
    }

    #[rstest]
    fn no_rows_means_no_conflict() {
        let email = EmailAddress::new("b@x.com").expect("email");
        assert_eq!(classify_conflict(&[], &email), None);
    }

    #[rstest]
    #[case(vec![pair("b@x.com", "1")], ContactConflict::Email)]
    #[case(vec![pair("other@x.com", "555")], ContactConflict::Phone)]
    #[case(vec![pair("other@x.com", "555"), pair("b@x.com", "9")], ContactConflict::Email)]
    fn email_collisions_win(#[case] rows: Vec<(String, String)>, #[case] expected: ContactConflict) {
        let email = EmailAddress::new("b@x.com").expect("email");
        assert_eq!(classify_conflict(&rows, &email), Some(expected));
    }

    #[rstest]
    fn converts_rows_with_custom_type() {
        let row = ContactRow {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            name: "Bob".to_owned(),
            email: "b@x.com".to_owned(),
            phone: "555".to_owned(),
            contact_type: "work".to_owned(),
            created_at: Utc::now(),
        };
        let contact = row_to_contact(row).expect("valid row");
        assert_eq!(contact.kind(), "work");
    }

    #[rstest]
    fn rejects_rows_with_blank_phone() {
        let row = ContactRow {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            name: "Bob".to_owned(),
            email: "b@x.com".to_owned(),
            phone: " ".to_owned(),
            contact_type: "personal".to_owned(),
            created_at: Utc::now(),
        };
        assert!(matches!(
            row_to_contact(row),
            Err(ContactRepositoryError::Query { .. })
        ));
    }
}
