//! In-memory `UserRepository`.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, User, UserId};

/// Users keyed by id.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    fn users(&self) -> Result<MutexGuard<'_, HashMap<UserId, User>>, UserPersistenceError> {
        self.users
            .lock()
            .map_err(|_| UserPersistenceError::query("user store poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut users = self.users()?;
        if users.values().any(|existing| existing.email() == user.email()) {
            return Err(UserPersistenceError::duplicate_email());
        }
        users.insert(*user.id(), user.clone());
        Ok(())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .users()?
            .values()
            .find(|user| user.email() == email)
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.users()?.get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{PasswordHash, UserName};
    use chrono::Utc;
    use rstest::rstest;

    fn user(email: &str) -> User {
        User::new(
            UserId::random(),
            UserName::new("Ann").expect("name"),
            EmailAddress::new(email).expect("email"),
            PasswordHash::new("$2b$04$x").expect("hash"),
            Utc::now(),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn finds_inserted_users_by_id_and_email() {
        let repo = InMemoryUserRepository::default();
        let stored = user("a@x.com");
        repo.insert(&stored).await.expect("insert");

        let by_id = repo.find_by_id(stored.id()).await.expect("lookup");
        let by_email = repo.find_by_email(stored.email()).await.expect("lookup");

        assert_eq!(by_id.as_ref(), Some(&stored));
        assert_eq!(by_email.as_ref(), Some(&stored));
    }

    #[rstest]
    #[tokio::test]
    async fn rejects_second_user_with_same_email() {
        let repo = InMemoryUserRepository::default();
        repo.insert(&user("a@x.com")).await.expect("first insert");

        let err = repo
            .insert(&user("a@x.com"))
            .await
            .expect_err("duplicate email");

        assert_eq!(err, UserPersistenceError::duplicate_email());
    }

    #[rstest]
    #[tokio::test]
    async fn email_lookup_is_exact() {
        let repo = InMemoryUserRepository::default();
        repo.insert(&user("a@x.com")).await.expect("insert");

        let other = EmailAddress::new("A@x.com").expect("email");
        assert!(repo.find_by_email(&other).await.expect("lookup").is_none());
    }
}
