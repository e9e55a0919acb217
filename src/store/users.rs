//! Credential store: user identities and their password hashes.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::core_types::UserId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Email already registered. Surfaced to the caller, never retried.
    #[error("duplicate email")]
    DuplicateEmail,
}

/// A registered user.
///
/// The password hash is the output of the password hasher, never the raw
/// input, and is never serialized into a response body.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub password_hash: String,
}

/// User store with a unique email index.
///
/// Email matching is case-sensitive exact match. Uniqueness is enforced
/// through the index entry, so two concurrent registrations for the same
/// email cannot both win.
pub struct UserStore {
    by_id: DashMap<UserId, User>,
    by_email: DashMap<String, UserId>,
}

impl UserStore {
    pub fn new() -> Self {
        Self {
            by_id: DashMap::new(),
            by_email: DashMap::new(),
        }
    }

    /// Create a user. Fails with `DuplicateEmail` if the email is taken.
    pub fn create(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, StoreError> {
        debug_assert!(!password_hash.is_empty());

        match self.by_email.entry(email.to_string()) {
            Entry::Occupied(_) => Err(StoreError::DuplicateEmail),
            Entry::Vacant(slot) => {
                let user = User {
                    id: UserId::new(),
                    name: name.to_string(),
                    email: email.to_string(),
                    password_hash: password_hash.to_string(),
                };
                // Publish the record before the email index can resolve
                // to it; a concurrent find_by_email must never see an id
                // that find_by_id cannot return.
                self.by_id.insert(user.id, user.clone());
                slot.insert(user.id);
                Ok(user)
            }
        }
    }

    pub fn find_by_email(&self, email: &str) -> Option<User> {
        let id = *self.by_email.get(email)?;
        self.find_by_id(id)
    }

    pub fn find_by_id(&self, id: UserId) -> Option<User> {
        self.by_id.get(&id).map(|u| u.clone())
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_find() {
        let store = UserStore::new();
        let user = store.create("Kamil", "kamil@mail.ru", "$argon2id$...").unwrap();

        let by_email = store.find_by_email("kamil@mail.ru").unwrap();
        assert_eq!(by_email.id, user.id);

        let by_id = store.find_by_id(user.id).unwrap();
        assert_eq!(by_id.email, "kamil@mail.ru");
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let store = UserStore::new();
        store.create("A", "same@mail.ru", "h1").unwrap();
        let err = store.create("B", "same@mail.ru", "h2").unwrap_err();
        assert_eq!(err, StoreError::DuplicateEmail);
    }

    #[test]
    fn test_email_match_is_case_sensitive() {
        let store = UserStore::new();
        store.create("A", "kamil@mail.ru", "h").unwrap();
        assert!(store.find_by_email("Kamil@mail.ru").is_none());
        // Different casing is a different email in this design
        assert!(store.create("B", "KAMIL@mail.ru", "h").is_ok());
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let store = UserStore::new();
        let user = store.create("A", "a@mail.ru", "secret-hash").unwrap();
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret-hash"));
        assert!(!json.contains("password"));
    }

    #[test]
    fn test_find_missing_returns_none() {
        let store = UserStore::new();
        assert!(store.find_by_email("nobody@mail.ru").is_none());
        assert!(store.find_by_id(UserId::new()).is_none());
    }

    #[test]
    fn test_duplicate_report_implies_record_is_resolvable() {
        // Once any thread observes the email as taken, the winning
        // record must already be resolvable end to end; no window where
        // the index knows the email but the user is missing.
        use std::sync::Arc;
        use std::thread;

        for _ in 0..200 {
            let store = Arc::new(UserStore::new());
            let racer = store.clone();
            let handle = thread::spawn(move || {
                let _ = racer.create("A", "race@mail.ru", "h1");
            });

            loop {
                match store.create("B", "race@mail.ru", "h2") {
                    Err(StoreError::DuplicateEmail) => {
                        let user = store.find_by_email("race@mail.ru");
                        assert!(user.is_some(), "email taken but record unresolvable");
                        break;
                    }
                    // This thread won the race instead; nothing to check.
                    Ok(_) => break,
                }
            }

            handle.join().unwrap();
        }
    }
}
