// SPDX-License-Identifier: MIT

//! Persistence failure semantics: saves are best-effort, in-memory state is
//! the source of truth, and a failed save must reach the caller.

use courtdesk::directory::{DirectoryError, UserDirectory};
use courtdesk::models::user::User;
use courtdesk::roles::{CoachProfile, Role, RoleAssignment};
use courtdesk::store::{PersistedStore, StoreError};
use std::sync::Arc;

/// Store whose saves always fail, as if the disk were gone.
struct FailingStore;

impl PersistedStore for FailingStore {
    fn load(&self, _key: &str) -> Result<Option<serde_json::Value>, StoreError> {
        Ok(None)
    }

    fn save(&self, _key: &str, _value: &serde_json::Value) -> Result<(), StoreError> {
        Err(StoreError::Io("disk unavailable".to_string()))
    }
}

#[test]
fn test_failed_save_surfaces_but_keeps_the_mutation() {
    let directory = UserDirectory::load(Arc::new(FailingStore)).unwrap();

    let err = directory
        .create(User::new("AB123"), RoleAssignment::User)
        .unwrap_err();
    assert!(matches!(err, DirectoryError::Persistence(_)));

    // The create still happened in memory.
    let user = directory.get("AB123").unwrap();
    assert_eq!(user.roles, vec![Role::User]);
}

#[test]
fn test_failed_save_during_role_churn_keeps_state() {
    let directory = UserDirectory::load(Arc::new(FailingStore)).unwrap();
    let _ = directory.create(User::new("AB123"), RoleAssignment::User);

    let err = directory
        .assign_role(
            "AB123",
            RoleAssignment::Coach(CoachProfile {
                year_of_experience: Some(5),
                ..Default::default()
            }),
        )
        .unwrap_err();
    assert!(matches!(err, DirectoryError::Persistence(_)));

    let user = directory.get("AB123").unwrap();
    assert!(user.has_role(Role::Coach));
    assert_eq!(user.year_of_experience, Some(5));

    let err = directory.remove_role("AB123", Role::Coach).unwrap_err();
    assert!(matches!(err, DirectoryError::Persistence(_)));

    let user = directory.get("AB123").unwrap();
    assert!(!user.has_role(Role::Coach));
    assert_eq!(user.year_of_experience, None);
}

#[test]
fn test_protected_role_is_checked_before_any_write() {
    let directory = UserDirectory::load(Arc::new(FailingStore)).unwrap();
    let _ = directory.create(User::new("AB123"), RoleAssignment::User);

    // ProtectedRole beats Persistence: no save is even attempted.
    let err = directory.remove_role("AB123", Role::User).unwrap_err();
    assert!(matches!(err, DirectoryError::ProtectedRole));
}
