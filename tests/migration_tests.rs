// SPDX-License-Identifier: MIT

//! Legacy data migration and store round-trip tests.

use courtdesk::directory::UserDirectory;
use courtdesk::models::user::User;
use courtdesk::roles::{CoachProfile, Role, RoleAssignment};
use courtdesk::store::{keys, MemoryStore};
use std::sync::Arc;

#[test]
fn test_legacy_records_get_role_sets_on_load() {
    let store = Arc::new(MemoryStore::new());
    // Pre-migration documents: `roles` absent, the single `role` field only.
    store.put(
        keys::USERS,
        serde_json::json!([
            {
                "id": "LEG01",
                "email": "coach@example.com",
                "role": "Coach",
                "firstName": "Old",
                "lastName": "Coach",
                "yearOfExperience": 10
            },
            {
                "id": "LEG02",
                "email": "plain@example.com",
                "role": "User"
            }
        ]),
    );

    let directory = UserDirectory::load(store).unwrap();

    let coach = directory.get("LEG01").unwrap();
    assert_eq!(coach.roles, vec![Role::User, Role::Coach]);
    assert_eq!(coach.role, Role::Coach);
    assert_eq!(coach.year_of_experience, Some(10));

    let plain = directory.get("LEG02").unwrap();
    assert_eq!(plain.roles, vec![Role::User]);
}

#[test]
fn test_legacy_primary_counts_for_role_listing() {
    let store = Arc::new(MemoryStore::new());
    store.put(
        keys::USERS,
        serde_json::json!([
            {"id": "LEG01", "email": "a@example.com", "role": "Referee"}
        ]),
    );

    let directory = UserDirectory::load(store).unwrap();
    let referees = directory.list_by_role(Role::Referee);
    assert_eq!(referees.len(), 1);
    assert_eq!(referees[0].id, "LEG01");
}

#[test]
fn test_unknown_stored_fields_do_not_break_loading() {
    let store = Arc::new(MemoryStore::new());
    // Records written by older dashboard builds may carry extra keys.
    store.put(
        keys::USERS,
        serde_json::json!([
            {"id": "LEG01", "email": "a@example.com", "role": "User", "theme": "dark"}
        ]),
    );

    let directory = UserDirectory::load(store).unwrap();
    assert!(directory.get("LEG01").is_ok());
}

#[test]
fn test_store_round_trip_reproduces_the_directory() {
    let store = Arc::new(MemoryStore::new());
    let directory = UserDirectory::load(store.clone()).unwrap();

    directory
        .create(
            User::new("AB123"),
            RoleAssignment::Coach(CoachProfile {
                year_of_experience: Some(5),
                ..Default::default()
            }),
        )
        .unwrap();
    directory
        .create(User::new("CD456"), RoleAssignment::User)
        .unwrap();
    directory
        .assign_role("CD456", RoleAssignment::SuperAdmin)
        .unwrap();

    // A second directory over the same store sees an equivalent user set.
    let reloaded = UserDirectory::load(store).unwrap();
    let original = directory.list();
    let restored = reloaded.list();

    assert_eq!(original.len(), restored.len());
    for (before, after) in original.iter().zip(&restored) {
        assert_eq!(before.id, after.id);
        assert_eq!(before.roles, after.roles);
        assert_eq!(before.role, after.role);
        assert_eq!(before.year_of_experience, after.year_of_experience);
    }
}

#[test]
fn test_persisted_document_has_legacy_shape() {
    let store = Arc::new(MemoryStore::new());
    let directory = UserDirectory::load(store.clone()).unwrap();
    directory
        .create(
            User::new("AB123"),
            RoleAssignment::Coach(CoachProfile {
                year_of_experience: Some(5),
                ..Default::default()
            }),
        )
        .unwrap();

    let document = store.get(keys::USERS).expect("users document saved");
    let record = &document.as_array().unwrap()[0];

    assert_eq!(record["id"], "AB123");
    assert_eq!(record["role"], "Coach");
    assert_eq!(record["roles"], serde_json::json!(["User", "Coach"]));
    assert_eq!(record["yearOfExperience"], 5);
    // Fields the user does not carry stay absent in storage.
    assert!(record.get("certification").is_none());
}
