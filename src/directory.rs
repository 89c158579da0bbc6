// SPDX-License-Identifier: MIT

//! Role-aware user directory.
//!
//! Owns the collection of user records and the role-assignment state
//! machine. Every user holds at least the `User` role; assigning a role
//! attaches its typed field group, removing one strips exactly the fields
//! the role policy table says it owns, and the derived primary role is
//! re-elected whenever the current primary is removed.
//!
//! Mutations apply in memory first and are then written through the
//! injected [`PersistedStore`]. A failed save surfaces as
//! [`DirectoryError::Persistence`] without rolling the mutation back:
//! in-memory state is the source of truth for the running process.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::models::user::{User, UserUpdate};
use crate::roles::{self, Role, RoleAssignment};
use crate::store::{keys, PersistedStore, StoreError};

/// Errors from directory operations.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("user not found: {0}")]
    NotFound(String),

    #[error("user id already in use: {0}")]
    DuplicateId(String),

    #[error("the User role cannot be removed")]
    ProtectedRole,

    #[error("failed to persist user directory: {0}")]
    Persistence(#[from] StoreError),
}

/// The role-aware user directory. One coarse lock serializes all mutating
/// operations; data volumes are small (an admin dashboard's user table).
pub struct UserDirectory {
    store: Arc<dyn PersistedStore>,
    users: RwLock<Vec<User>>,
}

impl UserDirectory {
    /// Load the directory from the store, migrating legacy records
    /// (missing `roles`) on the way in.
    pub fn load(store: Arc<dyn PersistedStore>) -> Result<Self, DirectoryError> {
        let users = match store.load(keys::USERS)? {
            Some(value) => {
                let mut users: Vec<User> = serde_json::from_value(value)
                    .map_err(|e| StoreError::Decode(e.to_string()))?;
                for user in &mut users {
                    user.normalize_roles();
                }
                users
            }
            None => Vec::new(),
        };

        tracing::info!(count = users.len(), "User directory loaded");
        Ok(Self {
            store,
            users: RwLock::new(users),
        })
    }

    // A poisoned lock only means another thread panicked mid-operation;
    // the data itself is still a valid Vec, so recover the guard.
    fn read_guard(&self) -> RwLockReadGuard<'_, Vec<User>> {
        self.users.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, Vec<User>> {
        self.users.write().unwrap_or_else(|e| e.into_inner())
    }

    fn persist(&self, users: &[User]) -> Result<(), DirectoryError> {
        let value =
            serde_json::to_value(users).map_err(|e| StoreError::Encode(e.to_string()))?;
        self.store.save(keys::USERS, &value)?;
        Ok(())
    }

    // ─── Lookup ──────────────────────────────────────────────────

    pub fn get(&self, id: &str) -> Result<User, DirectoryError> {
        self.read_guard()
            .iter()
            .find(|user| user.id == id)
            .cloned()
            .ok_or_else(|| DirectoryError::NotFound(id.to_string()))
    }

    /// All users, in insertion order.
    pub fn list(&self) -> Vec<User> {
        self.read_guard().clone()
    }

    /// Users holding `role`. Falls back to an exact match on the legacy
    /// primary `role` field for records that predate the role set.
    pub fn list_by_role(&self, role: Role) -> Vec<User> {
        self.read_guard()
            .iter()
            .filter(|user| user.has_role(role) || user.role == role)
            .cloned()
            .collect()
    }

    // ─── Creation / update / deletion ────────────────────────────

    /// Add a new user with an explicit initial role (default `User`).
    ///
    /// The caller supplies the id; a collision is a [`DirectoryError::DuplicateId`].
    /// The resulting role set is `[User]` when the initial role is `User`,
    /// otherwise `[User, role]`, and the primary role is the initial role.
    pub fn create(
        &self,
        mut user: User,
        initial_role: RoleAssignment,
    ) -> Result<User, DirectoryError> {
        let role = initial_role.role();
        let mut guard = self.write_guard();

        if guard.iter().any(|existing| existing.id == user.id) {
            return Err(DirectoryError::DuplicateId(user.id));
        }

        user.role = role;
        user.roles = if role == Role::User {
            vec![Role::User]
        } else {
            vec![Role::User, role]
        };
        initial_role.apply(&mut user);

        tracing::info!(id = %user.id, role = %role, "User created");
        guard.push(user.clone());
        self.persist(&guard)?;
        Ok(user)
    }

    /// Merge a partial update of common profile fields into the record.
    /// Role membership never changes here; use [`Self::assign_role`] and
    /// [`Self::remove_role`] for that.
    pub fn update(&self, id: &str, update: &UserUpdate) -> Result<User, DirectoryError> {
        let mut guard = self.write_guard();
        let user = guard
            .iter_mut()
            .find(|user| user.id == id)
            .ok_or_else(|| DirectoryError::NotFound(id.to_string()))?;

        update.apply(user);
        let updated = user.clone();
        self.persist(&guard)?;
        Ok(updated)
    }

    /// Remove the user outright. No cascading cleanup of references held by
    /// other entities; the directory does not own referential integrity.
    pub fn delete(&self, id: &str) -> Result<(), DirectoryError> {
        let mut guard = self.write_guard();
        let position = guard
            .iter()
            .position(|user| user.id == id)
            .ok_or_else(|| DirectoryError::NotFound(id.to_string()))?;

        guard.remove(position);
        tracing::info!(id, "User deleted");
        self.persist(&guard)
    }

    // ─── Role state machine ──────────────────────────────────────

    /// Grant a role and merge its typed data onto the record.
    ///
    /// Idempotent on membership. Promotes the primary role when the user is
    /// still plain `User` and the granted role is not; never demotes it.
    pub fn assign_role(
        &self,
        id: &str,
        assignment: RoleAssignment,
    ) -> Result<User, DirectoryError> {
        let mut guard = self.write_guard();
        let user = guard
            .iter_mut()
            .find(|user| user.id == id)
            .ok_or_else(|| DirectoryError::NotFound(id.to_string()))?;

        let role = assignment.role();
        if !user.roles.contains(&role) {
            user.roles.push(role);
        }
        if user.role == Role::User && role != Role::User {
            user.role = role;
        }
        assignment.apply(user);

        tracing::info!(id, role = %role, primary = %user.role, "Role assigned");
        let updated = user.clone();
        self.persist(&guard)?;
        Ok(updated)
    }

    /// Revoke a role, strip every field it owns, and re-elect the primary
    /// role if the removed one held it (first remaining non-`User` role,
    /// else `User`).
    ///
    /// Removing `User` itself is always rejected. Removing a role the user
    /// does not hold is a no-op.
    pub fn remove_role(&self, id: &str, role: Role) -> Result<User, DirectoryError> {
        if role == Role::User {
            return Err(DirectoryError::ProtectedRole);
        }

        let mut guard = self.write_guard();
        let user = guard
            .iter_mut()
            .find(|user| user.id == id)
            .ok_or_else(|| DirectoryError::NotFound(id.to_string()))?;

        let Some(position) = user.roles.iter().position(|held| *held == role) else {
            return Ok(user.clone());
        };
        user.roles.remove(position);

        for field in roles::owned_fields(role) {
            user.clear_field(field);
        }

        if user.role == role {
            user.role = user
                .roles
                .iter()
                .copied()
                .find(|remaining| *remaining != Role::User)
                .unwrap_or(Role::User);
        }

        tracing::info!(id, role = %role, primary = %user.role, "Role removed");
        let updated = user.clone();
        self.persist(&guard)?;
        Ok(updated)
    }

    // ─── Rename ──────────────────────────────────────────────────

    /// Change a user's id. The new id must be free.
    ///
    /// References to the old id held by other entities (clubs, tournaments,
    /// coach rosters) are NOT updated here; propagating the rename is the
    /// caller's responsibility.
    pub fn rename_id(&self, old_id: &str, new_id: &str) -> Result<User, DirectoryError> {
        let mut guard = self.write_guard();

        if guard.iter().any(|user| user.id == new_id) {
            return Err(DirectoryError::DuplicateId(new_id.to_string()));
        }

        let user = guard
            .iter_mut()
            .find(|user| user.id == old_id)
            .ok_or_else(|| DirectoryError::NotFound(old_id.to_string()))?;

        user.id = new_id.to_string();
        tracing::info!(old_id, new_id, "User id renamed");
        let updated = user.clone();
        self.persist(&guard)?;
        Ok(updated)
    }
}
