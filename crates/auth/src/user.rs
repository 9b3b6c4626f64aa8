//! Console users and the directory that manages them.
//!
//! Exactly one user is "current" at a time; that user is passed explicitly as
//! the `actor` of every mutating call rather than read from ambient state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use assetpro_core::{DomainError, Entity, IdGenerator, UserId, find_entity};

use crate::{AuthzError, Permission, UserRole, authorize};

// ─────────────────────────────────────────────────────────────────────────────
// User
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl User {
    pub fn new(id: UserId, name: impl Into<String>, role: UserRole) -> Self {
        Self {
            id,
            name: name.into(),
            role,
            email: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> &UserId {
        &self.id
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Directory
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error(transparent)]
    Forbidden(#[from] AuthzError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// The set of console users.
///
/// Like the product catalog, operations never mutate in place: each returns a
/// new directory that the caller swaps in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserDirectory {
    users: Vec<User>,
}

impl UserDirectory {
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn get(&self, id: UserId) -> Option<&User> {
        find_entity(&self.users, &id).map(|(_, user)| user)
    }

    /// Register a new user. Requires `MANAGE_USERS`.
    pub fn add<G: IdGenerator>(
        &self,
        ids: &G,
        actor: &User,
        name: &str,
        role: UserRole,
        email: Option<&str>,
    ) -> Result<(UserDirectory, User), DirectoryError> {
        authorize(actor, Permission::ManageUsers)?;

        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("user name cannot be empty").into());
        }

        let email = match email.map(str::trim).filter(|e| !e.is_empty()) {
            Some(e) if !e.contains('@') => {
                return Err(DomainError::validation("invalid email format").into());
            }
            Some(e) => Some(e.to_lowercase()),
            None => None,
        };

        let user = User {
            id: ids.next_id(),
            name: name.to_string(),
            role,
            email,
        };

        let mut users = self.users.clone();
        users.push(user.clone());

        tracing::info!(user_id = %user.id, role = %user.role, actor = %actor.name, "user added");
        Ok((UserDirectory { users }, user))
    }

    /// Remove a user. Requires `MANAGE_USERS`; an actor cannot remove themselves.
    pub fn remove(&self, actor: &User, id: UserId) -> Result<UserDirectory, DirectoryError> {
        authorize(actor, Permission::ManageUsers)?;

        if actor.id == id {
            return Err(DomainError::conflict("users cannot remove themselves").into());
        }

        let (idx, _) = find_entity(&self.users, &id).ok_or_else(DomainError::not_found)?;
        let mut users = self.users.clone();
        users.remove(idx);

        tracing::info!(user_id = %id, actor = %actor.name, "user removed");
        Ok(UserDirectory { users })
    }
}
