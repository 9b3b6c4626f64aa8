use serde::Serialize;
use thiserror::Error;

use crate::{Permission, User, UserRole};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: role {role} lacks permission '{permission}'")]
    Forbidden { role: UserRole, permission: Permission },
}

/// Pure policy check: is `role` in the allow-set for `permission`?
pub fn is_allowed(role: UserRole, permission: Permission) -> bool {
    permission.allowed_roles().contains(&role)
}

/// Policy check keyed by permission name.
///
/// Names that are not in the table fail closed.
pub fn is_allowed_by_name(role: UserRole, permission: &str) -> bool {
    match permission.parse::<Permission>() {
        Ok(perm) => is_allowed(role, perm),
        Err(err) => {
            tracing::warn!(%role, %err, "permission check against unknown action denied");
            false
        }
    }
}

/// Authorize an actor for an action.
///
/// - No IO
/// - No panics
/// - No business logic (pure policy check)
pub fn authorize(actor: &User, permission: Permission) -> Result<(), AuthzError> {
    if is_allowed(actor.role, permission) {
        Ok(())
    } else {
        Err(AuthzError::Forbidden {
            role: actor.role,
            permission,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Authorization Explanation
// ─────────────────────────────────────────────────────────────────────────────

/// Explanation of an authorization decision, for permission-denied messaging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationExplanation {
    pub permission: Permission,
    pub role: UserRole,
    pub granted: bool,
    /// Human-readable reason for the decision.
    pub reason: String,
    /// Roles that hold the permission (useful when denied).
    pub granting_roles: Vec<UserRole>,
}

/// Explain why `role` is (or is not) allowed to perform `permission`.
pub fn explain_authorization(role: UserRole, permission: Permission) -> AuthorizationExplanation {
    let granting_roles = permission.allowed_roles().to_vec();
    let granted = granting_roles.contains(&role);

    let reason = if granted {
        format!("Role {role} is allowed to perform {permission}")
    } else {
        let names: Vec<&str> = granting_roles.iter().map(UserRole::as_str).collect();
        format!(
            "Role {role} may not perform {permission}; it requires one of: {}",
            names.join(", ")
        )
    };

    AuthorizationExplanation {
        permission,
        role,
        granted,
        reason,
        granting_roles,
    }
}
