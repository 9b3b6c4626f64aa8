//! `assetpro-auth`: role-based permission gate and the user directory.
//!
//! This crate is intentionally decoupled from any UI and storage.

pub mod authorize;
pub mod permissions;
pub mod roles;
pub mod user;

pub use authorize::{
    AuthorizationExplanation, AuthzError, authorize, explain_authorization, is_allowed,
    is_allowed_by_name,
};
pub use permissions::{PERMISSION_TABLE, Permission, UnknownPermission};
pub use roles::{UnknownRole, UserRole};
pub use user::{DirectoryError, User, UserDirectory};
