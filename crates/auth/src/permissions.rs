use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::UserRole;

/// Action a user may be permitted to perform.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    EditProduct,
    DeleteProduct,
    EditPrice,
    UploadAssets,
    ViewAuditLogs,
    ManageUsers,
}

/// Static role allow-sets, one row per permission.
pub const PERMISSION_TABLE: &[(Permission, &[UserRole])] = &[
    (Permission::EditProduct, &[UserRole::Admin, UserRole::Manager]),
    (Permission::DeleteProduct, &[UserRole::Admin]),
    (Permission::EditPrice, &[UserRole::Admin, UserRole::Manager]),
    (Permission::UploadAssets, &[UserRole::Admin, UserRole::Manager]),
    (Permission::ViewAuditLogs, &[UserRole::Admin]),
    (Permission::ManageUsers, &[UserRole::Admin]),
];

impl Permission {
    pub const ALL: [Permission; 6] = [
        Permission::EditProduct,
        Permission::DeleteProduct,
        Permission::EditPrice,
        Permission::UploadAssets,
        Permission::ViewAuditLogs,
        Permission::ManageUsers,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::EditProduct => "EDIT_PRODUCT",
            Permission::DeleteProduct => "DELETE_PRODUCT",
            Permission::EditPrice => "EDIT_PRICE",
            Permission::UploadAssets => "UPLOAD_ASSETS",
            Permission::ViewAuditLogs => "VIEW_AUDIT_LOGS",
            Permission::ManageUsers => "MANAGE_USERS",
        }
    }

    /// Roles allowed to perform this action. Empty if the table has no row.
    pub fn allowed_roles(&self) -> &'static [UserRole] {
        PERMISSION_TABLE
            .iter()
            .find(|(perm, _)| perm == self)
            .map(|(_, roles)| *roles)
            .unwrap_or(&[])
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown permission '{0}'")]
pub struct UnknownPermission(pub String);

impl FromStr for Permission {
    type Err = UnknownPermission;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::ALL
            .into_iter()
            .find(|perm| perm.as_str() == s)
            .ok_or_else(|| UnknownPermission(s.to_string()))
    }
}
