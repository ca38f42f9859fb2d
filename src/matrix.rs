//! Role × permission membership tables for a single service.

use crate::{
    permission::{Permission, PermissionSet},
    role::Role,
};
use std::collections::HashSet;

/// A column of the matrix: one role selected for the service.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "persistence",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct MatrixColumn {
    /// Fully qualified role name.
    pub role_name: String,
    /// Role name with the service prefix stripped.
    pub label: String,
    /// Number of permissions the role includes.
    pub permission_count: usize,
}

/// A row of the matrix: one permission and its membership per column.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "persistence", derive(serde::Serialize, serde::Deserialize))]
pub struct MatrixRow {
    pub permission: Permission,
    pub cells: Vec<bool>,
}

/// Permissions of a service's roles, cross-referenced against those roles.
///
/// Columns are ordered by descending permission count (ties keep dataset
/// order). Rows are the sorted union of the columns' permissions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "persistence", derive(serde::Serialize, serde::Deserialize))]
pub struct PermissionMatrix {
    pub service: String,
    pub columns: Vec<MatrixColumn>,
    pub rows: Vec<MatrixRow>,
}

impl PermissionMatrix {
    /// Build the matrix for `service` over `roles`.
    pub fn build(roles: &[Role], service: &str) -> Self {
        let mut selected = select_roles(roles, service);
        // Stable, so equal counts keep their relative order.
        selected.sort_by(|a, b| b.permission_count().cmp(&a.permission_count()));

        let related = PermissionSet::union(selected.iter().map(|role| role.permissions()));

        let memberships: Vec<HashSet<&str>> = selected
            .iter()
            .map(|role| role.permissions().iter().map(Permission::as_str).collect())
            .collect();

        let rows = related
            .into_iter()
            .map(|permission| {
                let cells = memberships
                    .iter()
                    .map(|members| members.contains(permission.as_str()))
                    .collect();
                MatrixRow { permission, cells }
            })
            .collect();

        let columns = selected
            .iter()
            .map(|role| MatrixColumn {
                role_name: role.name().to_string(),
                label: role.local_name().to_string(),
                permission_count: role.permission_count(),
            })
            .collect();

        Self {
            service: service.to_string(),
            columns,
            rows,
        }
    }

    /// A matrix with no selected roles has neither rows nor columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// The permissions in row order.
    pub fn permissions(&self) -> impl Iterator<Item = &Permission> {
        self.rows.iter().map(|row| &row.permission)
    }

    /// Index of the column for a fully qualified role name.
    pub fn column_index(&self, role_name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|column| column.role_name == role_name)
    }

    /// Whether `role_name` includes `permission`, if both are in the matrix.
    pub fn cell(&self, permission: &str, role_name: &str) -> Option<bool> {
        let column = self.column_index(role_name)?;
        self.rows
            .iter()
            .find(|row| row.permission.as_str() == permission)
            .map(|row| row.cells[column])
    }
}

/// Roles listed under `service`, in dataset order.
pub fn select_roles<'a>(roles: &'a [Role], service: &str) -> Vec<&'a Role> {
    roles.iter().filter(|role| role.belongs_to(service)).collect()
}
