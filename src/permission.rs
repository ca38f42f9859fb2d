//! Permission identifiers and ordered permission sets.

use crate::error::{Error, Result};
use std::borrow::Borrow;
use std::collections::{BTreeSet, HashSet};

/// A permission identifies a single authorizable action, such as
/// `storage.buckets.get`.
///
/// Permissions compare and sort by their identifier string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "persistence",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Permission(String);

impl Permission {
    /// Create a new permission from its identifier.
    ///
    /// # Panics
    ///
    /// Panics if the identifier is empty, whitespace only, or contains a null
    /// character. Use [`Permission::parse`] for untrusted input.
    pub fn new(identifier: impl Into<String>) -> Self {
        let identifier = identifier.into();

        if identifier.trim().is_empty() {
            panic!("Permission identifier cannot be empty");
        }

        if identifier.contains('\0') {
            panic!("Permission identifier cannot contain null characters");
        }

        Self(identifier)
    }

    /// Parse a permission identifier, rejecting empty or malformed input.
    pub fn parse(identifier: &str) -> Result<Self> {
        if identifier.trim().is_empty() {
            return Err(Error::InvalidPermission(
                "Permission identifier cannot be empty".to_string(),
            ));
        }

        if identifier.contains('\0') {
            return Err(Error::InvalidPermission(format!(
                "Permission identifier cannot contain null characters: '{}'",
                identifier.escape_debug()
            )));
        }

        Ok(Self(identifier.to_string()))
    }

    /// Get the permission identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The service segment of the identifier (`storage` in
    /// `storage.buckets.get`), or the whole identifier when it has no dots.
    pub fn service(&self) -> &str {
        self.0.split('.').next().unwrap_or(&self.0)
    }

    /// The verb segment of the identifier (`get` in `storage.buckets.get`).
    pub fn verb(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Permission {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Permission {
    type Error = Error;

    fn try_from(identifier: String) -> Result<Self> {
        Self::parse(&identifier)?;
        Ok(Self(identifier))
    }
}

impl From<Permission> for String {
    fn from(permission: Permission) -> Self {
        permission.0
    }
}

impl Borrow<str> for Permission {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Permission {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The permissions included in a role, in dataset order.
///
/// Uniqueness is expected but not enforced; [`PermissionSet::deduplicated`]
/// gives the first-occurrence view used when diffing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "persistence",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct PermissionSet {
    permissions: Vec<Permission>,
}

impl PermissionSet {
    /// Create a new empty permission set.
    pub fn new() -> Self {
        Self {
            permissions: Vec::new(),
        }
    }

    /// Build the sorted, deduplicated union of several permission sets.
    pub fn union<'a>(sets: impl IntoIterator<Item = &'a PermissionSet>) -> Self {
        let merged: BTreeSet<&Permission> = sets.into_iter().flat_map(|set| set.iter()).collect();
        Self {
            permissions: merged.into_iter().cloned().collect(),
        }
    }

    /// Add a permission to the end of the set.
    pub fn add(&mut self, permission: Permission) {
        self.permissions.push(permission);
    }

    /// Check if the set contains a specific permission.
    pub fn contains(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p.as_str() == permission)
    }

    /// Get all permissions in dataset order.
    pub fn permissions(&self) -> &[Permission] {
        &self.permissions
    }

    /// Iterate over permissions in dataset order.
    pub fn iter(&self) -> std::slice::Iter<'_, Permission> {
        self.permissions.iter()
    }

    /// Get the number of permissions, duplicates included.
    pub fn len(&self) -> usize {
        self.permissions.len()
    }

    /// Check if the permission set is empty.
    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }

    /// Permissions with later duplicates dropped, first-occurrence order kept.
    pub fn deduplicated(&self) -> Vec<&Permission> {
        let mut seen = HashSet::with_capacity(self.permissions.len());
        self.permissions
            .iter()
            .filter(|permission| seen.insert(permission.as_str()))
            .collect()
    }

    /// Whether any identifier appears more than once.
    pub fn has_duplicates(&self) -> bool {
        self.deduplicated().len() != self.permissions.len()
    }

    /// Merge another permission set into this one, skipping permissions
    /// already present.
    pub fn merge(&mut self, other: PermissionSet) {
        for permission in other.permissions {
            if !self.contains(permission.as_str()) {
                self.add(permission);
            }
        }
    }
}

impl From<Vec<Permission>> for PermissionSet {
    fn from(permissions: Vec<Permission>) -> Self {
        Self { permissions }
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        Self {
            permissions: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for PermissionSet {
    type Item = Permission;
    type IntoIter = std::vec::IntoIter<Permission>;

    fn into_iter(self) -> Self::IntoIter {
        self.permissions.into_iter()
    }
}

impl<'a> IntoIterator for &'a PermissionSet {
    type Item = &'a Permission;
    type IntoIter = std::slice::Iter<'a, Permission>;

    fn into_iter(self) -> Self::IntoIter {
        self.permissions.iter()
    }
}
