//! Set difference and intersection between two roles' permissions.

use crate::{permission::Permission, role::Role};
use std::collections::HashSet;

/// The permissions unique to each side of a comparison, and those shared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "persistence",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct RoleDiff {
    /// Permissions only the left role includes, in left order.
    pub left_only: Vec<Permission>,
    /// Permissions only the right role includes, in right order.
    pub right_only: Vec<Permission>,
    /// Permissions both roles include, in right order.
    pub common: Vec<Permission>,
}

impl RoleDiff {
    /// Compare two roles.
    ///
    /// Permission lists are treated as sets: a repeated identifier only
    /// counts at its first occurrence.
    pub fn between(left: &Role, right: &Role) -> Self {
        let left_permissions = left.permissions().deduplicated();
        let right_permissions = right.permissions().deduplicated();

        let right_ids: HashSet<&str> = right_permissions.iter().map(|p| p.as_str()).collect();
        let left_ids: HashSet<&str> = left_permissions.iter().map(|p| p.as_str()).collect();

        let left_only = left_permissions
            .iter()
            .filter(|permission| !right_ids.contains(permission.as_str()))
            .map(|permission| (*permission).clone())
            .collect();

        let (common, right_only): (Vec<&Permission>, Vec<&Permission>) = right_permissions
            .into_iter()
            .partition(|permission| left_ids.contains(permission.as_str()));

        Self {
            left_only,
            right_only: right_only.into_iter().cloned().collect(),
            common: common.into_iter().cloned().collect(),
        }
    }

    /// Whether both roles include exactly the same permissions.
    pub fn is_identical(&self) -> bool {
        self.left_only.is_empty() && self.right_only.is_empty()
    }

    /// Number of distinct permissions across both roles.
    pub fn total(&self) -> usize {
        self.left_only.len() + self.right_only.len() + self.common.len()
    }

    /// The same comparison seen from the other side.
    ///
    /// Left and right swap; `common` keeps its elements but not necessarily
    /// the order [`RoleDiff::between`] would produce for swapped roles.
    pub fn swap(self) -> Self {
        Self {
            left_only: self.right_only,
            right_only: self.left_only,
            common: self.common,
        }
    }
}

/// Compare two optionally selected roles.
///
/// Returns `None` until both sides are selected.
pub fn diff_roles(left: Option<&Role>, right: Option<&Role>) -> Option<RoleDiff> {
    match (left, right) {
        (Some(left), Some(right)) => Some(RoleDiff::between(left, right)),
        _ => None,
    }
}
