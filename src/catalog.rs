//! The role catalog: an immutable, indexed role dataset and the views over it.
//!
//! A [`RoleCatalog`] owns the roles loaded from a dataset and answers the
//! three questions the explorer asks of them:
//!
//! - which services exist and which roles they hold ([`RoleCatalog::services`]),
//! - how a service's roles overlap ([`RoleCatalog::permission_matrix`]),
//! - how two roles differ ([`RoleCatalog::compare`]).
//!
//! The synthetic `ALL PERMISSIONS` role is built once, when the catalog is
//! created, and is offered first among the selectable roles. Building a new
//! catalog from a different role list rebuilds it.
//!
//! Every view is recomputed on request from the immutable role list; the
//! catalog holds no caches and performs no interior mutation.

#[cfg(feature = "audit")]
use log::{debug, info, warn};

use crate::{
    config::ExplorerConfig,
    diff::{RoleDiff, diff_roles},
    error::{Error, Result},
    matrix::PermissionMatrix,
    role::Role,
    service::{ServiceSummary, aggregate_services},
};
use std::collections::{HashMap, HashSet};

/// An immutable set of roles indexed by name.
#[derive(Debug, Clone)]
pub struct RoleCatalog {
    roles: Vec<Role>,
    index: HashMap<String, usize>,
    all_permissions: Role,
    config: ExplorerConfig,
}

impl Default for RoleCatalog {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl RoleCatalog {
    /// Create a catalog with the default configuration.
    ///
    /// When a name occurs more than once, lookups resolve to its first
    /// occurrence; every occurrence still takes part in the views.
    pub fn new(roles: Vec<Role>) -> Self {
        Self::with_config(roles, ExplorerConfig::default())
    }

    /// Create a catalog with a custom configuration.
    pub fn with_config(roles: Vec<Role>, config: ExplorerConfig) -> Self {
        let mut index = HashMap::with_capacity(roles.len());
        for (position, role) in roles.iter().enumerate() {
            if index.contains_key(role.name()) {
                #[cfg(feature = "audit")]
                warn!("Duplicate role name '{}' at position {}", role.name(), position);
                continue;
            }
            index.insert(role.name().to_string(), position);
        }

        let all_permissions = Role::all_permissions(&roles);

        #[cfg(feature = "audit")]
        info!(
            "Built role catalog with {} roles and {} distinct permissions",
            roles.len(),
            all_permissions.permission_count()
        );

        Self {
            roles,
            index,
            all_permissions,
            config,
        }
    }

    /// Create a catalog, rejecting datasets that repeat a role name.
    pub fn try_new(roles: Vec<Role>, config: ExplorerConfig) -> Result<Self> {
        config.validate()?;

        let catalog = Self::with_config(roles, config);
        if catalog.index.len() != catalog.roles.len() {
            let mut seen = HashSet::new();
            if let Some(duplicate) = catalog.roles.iter().find(|role| !seen.insert(role.name())) {
                return Err(Error::DuplicateRole(duplicate.name().to_string()));
            }
        }

        Ok(catalog)
    }

    /// Get the catalog configuration.
    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    /// All real roles in dataset order.
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// Number of real roles.
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Check if the catalog holds no roles.
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Look up a real role by name.
    pub fn get(&self, name: &str) -> Option<&Role> {
        self.index.get(name).map(|&position| &self.roles[position])
    }

    /// Look up a selectable role by name, failing when it is missing.
    pub fn require(&self, name: &str) -> Result<&Role> {
        self.find_selectable(name)
            .ok_or_else(|| Error::RoleNotFound(name.to_string()))
    }

    /// The synthetic role holding every permission in the catalog.
    pub fn all_permissions(&self) -> &Role {
        &self.all_permissions
    }

    /// Roles offered for comparison: the synthetic role, then every real role.
    pub fn selectable_roles(&self) -> impl Iterator<Item = &Role> {
        std::iter::once(&self.all_permissions).chain(self.roles.iter())
    }

    /// Look up a selectable role by name, the synthetic role included.
    pub fn find_selectable(&self, name: &str) -> Option<&Role> {
        if name == self.all_permissions.name() {
            return Some(&self.all_permissions);
        }
        self.get(name)
    }

    /// The roles a new comparison starts with, when the dataset has them.
    pub fn default_pair(&self) -> (Option<&Role>, Option<&Role>) {
        (
            self.get(&self.config.default_left_role),
            self.get(&self.config.default_right_role),
        )
    }

    /// Every service and the roles listed under it.
    pub fn services(&self) -> Vec<ServiceSummary> {
        aggregate_services(&self.roles)
    }

    /// The role × permission matrix for one service.
    pub fn permission_matrix(&self, service: &str) -> PermissionMatrix {
        let matrix = PermissionMatrix::build(&self.roles, service);

        #[cfg(feature = "audit")]
        debug!(
            "Permission matrix for '{}': {} roles, {} permissions",
            service,
            matrix.columns.len(),
            matrix.rows.len()
        );

        matrix
    }

    /// Compare two roles selected by name.
    ///
    /// Unknown or missing names leave that side unselected, in which case
    /// there is nothing to compare.
    pub fn compare(&self, left: Option<&str>, right: Option<&str>) -> Option<RoleDiff> {
        let left_role = left.and_then(|name| self.lookup_for_compare(name));
        let right_role = right.and_then(|name| self.lookup_for_compare(name));

        let diff = diff_roles(left_role, right_role);

        #[cfg(feature = "audit")]
        {
            if let (Some(left), Some(right), Some(diff)) = (left, right, &diff) {
                debug!(
                    "Compared '{}' with '{}': {} left only, {} right only, {} common",
                    left,
                    right,
                    diff.left_only.len(),
                    diff.right_only.len(),
                    diff.common.len()
                );
            }
        }

        diff
    }

    /// Compare two roles by name, failing on unknown names.
    pub fn compare_strict(&self, left: &str, right: &str) -> Result<RoleDiff> {
        let left = self.require(left)?;
        let right = self.require(right)?;
        Ok(RoleDiff::between(left, right))
    }

    fn lookup_for_compare(&self, name: &str) -> Option<&Role> {
        let role = self.find_selectable(name);

        #[cfg(feature = "audit")]
        {
            if role.is_none() {
                warn!("Role '{}' is not in the catalog", name);
            }
        }

        role
    }
}

impl From<Vec<Role>> for RoleCatalog {
    fn from(roles: Vec<Role>) -> Self {
        Self::new(roles)
    }
}
