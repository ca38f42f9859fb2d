//! Query interface for role catalogs.
//!
//! This module provides the lookups that sit around the main views: name
//! search for picking roles to compare, reverse permission lookup, and
//! dataset statistics.

use crate::{catalog::RoleCatalog, role::Role, service::aggregate_services};
use std::collections::BTreeMap;

/// Query interface for catalog analysis.
pub struct RoleQuery<'a> {
    catalog: &'a RoleCatalog,
}

/// Trait for providing query capabilities.
pub trait CatalogQuery {
    /// Get a query interface for this catalog.
    fn query(&self) -> RoleQuery<'_>;
}

impl CatalogQuery for RoleCatalog {
    fn query(&self) -> RoleQuery<'_> {
        RoleQuery { catalog: self }
    }
}

impl<'a> RoleQuery<'a> {
    /// Selectable roles whose name contains `query`, ignoring case.
    ///
    /// Results keep selectable order (the synthetic role first) and stop at
    /// `limit`. A blank query matches every role.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&'a Role> {
        let needle = query.trim().to_lowercase();

        self.catalog
            .selectable_roles()
            .filter(|role| needle.is_empty() || role.name().to_lowercase().contains(&needle))
            .take(limit)
            .collect()
    }

    /// Names of the roles that include `permission`, in dataset order.
    pub fn roles_with_permission(&self, permission: &str) -> Vec<&'a str> {
        self.catalog
            .roles()
            .iter()
            .filter(|role| role.has_permission(permission))
            .map(Role::name)
            .collect()
    }

    /// Roles listed under `service`, in dataset order.
    pub fn roles_in_service(&self, service: &str) -> Vec<&'a Role> {
        self.catalog
            .roles()
            .iter()
            .filter(|role| role.belongs_to(service))
            .collect()
    }

    /// Number of roles per launch stage.
    pub fn stage_counts(&self) -> BTreeMap<&'a str, usize> {
        let mut counts = BTreeMap::new();
        for role in self.catalog.roles() {
            *counts.entry(role.stage()).or_insert(0) += 1;
        }
        counts
    }

    /// Generate catalog statistics.
    pub fn statistics(&self) -> CatalogStatistics {
        let roles = self.catalog.roles();
        let total_permissions: usize = roles.iter().map(Role::permission_count).sum();

        let largest_role = roles
            .iter()
            .rev()
            .max_by_key(|role| role.permission_count())
            .map(|role| role.name().to_string());

        let total_services = aggregate_services(roles)
            .iter()
            .filter(|summary| summary.count > 0)
            .count();

        CatalogStatistics {
            total_roles: roles.len(),
            total_services,
            total_permissions,
            distinct_permissions: self.catalog.all_permissions().permission_count(),
            largest_role,
        }
    }
}

/// Catalog-wide statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "persistence",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct CatalogStatistics {
    /// Total number of roles.
    pub total_roles: usize,
    /// Number of services listing at least one role.
    pub total_services: usize,
    /// Permission entries summed over every role.
    pub total_permissions: usize,
    /// Number of distinct permissions.
    pub distinct_permissions: usize,
    /// The first role with the most permissions.
    pub largest_role: Option<String>,
}
