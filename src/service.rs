//! Grouping of roles by the service namespace in their names.

use crate::role::{PROJECT_SERVICE, Role, SPECIAL_ROLE_NAMES};
use std::collections::BTreeSet;

/// The roles listed under one service.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "persistence",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct ServiceSummary {
    /// Service identifier, e.g. `storage` or `project`.
    pub service: String,
    /// Number of roles in `role_names`.
    pub count: usize,
    /// Role names with the service prefix stripped.
    pub role_names: Vec<String>,
}

impl ServiceSummary {
    fn new(service: impl Into<String>, role_names: Vec<String>) -> Self {
        Self {
            service: service.into(),
            count: role_names.len(),
            role_names,
        }
    }
}

/// Sorted, deduplicated service identifiers found in `roles`.
///
/// [`PROJECT_SERVICE`] is always included exactly once.
pub fn service_names(roles: &[Role]) -> Vec<String> {
    let mut services: BTreeSet<&str> = roles
        .iter()
        .filter(|role| !role.is_special())
        .filter_map(Role::service)
        .collect();
    services.insert(PROJECT_SERVICE);

    services.into_iter().map(str::to_string).collect()
}

/// Role-local names of the roles listed under `service`.
///
/// Basic roles are listed in their fixed order, and only when present in
/// `roles`; every other service keeps the input order.
pub fn role_names_for(roles: &[Role], service: &str) -> Vec<String> {
    if service == PROJECT_SERVICE {
        return SPECIAL_ROLE_NAMES
            .iter()
            .filter_map(|special| roles.iter().find(|role| role.name() == *special))
            .map(|role| role.local_name().to_string())
            .collect();
    }

    roles
        .iter()
        .filter(|role| role.belongs_to(service))
        .map(|role| role.local_name().to_string())
        .collect()
}

/// Group roles by service.
///
/// The result is ordered by service identifier and always contains a
/// `project` entry, possibly with no roles.
pub fn aggregate_services(roles: &[Role]) -> Vec<ServiceSummary> {
    service_names(roles)
        .into_iter()
        .map(|service| {
            let role_names = role_names_for(roles, &service);
            ServiceSummary::new(service, role_names)
        })
        .collect()
}
