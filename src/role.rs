//! Role records as exported by a cloud IAM service.

use crate::{
    error::{Error, Result},
    permission::{Permission, PermissionSet},
};

/// Prefix shared by every predefined role name.
pub const ROLE_PREFIX: &str = "roles/";

/// Pseudo-service grouping the project-level basic roles.
pub const PROJECT_SERVICE: &str = "project";

/// The four project-level roles that are not tied to a service namespace.
pub const SPECIAL_ROLE_NAMES: [&str; 4] = [
    "roles/owner",
    "roles/editor",
    "roles/viewer",
    "roles/browser",
];

/// Name of the synthetic role holding every known permission.
pub const ALL_PERMISSIONS_ROLE_NAME: &str = "ALL PERMISSIONS";

/// Check whether a role name is one of the project-level basic roles.
pub fn is_special_role_name(name: &str) -> bool {
    SPECIAL_ROLE_NAMES.contains(&name)
}

/// A role is a named bundle of permissions.
///
/// Names follow `roles/<service>.<roleId>`, except for the basic roles in
/// [`SPECIAL_ROLE_NAMES`] which belong to the [`PROJECT_SERVICE`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "persistence",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Role {
    /// Fully qualified role name, e.g. `roles/storage.admin`.
    name: String,
    /// Human-readable title.
    #[cfg_attr(
        feature = "persistence",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    title: Option<String>,
    /// Optional description of the role.
    #[cfg_attr(
        feature = "persistence",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    description: Option<String>,
    /// Launch stage (`GA`, `BETA`, ...). Empty for the pseudo-role.
    #[cfg_attr(feature = "persistence", serde(default))]
    stage: String,
    /// Permissions granted by this role.
    #[cfg_attr(feature = "persistence", serde(default))]
    included_permissions: PermissionSet,
}

impl Role {
    /// Create a new role with the given name and no permissions.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: None,
            description: None,
            stage: String::new(),
            included_permissions: PermissionSet::new(),
        }
    }

    /// Build the synthetic `ALL PERMISSIONS` role: the sorted, deduplicated
    /// union of every permission across `roles`.
    pub fn all_permissions<'a>(roles: impl IntoIterator<Item = &'a Role>) -> Self {
        let mut role = Self::new(ALL_PERMISSIONS_ROLE_NAME);
        role.included_permissions =
            PermissionSet::union(roles.into_iter().map(|role| &role.included_permissions));
        role
    }

    /// Get the role's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the role's title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Get the role's title.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Set the role's description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Get the role's description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Set the role's launch stage.
    pub fn with_stage(mut self, stage: impl Into<String>) -> Self {
        self.stage = stage.into();
        self
    }

    /// Get the role's launch stage.
    pub fn stage(&self) -> &str {
        &self.stage
    }

    /// Add a permission to this role.
    pub fn add_permission(mut self, permission: Permission) -> Self {
        self.included_permissions.add(permission);
        self
    }

    /// Add multiple permissions to this role.
    pub fn add_permissions(mut self, permissions: impl IntoIterator<Item = Permission>) -> Self {
        for permission in permissions {
            self.included_permissions.add(permission);
        }
        self
    }

    /// Get all permissions included in this role.
    pub fn permissions(&self) -> &PermissionSet {
        &self.included_permissions
    }

    /// Number of included permissions.
    pub fn permission_count(&self) -> usize {
        self.included_permissions.len()
    }

    /// Check if this role includes a specific permission.
    pub fn has_permission(&self, permission: &str) -> bool {
        self.included_permissions.contains(permission)
    }

    /// Whether this is one of the project-level basic roles.
    pub fn is_special(&self) -> bool {
        is_special_role_name(&self.name)
    }

    /// Whether this is the synthetic `ALL PERMISSIONS` role.
    pub fn is_pseudo(&self) -> bool {
        self.name == ALL_PERMISSIONS_ROLE_NAME
    }

    /// The service this role belongs to.
    ///
    /// Basic roles belong to [`PROJECT_SERVICE`]. Other predefined roles
    /// belong to the namespace between `roles/` and the first `.`. Names
    /// outside the `roles/` namespace (custom roles, the pseudo-role) have no
    /// service.
    pub fn service(&self) -> Option<&str> {
        if self.is_special() {
            return Some(PROJECT_SERVICE);
        }

        let rest = self.name.strip_prefix(ROLE_PREFIX)?;
        let service = rest.split('.').next().unwrap_or(rest);
        if service.is_empty() {
            None
        } else {
            Some(service)
        }
    }

    /// Check whether this role is listed under `service`.
    pub fn belongs_to(&self, service: &str) -> bool {
        if service == PROJECT_SERVICE {
            return self.is_special();
        }

        self.name
            .strip_prefix(ROLE_PREFIX)
            .and_then(|rest| rest.strip_prefix(service))
            .is_some_and(|rest| rest.starts_with('.'))
    }

    /// The role name with its service prefix removed: `admin` for
    /// `roles/storage.admin`, `owner` for `roles/owner`.
    pub fn local_name(&self) -> &str {
        let Some(rest) = self.name.strip_prefix(ROLE_PREFIX) else {
            return &self.name;
        };

        if self.is_special() {
            return rest;
        }

        match rest.split_once('.') {
            Some((_, local)) => local,
            None => rest,
        }
    }

    /// Validate the role's name and permission identifiers.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidRoleName("Role name cannot be empty".to_string()));
        }

        if self.name.contains('\0') {
            return Err(Error::InvalidRoleName(format!(
                "Role name cannot contain null characters: '{}'",
                self.name.escape_debug()
            )));
        }

        for permission in &self.included_permissions {
            Permission::parse(permission.as_str())?;
        }

        Ok(())
    }
}

/// Builder for creating roles with a fluent API.
#[derive(Debug, Default)]
pub struct RoleBuilder {
    name: Option<String>,
    title: Option<String>,
    description: Option<String>,
    stage: Option<String>,
    permissions: Vec<String>,
}

impl RoleBuilder {
    /// Create a new role builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the role name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the role title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the role description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the launch stage.
    pub fn stage(mut self, stage: impl Into<String>) -> Self {
        self.stage = Some(stage.into());
        self
    }

    /// Add a permission identifier to the role.
    pub fn permission(mut self, permission: impl Into<String>) -> Self {
        self.permissions.push(permission.into());
        self
    }

    /// Add multiple permission identifiers to the role.
    pub fn permissions<I, P>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        self.permissions.extend(permissions.into_iter().map(Into::into));
        self
    }

    /// Build the role, validating the name and every permission.
    pub fn build(self) -> Result<Role> {
        let name = self
            .name
            .ok_or_else(|| Error::InvalidRoleName("Role name is required".to_string()))?;

        let mut role = Role::new(name);

        if let Some(title) = self.title {
            role = role.with_title(title);
        }

        if let Some(description) = self.description {
            role = role.with_description(description);
        }

        if let Some(stage) = self.stage {
            role = role.with_stage(stage);
        }

        for permission in self.permissions {
            role = role.add_permission(Permission::parse(&permission)?);
        }

        role.validate()?;
        Ok(role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_creation() {
        let role = Role::new("roles/storage.admin")
            .with_title("Storage Admin")
            .with_stage("GA")
            .add_permission(Permission::new("storage.buckets.get"))
            .add_permission(Permission::new("storage.buckets.delete"));

        assert_eq!(role.name(), "roles/storage.admin");
        assert_eq!(role.title(), Some("Storage Admin"));
        assert_eq!(role.stage(), "GA");
        assert_eq!(role.permission_count(), 2);
        assert!(role.has_permission("storage.buckets.get"));
        assert!(!role.has_permission("storage.buckets.create"));
    }

    #[test]
    fn test_service_inference() {
        assert_eq!(Role::new("roles/storage.admin").service(), Some("storage"));
        assert_eq!(Role::new("roles/owner").service(), Some(PROJECT_SERVICE));
        assert_eq!(Role::new("roles/dataflow").service(), Some("dataflow"));
        assert_eq!(Role::new("roles/.x").service(), None);
        assert_eq!(Role::new("roles/").service(), None);
        assert_eq!(Role::new("projects/p/roles/custom").service(), None);
        assert_eq!(Role::new(ALL_PERMISSIONS_ROLE_NAME).service(), None);
    }

    #[test]
    fn test_local_name() {
        assert_eq!(Role::new("roles/storage.admin").local_name(), "admin");
        assert_eq!(Role::new("roles/browser").local_name(), "browser");
        assert_eq!(
            Role::new("roles/compute.instanceAdmin.v1").local_name(),
            "instanceAdmin.v1"
        );
        assert_eq!(Role::new("custom").local_name(), "custom");
    }

    #[test]
    fn test_belongs_to() {
        let role = Role::new("roles/storage.admin");
        assert!(role.belongs_to("storage"));
        assert!(!role.belongs_to("stor"));
        assert!(!role.belongs_to(PROJECT_SERVICE));

        assert!(Role::new("roles/viewer").belongs_to(PROJECT_SERVICE));
        assert!(!Role::new("roles/viewer").belongs_to("viewer"));
    }

    #[test]
    fn test_all_permissions_role() {
        let roles = vec![
            Role::new("roles/a.x").add_permissions(["p.b", "p.a"].map(Permission::new)),
            Role::new("roles/b.y").add_permissions(["p.c", "p.a"].map(Permission::new)),
        ];

        let all = Role::all_permissions(&roles);
        assert!(all.is_pseudo());
        assert_eq!(all.stage(), "");
        let ids: Vec<&str> = all.permissions().iter().map(Permission::as_str).collect();
        assert_eq!(ids, vec!["p.a", "p.b", "p.c"]);
    }

    #[test]
    fn test_role_builder() {
        let role = RoleBuilder::new()
            .name("roles/pubsub.viewer")
            .title("Pub/Sub Viewer")
            .description("Read access to topics")
            .stage("GA")
            .permissions(["pubsub.topics.get", "pubsub.topics.list"])
            .build()
            .unwrap();

        assert_eq!(role.name(), "roles/pubsub.viewer");
        assert_eq!(role.description(), Some("Read access to topics"));
        assert_eq!(role.permission_count(), 2);
    }

    #[test]
    fn test_role_builder_rejects_bad_input() {
        assert!(matches!(
            RoleBuilder::new().build(),
            Err(Error::InvalidRoleName(_))
        ));
        assert!(matches!(
            RoleBuilder::new().name("roles/x.y").permission("").build(),
            Err(Error::InvalidPermission(_))
        ));
        assert!(matches!(
            RoleBuilder::new().name("  ").build(),
            Err(Error::InvalidRoleName(_))
        ));
    }
}
