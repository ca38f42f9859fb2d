//! State of an interactive role comparison.

use crate::{catalog::RoleCatalog, diff::RoleDiff, role::Role};

/// Two role selections and the diff between them.
///
/// Changing either side recomputes the diff immediately, so [`diff`] always
/// reflects the current selection.
///
/// [`diff`]: ComparisonSelection::diff
#[derive(Debug, Clone)]
pub struct ComparisonSelection<'a> {
    catalog: &'a RoleCatalog,
    left: Option<&'a Role>,
    right: Option<&'a Role>,
    diff: Option<RoleDiff>,
}

impl<'a> ComparisonSelection<'a> {
    /// Start with the catalog's default pair selected.
    pub fn new(catalog: &'a RoleCatalog) -> Self {
        let (left, right) = catalog.default_pair();
        let mut selection = Self {
            catalog,
            left,
            right,
            diff: None,
        };
        selection.recompute();
        selection
    }

    /// Start with nothing selected.
    pub fn empty(catalog: &'a RoleCatalog) -> Self {
        Self {
            catalog,
            left: None,
            right: None,
            diff: None,
        }
    }

    /// Select the left role by name; an unknown name clears the side.
    pub fn set_left(&mut self, name: &str) -> Option<&'a Role> {
        self.left = self.catalog.find_selectable(name);
        self.recompute();
        self.left
    }

    /// Select the right role by name; an unknown name clears the side.
    pub fn set_right(&mut self, name: &str) -> Option<&'a Role> {
        self.right = self.catalog.find_selectable(name);
        self.recompute();
        self.right
    }

    /// Clear both sides.
    pub fn clear(&mut self) {
        self.left = None;
        self.right = None;
        self.diff = None;
    }

    /// The selected left role.
    pub fn left(&self) -> Option<&'a Role> {
        self.left
    }

    /// The selected right role.
    pub fn right(&self) -> Option<&'a Role> {
        self.right
    }

    /// The diff between the selected roles, once both are selected.
    pub fn diff(&self) -> Option<&RoleDiff> {
        self.diff.as_ref()
    }

    fn recompute(&mut self) {
        self.diff = crate::diff::diff_roles(self.left, self.right);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{permission::Permission, role::ALL_PERMISSIONS_ROLE_NAME};

    fn role(name: &str, permissions: &[&str]) -> Role {
        Role::new(name).add_permissions(permissions.iter().map(|p| Permission::new(*p)))
    }

    fn catalog() -> RoleCatalog {
        RoleCatalog::new(vec![
            role(
                "roles/appengine.serviceAdmin",
                &["appengine.services.update", "appengine.versions.get"],
            ),
            role(
                "roles/appengine.deployer",
                &["appengine.versions.create", "appengine.versions.get"],
            ),
            role("roles/owner", &["resourcemanager.projects.delete"]),
        ])
    }

    #[test]
    fn test_default_selection() {
        let catalog = catalog();
        let selection = ComparisonSelection::new(&catalog);

        assert_eq!(
            selection.left().map(Role::name),
            Some("roles/appengine.serviceAdmin")
        );
        let diff = selection.diff().unwrap();
        assert_eq!(diff.common, vec![Permission::new("appengine.versions.get")]);
    }

    #[test]
    fn test_changing_sides_recomputes() {
        let catalog = catalog();
        let mut selection = ComparisonSelection::empty(&catalog);
        assert!(selection.diff().is_none());

        selection.set_left("roles/owner");
        assert!(selection.diff().is_none());

        selection.set_right(ALL_PERMISSIONS_ROLE_NAME);
        let diff = selection.diff().unwrap();
        assert!(diff.left_only.is_empty());
        assert_eq!(diff.common.len(), 1);
        assert_eq!(diff.right_only.len(), 3);

        assert!(selection.set_right("roles/unknown").is_none());
        assert!(selection.diff().is_none());
    }

    #[test]
    fn test_clear() {
        let catalog = catalog();
        let mut selection = ComparisonSelection::new(&catalog);
        selection.clear();
        assert!(selection.left().is_none());
        assert!(selection.diff().is_none());
    }
}
