//! Role dataset sources.

#[cfg(feature = "audit")]
use log::info;

use crate::{
    catalog::RoleCatalog,
    config::ExplorerConfig,
    error::{Error, Result},
    role::Role,
};
use std::collections::HashSet;

/// Trait for reading a role dataset.
pub trait RoleSource: Send + Sync {
    /// Read every role in the dataset, in dataset order, without validation.
    fn load_roles(&self) -> Result<Vec<Role>>;

    /// Read the dataset and build a catalog over it.
    fn load_catalog(&self, config: ExplorerConfig) -> Result<RoleCatalog> {
        let roles = self.load_roles()?;
        validate_roles(&roles)?;
        RoleCatalog::try_new(roles, config)
    }
}

/// Check every role and reject repeated names.
pub fn validate_roles(roles: &[Role]) -> Result<()> {
    let mut seen = HashSet::with_capacity(roles.len());
    for role in roles {
        role.validate()?;
        if !seen.insert(role.name()) {
            return Err(Error::DuplicateRole(role.name().to_string()));
        }
    }
    Ok(())
}

/// A dataset held in memory.
#[derive(Debug, Default, Clone)]
pub struct StaticSource {
    roles: Vec<Role>,
}

impl StaticSource {
    /// Create a source over the given roles.
    pub fn new(roles: Vec<Role>) -> Self {
        Self { roles }
    }

    /// Get the number of roles.
    pub fn role_count(&self) -> usize {
        self.roles.len()
    }
}

impl RoleSource for StaticSource {
    fn load_roles(&self) -> Result<Vec<Role>> {
        Ok(self.roles.clone())
    }
}

impl From<Vec<Role>> for StaticSource {
    fn from(roles: Vec<Role>) -> Self {
        Self::new(roles)
    }
}

/// JSON datasets (requires persistence feature).
#[cfg(feature = "persistence")]
pub mod file_source {
    use super::*;
    use serde::Deserialize;
    use std::{
        fs::File,
        io::{BufReader, Read},
        path::{Path, PathBuf},
    };

    /// The two accepted dataset layouts: a bare array of roles, as printed by
    /// `gcloud iam roles list --format=json`, or an object wrapping that
    /// array in a `roles` field.
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Dataset {
        List(Vec<Role>),
        Wrapped { roles: Vec<Role> },
    }

    impl From<Dataset> for Vec<Role> {
        fn from(dataset: Dataset) -> Self {
            match dataset {
                Dataset::List(roles) | Dataset::Wrapped { roles } => roles,
            }
        }
    }

    /// Parse a JSON dataset from a string.
    ///
    /// Roles are returned as stored; repeated names are rejected later by
    /// [`RoleSource::load_catalog`].
    pub fn load_roles_from_str(json: &str) -> Result<Vec<Role>> {
        let dataset: Dataset = serde_json::from_str(json)?;
        Ok(dataset.into())
    }

    /// Parse a JSON dataset from a reader.
    pub fn load_roles_from_reader(reader: impl Read) -> Result<Vec<Role>> {
        let dataset: Dataset = serde_json::from_reader(reader)?;
        Ok(dataset.into())
    }

    /// A dataset stored as a JSON file.
    #[derive(Debug, Clone)]
    pub struct FileSource {
        path: PathBuf,
    }

    impl FileSource {
        /// Create a source reading from `path`.
        pub fn new(path: impl AsRef<Path>) -> Self {
            Self {
                path: path.as_ref().to_path_buf(),
            }
        }

        /// Get the dataset file path.
        pub fn path(&self) -> &Path {
            &self.path
        }
    }

    impl RoleSource for FileSource {
        fn load_roles(&self) -> Result<Vec<Role>> {
            let file = File::open(&self.path).map_err(|e| {
                Error::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to open dataset {}: {}", self.path.display(), e),
                ))
            })?;

            let roles = load_roles_from_reader(BufReader::new(file))?;

            #[cfg(feature = "audit")]
            info!("Loaded {} roles from {}", roles.len(), self.path.display());

            Ok(roles)
        }
    }
}

#[cfg(feature = "persistence")]
pub use file_source::{FileSource, load_roles_from_reader, load_roles_from_str};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permission::Permission;

    #[test]
    fn test_static_source() {
        let source = StaticSource::new(vec![
            Role::new("roles/owner").add_permission(Permission::new("a.b.c")),
        ]);
        assert_eq!(source.role_count(), 1);

        let catalog = source.load_catalog(ExplorerConfig::default()).unwrap();
        assert!(catalog.get("roles/owner").is_some());
    }

    #[test]
    fn test_duplicate_roles_rejected() {
        let source = StaticSource::new(vec![Role::new("roles/owner"), Role::new("roles/owner")]);
        assert!(matches!(
            source.load_catalog(ExplorerConfig::default()),
            Err(Error::DuplicateRole(_))
        ));
    }

    #[test]
    fn test_invalid_role_name_rejected() {
        let source = StaticSource::new(vec![Role::new("")]);
        assert!(matches!(
            source.load_catalog(ExplorerConfig::default()),
            Err(Error::InvalidRoleName(_))
        ));
    }

    #[cfg(feature = "persistence")]
    #[test]
    fn test_parse_list_dataset() {
        let json = r#"[
            {"name": "roles/owner", "stage": "GA", "includedPermissions": ["a", "b"]},
            {"name": "roles/storage.admin", "title": "Storage Admin", "includedPermissions": ["b", "c"]}
        ]"#;

        let roles = load_roles_from_str(json).unwrap();
        assert_eq!(roles.len(), 2);
        assert_eq!(roles[0].stage(), "GA");
        assert_eq!(roles[1].stage(), "");
        assert_eq!(roles[1].title(), Some("Storage Admin"));
        assert!(roles[1].has_permission("c"));
    }

    #[cfg(feature = "persistence")]
    #[test]
    fn test_duplicates_survive_parsing_until_catalog_load() {
        let json = r#"[{"name": "roles/a.b"}, {"name": "roles/a.b"}]"#;

        let roles = load_roles_from_str(json).unwrap();
        assert_eq!(roles.len(), 2);

        let source = StaticSource::from(roles);
        assert_eq!(source.load_roles().unwrap().len(), 2);
        assert!(matches!(
            source.load_catalog(ExplorerConfig::default()),
            Err(Error::DuplicateRole(name)) if name == "roles/a.b"
        ));
    }

    #[cfg(feature = "persistence")]
    #[test]
    fn test_parse_wrapped_dataset() {
        let json = r#"{"roles": [{"name": "roles/viewer"}]}"#;
        let roles = load_roles_from_str(json).unwrap();
        assert_eq!(roles.len(), 1);
        assert!(roles[0].permissions().is_empty());
    }

    #[cfg(feature = "persistence")]
    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            load_roles_from_str("{not json"),
            Err(Error::Serialization(_))
        ));
        assert!(matches!(
            load_roles_from_str(r#"[{"name": "roles/x.y", "includedPermissions": [""]}]"#),
            Err(Error::Serialization(_))
        ));
    }

    #[cfg(feature = "persistence")]
    #[test]
    fn test_file_source() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"name": "roles/run.invoker", "includedPermissions": ["run.routes.invoke"]}}]"#
        )
        .unwrap();

        let source = FileSource::new(file.path());
        let roles = source.load_roles().unwrap();
        assert_eq!(roles[0].name(), "roles/run.invoker");

        let missing = FileSource::new(file.path().with_extension("missing"));
        assert!(matches!(missing.load_roles(), Err(Error::Io(_))));
    }
}
