//! Explorer configuration.

use crate::error::{Error, Result};

/// Configuration for catalogs, comparisons and rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorerConfig {
    /// Role selected on the left side of a new comparison.
    pub default_left_role: String,
    /// Role selected on the right side of a new comparison.
    pub default_right_role: String,
    /// Shown in place of an empty comparison column.
    pub empty_placeholder: String,
    /// Marks membership in the permission matrix.
    pub membership_mark: String,
    /// Maximum number of search results.
    pub search_limit: usize,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            default_left_role: "roles/appengine.serviceAdmin".to_string(),
            default_right_role: "roles/appengine.deployer".to_string(),
            empty_placeholder: "- none -".to_string(),
            membership_mark: "✔".to_string(),
            search_limit: 20,
        }
    }
}

impl ExplorerConfig {
    /// Start building a configuration from the defaults.
    pub fn builder() -> ExplorerConfigBuilder {
        ExplorerConfigBuilder::default()
    }

    /// Check that every label is usable.
    pub fn validate(&self) -> Result<()> {
        let labels = [
            ("empty_placeholder", &self.empty_placeholder),
            ("membership_mark", &self.membership_mark),
        ];

        for (field, value) in labels {
            if value.trim().is_empty() {
                return Err(Error::InvalidConfiguration(format!(
                    "{field} cannot be empty"
                )));
            }
        }

        if self.search_limit == 0 {
            return Err(Error::InvalidConfiguration(
                "search_limit must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

/// Fluent builder for [`ExplorerConfig`].
#[derive(Debug, Default)]
pub struct ExplorerConfigBuilder {
    config: ExplorerConfig,
}

impl ExplorerConfigBuilder {
    /// Set the default comparison pair.
    pub fn default_pair(mut self, left: impl Into<String>, right: impl Into<String>) -> Self {
        self.config.default_left_role = left.into();
        self.config.default_right_role = right.into();
        self
    }

    /// Set the placeholder for empty comparison columns.
    pub fn empty_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.config.empty_placeholder = placeholder.into();
        self
    }

    /// Set the membership mark for permission matrices.
    pub fn membership_mark(mut self, mark: impl Into<String>) -> Self {
        self.config.membership_mark = mark.into();
        self
    }

    /// Set the maximum number of search results.
    pub fn search_limit(mut self, limit: usize) -> Self {
        self.config.search_limit = limit;
        self
    }

    /// Validate and return the configuration.
    pub fn build(self) -> Result<ExplorerConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
