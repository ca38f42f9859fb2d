//! # IAM Explorer
//!
//! This crate cross-references cloud IAM roles against the permissions they
//! include, working over an immutable, in-memory dataset of role records.
//!
//! ## Features
//!
//! - List every service with the roles defined under it
//! - Build a role × permission matrix for one service
//! - Diff the permissions of two roles, or of a role against the synthetic
//!   `ALL PERMISSIONS` role
//! - Search roles by name for interactive selection
//! - Load datasets exported as JSON (`persistence` feature)
//! - Render every view as a plain-text table
//!
//! ## Quick Start
//!
//! ```rust
//! use iam_explorer::{Permission, Role, RoleCatalog};
//!
//! let catalog = RoleCatalog::new(vec![
//!     Role::new("roles/owner")
//!         .add_permission(Permission::new("a"))
//!         .add_permission(Permission::new("b")),
//!     Role::new("roles/storage.admin")
//!         .add_permission(Permission::new("b"))
//!         .add_permission(Permission::new("c")),
//! ]);
//!
//! let diff = catalog
//!     .compare(Some("roles/owner"), Some("roles/storage.admin"))
//!     .expect("both roles exist");
//! assert_eq!(diff.left_only, vec![Permission::new("a")]);
//! assert_eq!(diff.right_only, vec![Permission::new("c")]);
//! assert_eq!(diff.common, vec![Permission::new("b")]);
//!
//! let services = catalog.services();
//! assert_eq!(services[0].service, "project");
//! assert_eq!(services[1].service, "storage");
//! ```
//!
//! ## Audit Logging
//!
//! When the `audit` feature is enabled, catalog construction, dataset loading
//! and comparisons are logged through the `log` facade. To enable logging:
//!
//! ```rust
//! use iam_explorer::init_audit_logger;
//!
//! // Initialize logging (must be called early in program execution)
//! init_audit_logger();
//!
//! // Configure log level through RUST_LOG environment variable:
//! // RUST_LOG=info,iam_explorer=debug
//! ```

#[cfg(feature = "audit")]
pub fn init_audit_logger() {
    let _ = env_logger::try_init();
}

pub mod catalog;
pub mod config;
pub mod diff;
pub mod error;

// Testing and fuzzing
#[cfg(test)]
pub mod fuzz;

pub mod macros;
pub mod matrix;
pub mod permission;
pub mod query;
pub mod render;
pub mod role;
pub mod selection;
pub mod service;
pub mod source;

// Re-export main types for convenience
pub use crate::{
    catalog::RoleCatalog,
    config::{ExplorerConfig, ExplorerConfigBuilder},
    diff::{RoleDiff, diff_roles},
    error::{Error, Result},
    matrix::{MatrixColumn, MatrixRow, PermissionMatrix},
    permission::{Permission, PermissionSet},
    query::{CatalogQuery, CatalogStatistics, RoleQuery},
    role::{ALL_PERMISSIONS_ROLE_NAME, PROJECT_SERVICE, Role, RoleBuilder, SPECIAL_ROLE_NAMES},
    selection::ComparisonSelection,
    service::{ServiceSummary, aggregate_services},
    source::{RoleSource, StaticSource},
};

#[cfg(feature = "persistence")]
pub use crate::source::{FileSource, load_roles_from_reader, load_roles_from_str};
