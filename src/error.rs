//! Error types for the IAM explorer.

use thiserror::Error;

/// The main error type for IAM explorer operations.
///
/// The views themselves (service listing, permission matrix, role diff) are
/// total; errors only arise when loading datasets, validating input, or
/// looking a role up strictly by name.
#[derive(Error, Debug)]
pub enum Error {
    /// Role with the given name was not found.
    #[error("Role '{0}' not found")]
    RoleNotFound(String),

    /// A dataset contained the same role name twice.
    #[error("Role '{0}' appears more than once in the dataset")]
    DuplicateRole(String),

    /// Invalid permission identifier.
    #[error("Invalid permission format: {0}")]
    InvalidPermission(String),

    /// Invalid role name.
    #[error("Invalid role name: {0}")]
    InvalidRoleName(String),

    /// Reading a dataset failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[cfg(feature = "persistence")]
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type alias for IAM explorer operations.
pub type Result<T> = std::result::Result<T, Error>;
