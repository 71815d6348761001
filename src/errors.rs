// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

use crate::store::TaskId;

#[derive(Error, Debug)]
pub enum TaskdagError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// An id that is not present in the current task snapshot.
    #[error("task {0} does not exist")]
    InvalidReference(TaskId),

    #[error("task {0} cannot depend on itself")]
    SelfDependency(TaskId),

    /// Pre-commit rejection: the candidate edge would close a cycle, or a
    /// sort found one already present.
    #[error("dependency cycle detected: {0}")]
    CycleDetected(String),

    /// A supplied snapshot already violates acyclicity. Should be unreachable
    /// when every edge mutation went through `toggle_dependency`, but the
    /// store file can be edited by hand.
    #[error("dependency graph is invalid: {0}")]
    GraphInvalid(String),

    #[error("store error: {0}")]
    StoreError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlDeError(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerError(#[from] toml::ser::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, TaskdagError>;
