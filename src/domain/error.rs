use std::io;

use thiserror::Error;

/// Library-wide error type for jellyserv operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// The primary domain is required in simple mode.
    #[error("A domain name is required to generate the bundle (set DOMAIN or use expert mode)")]
    MissingDomain,

    /// Service identifier is invalid.
    #[error(
        "Invalid service identifier '{0}': must be alphanumeric with hyphens or underscores"
    )]
    InvalidServiceId(String),

    /// Service not found in catalog.
    #[error("Service '{name}' not found. Available: {available}")]
    ServiceNotFound { name: String, available: String },

    /// Internal services are only reachable as dependencies.
    #[error("Service '{0}' is internal and cannot be selected directly")]
    ServiceNotSelectable(String),

    /// Group not found in catalog.
    #[error("Group '{0}' not found")]
    GroupNotFound(String),

    /// Secret regeneration requested for a key no selected service generates.
    #[error("'{0}' is not a generated secret of any selected service")]
    UnknownSecret(String),

    /// Malformed `KEY=VALUE` assignment.
    #[error("Invalid assignment '{0}': expected KEY=VALUE")]
    InvalidAssignment(String),

    /// Catalog data could not be loaded.
    #[error("Invalid catalog entry '{source_name}': {reason}")]
    InvalidCatalog { source_name: String, reason: String },

    /// Profile file missing.
    #[error("Profile not found: {0}")]
    ProfileMissing(String),

    /// Profile file already exists at the target location.
    #[error("Profile already exists: {0}")]
    ProfileExists(String),

    /// Template rendering failed.
    #[error("Failed to render template '{name}': {reason}")]
    Template { name: String, reason: String },

    /// Structured document serialization failed.
    #[error("Failed to serialize {0}")]
    Serialization(String),

    /// Two artifacts were generated for the same path.
    #[error("Duplicate artifact path: {0}")]
    DuplicateArtifact(String),

    /// Bundle compression failed.
    #[error("Failed to assemble bundle: {0}")]
    Archive(String),

    /// Bundle delivery failed.
    #[error("Failed to deliver bundle: {0}")]
    Delivery(String),

    /// Parse error.
    #[error("Failed to parse {what}: {details}")]
    ParseError { what: String, details: String },

    /// Validation error.
    #[error("{0}")]
    Validation(String),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),
}

impl AppError {
    pub fn service_not_found(name: &str, available: &[&str]) -> Self {
        AppError::ServiceNotFound { name: name.to_string(), available: available.join(", ") }
    }

    /// Provide an `io::ErrorKind`-like view for callers mapping errors to exit codes.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::MissingDomain
            | AppError::InvalidServiceId(_)
            | AppError::ServiceNotSelectable(_)
            | AppError::UnknownSecret(_)
            | AppError::InvalidAssignment(_)
            | AppError::InvalidCatalog { .. }
            | AppError::ParseError { .. }
            | AppError::Validation(_)
            | AppError::TomlParseError(_) => io::ErrorKind::InvalidInput,
            AppError::ServiceNotFound { .. }
            | AppError::GroupNotFound(_)
            | AppError::ProfileMissing(_) => io::ErrorKind::NotFound,
            AppError::ProfileExists(_) | AppError::DuplicateArtifact(_) => {
                io::ErrorKind::AlreadyExists
            }
            AppError::Template { .. }
            | AppError::Serialization(_)
            | AppError::Archive(_)
            | AppError::Delivery(_) => io::ErrorKind::Other,
        }
    }
}
