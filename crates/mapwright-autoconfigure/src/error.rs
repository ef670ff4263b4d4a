//! Error types for mapwright-autoconfigure

use thiserror::Error;

/// Result type alias for mapwright-autoconfigure operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while binding configuration or initializing an engine
#[derive(Error, Debug)]
pub enum Error {
    /// A type-map configurer did not declare concrete source and destination types
    #[error(
        "type map configurer '{configurer}' must declare a concrete source type and destination type"
    )]
    UnresolvedTypePair {
        /// Name of the configurer
        configurer: String,
    },

    /// A configuration value could not be bound
    #[error("invalid value [{value}] for '{key}': {reason}")]
    InvalidValue {
        /// Configuration key as supplied
        key: String,
        /// The rejected value
        value: String,
        /// Why it was rejected
        reason: String,
    },

    /// Configuration file could not be found
    #[error("configuration file not found: {path}")]
    ConfigNotFound {
        /// Path that was searched
        path: String,
    },

    /// Failed to parse YAML configuration
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The engine rejected its configuration
    #[error(transparent)]
    Engine(#[from] mapwright_core::Error),
}
