//! Error types for mapwright-core

use thiserror::Error;

/// Result type alias for mapwright-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in mapwright-core
#[derive(Error, Debug)]
pub enum Error {
    /// Engine consistency check found problems
    #[error("mapping engine validation failed: {}", .errors.join("; "))]
    Validation {
        /// Every problem found, in type-map order
        errors: Vec<String>,
    },

    /// Mapping a value between two types failed
    #[error("mapping error for {pair}: {message}")]
    Mapping {
        /// Display form of the type pair being mapped
        pair: String,
        /// Description of the error
        message: String,
    },

    /// A registered converter rejected its input
    #[error("converter '{converter}' failed: {message}")]
    Conversion {
        /// Name of the converter
        converter: String,
        /// Description of the error
        message: String,
    },

    /// A module failed while configuring the engine
    #[error("module '{module}' failed: {message}")]
    Module {
        /// Name of the module
        module: String,
        /// Description of the error
        message: String,
    },

    /// Text does not name any value of a strategy family
    #[error("{family} has no value named [{value}]")]
    UnknownConvention {
        /// Family name, e.g. `AccessLevel`
        family: &'static str,
        /// The rejected text
        value: String,
    },
}

impl Error {
    pub(crate) fn mapping(pair: impl ToString, message: impl Into<String>) -> Self {
        Self::Mapping {
            pair: pair.to_string(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_joins_all_errors() {
        let err = Error::Validation {
            errors: vec!["first".to_string(), "second".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "mapping engine validation failed: first; second"
        );
    }

    #[test]
    fn test_unknown_convention_message() {
        let err = Error::UnknownConvention {
            family: "AccessLevel",
            value: "friendly".to_string(),
        };
        assert_eq!(err.to_string(), "AccessLevel has no value named [friendly]");
    }
}
