//! # Mesh Errors
//!
//! Error types for kernel operations. Precondition failures are reported
//! before any mutation; degenerate geometry never produces an error.

use config::constants::ConfigError;
use thiserror::Error;

use crate::rules::Rule;
use crate::selection::Domain;

/// Result alias used throughout the kernel.
pub type MeshResult<T> = Result<T, MeshError>;

/// Errors that can occur while editing a mesh.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeshError {
    /// No selection is registered under this id
    #[error("Unknown selection: {0}")]
    UnknownSelection(u32),

    /// A selection is already registered under this id
    #[error("Selection already exists: {0}")]
    SelectionExists(u32),

    /// The operator requires another element domain
    #[error("{operation}: expected a {expected} selection, found {found}")]
    WrongDomain {
        operation: &'static str,
        expected: Domain,
        found: Domain,
    },

    /// The operator requires at least one element
    #[error("{operation}: selection is empty")]
    EmptySelection { operation: &'static str },

    /// No live element carries this name
    #[error("Unknown {domain} #{name}")]
    UnknownElement { domain: Domain, name: u32 },

    /// No basis is registered under this id
    #[error("Unknown basis: {0}")]
    UnknownBasis(u32),

    /// A basis is already registered under this id
    #[error("Basis already exists: {0}")]
    BasisExists(u32),

    /// No color is registered under this id
    #[error("Unknown color: {0}")]
    UnknownColor(u32),

    /// A color is already registered under this id
    #[error("Color already exists: {0}")]
    ColorExists(u32),

    /// A numeric or id argument is out of range
    #[error("{operation}: {message}")]
    InvalidParameter {
        operation: &'static str,
        message: String,
    },

    /// Unsupported operation
    #[error("Unsupported: {message}")]
    Unsupported { message: String },

    /// A structural rule does not hold
    #[error("Invariant {rule} violated by {element}")]
    InvariantViolation { rule: Rule, element: String },

    /// Kernel configuration rejected by the shared config crate
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

impl MeshError {
    /// Creates a wrong domain error.
    pub fn wrong_domain(operation: &'static str, expected: Domain, found: Domain) -> Self {
        Self::WrongDomain {
            operation,
            expected,
            found,
        }
    }

    /// Creates an invalid parameter error.
    pub fn invalid_parameter(operation: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            operation,
            message: message.into(),
        }
    }

    /// Creates an unsupported operation error.
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported {
            message: message.into(),
        }
    }

    /// Creates an invariant violation error.
    pub fn violation(rule: Rule, element: impl Into<String>) -> Self {
        Self::InvariantViolation {
            rule,
            element: element.into(),
        }
    }
}
