//! Error types for ld-agent example modules

use thiserror::Error;

/// Main error type for the crate
#[derive(Error, Debug)]
pub enum LdAgentError {
    #[error("Operation error: {0}")]
    Operation(#[from] OperationError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised while invoking an operation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OperationError {
    /// The only error a module itself produces
    #[error("cannot divide by zero")]
    DivisionByZero,

    #[error("expected {expected} argument(s), got {got}")]
    Arity { expected: usize, got: usize },

    #[error("argument {index}: expected {expected}, found {found}")]
    ArgumentType {
        index: usize,
        expected: &'static str,
        found: &'static str,
    },
}

/// Errors raised while building a module's descriptor or registry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Duplicate operation name: {0}")]
    DuplicateOperation(String),

    #[error("Invalid operation name: {0:?}")]
    InvalidName(String),

    #[error("Operation '{0}' has an empty description")]
    EmptyDescription(String),

    #[error("Operation '{name}' declares {declared} parameter(s) but takes {arity}")]
    ParameterMismatch {
        name: String,
        declared: usize,
        arity: usize,
    },

    #[error("Invalid module descriptor: {0}")]
    InvalidDescriptor(String),
}

/// Errors raised when resolving a module or operation by name
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("Module not found: {0}")]
    UnknownModule(String),

    #[error("Operation not found: {0}")]
    UnknownOperation(String),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type alias using LdAgentError
pub type Result<T> = std::result::Result<T, LdAgentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_division_by_zero_message() {
        assert_eq!(
            OperationError::DivisionByZero.to_string(),
            "cannot divide by zero"
        );
    }

    #[test]
    fn test_wraps_operation_error() {
        let err: LdAgentError = OperationError::Arity { expected: 2, got: 1 }.into();
        assert_eq!(
            err.to_string(),
            "Operation error: expected 2 argument(s), got 1"
        );
    }
}
