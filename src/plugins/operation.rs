//! Exported operations
//!
//! An operation binds a name and description to a function defined in the
//! same module. Functions come in a small closed set of shapes so entries
//! with different signatures can live in one registry.

use super::protocol::{ParameterDef, Signature, ToolDefinition, Value};
use crate::error::OperationError;

pub type BinaryFn = fn(f64, f64) -> f64;
pub type CheckedBinaryFn = fn(f64, f64) -> Result<f64, OperationError>;
pub type TextFn = fn() -> String;

/// Reference to an operation's implementation
#[derive(Debug, Clone, Copy)]
pub enum Callable {
    Binary(BinaryFn),
    CheckedBinary(CheckedBinaryFn),
    Text(TextFn),
}

impl Callable {
    pub fn signature(&self) -> Signature {
        match self {
            Callable::Binary(_) => Signature::Binary,
            Callable::CheckedBinary(_) => Signature::CheckedBinary,
            Callable::Text(_) => Signature::Nullary,
        }
    }

    /// Invoke with positional arguments checked against the signature
    pub fn invoke(&self, args: &[Value]) -> Result<Value, OperationError> {
        match (self, args) {
            (Callable::Binary(f), [Value::Number(a), Value::Number(b)]) => {
                Ok(Value::Number(f(*a, *b)))
            }
            (Callable::CheckedBinary(f), [Value::Number(a), Value::Number(b)]) => {
                f(*a, *b).map(Value::Number)
            }
            (Callable::Text(f), []) => Ok(Value::Text(f())),
            _ => Err(mismatch(self.signature(), args)),
        }
    }
}

/// Describe why `args` do not fit `signature`
fn mismatch(signature: Signature, args: &[Value]) -> OperationError {
    let expected = signature.params();
    if args.len() != expected.len() {
        return OperationError::Arity {
            expected: expected.len(),
            got: args.len(),
        };
    }

    args.iter()
        .zip(expected)
        .enumerate()
        .find(|(_, (arg, want))| arg.kind() != **want)
        .map(|(index, (arg, want))| OperationError::ArgumentType {
            index,
            expected: want.as_str(),
            found: arg.kind().as_str(),
        })
        .unwrap_or(OperationError::Arity {
            expected: expected.len(),
            got: args.len(),
        })
}

/// A named, described operation exported by a module
#[derive(Debug, Clone)]
pub struct OperationEntry {
    name: String,
    callable: Callable,
    description: String,
    parameters: Vec<ParameterDef>,
}

impl OperationEntry {
    pub fn new(name: &str, callable: Callable, description: &str) -> Self {
        Self {
            name: name.to_string(),
            callable,
            description: description.to_string(),
            parameters: Vec::new(),
        }
    }

    /// Attach parameter descriptions, in positional order
    pub fn with_parameters(mut self, parameters: Vec<ParameterDef>) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn signature(&self) -> Signature {
        self.callable.signature()
    }

    pub fn parameters(&self) -> &[ParameterDef] {
        &self.parameters
    }

    pub fn invoke(&self, args: &[Value]) -> Result<Value, OperationError> {
        self.callable.invoke(args)
    }

    /// Discovery record for this operation
    pub fn definition(&self) -> ToolDefinition {
        let signature = self.signature();
        ToolDefinition {
            name: self.name.clone(),
            description: self.description.clone(),
            parameters: self.parameters.clone(),
            returns: signature.returns(),
            fallible: signature.is_fallible(),
        }
    }
}
