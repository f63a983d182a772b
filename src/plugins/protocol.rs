//! Operation protocol definitions
//!
//! Defines the typed values, signatures and discovery records a host uses
//! to enumerate and invoke module operations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Value passed to or returned from an operation
///
/// Non-finite numbers serialize as the strings `"NaN"`, `"inf"` and `"-inf"`
/// since JSON has no literal for them; those strings read back as numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Number(#[serde(with = "float_repr")] f64),
    Text(String),
}

mod float_repr {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(n: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if n.is_nan() {
            serializer.serialize_str("NaN")
        } else if n.is_infinite() {
            serializer.serialize_str(if *n > 0.0 { "inf" } else { "-inf" })
        } else {
            serializer.serialize_f64(*n)
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Finite(f64),
        Named(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Finite(n) => Ok(n),
            Repr::Named(s) => match s.as_str() {
                "NaN" => Ok(f64::NAN),
                "inf" => Ok(f64::INFINITY),
                "-inf" => Ok(f64::NEG_INFINITY),
                other => Err(D::Error::custom(format!("not a number: {:?}", other))),
            },
        }
    }
}

/// Kind of a value, as reported in signatures and tool definitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Number,
    Text,
}

impl ValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Number => "number",
            ValueType::Text => "text",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Value {
    /// Parse a raw command-line argument: anything `f64` accepts is a
    /// number, everything else is text.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(n) => Value::Number(n),
            Err(_) => Value::Text(raw.to_string()),
        }
    }

    pub fn kind(&self) -> ValueType {
        match self {
            Value::Number(_) => ValueType::Number,
            Value::Text(_) => ValueType::Text,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            Value::Number(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

/// Closed set of callable shapes a module may export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signature {
    /// `(f64, f64) -> f64`
    Binary,
    /// `(f64, f64) -> Result<f64, OperationError>`
    CheckedBinary,
    /// `() -> String`
    Nullary,
}

impl Signature {
    /// Parameter kinds in positional order
    pub fn params(&self) -> &'static [ValueType] {
        match self {
            Signature::Binary | Signature::CheckedBinary => &[ValueType::Number, ValueType::Number],
            Signature::Nullary => &[],
        }
    }

    pub fn arity(&self) -> usize {
        self.params().len()
    }

    pub fn returns(&self) -> ValueType {
        match self {
            Signature::Binary | Signature::CheckedBinary => ValueType::Number,
            Signature::Nullary => ValueType::Text,
        }
    }

    /// Whether the callable can return an error
    pub fn is_fallible(&self) -> bool {
        matches!(self, Signature::CheckedBinary)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<&str> = self.params().iter().map(|p| p.as_str()).collect();
        write!(f, "({}) -> {}", params.join(", "), self.returns())?;
        if self.is_fallible() {
            f.write_str(" | error")?;
        }
        Ok(())
    }
}

/// Parameter definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDef {
    /// Parameter name
    pub name: String,
    /// Parameter type
    #[serde(rename = "type")]
    pub param_type: ValueType,
    /// Description
    pub description: String,
}

impl ParameterDef {
    pub fn number(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            param_type: ValueType::Number,
            description: description.to_string(),
        }
    }
}

/// Tool definition for discovery listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Operation name (e.g., "add_numbers")
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Parameter definitions
    pub parameters: Vec<ParameterDef>,
    /// Kind of the returned value
    pub returns: ValueType,
    /// Whether the operation may fail
    #[serde(default)]
    pub fallible: bool,
}

/// Request for a single operation call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvocationRequest {
    /// Request ID for correlation
    pub id: String,
    /// Module to look in; any module when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    /// Operation name to invoke
    pub operation: String,
    /// Positional arguments
    pub args: Vec<Value>,
}

impl InvocationRequest {
    /// Create a new request
    pub fn new(operation: &str, args: Vec<Value>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            module: None,
            operation: operation.to_string(),
            args,
        }
    }

    /// Restrict the request to one module
    pub fn in_module(mut self, module: &str) -> Self {
        self.module = Some(module.to_string());
        self
    }
}

/// Outcome of an operation call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvocationResponse {
    /// Request ID this responds to
    pub id: String,
    /// Whether the operation succeeded
    pub success: bool,
    /// Result value (if success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Error message (if failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl InvocationResponse {
    /// Create a success response
    pub fn success(id: &str, result: Value) -> Self {
        Self {
            id: id.to_string(),
            success: true,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(id: &str, message: &str) -> Self {
        Self {
            id: id.to_string(),
            success: false,
            result: None,
            error: Some(message.to_string()),
        }
    }
}
