//! Operation registry
//!
//! Ordered list of the operations a module exports. Built once through
//! [`RegistryBuilder`] and read-only afterwards.

use super::operation::OperationEntry;
use super::protocol::{ToolDefinition, Value};
use crate::error::{LookupError, RegistryError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static OPERATION_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z][a-z0-9_]*$").unwrap());

/// Immutable, ordered set of operations
#[derive(Debug, Clone, Default)]
pub struct OperationRegistry {
    entries: Vec<OperationEntry>,
}

impl OperationRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Get an operation by name
    pub fn get(&self, name: &str) -> Option<&OperationEntry> {
        self.entries.iter().find(|e| e.name() == name)
    }

    /// Check if an operation exists
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Operations in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &OperationEntry> {
        self.entries.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tool definitions for every operation
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.entries.iter().map(|e| e.definition()).collect()
    }

    /// Look up and invoke an operation
    pub fn invoke(&self, name: &str, args: &[Value]) -> Result<Value> {
        let entry = self
            .get(name)
            .ok_or_else(|| LookupError::UnknownOperation(name.to_string()))?;
        Ok(entry.invoke(args)?)
    }
}

impl<'a> IntoIterator for &'a OperationRegistry {
    type Item = &'a OperationEntry;
    type IntoIter = std::slice::Iter<'a, OperationEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Collects entries and checks them before producing a registry
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    entries: Vec<OperationEntry>,
}

impl RegistryBuilder {
    /// Append an operation; order of calls is the listing order
    pub fn register(mut self, entry: OperationEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Validate all entries and freeze the registry
    pub fn build(self) -> std::result::Result<OperationRegistry, RegistryError> {
        let mut seen = HashSet::new();

        for entry in &self.entries {
            if !OPERATION_NAME.is_match(entry.name()) {
                return Err(RegistryError::InvalidName(entry.name().to_string()));
            }
            if !seen.insert(entry.name()) {
                return Err(RegistryError::DuplicateOperation(entry.name().to_string()));
            }
            if entry.description().trim().is_empty() {
                return Err(RegistryError::EmptyDescription(entry.name().to_string()));
            }

            // Parameter docs are optional, but when present must cover every argument
            let arity = entry.signature().arity();
            let declared = entry.parameters().len();
            if declared != 0 && declared != arity {
                return Err(RegistryError::ParameterMismatch {
                    name: entry.name().to_string(),
                    declared,
                    arity,
                });
            }
        }

        Ok(OperationRegistry {
            entries: self.entries,
        })
    }
}
