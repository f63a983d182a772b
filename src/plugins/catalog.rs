//! Module catalog
//!
//! Initializes the built-in modules selected by configuration and resolves
//! operation names to the module that exports them.

use super::module::Module;
use super::operation::OperationEntry;
use super::protocol::{InvocationRequest, InvocationResponse, ToolDefinition};
use crate::config::ModulesConfig;
use crate::error::{LookupError, RegistryError};
use crate::modules::{calculator, minimal};
use std::collections::HashMap;
use tracing::{debug, info, warn};

type InitFn = fn() -> Result<Module, RegistryError>;

/// Built-in modules by short name, in listing order
pub const BUILTIN_MODULES: &[(&str, InitFn)] =
    &[("calculator", calculator::init), ("minimal", minimal::init)];

/// Short names of every built-in module
pub fn builtin_names() -> Vec<&'static str> {
    BUILTIN_MODULES.iter().map(|(name, _)| *name).collect()
}

/// Initialized modules available to the command line
#[derive(Debug, Default)]
pub struct ModuleCatalog {
    modules: Vec<(String, Module)>,
    tools: HashMap<String, String>, // operation name -> module key
}

impl ModuleCatalog {
    /// Initialize every built-in module
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::load(&ModulesConfig::default())
    }

    /// Initialize the modules named in config, or all of them when the list is empty
    pub fn load(config: &ModulesConfig) -> Result<Self, RegistryError> {
        Self::load_from(BUILTIN_MODULES, config)
    }

    fn load_from(
        available: &[(&str, InitFn)],
        config: &ModulesConfig,
    ) -> Result<Self, RegistryError> {
        let mut catalog = Self::default();

        for (key, init) in available {
            if !config.load.is_empty() && !config.load.iter().any(|n| n == *key) {
                debug!("Skipping module '{}': not selected", key);
                continue;
            }

            let module = init()?;
            let missing = module.descriptor().missing_env_vars();
            if !missing.is_empty() {
                warn!(
                    "Skipping module '{}': missing required environment variables: {}",
                    key,
                    missing.join(", ")
                );
                continue;
            }
            catalog.insert(key, module);
        }

        for name in &config.load {
            if !available.iter().any(|(key, _)| *key == name.as_str()) {
                warn!("Unknown module '{}' in configuration", name);
            }
        }

        Ok(catalog)
    }

    fn insert(&mut self, key: &str, module: Module) {
        for entry in module.registry() {
            // First module to export a name keeps it
            if let Some(owner) = self.tools.get(entry.name()) {
                warn!(
                    "Operation '{}' from '{}' shadowed by '{}'",
                    entry.name(),
                    key,
                    owner
                );
                continue;
            }
            self.tools.insert(entry.name().to_string(), key.to_string());
        }

        info!(
            "Loaded module '{}' with {} operations",
            key,
            module.registry().len()
        );
        self.modules.push((key.to_string(), module));
    }

    /// Get a module by short name
    pub fn get_module(&self, key: &str) -> Option<&Module> {
        self.modules
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, module)| module)
    }

    /// Modules in load order
    pub fn modules(&self) -> impl Iterator<Item = (&str, &Module)> {
        self.modules.iter().map(|(k, m)| (k.as_str(), m))
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Check if an operation is exported by any module
    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Find an operation, optionally restricted to one module
    pub fn resolve(
        &self,
        module: Option<&str>,
        operation: &str,
    ) -> Result<(&str, &OperationEntry), LookupError> {
        let key = match module {
            Some(key) => key,
            None => self
                .tools
                .get(operation)
                .map(String::as_str)
                .ok_or_else(|| LookupError::UnknownOperation(operation.to_string()))?,
        };

        let (key, module) = self
            .modules
            .iter()
            .find(|(k, _)| k == key)
            .ok_or_else(|| LookupError::UnknownModule(key.to_string()))?;

        let entry = module
            .registry()
            .get(operation)
            .ok_or_else(|| LookupError::UnknownOperation(operation.to_string()))?;

        Ok((key.as_str(), entry))
    }

    /// Resolve and run a request, folding every failure into the response
    pub fn invoke(&self, request: &InvocationRequest) -> InvocationResponse {
        let entry = match self.resolve(request.module.as_deref(), &request.operation) {
            Ok((_, entry)) => entry,
            Err(e) => return InvocationResponse::error(&request.id, &e.to_string()),
        };

        debug!("Invoking '{}' with {} args", entry.name(), request.args.len());

        match entry.invoke(&request.args) {
            Ok(value) => InvocationResponse::success(&request.id, value),
            Err(e) => InvocationResponse::error(&request.id, &e.to_string()),
        }
    }

    /// Tool definitions grouped by module key
    pub fn definitions(&self) -> Vec<(&str, Vec<ToolDefinition>)> {
        self.modules
            .iter()
            .map(|(k, m)| (k.as_str(), m.registry().definitions()))
            .collect()
    }
}
