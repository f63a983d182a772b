//! Module descriptor
//!
//! Static metadata identifying a module and what it needs to run.

use crate::error::RegistryError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `MAJOR.MINOR.PATCH` with optional pre-release and build suffixes
static VERSION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d+\.\d+\.\d+(?:-[0-9A-Za-z.-]+)?(?:\+[0-9A-Za-z.-]+)?$").unwrap()
});

/// Requirement on an environment variable
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvVarSpec {
    pub description: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

/// Descriptor of a module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    /// Module name
    pub name: String,
    /// Human-readable description
    #[serde(default)]
    pub description: String,
    /// Author, if declared
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Semantic version
    pub version: String,
    /// Target platform
    #[serde(default = "default_platform")]
    pub platform: String,
    /// Minimum runtime version constraint (e.g. ">=1.75"), empty if none
    #[serde(default)]
    pub runtime_requirement: String,
    /// Other modules or packages this one needs
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Environment variables the module reads
    #[serde(default)]
    pub environment_variables: BTreeMap<String, EnvVarSpec>,
}

fn default_platform() -> String {
    "any".to_string()
}

impl ModuleDescriptor {
    /// Create a descriptor with the two required fields
    pub fn new(name: &str, version: &str) -> Self {
        Self {
            name: name.to_string(),
            description: String::new(),
            author: None,
            version: version.to_string(),
            platform: default_platform(),
            runtime_requirement: String::new(),
            dependencies: Vec::new(),
            environment_variables: BTreeMap::new(),
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_author(mut self, author: &str) -> Self {
        self.author = Some(author.to_string());
        self
    }

    pub fn with_platform(mut self, platform: &str) -> Self {
        self.platform = platform.to_string();
        self
    }

    pub fn with_runtime_requirement(mut self, requirement: &str) -> Self {
        self.runtime_requirement = requirement.to_string();
        self
    }

    pub fn with_dependency(mut self, dependency: &str) -> Self {
        self.dependencies.push(dependency.to_string());
        self
    }

    pub fn with_env_var(mut self, name: &str, spec: EnvVarSpec) -> Self {
        self.environment_variables.insert(name.to_string(), spec);
        self
    }

    /// Check that name and version are present and well formed
    pub fn validate(&self) -> Result<(), RegistryError> {
        if self.name.trim().is_empty() {
            return Err(RegistryError::InvalidDescriptor(
                "name must not be empty".to_string(),
            ));
        }
        if self.version.trim().is_empty() {
            return Err(RegistryError::InvalidDescriptor(format!(
                "{}: version must not be empty",
                self.name
            )));
        }
        if !VERSION_PATTERN.is_match(&self.version) {
            return Err(RegistryError::InvalidDescriptor(format!(
                "{}: version {:?} is not MAJOR.MINOR.PATCH",
                self.name, self.version
            )));
        }
        Ok(())
    }

    /// Environment variables marked required that are unset and have no default
    pub fn missing_env_vars(&self) -> Vec<&str> {
        self.environment_variables
            .iter()
            .filter(|(name, spec)| {
                spec.required && spec.default.is_none() && std::env::var(name.as_str()).is_err()
            })
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Multi-line summary for terminal output
    pub fn format_summary(&self) -> String {
        let mut out = format!("{} v{}\n", self.name, self.version);
        if !self.description.is_empty() {
            out.push_str(&format!("  {}\n", self.description));
        }
        if let Some(author) = &self.author {
            out.push_str(&format!("  author:       {}\n", author));
        }
        out.push_str(&format!("  platform:     {}\n", self.platform));
        if !self.runtime_requirement.is_empty() {
            out.push_str(&format!("  runtime:      {}\n", self.runtime_requirement));
        }
        if !self.dependencies.is_empty() {
            out.push_str(&format!("  dependencies: {}\n", self.dependencies.join(", ")));
        }
        for (name, spec) in &self.environment_variables {
            let marker = if spec.required { " (required)" } else { "" };
            out.push_str(&format!("  env {}{}: {}\n", name, marker, spec.description));
        }
        out
    }
}
