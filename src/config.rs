//! Configuration management for ld-agent-examples
//!
//! Handles loading and merging configuration from multiple sources:
//! 1. Compiled defaults
//! 2. User config (~/.ld-agent/config.toml)
//! 3. CLI-specified config file
//! 4. Environment variables

use crate::error::ConfigError;
use crate::plugins::builtin_names;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub modules: ModulesConfig,
    pub output: OutputConfig,
    pub audit: AuditConfig,
}

/// Which modules to initialize
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModulesConfig {
    /// Module short names to load; all built-in modules when empty
    pub load: Vec<String>,
}

/// Output rendering
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(ConfigError::Invalid(format!(
                "output.format must be one of: [\"text\", \"json\"], got {:?}",
                other
            ))),
        }
    }
}

/// Invocation audit log
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Record every call made through the command line
    pub enabled: bool,
    /// Log file path
    pub path: PathBuf,
}

impl Default for AuditConfig {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            enabled: false,
            path: home.join(".ld-agent/logs/invocations.log"),
        }
    }
}

/// One config file as written; absent keys leave earlier layers untouched
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    modules: FileModules,
    output: FileOutput,
    audit: FileAudit,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileModules {
    load: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileOutput {
    format: Option<OutputFormat>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileAudit {
    enabled: Option<bool>,
    path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from all sources
    pub fn load(cli_config: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        // Load user config
        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".ld-agent/config.toml");
            if user_config.exists() {
                debug!("Loading user config from {:?}", user_config);
                config.merge_from_file(&user_config)?;
            }
        }

        // Load CLI-specified config
        if let Some(path) = cli_config {
            debug!("Loading CLI config from {:?}", path);
            config.merge_from_file(path)?;
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration from a file
    fn merge_from_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(format!("{}: {}", path.display(), e)))?;

        let file_config: FileConfig = toml::from_str(&contents)
            .map_err(|e| ConfigError::Parse(format!("{}: {}", path.display(), e)))?;

        self.merge(file_config);
        Ok(())
    }

    /// Merge a config file layer into this one; only keys the file sets win
    fn merge(&mut self, other: FileConfig) {
        if let Some(load) = other.modules.load {
            self.modules.load = load;
        }
        if let Some(format) = other.output.format {
            self.output.format = format;
        }
        if let Some(enabled) = other.audit.enabled {
            self.audit.enabled = enabled;
        }
        if let Some(path) = other.audit.path {
            self.audit.path = path;
        }
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(format) = std::env::var("LD_AGENT_FORMAT") {
            self.output.format = format.parse()?;
        }
        if let Ok(log) = std::env::var("LD_AGENT_AUDIT_LOG") {
            self.audit.enabled = true;
            self.audit.path = PathBuf::from(log);
        }
        if let Ok(modules) = std::env::var("LD_AGENT_MODULES") {
            self.modules.load = modules
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let known = builtin_names();
        for name in &self.modules.load {
            if !known.contains(&name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "modules.load: unknown module {:?}, expected one of: {:?}",
                    name, known
                )));
            }
        }

        if self.audit.enabled && self.audit.path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "audit.path must be set when audit.enabled is true".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.modules.load.is_empty());
        assert_eq!(config.output.format, OutputFormat::Text);
        assert!(!config.audit.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_config() {
        let toml_str = r#"
            [modules]
            load = ["calculator"]

            [output]
            format = "json"

            [audit]
            enabled = true
            path = "/tmp/ld-agent.log"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.modules.load, vec!["calculator"]);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.audit.enabled);
        assert_eq!(config.audit.path, PathBuf::from("/tmp/ld-agent.log"));
    }

    #[test]
    fn test_invalid_module_name() {
        let mut config = Config::default();
        config.modules.load = vec!["weather".to_string()];
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_audit_needs_path() {
        let mut config = Config::default();
        config.audit.enabled = true;
        config.audit.path = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_merge_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[output]\nformat = \"json\"\n").unwrap();

        let mut config = Config::default();
        config.modules.load = vec!["minimal".to_string()];
        config.merge_from_file(&path).unwrap();

        assert_eq!(config.output.format, OutputFormat::Json);
        // Untouched sections keep earlier values
        assert_eq!(config.modules.load, vec!["minimal"]);
    }

    #[test]
    fn test_later_file_without_audit_keeps_it_enabled() {
        let temp_dir = TempDir::new().unwrap();
        let user = temp_dir.path().join("user.toml");
        let cli = temp_dir.path().join("cli.toml");
        std::fs::write(
            &user,
            "[output]\nformat = \"json\"\n\n[audit]\nenabled = true\npath = \"/tmp/a.log\"\n",
        )
        .unwrap();
        std::fs::write(&cli, "[output]\nformat = \"text\"\n").unwrap();

        let mut config = Config::default();
        config.merge_from_file(&user).unwrap();
        config.merge_from_file(&cli).unwrap();

        assert!(config.audit.enabled);
        assert_eq!(config.audit.path, PathBuf::from("/tmp/a.log"));
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn test_later_file_can_disable_audit_and_clear_modules() {
        let temp_dir = TempDir::new().unwrap();
        let user = temp_dir.path().join("user.toml");
        let cli = temp_dir.path().join("cli.toml");
        std::fs::write(&user, "[modules]\nload = [\"minimal\"]\n\n[audit]\nenabled = true\n").unwrap();
        std::fs::write(&cli, "[modules]\nload = []\n\n[audit]\nenabled = false\n").unwrap();

        let mut config = Config::default();
        config.merge_from_file(&user).unwrap();
        config.merge_from_file(&cli).unwrap();

        assert!(!config.audit.enabled);
        assert!(config.modules.load.is_empty());
    }

    #[test]
    fn test_merge_from_bad_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[output\nformat = ").unwrap();

        let mut config = Config::default();
        assert!(matches!(
            config.merge_from_file(&path),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            config.merge_from_file(&temp_dir.path().join("missing.toml")),
            Err(ConfigError::Read(_))
        ));
    }
}
