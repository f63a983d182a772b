//! Invocation audit log
//!
//! Appends one JSON line per operation call made through the command line.

use crate::config::AuditConfig;
use crate::plugins::{InvocationRequest, InvocationResponse, Value};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{error, warn};
use uuid::Uuid;

/// Session ID for the current process
static SESSION_ID: Lazy<String> = Lazy::new(|| Uuid::new_v4().to_string());

/// Log entry structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub session_id: String,
    /// Request ID the entry belongs to
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
    /// Module key the call was resolved against, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    pub operation: String,
    pub args: Vec<Value>,
    pub outcome: Outcome,
    pub duration_ms: u64,
}

/// Result of a logged call
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Ok { value: Value },
    Error { message: String },
}

impl From<&InvocationResponse> for Outcome {
    fn from(response: &InvocationResponse) -> Self {
        match (&response.result, &response.error) {
            (Some(value), _) if response.success => Outcome::Ok {
                value: truncate_value(value),
            },
            (_, Some(message)) => Outcome::Error {
                message: message.clone(),
            },
            _ => Outcome::Error {
                message: "no result".to_string(),
            },
        }
    }
}

/// Logger for operation calls
pub struct AuditLogger {
    config: AuditConfig,
    log_file: Option<BufWriter<File>>,
}

impl AuditLogger {
    /// Create a new audit logger
    pub fn new(config: AuditConfig) -> Self {
        let log_file = if config.enabled {
            Self::open_log_file(&config.path)
        } else {
            None
        };

        Self { config, log_file }
    }

    /// Open or create the log file
    fn open_log_file(path: &Path) -> Option<BufWriter<File>> {
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                error!("Failed to create log directory: {}", e);
                return None;
            }
        }

        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Some(BufWriter::new(file)),
            Err(e) => {
                error!("Failed to open log file {:?}: {}", path, e);
                None
            }
        }
    }

    /// Record one call and its outcome
    pub fn log_invocation(
        &mut self,
        request: &InvocationRequest,
        module: Option<&str>,
        response: &InvocationResponse,
        duration_ms: u64,
    ) {
        if !self.config.enabled {
            return;
        }

        let entry = LogEntry {
            session_id: SESSION_ID.clone(),
            request_id: request.id.clone(),
            timestamp: Utc::now(),
            module: module.map(String::from).or_else(|| request.module.clone()),
            operation: request.operation.clone(),
            args: request.args.iter().map(truncate_value).collect(),
            outcome: Outcome::from(response),
            duration_ms,
        };

        self.write_entry(&entry);
    }

    /// Write a log entry
    fn write_entry(&mut self, entry: &LogEntry) {
        if let Some(ref mut file) = self.log_file {
            match serde_json::to_string(entry) {
                Ok(json) => {
                    if let Err(e) = writeln!(file, "{}", json) {
                        error!("Failed to write log entry: {}", e);
                    }
                    if let Err(e) = file.flush() {
                        warn!("Failed to flush log file: {}", e);
                    }
                }
                Err(e) => {
                    error!("Failed to serialize log entry: {}", e);
                }
            }
        }
    }

    /// Get session ID
    pub fn session_id() -> &'static str {
        &SESSION_ID
    }
}

/// Cap long text values so a single call cannot bloat the log
fn truncate_value(value: &Value) -> Value {
    const MAX_PREVIEW: usize = 500;
    match value {
        Value::Text(s) if s.len() > MAX_PREVIEW => {
            let mut cut = MAX_PREVIEW;
            while !s.is_char_boundary(cut) {
                cut -= 1;
            }
            Value::Text(format!("{}...[truncated]", &s[..cut]))
        }
        other => other.clone(),
    }
}
