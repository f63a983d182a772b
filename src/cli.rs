//! Command-line argument parsing for ld-agent-examples

use clap::{Parser, Subcommand};
use ld_agent_examples::config::OutputFormat;
use std::path::PathBuf;

/// ld-agent-examples - inspect and call the example ld-agent modules
#[derive(Parser, Debug)]
#[command(name = "ld-agent-examples")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Output format (overrides configuration)
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List modules and their operations
    List,

    /// Show a module's descriptor
    Describe {
        /// Module short name (e.g. calculator)
        module: String,
    },

    /// Print tool definitions for every loaded operation as JSON
    Tools,

    /// Invoke an operation
    Call {
        /// Operation name (e.g. add_numbers)
        operation: String,

        /// Positional arguments; numbers are parsed as floats, anything else is text
        #[arg(value_name = "ARGS", allow_negative_numbers = true)]
        args: Vec<String>,

        /// Only look in this module
        #[arg(short, long, value_name = "MODULE")]
        module: Option<String>,
    },
}
