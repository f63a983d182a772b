//! ld-agent-examples - command-line front end for the example modules
//!
//! Loads the configured modules and lists, describes or invokes their
//! operations.

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::time::Instant;
use tracing::{debug, info};

mod cli;

use cli::{Args, Command};
use ld_agent_examples::config::{Config, OutputFormat};
use ld_agent_examples::error::LookupError;
use ld_agent_examples::logging::AuditLogger;
use ld_agent_examples::plugins::{InvocationRequest, ModuleCatalog, Value};

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.debug);

    info!("Starting ld-agent-examples v{}", env!("CARGO_PKG_VERSION"));

    let mut config =
        Config::load(args.config.as_deref()).context("Failed to load configuration")?;
    if let Some(format) = args.format {
        config.output.format = format;
    }

    let catalog = ModuleCatalog::load(&config.modules).context("Failed to initialize modules")?;
    debug!("{} module(s) loaded", catalog.len());

    match args.command {
        Command::List => list(&catalog, config.output.format),
        Command::Describe { module } => describe(&catalog, &module, config.output.format),
        Command::Tools => tools(&catalog),
        Command::Call {
            operation,
            args,
            module,
        } => call(&catalog, &config, &operation, &args, module.as_deref()),
    }
}

fn list(catalog: &ModuleCatalog, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let listing: Vec<serde_json::Value> = catalog
                .modules()
                .map(|(key, module)| {
                    serde_json::json!({
                        "module": key,
                        "name": module.descriptor().name,
                        "version": module.descriptor().version,
                        "operations": module.registry().names(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&listing)?);
        }
        OutputFormat::Text => {
            for (key, module) in catalog.modules() {
                let d = module.descriptor();
                println!("{} ({} v{})", key, d.name, d.version);
                for entry in module.registry() {
                    println!(
                        "  {:<18} {:<36} {}",
                        entry.name(),
                        entry.signature().to_string(),
                        entry.description()
                    );
                }
            }
        }
    }
    Ok(())
}

fn describe(catalog: &ModuleCatalog, key: &str, format: OutputFormat) -> Result<()> {
    let module = catalog
        .get_module(key)
        .ok_or_else(|| LookupError::UnknownModule(key.to_string()))?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(module.descriptor())?)
        }
        OutputFormat::Text => print!("{}", module.descriptor().format_summary()),
    }
    Ok(())
}

fn tools(catalog: &ModuleCatalog) -> Result<()> {
    let listing: serde_json::Map<String, serde_json::Value> = catalog
        .definitions()
        .into_iter()
        .map(|(key, defs)| serde_json::to_value(defs).map(|v| (key.to_string(), v)))
        .collect::<Result<_, serde_json::Error>>()?;
    println!("{}", serde_json::to_string_pretty(&listing)?);
    Ok(())
}

fn call(
    catalog: &ModuleCatalog,
    config: &Config,
    operation: &str,
    raw_args: &[String],
    module: Option<&str>,
) -> Result<()> {
    let values: Vec<Value> = raw_args.iter().map(|a| Value::parse(a)).collect();
    let mut request = InvocationRequest::new(operation, values);
    if let Some(module) = module {
        request = request.in_module(module);
    }

    let resolved = catalog
        .resolve(request.module.as_deref(), &request.operation)
        .ok()
        .map(|(key, _)| key);

    let start = Instant::now();
    let response = catalog.invoke(&request);
    let elapsed = start.elapsed().as_millis() as u64;

    let mut audit = AuditLogger::new(config.audit.clone());
    audit.log_invocation(&request, resolved, &response, elapsed);

    if config.output.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    }

    match (response.result, response.error) {
        (Some(value), _) if response.success => {
            if config.output.format == OutputFormat::Text {
                println!("{}", value);
            }
            Ok(())
        }
        (_, Some(message)) => bail!("{}: {}", operation, message),
        _ => bail!("{}: no result", operation),
    }
}

/// Initialize the logging/tracing subsystem
fn init_logging(debug: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
