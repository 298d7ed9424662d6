//! CLI command implementations
//!
//! Each command builds its answer as a JSON value; `run_command` does the
//! writing so the commands themselves stay testable.

use std::path::Path;

use serde::Serialize;
use serde_json::{json, Value};

use crate::config::InsightConfig;
use crate::insight::{self, entries, lookup};
use crate::library::ElementLibrary;

use super::args::{Command, GateArgs};
use super::errors::{CliError, CliResult};
use super::io::{write_error, write_none, write_response};

/// Result of a command
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Response payload
    Data(Value),
    /// No insight exists for the named gate
    None(String),
}

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.config.as_deref(), cli.command)
}

/// Run the appropriate command and write its response
pub fn run_command(config_path: Option<&Path>, cmd: Command) -> CliResult<()> {
    let result = load_config(config_path).and_then(|config| {
        let library = ElementLibrary::with_config(&config);
        match cmd {
            Command::Explain(gate) => explain(&library, &gate),
            Command::Classify(gate) => Ok(classify(&library, &gate)),
            Command::Table => Ok(table()),
            Command::Verify => verify(&library),
        }
    });

    match result {
        Ok(Outcome::Data(data)) => write_response(data),
        Ok(Outcome::None(gate)) => write_none(&gate),
        Err(e) => {
            write_error(e.code_str(), e.message())?;
            Err(e)
        }
    }
}

/// Configuration from `path`, or the defaults. Applies the log level.
pub fn load_config(path: Option<&Path>) -> CliResult<InsightConfig> {
    let config = match path {
        Some(path) => InsightConfig::load(path)?,
        None => InsightConfig::default(),
    };
    config.apply_logging()?;
    Ok(config)
}

/// Explanatory circuit of the gate
pub fn explain(library: &ElementLibrary, gate: &GateArgs) -> CliResult<Outcome> {
    let element = gate.to_element();
    match insight::create_explanatory_circuit(&element, library) {
        Some(circuit) => Ok(Outcome::Data(encode(&circuit)?)),
        None => Ok(Outcome::None(element.name)),
    }
}

fn encode<T: Serialize>(value: &T) -> CliResult<Value> {
    serde_json::to_value(value).map_err(|e| CliError::io_error(format!("Failed to encode response: {}", e)))
}

/// Canonical index and template table entry of the gate
pub fn classify(library: &ElementLibrary, gate: &GateArgs) -> Outcome {
    let element = gate.to_element();
    let Some(index) = insight::classify(&element, library) else {
        return Outcome::None(element.name);
    };
    Outcome::Data(json!({
        "gate": element.name,
        "index": index.value(),
        "binary": index.to_string(),
        "template": lookup(index).map(|entry| entry.resource_path()),
        "swap_inputs": lookup(index).map(|entry| entry.swap_inputs),
    }))
}

/// The whole two-input template table
pub fn table() -> Outcome {
    let rows: Vec<Value> = entries()
        .map(|(index, entry)| {
            json!({
                "index": index.value(),
                "binary": index.to_string(),
                "template": entry.map(|e| e.resource_path()),
                "swap_inputs": entry.map(|e| e.swap_inputs),
            })
        })
        .collect();
    Outcome::Data(Value::Array(rows))
}

/// Loads every template the library may use; fails on the first fault.
pub fn verify(library: &ElementLibrary) -> CliResult<Outcome> {
    let verified = insight::verify_templates(library)?;
    Ok(Outcome::Data(json!({
        "verified": verified.len(),
        "templates": encode(&verified)?,
    })))
}
