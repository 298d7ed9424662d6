//! JSON output for the CLI
//!
//! One JSON object per invocation on stdout, with a `status` of `ok`,
//! `none` or `error`.

use std::io::{self, Write};

use serde_json::Value;

use super::errors::CliResult;

fn write_value(response: &Value) -> CliResult<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, response)?;
    writeln!(stdout)?;
    stdout.flush()?;
    Ok(())
}

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    write_value(&serde_json::json!({
        "status": "ok",
        "data": data
    }))
}

/// Write a "no insight" response to stdout
pub fn write_none(gate: &str) -> CliResult<()> {
    write_value(&serde_json::json!({
        "status": "none",
        "gate": gate
    }))
}

/// Write an error response to stdout
pub fn write_error(code: &str, message: &str) -> CliResult<()> {
    write_value(&serde_json::json!({
        "status": "error",
        "code": code,
        "message": message
    }))
}
