//! CLI module for gateinsight
//!
//! Provides command-line access to:
//! - explain: explanatory circuit of one gate
//! - classify: canonical index and table entry of one gate
//! - table: the two-input template table
//! - verify: eager check of every template the library may load

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, GateArgs};
pub use commands::{classify, explain, load_config, run, run_command, table, verify, Outcome};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_error, write_none, write_response};
