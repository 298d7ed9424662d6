//! CLI argument definitions using clap
//!
//! Commands:
//! - gateinsight explain --gate <type> [--inputs N] [--bits B] [--invert PIN]...
//! - gateinsight classify --gate <type> [...]
//! - gateinsight table
//! - gateinsight verify
//!
//! Every command accepts `--config <path>`.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::circuit::{ElementAttributes, VisualElement};

/// gateinsight - explanatory circuits for logic gates
#[derive(Parser, Debug)]
#[command(name = "gateinsight")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the explanatory circuit of a gate
    Explain(GateArgs),

    /// Print the canonical index and template of a two-input gate
    Classify(GateArgs),

    /// Print the two-input template table
    Table,

    /// Load and check every template the library may use
    Verify,
}

/// A gate described on the command line
#[derive(Args, Debug, Clone)]
pub struct GateArgs {
    /// Element type name, e.g. And, NOr, D_FF
    #[arg(long)]
    pub gate: String,

    /// Number of inputs
    #[arg(long, default_value_t = 2)]
    pub inputs: u32,

    /// Data bit width
    #[arg(long, default_value_t = 1)]
    pub bits: u32,

    /// Inverted input pin (repeatable)
    #[arg(long = "invert")]
    pub invert: Vec<String>,

    /// Element label
    #[arg(long)]
    pub label: Option<String>,

    /// Selector width of a multiplexer
    #[arg(long)]
    pub selector_bits: Option<u64>,
}

impl GateArgs {
    /// The placed element these arguments describe
    pub fn to_element(&self) -> VisualElement {
        let mut attrs = ElementAttributes::new()
            .with_inputs(self.inputs)
            .with_bits(self.bits);
        for pin in &self.invert {
            attrs = attrs.with_inverted(pin.as_str());
        }
        if let Some(label) = &self.label {
            attrs = attrs.with_label(label.as_str());
        }
        if let Some(selector_bits) = self.selector_bits {
            attrs = attrs.with_extra("selector_bits", selector_bits);
        }
        VisualElement::new(self.gate.as_str()).with_attributes(attrs)
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
