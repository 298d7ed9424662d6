//! gateinsight - explanatory circuits for logic gates
//!
//! Resolves a placed gate to a pre-authored circuit that explains what it
//! does, classifying generic two-input gates by their simulated behavior.

pub mod circuit;
pub mod cli;
pub mod config;
pub mod insight;
pub mod library;
pub mod observability;

pub use insight::create_explanatory_circuit;
