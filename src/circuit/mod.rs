//! Circuit graph consumed and produced by the insight pipeline
//!
//! A circuit is a flat list of placed elements plus straight wires between
//! grid points. Connectivity is positional: a wire end touching a pin
//! position connects it. Templates are stored as JSON documents of this
//! shape.

mod element;
mod errors;
mod graph;
mod types;

pub use element::{ElementAttributes, InverterConfig, VisualElement, DEFAULT_INPUT_COUNT};
pub use errors::{CircuitError, CircuitResult};
pub use graph::{Circuit, ElementId, CIRCUIT_VERSION};
pub use types::{Vector, Wire};
