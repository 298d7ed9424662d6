//! Logic core contract
//!
//! A logic core is the behavioral model behind an element type. It is
//! created with its output signals already present, is handed its input
//! signals once, and propagates inputs to outputs on every `evaluate`.

use crate::circuit::ElementAttributes;

use super::errors::LibraryResult;
use super::signal::Signal;

/// Runnable behavioral model of one element instance
pub trait LogicCore {
    /// Connects the input wires, in pin order.
    fn set_inputs(&mut self, inputs: &[Signal]) -> LibraryResult<()>;

    /// Output wires, in pin order.
    fn outputs(&self) -> &[Signal];

    /// Reads the inputs and writes the outputs once.
    fn evaluate(&mut self) -> LibraryResult<()>;
}

/// Creates fresh logic cores for an element type
pub trait LogicCoreFactory: Send + Sync {
    fn instantiate(&self, attrs: &ElementAttributes) -> LibraryResult<Box<dyn LogicCore>>;
}

impl<F> LogicCoreFactory for F
where
    F: Fn(&ElementAttributes) -> LibraryResult<Box<dyn LogicCore>> + Send + Sync,
{
    fn instantiate(&self, attrs: &ElementAttributes) -> LibraryResult<Box<dyn LogicCore>> {
        self(attrs)
    }
}
