//! Element library
//!
//! The registry of element types the editor places, each backed by a logic
//! core factory, plus the signal harness used to drive those cores outside
//! a full simulation.

mod builtin;
mod errors;
mod gates;
mod library;
mod logic;
mod signal;

pub use builtin::names;
pub use errors::{LibraryError, LibraryResult};
pub use gates::{DriverCore, FlipflopDCore, GateCore, GateFunction, MultiplexerCore};
pub use library::{ElementLibrary, ElementTypeDescription, InputPins, PinDescription};
pub use logic::{LogicCore, LogicCoreFactory};
pub use signal::{bit_mask, Signal};
