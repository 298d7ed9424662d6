//! Built-in element types and the insights attached to them

use crate::circuit::ElementAttributes;
use crate::insight::{all_of, condition, one_bit, InsightDispatch, TwoInputGateInsight};

use super::errors::LibraryResult;
use super::gates::{DriverCore, FlipflopDCore, GateCore, GateFunction, MultiplexerCore};
use super::library::{ElementTypeDescription, InputPins};
use super::logic::LogicCore;

/// Element type names
pub mod names {
    pub const AND: &str = "And";
    pub const NAND: &str = "NAnd";
    pub const OR: &str = "Or";
    pub const NOR: &str = "NOr";
    pub const XOR: &str = "XOr";
    pub const XNOR: &str = "XNOr";
    pub const NOT: &str = "Not";
    pub const DRIVER: &str = "Driver";
    pub const MULTIPLEXER: &str = "Multiplexer";
    pub const D_FF: &str = "D_FF";

    /// Circuit input; only appears inside circuits
    pub const IN: &str = "In";
    /// Clock input; only appears inside circuits
    pub const CLOCK: &str = "Clock";
    /// Circuit output; only appears inside circuits
    pub const OUT: &str = "Out";
}

type Core = LibraryResult<Box<dyn LogicCore>>;

fn and_core(attrs: &ElementAttributes) -> Core {
    Ok(Box::new(GateCore::new(names::AND, GateFunction::And, attrs)?))
}

fn nand_core(attrs: &ElementAttributes) -> Core {
    Ok(Box::new(GateCore::new(names::NAND, GateFunction::NAnd, attrs)?))
}

fn or_core(attrs: &ElementAttributes) -> Core {
    Ok(Box::new(GateCore::new(names::OR, GateFunction::Or, attrs)?))
}

fn nor_core(attrs: &ElementAttributes) -> Core {
    Ok(Box::new(GateCore::new(names::NOR, GateFunction::NOr, attrs)?))
}

fn xor_core(attrs: &ElementAttributes) -> Core {
    Ok(Box::new(GateCore::new(names::XOR, GateFunction::XOr, attrs)?))
}

fn xnor_core(attrs: &ElementAttributes) -> Core {
    Ok(Box::new(GateCore::new(names::XNOR, GateFunction::XNOr, attrs)?))
}

fn not_core(attrs: &ElementAttributes) -> Core {
    Ok(Box::new(GateCore::new(names::NOT, GateFunction::Not, attrs)?))
}

fn driver_core(attrs: &ElementAttributes) -> Core {
    Ok(Box::new(DriverCore::new(attrs)?))
}

fn multiplexer_core(attrs: &ElementAttributes) -> Core {
    Ok(Box::new(MultiplexerCore::new(attrs)?))
}

fn flipflop_d_core(attrs: &ElementAttributes) -> Core {
    Ok(Box::new(FlipflopDCore::new(attrs)?))
}

fn basic_gate(name: &str, factory: fn(&ElementAttributes) -> Core) -> ElementTypeDescription {
    ElementTypeDescription::new(name, InputPins::Numbered("In_"), factory).with_insight(TwoInputGateInsight)
}

/// Every built-in type, insights attached
pub fn descriptions() -> Vec<ElementTypeDescription> {
    let single_selector = condition(|attrs| attrs.get_u64("selector_bits").unwrap_or(1) == 1);

    vec![
        basic_gate(names::AND, and_core),
        basic_gate(names::NAND, nand_core),
        basic_gate(names::OR, or_core),
        basic_gate(names::NOR, nor_core),
        basic_gate(names::XOR, xor_core),
        basic_gate(names::XNOR, xnor_core),
        ElementTypeDescription::new(names::NOT, InputPins::fixed(["in"]), not_core)
            .with_insight(InsightDispatch::new().add_template("not.json", Some(one_bit()))),
        ElementTypeDescription::new(names::DRIVER, InputPins::fixed(["in", "sel"]), driver_core)
            .with_insight(InsightDispatch::new().add_template("driver.json", Some(one_bit()))),
        ElementTypeDescription::new(names::MULTIPLEXER, InputPins::Selector, multiplexer_core)
            .with_insight(
                InsightDispatch::new()
                    .add_template("mux.json", Some(all_of(vec![one_bit(), single_selector]))),
            ),
        ElementTypeDescription::new(names::D_FF, InputPins::fixed(["D", "C"]), flipflop_d_core)
            .with_insight(InsightDispatch::new().add_template("dff.json", Some(one_bit()))),
    ]
}
