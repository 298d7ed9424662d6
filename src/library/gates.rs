//! Built-in logic cores

use crate::circuit::ElementAttributes;

use super::errors::{LibraryError, LibraryResult};
use super::logic::LogicCore;
use super::signal::{bit_mask, Signal};

/// Bitwise function of a basic gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateFunction {
    And,
    NAnd,
    Or,
    NOr,
    XOr,
    XNOr,
    Not,
}

impl GateFunction {
    /// Applies the function to the input values, masked to the bit width.
    pub fn apply(&self, values: &[u64], mask: u64) -> u64 {
        let and = || values.iter().fold(mask, |acc, v| acc & v);
        let or = || values.iter().fold(0, |acc, v| acc | v);
        let xor = || values.iter().fold(0, |acc, v| acc ^ v);
        let out = match self {
            GateFunction::And => and(),
            GateFunction::NAnd => !and(),
            GateFunction::Or => or(),
            GateFunction::NOr => !or(),
            GateFunction::XOr => xor(),
            GateFunction::XNOr => !xor(),
            GateFunction::Not => !values.first().copied().unwrap_or(0),
        };
        out & mask
    }
}

fn checked_bits(element: &str, attrs: &ElementAttributes) -> LibraryResult<u32> {
    match attrs.bits {
        1..=64 => Ok(attrs.bits),
        other => Err(LibraryError::invalid_attributes(
            element,
            format!("bit width {} outside 1..=64", other),
        )),
    }
}

fn connect(element: &str, slot: &mut Vec<Signal>, expected: usize, inputs: &[Signal]) -> LibraryResult<()> {
    if inputs.len() != expected {
        return Err(LibraryError::pin_mismatch(element, expected, inputs.len()));
    }
    *slot = inputs.to_vec();
    Ok(())
}

fn unconnected(element: &str) -> LibraryError {
    LibraryError::evaluation(element, "inputs not connected")
}

/// Core of the basic gates: N inputs, one output
pub struct GateCore {
    name: &'static str,
    function: GateFunction,
    input_count: usize,
    mask: u64,
    inputs: Vec<Signal>,
    outputs: Vec<Signal>,
}

impl GateCore {
    pub fn new(name: &'static str, function: GateFunction, attrs: &ElementAttributes) -> LibraryResult<Self> {
        let bits = checked_bits(name, attrs)?;
        let input_count = match function {
            GateFunction::Not => 1,
            _ => attrs.input_count() as usize,
        };
        if input_count == 0 {
            return Err(LibraryError::invalid_attributes(name, "gate without inputs"));
        }
        Ok(Self {
            name,
            function,
            input_count,
            mask: bit_mask(bits),
            inputs: Vec::new(),
            outputs: vec![Signal::new("out", bits)],
        })
    }
}

impl LogicCore for GateCore {
    fn set_inputs(&mut self, inputs: &[Signal]) -> LibraryResult<()> {
        connect(self.name, &mut self.inputs, self.input_count, inputs)
    }

    fn outputs(&self) -> &[Signal] {
        &self.outputs
    }

    fn evaluate(&mut self) -> LibraryResult<()> {
        if self.inputs.is_empty() {
            return Err(unconnected(self.name));
        }
        let values: Vec<u64> = self.inputs.iter().map(Signal::get).collect();
        self.outputs[0].set(self.function.apply(&values, self.mask));
        Ok(())
    }
}

/// Tri-state driver; a released output reads as zero here.
pub struct DriverCore {
    inputs: Vec<Signal>,
    outputs: Vec<Signal>,
}

impl DriverCore {
    pub fn new(attrs: &ElementAttributes) -> LibraryResult<Self> {
        let bits = checked_bits("Driver", attrs)?;
        Ok(Self {
            inputs: Vec::new(),
            outputs: vec![Signal::new("out", bits)],
        })
    }
}

impl LogicCore for DriverCore {
    fn set_inputs(&mut self, inputs: &[Signal]) -> LibraryResult<()> {
        connect("Driver", &mut self.inputs, 2, inputs)
    }

    fn outputs(&self) -> &[Signal] {
        &self.outputs
    }

    fn evaluate(&mut self) -> LibraryResult<()> {
        let [data, sel] = self.inputs.as_slice() else {
            return Err(unconnected("Driver"));
        };
        self.outputs[0].set(if sel.get_bool() { data.get() } else { 0 });
        Ok(())
    }
}

/// Multiplexer: selector first, then `2^selector_bits` data inputs
pub struct MultiplexerCore {
    selector_bits: u32,
    inputs: Vec<Signal>,
    outputs: Vec<Signal>,
}

impl MultiplexerCore {
    pub fn new(attrs: &ElementAttributes) -> LibraryResult<Self> {
        let bits = checked_bits("Multiplexer", attrs)?;
        let selector_bits = selector_bits(attrs)?;
        Ok(Self {
            selector_bits,
            inputs: Vec::new(),
            outputs: vec![Signal::new("out", bits)],
        })
    }
}

/// Selector width of a multiplexer, 1 when not given
pub fn selector_bits(attrs: &ElementAttributes) -> LibraryResult<u32> {
    match attrs.get_u64("selector_bits").unwrap_or(1) {
        n @ 1..=4 => Ok(n as u32),
        n => Err(LibraryError::invalid_attributes(
            "Multiplexer",
            format!("selector width {} outside 1..=4", n),
        )),
    }
}

impl LogicCore for MultiplexerCore {
    fn set_inputs(&mut self, inputs: &[Signal]) -> LibraryResult<()> {
        let expected = 1 + (1usize << self.selector_bits);
        connect("Multiplexer", &mut self.inputs, expected, inputs)
    }

    fn outputs(&self) -> &[Signal] {
        &self.outputs
    }

    fn evaluate(&mut self) -> LibraryResult<()> {
        let Some((sel, data)) = self.inputs.split_first() else {
            return Err(unconnected("Multiplexer"));
        };
        let chosen = data
            .get(sel.get() as usize)
            .ok_or_else(|| LibraryError::evaluation("Multiplexer", "selector out of range"))?;
        self.outputs[0].set(chosen.get());
        Ok(())
    }
}

/// Rising-edge D flip-flop with `Q` and `~Q`
pub struct FlipflopDCore {
    inputs: Vec<Signal>,
    outputs: Vec<Signal>,
    last_clock: bool,
    state: u64,
}

impl FlipflopDCore {
    pub fn new(attrs: &ElementAttributes) -> LibraryResult<Self> {
        let bits = checked_bits("D_FF", attrs)?;
        Ok(Self {
            inputs: Vec::new(),
            outputs: vec![Signal::new("Q", bits), Signal::new("~Q", bits)],
            last_clock: false,
            state: 0,
        })
    }
}

impl LogicCore for FlipflopDCore {
    fn set_inputs(&mut self, inputs: &[Signal]) -> LibraryResult<()> {
        connect("D_FF", &mut self.inputs, 2, inputs)
    }

    fn outputs(&self) -> &[Signal] {
        &self.outputs
    }

    fn evaluate(&mut self) -> LibraryResult<()> {
        let [d, clock] = self.inputs.as_slice() else {
            return Err(unconnected("D_FF"));
        };
        let clock = clock.get_bool();
        if clock && !self.last_clock {
            self.state = d.get();
        }
        self.last_clock = clock;
        self.outputs[0].set(self.state);
        self.outputs[1].set(!self.state);
        Ok(())
    }
}
