//! Signal harness
//!
//! A `Signal` is a named wire holding one value of a fixed bit width. Clones
//! share the wire: a value set through one handle is read through every
//! other. This is enough to drive a logic core without a simulation model.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

/// Bit mask for a value of `bits` width
pub fn bit_mask(bits: u32) -> u64 {
    if bits >= 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// Shared handle to a single wire
#[derive(Clone)]
pub struct Signal {
    name: Arc<str>,
    bits: u32,
    value: Rc<Cell<u64>>,
}

impl Signal {
    /// Creates a wire driven low
    pub fn new(name: &str, bits: u32) -> Self {
        Self {
            name: Arc::from(name),
            bits,
            value: Rc::new(Cell::new(0)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// Drives the wire; bits above the width are dropped.
    pub fn set(&self, value: u64) {
        self.value.set(value & bit_mask(self.bits));
    }

    pub fn set_bool(&self, value: bool) {
        self.set(u64::from(value));
    }

    pub fn get(&self) -> u64 {
        self.value.get()
    }

    /// True if the lowest bit is set
    pub fn get_bool(&self) -> bool {
        self.get() & 1 == 1
    }

    /// True if both handles refer to the same wire
    pub fn same_wire(&self, other: &Signal) -> bool {
        Rc::ptr_eq(&self.value, &other.value)
    }
}

impl fmt::Debug for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("name", &self.name)
            .field("bits", &self.bits)
            .field("value", &self.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_value() {
        let a = Signal::new("In_1", 1);
        let b = a.clone();
        a.set(1);
        assert_eq!(b.get(), 1);
        assert!(a.same_wire(&b));
        assert!(!a.same_wire(&Signal::new("In_1", 1)));
    }

    #[test]
    fn test_value_is_masked() {
        let s = Signal::new("x", 4);
        s.set(0x1f);
        assert_eq!(s.get(), 0xf);
        let one = Signal::new("y", 1);
        one.set(2);
        assert!(!one.get_bool());
    }

    #[test]
    fn test_bit_mask() {
        assert_eq!(bit_mask(1), 1);
        assert_eq!(bit_mask(8), 0xff);
        assert_eq!(bit_mask(64), u64::MAX);
    }
}
