//! Behavior classifier for two-input, one-bit gates
//!
//! The gate's logic core is driven through all four input rows and the
//! output bits are packed into a [`CanonicalIndex`]. Inputs marked inverted
//! at the gate are corrected before they reach the core, so the index
//! describes what the placed gate does, inverters included.

use std::fmt;

use crate::circuit::VisualElement;
use crate::library::{ElementLibrary, Signal};
use crate::observability::{log_event, Event, Severity};

use super::errors::InsightResult;

/// Truth table of a two-input, one-bit function.
///
/// Bit `i` is the output for `in1 = bit 1 of i`, `in2 = bit 0 of i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalIndex(u8);

impl CanonicalIndex {
    /// Number of distinct indices
    pub const COUNT: usize = 16;

    pub const fn new(value: u8) -> Option<Self> {
        if (value as usize) < Self::COUNT {
            Some(Self(value))
        } else {
            None
        }
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    /// Output of the function for one input row
    pub fn output(self, in1: bool, in2: bool) -> bool {
        let row = (u8::from(in1) << 1) | u8::from(in2);
        (self.0 >> row) & 1 == 1
    }

    /// The same function with its two inputs exchanged
    pub fn swapped(self) -> Self {
        let rows_kept = self.0 & 0b1001;
        let row1 = (self.0 >> 1) & 1;
        let row2 = (self.0 >> 2) & 1;
        Self(rows_kept | (row1 << 2) | (row2 << 1))
    }

    pub fn all() -> impl Iterator<Item = CanonicalIndex> {
        (0..Self::COUNT as u8).map(CanonicalIndex)
    }
}

impl fmt::Display for CanonicalIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06b}", self.0)
    }
}

/// Classifies `element` by behavior, or `None` when it can't be classified.
///
/// Never fails: unsupported shapes and logic core errors both end up as
/// `None`.
pub fn classify(element: &VisualElement, library: &ElementLibrary) -> Option<CanonicalIndex> {
    let reason = match try_classify(element, library) {
        Ok(Some(index)) => return Some(index),
        Ok(None) => "unsupported shape".to_string(),
        Err(e) => e.to_string(),
    };
    library.metrics().record_classification_aborted();
    log_event(
        Event::ClassificationAborted,
        Severity::Trace,
        &[("gate", &element.name), ("reason", &reason)],
    );
    None
}

fn try_classify(element: &VisualElement, library: &ElementLibrary) -> InsightResult<Option<CanonicalIndex>> {
    let attrs = &element.attributes;
    if attrs.input_count() != 2 || attrs.bits != 1 {
        return Ok(None);
    }

    let factory = library.get_logic_core_factory(&element.name)?;
    let pins = library.get_input_pin_descriptions(&element.name, attrs)?;
    let [pin1, pin2] = pins.as_slice() else {
        return Ok(None);
    };

    let mut core = factory.instantiate(attrs)?;
    let out = match core.outputs() {
        [out] => out.clone(),
        _ => return Ok(None),
    };

    let in1 = Signal::new(pin1.name(), 1);
    let in2 = Signal::new(pin2.name(), 1);
    core.set_inputs(&[in1.clone(), in2.clone()])?;

    let inverted = &attrs.inverter_config;
    let invert1 = inverted.contains(in1.name());
    let invert2 = inverted.contains(in2.name());

    let mut index = 0u8;
    for row in 0..4u8 {
        let bit1 = (row >> 1) & 1 == 1;
        let bit0 = row & 1 == 1;
        in1.set_bool(bit1 ^ invert1);
        in2.set_bool(bit0 ^ invert2);
        core.evaluate()?;
        if out.get() == 1 {
            index |= 1 << row;
        }
    }
    Ok(CanonicalIndex::new(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::ElementAttributes;
    use crate::library::{
        names, ElementTypeDescription, InputPins, LibraryError, LibraryResult, LogicCore,
    };

    /// Core driven by a programmable truth table
    struct TableCore {
        table: u8,
        inputs: Vec<Signal>,
        outputs: Vec<Signal>,
    }

    impl LogicCore for TableCore {
        fn set_inputs(&mut self, inputs: &[Signal]) -> LibraryResult<()> {
            self.inputs = inputs.to_vec();
            Ok(())
        }

        fn outputs(&self) -> &[Signal] {
            &self.outputs
        }

        fn evaluate(&mut self) -> LibraryResult<()> {
            let row = (self.inputs[0].get() << 1) | self.inputs[1].get();
            self.outputs[0].set(u64::from(self.table >> row) & 1);
            Ok(())
        }
    }

    fn table_type(name: &str, table: u8) -> ElementTypeDescription {
        ElementTypeDescription::new(
            name,
            InputPins::Numbered("In_"),
            move |_: &ElementAttributes| -> LibraryResult<Box<dyn LogicCore>> {
                Ok(Box::new(TableCore {
                    table,
                    inputs: Vec::new(),
                    outputs: vec![Signal::new("out", 1)],
                }))
            },
        )
    }

    fn gate(name: &str, attrs: ElementAttributes) -> VisualElement {
        VisualElement::new(name).with_attributes(attrs)
    }

    #[test]
    fn test_every_truth_table_classifies_to_itself() {
        let mut library = ElementLibrary::new();
        for table in 0..16u8 {
            library.register(table_type(&format!("T{}", table), table)).unwrap();
        }
        for table in 0..16u8 {
            let element = gate(&format!("T{}", table), ElementAttributes::new());
            assert_eq!(classify(&element, &library), CanonicalIndex::new(table));
        }
    }

    #[test]
    fn test_builtin_and_is_index_8() {
        let library = ElementLibrary::new();
        let and = gate(names::AND, ElementAttributes::new());
        assert_eq!(classify(&and, &library).map(CanonicalIndex::value), Some(0b1000));
    }

    #[test]
    fn test_inverted_inputs_are_corrected_before_evaluation() {
        let library = ElementLibrary::new();

        let and_inv1 = gate(names::AND, ElementAttributes::new().with_inverted("In_1"));
        assert_eq!(classify(&and_inv1, &library).map(CanonicalIndex::value), Some(0b0010));

        let and_inv2 = gate(names::AND, ElementAttributes::new().with_inverted("In_2"));
        assert_eq!(classify(&and_inv2, &library).map(CanonicalIndex::value), Some(0b0100));

        // De Morgan: NOT a AND NOT b == NOR
        let and_inv_both = gate(
            names::AND,
            ElementAttributes::new().with_inverted("In_1").with_inverted("In_2"),
        );
        let nor = gate(names::NOR, ElementAttributes::new());
        assert_eq!(classify(&and_inv_both, &library), classify(&nor, &library));

        // NOT a OR NOT b == NAND
        let or_inv_both = gate(
            names::OR,
            ElementAttributes::new().with_inverted("In_1").with_inverted("In_2"),
        );
        let nand = gate(names::NAND, ElementAttributes::new());
        assert_eq!(classify(&or_inv_both, &library), classify(&nand, &library));
    }

    #[test]
    fn test_unrelated_inversion_is_ignored() {
        let library = ElementLibrary::new();
        let xor = gate(names::XOR, ElementAttributes::new().with_inverted("out"));
        assert_eq!(classify(&xor, &library).map(CanonicalIndex::value), Some(0b0110));
    }

    #[test]
    fn test_wrong_shape_is_not_classified() {
        let library = ElementLibrary::new();
        assert_eq!(classify(&gate(names::AND, ElementAttributes::new().with_inputs(3)), &library), None);
        assert_eq!(classify(&gate(names::AND, ElementAttributes::new().with_bits(2)), &library), None);
        // two inputs but two outputs
        assert_eq!(classify(&gate(names::D_FF, ElementAttributes::new()), &library), None);
        // three input pins
        assert_eq!(classify(&gate(names::MULTIPLEXER, ElementAttributes::new()), &library), None);
    }

    #[test]
    fn test_unknown_type_is_not_classified() {
        let library = ElementLibrary::new();
        assert_eq!(classify(&gate("Flux", ElementAttributes::new()), &library), None);
        assert!(library.metrics().snapshot().classifications_aborted >= 1);
    }

    #[test]
    fn test_failing_core_is_not_classified() {
        struct Broken(Vec<Signal>);
        impl LogicCore for Broken {
            fn set_inputs(&mut self, _: &[Signal]) -> LibraryResult<()> {
                Ok(())
            }
            fn outputs(&self) -> &[Signal] {
                &self.0
            }
            fn evaluate(&mut self) -> LibraryResult<()> {
                Err(LibraryError::evaluation("Broken", "always fails"))
            }
        }

        let mut library = ElementLibrary::new();
        library
            .register(ElementTypeDescription::new(
                "Broken",
                InputPins::Numbered("In_"),
                |_: &ElementAttributes| -> LibraryResult<Box<dyn LogicCore>> {
                    Ok(Box::new(Broken(vec![Signal::new("out", 1)])))
                },
            ))
            .unwrap();
        assert_eq!(classify(&gate("Broken", ElementAttributes::new()), &library), None);
    }

    #[test]
    fn test_index_helpers() {
        let and = CanonicalIndex::new(0b1000).unwrap();
        assert!(and.output(true, true));
        assert!(!and.output(true, false));
        assert_eq!(and.swapped(), and);

        let a_and_not_b = CanonicalIndex::new(0b0100).unwrap();
        assert_eq!(a_and_not_b.swapped().value(), 0b0010);
        assert!(CanonicalIndex::new(16).is_none());
        assert_eq!(CanonicalIndex::all().count(), 16);
        assert_eq!(and.to_string(), "0b1000");
    }

    #[test]
    fn test_swapped_is_an_involution() {
        for index in CanonicalIndex::all() {
            assert_eq!(index.swapped().swapped(), index);
        }
    }
}
