//! Structural edits applied to a freshly loaded template
//!
//! Both edits work on the caller's private copy. When both apply, the swap
//! runs first so inverters are placed by the final labels.

use crate::circuit::{Circuit, ElementAttributes, InverterConfig, Vector, VisualElement, Wire};
use crate::library::names;

use super::errors::{InsightError, InsightResult};

/// Exchanges the labels of the template's two inputs.
///
/// Positions and wiring stay as authored. A template with any other number
/// of inputs can't be swapped and is reported as a fatal fault.
pub fn swap_inputs(circuit: &mut Circuit) -> InsightResult<()> {
    let inputs = circuit.elements_named(names::IN);
    let [first, second] = inputs.as_slice() else {
        return Err(InsightError::SwapInputCount { found: inputs.len() });
    };
    let label1 = circuit.label(*first).unwrap_or_default().to_string();
    let label2 = circuit.label(*second).unwrap_or_default().to_string();
    circuit.set_label(*first, label2);
    circuit.set_label(*second, label1);
    Ok(())
}

fn is_input(element: &VisualElement) -> bool {
    element.is(names::IN) || element.is(names::CLOCK)
}

/// Attribute on an inserted inverter naming the input it inverts
pub const INVERTS_ATTR: &str = "inverts";

/// Puts an inverter ahead of every input or clock whose label is inverted
/// in `inverted`. Returns the number of inverters inserted.
///
/// For an input at `p` the input moves to `p - 3·unit` (along x), the
/// inverter is placed at `p - 2·unit` and a wire joins the two. Inserted
/// inverters carry the [`INVERTS_ATTR`] attribute; finding one for a
/// matching input means the edit was applied before, which is reported as a
/// fatal fault. A position pushed out of the grid's range makes the template
/// malformed. Nothing is changed on error.
pub fn invert_inputs(circuit: &mut Circuit, inverted: &InverterConfig, unit: i32) -> InsightResult<usize> {
    if inverted.is_empty() {
        return Ok(0);
    }

    let targets = circuit.find_elements(|e| is_input(e) && inverted.contains(e.label()));
    let mut placements = Vec::with_capacity(targets.len());
    for &id in &targets {
        let Some(input) = circuit.element(id) else {
            continue;
        };
        let label = input.label();
        if circuit.elements().iter().any(|e| inverts(e) == Some(label)) {
            return Err(InsightError::DuplicateInverter {
                label: label.to_string(),
            });
        }
        let (moved, inverter) = upstream(input.pos, unit).ok_or_else(|| {
            InsightError::malformed(
                label,
                format!("input at {} can't move {} units upstream", input.pos, 3 * i64::from(unit)),
            )
        })?;
        placements.push((id, label.to_string(), input.attributes.bits, moved, inverter));
    }

    let inserted = placements.len();
    for (id, label, bits, moved, inverter) in placements {
        if let Some(input) = circuit.element_mut(id) {
            input.pos = moved;
        }
        circuit.add_element(
            VisualElement::new(names::NOT)
                .at(inverter)
                .with_attributes(ElementAttributes::new().with_bits(bits).with_extra(INVERTS_ATTR, label)),
        );
        circuit.add_wire(Wire::new(moved, inverter));
    }
    Ok(inserted)
}

/// Label of the input an inserted inverter belongs to
fn inverts(element: &VisualElement) -> Option<&str> {
    if !element.is(names::NOT) {
        return None;
    }
    element.attributes.get(INVERTS_ATTR).and_then(|v| v.as_str())
}

/// Moved input and inverter position for an input at `pos`
fn upstream(pos: Vector, unit: i32) -> Option<(Vector, Vector)> {
    let moved = pos.checked_shift_x(unit.checked_mul(3)?.checked_neg()?)?;
    let inverter = pos.checked_shift_x(unit.checked_mul(2)?.checked_neg()?)?;
    Some((moved, inverter))
}

/// The edits one template needs
#[derive(Debug, Clone, Copy, Default)]
pub struct PostProcess<'a> {
    swap: bool,
    inverted: Option<&'a InverterConfig>,
}

impl<'a> PostProcess<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn swap(mut self, swap: bool) -> Self {
        self.swap = swap;
        self
    }

    pub fn invert(mut self, inverted: &'a InverterConfig) -> Self {
        self.inverted = Some(inverted);
        self
    }

    /// Applies swap, then inverter insertion.
    pub fn apply(&self, circuit: &mut Circuit, unit: i32) -> InsightResult<()> {
        if self.swap {
            swap_inputs(circuit)?;
        }
        if let Some(inverted) = self.inverted {
            invert_inputs(circuit, inverted, unit)?;
        }
        Ok(())
    }
}
