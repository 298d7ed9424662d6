//! Insight for generic two-input gates
//!
//! The gate's type is ignored. Its behavior is classified by simulation and
//! the resulting canonical index picks the template. Inverted inputs are
//! already folded into the index, so no inverters are inserted here.

use crate::circuit::{Circuit, VisualElement};
use crate::library::ElementLibrary;

use super::classifier::classify;
use super::errors::InsightResult;
use super::postprocess::PostProcess;
use super::resolver::{InsightFactory, TemplateRef};
use super::table::{entries, lookup};

/// Classify, look up, load, swap if needed
#[derive(Debug, Clone, Copy, Default)]
pub struct TwoInputGateInsight;

impl InsightFactory for TwoInputGateInsight {
    fn create_insight(&self, element: &VisualElement, library: &ElementLibrary) -> InsightResult<Option<Circuit>> {
        let Some(index) = classify(element, library) else {
            return Ok(None);
        };
        let Some(entry) = lookup(index) else {
            return Ok(None);
        };

        let mut circuit = library.templates().load(&entry.resource_path())?;
        PostProcess::new()
            .swap(entry.swap_inputs)
            .apply(&mut circuit, library.layout_unit())?;
        Ok(Some(circuit))
    }

    fn templates(&self) -> Vec<TemplateRef> {
        entries()
            .filter_map(|(_, entry)| entry)
            .map(|entry| TemplateRef::new(entry.resource_path(), entry.swap_inputs))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::ElementAttributes;
    use crate::library::names;

    fn input_labels(circuit: &Circuit) -> Vec<String> {
        circuit
            .find_elements(|e| e.is(names::IN))
            .into_iter()
            .filter_map(|id| circuit.label(id).map(str::to_string))
            .collect()
    }

    fn explain(name: &str, attrs: ElementAttributes) -> Option<Circuit> {
        let library = ElementLibrary::new();
        TwoInputGateInsight
            .create_insight(&VisualElement::new(name).with_attributes(attrs), &library)
            .unwrap()
    }

    #[test]
    fn test_and_uses_ins2_unswapped() {
        let library = ElementLibrary::new();
        let expected = library.templates().load("insight/twoInputs/ins2.json").unwrap();
        let circuit = explain(names::AND, ElementAttributes::new()).unwrap();
        assert_eq!(circuit, expected);
    }

    #[test]
    fn test_mirror_swaps_labels() {
        let library = ElementLibrary::new();
        let template = library.templates().load("insight/twoInputs/ins6.json").unwrap();

        // In_1 inverted: !a & b, template used as authored
        let plain = explain(names::AND, ElementAttributes::new().with_inverted("In_1")).unwrap();
        assert_eq!(input_labels(&plain), input_labels(&template));

        // In_2 inverted: a & !b, same template with the labels exchanged
        let mirrored = explain(names::AND, ElementAttributes::new().with_inverted("In_2")).unwrap();
        let mut expected = input_labels(&template);
        expected.reverse();
        assert_eq!(input_labels(&mirrored), expected);
        assert_eq!(mirrored.wires(), template.wires());
    }

    #[test]
    fn test_no_inverters_inserted() {
        let circuit = explain(names::OR, ElementAttributes::new().with_inverted("In_1")).unwrap();
        let library = ElementLibrary::new();
        let template = library.templates().load("insight/twoInputs/ins3.json").unwrap();
        assert_eq!(circuit.element_count(), template.element_count());
    }

    #[test]
    fn test_unsupported_shapes() {
        assert!(explain(names::AND, ElementAttributes::new().with_inputs(3)).is_none());
        assert!(explain(names::AND, ElementAttributes::new().with_bits(4)).is_none());
    }

    #[test]
    fn test_xnor_with_inverted_input_explained_as_xor() {
        let library = ElementLibrary::new();
        let xor = library.templates().load("insight/twoInputs/ins7.json").unwrap();
        let circuit = explain(names::XNOR, ElementAttributes::new().with_inverted("In_2")).unwrap();
        assert_eq!(circuit, xor);
    }

    #[test]
    fn test_lists_fourteen_templates() {
        assert_eq!(TwoInputGateInsight.templates().len(), 14);
    }
}
