//! Insight façade
//!
//! [`create_explanatory_circuit`] is the single entry point the editor uses.
//! It asks the element's type for its insight factory and runs it. Whatever
//! goes wrong along the way, the editor only ever sees `None`.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::circuit::{Circuit, InverterConfig, VisualElement};
use crate::library::{names, ElementLibrary};
use crate::observability::{log_event, Event, Severity};

use super::errors::InsightResult;
use super::postprocess::{invert_inputs, swap_inputs};

/// Produces the explanatory circuit for an element.
///
/// `Ok(None)` means no insight applies. Errors are reserved for failures
/// while building one.
pub trait InsightFactory: Send + Sync {
    fn create_insight(&self, element: &VisualElement, library: &ElementLibrary) -> InsightResult<Option<Circuit>>;

    /// Templates this factory may load, for eager verification
    fn templates(&self) -> Vec<TemplateRef> {
        Vec::new()
    }
}

impl<F> InsightFactory for F
where
    F: Fn(&VisualElement, &ElementLibrary) -> InsightResult<Option<Circuit>> + Send + Sync,
{
    fn create_insight(&self, element: &VisualElement, library: &ElementLibrary) -> InsightResult<Option<Circuit>> {
        self(element, library)
    }
}

/// A template resource and the edits applied to it after loading
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TemplateRef {
    pub path: String,
    pub swap_inputs: bool,
    /// Inputs may get inverters inserted ahead of them
    pub invert_inputs: bool,
}

impl TemplateRef {
    pub fn new(path: impl Into<String>, swap_inputs: bool) -> Self {
        Self {
            path: path.into(),
            swap_inputs,
            invert_inputs: false,
        }
    }

    /// Marks the template's inputs as invertible.
    pub fn inverting(mut self) -> Self {
        self.invert_inputs = true;
        self
    }
}

/// Downgrades a pipeline failure to "no insight", logging it.
pub(crate) fn absorb(
    element: &VisualElement,
    library: &ElementLibrary,
    result: InsightResult<Option<Circuit>>,
) -> Option<Circuit> {
    match result {
        Ok(circuit) => circuit,
        Err(e) => {
            library.metrics().record_failure();
            let (event, severity) = if e.is_fatal() {
                (Event::TemplateFault, Severity::Fatal)
            } else {
                (Event::TemplateFailed, Severity::Warn)
            };
            log_event(
                event,
                severity,
                &[("code", e.code()), ("gate", &element.name), ("reason", &e.to_string())],
            );
            None
        }
    }
}

/// Explanatory circuit for `element`, or `None` if there is none.
///
/// Never fails and never panics on bad template data; the caller simply
/// omits the explanation.
pub fn create_explanatory_circuit(element: &VisualElement, library: &ElementLibrary) -> Option<Circuit> {
    let metrics = library.metrics();
    metrics.record_request();
    log_event(Event::InsightRequested, Severity::Trace, &[("gate", &element.name)]);

    let circuit = match library.element_type(&element.name) {
        Ok(description) => match description.insight() {
            Some(factory) => absorb(element, library, factory.create_insight(element, library)),
            None => None,
        },
        // an unknown type simply has no insight
        Err(_) => None,
    };

    match &circuit {
        Some(c) => {
            metrics.record_created();
            log_event(
                Event::InsightCreated,
                Severity::Trace,
                &[("elements", &c.element_count().to_string()), ("gate", &element.name)],
            );
        }
        None => {
            metrics.record_unavailable();
            log_event(Event::InsightUnavailable, Severity::Trace, &[("gate", &element.name)]);
        }
    }
    circuit
}

/// Loads every template any registered type may use and checks it can be
/// post-processed as configured.
///
/// Returns the verified templates. Stops at the first broken one.
pub fn verify_templates(library: &ElementLibrary) -> InsightResult<Vec<TemplateRef>> {
    let refs: BTreeSet<TemplateRef> = library
        .element_types()
        .filter_map(|description| description.insight())
        .flat_map(|factory| factory.templates())
        .collect();

    for template in &refs {
        verify_template(library, template).map_err(|e| {
            if e.is_fatal() {
                log_event(
                    Event::TemplateFault,
                    Severity::Fatal,
                    &[("code", e.code()), ("template", &template.path)],
                );
            }
            e
        })?;
    }
    Ok(refs.into_iter().collect())
}

fn verify_template(library: &ElementLibrary, template: &TemplateRef) -> InsightResult<()> {
    let mut circuit = library.templates().load(&template.path)?;
    if template.swap_inputs {
        swap_inputs(&mut circuit)?;
    }
    if template.invert_inputs {
        let every_input: InverterConfig = circuit
            .elements()
            .iter()
            .filter(|e| e.is(names::IN) || e.is(names::CLOCK))
            .map(|e| e.label().to_string())
            .collect();
        invert_inputs(&mut circuit, &every_input, library.layout_unit())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::ElementAttributes;
    use crate::config::InsightConfig;
    use crate::insight::InsightError;
    use crate::library::{ElementTypeDescription, GateCore, GateFunction, InputPins, LibraryResult, LogicCore};

    fn failing(_: &VisualElement, _: &ElementLibrary) -> InsightResult<Option<Circuit>> {
        Err(InsightError::SwapInputCount { found: 0 })
    }

    fn passthrough_core(_: &ElementAttributes) -> LibraryResult<Box<dyn LogicCore>> {
        Ok(Box::new(GateCore::new("Lamp", GateFunction::Or, &ElementAttributes::new())?))
    }

    #[test]
    fn test_unknown_type_is_none() {
        let library = ElementLibrary::new();
        assert!(create_explanatory_circuit(&VisualElement::new("Flux"), &library).is_none());
        let snapshot = library.metrics().snapshot();
        assert_eq!(snapshot.unavailable, 1);
        assert_eq!(snapshot.failures, 0);
    }

    #[test]
    fn test_type_without_insight_is_none() {
        let mut library = ElementLibrary::new();
        library
            .register(ElementTypeDescription::new("Lamp", InputPins::Numbered("In_"), passthrough_core))
            .unwrap();
        assert!(create_explanatory_circuit(&VisualElement::new("Lamp"), &library).is_none());
    }

    #[test]
    fn test_fatal_fault_is_absorbed() {
        let mut library = ElementLibrary::new();
        library
            .register(
                ElementTypeDescription::new("Faulty", InputPins::Numbered("In_"), passthrough_core)
                    .with_insight(failing),
            )
            .unwrap();
        assert!(create_explanatory_circuit(&VisualElement::new("Faulty"), &library).is_none());
        assert_eq!(library.metrics().snapshot().failures, 1);
    }

    #[test]
    fn test_oversized_layout_unit_is_absorbed() {
        let config = InsightConfig {
            layout_unit: i32::MAX,
            ..InsightConfig::default()
        };
        let library = ElementLibrary::with_config(&config);
        let inverted = VisualElement::new(names::NOT).with_attributes(ElementAttributes::new().with_inverted("in"));
        assert!(create_explanatory_circuit(&inverted, &library).is_none());
        assert_eq!(library.metrics().snapshot().failures, 1);
        assert!(matches!(
            verify_templates(&library),
            Err(InsightError::TemplateMalformed { .. })
        ));
    }

    #[test]
    fn test_verify_inverts_every_simple_template_input() {
        for layout_unit in [20, 60, 80] {
            let config = InsightConfig {
                layout_unit,
                ..InsightConfig::default()
            };
            assert!(verify_templates(&ElementLibrary::with_config(&config)).is_ok(), "unit {}", layout_unit);
        }
    }

    #[test]
    fn test_metrics_count_requests() {
        let library = ElementLibrary::new();
        create_explanatory_circuit(&VisualElement::new(names::AND), &library);
        create_explanatory_circuit(&VisualElement::new(names::NOT), &library);
        let snapshot = library.metrics().snapshot();
        assert_eq!(snapshot.requests, 2);
        assert_eq!(snapshot.created, 2);
    }

    #[test]
    fn test_verify_builtin_templates() {
        let library = ElementLibrary::new();
        let verified = verify_templates(&library).unwrap();
        // ten two-input files, four of them also used swapped, four simple templates
        assert_eq!(verified.len(), 18);
        assert!(verified.contains(&TemplateRef::new("insight/twoInputs/ins6.json", true)));
        assert!(verified.contains(&TemplateRef::new("insight/simple/dff.json", false).inverting()));
    }
}
