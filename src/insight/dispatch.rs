//! Conditional dispatch of insight factories
//!
//! An [`InsightDispatch`] is an ordered list of (condition, factory) entries.
//! The first entry whose condition holds for the element's attributes
//! produces the insight. At most one entry may be unconditional, and it must
//! come last.

use std::fmt;
use std::sync::Arc;

use crate::circuit::{Circuit, ElementAttributes, VisualElement};
use crate::library::ElementLibrary;

use super::errors::InsightResult;
use super::postprocess::PostProcess;
use super::resolver::{absorb, InsightFactory, TemplateRef};

/// Resource directory of the single-template insights
pub const SIMPLE_DIR: &str = "insight/simple";

/// Predicate over an element's attributes
pub type Condition = Arc<dyn Fn(&ElementAttributes) -> bool + Send + Sync>;

/// Wraps a closure as a [`Condition`]
pub fn condition<F>(f: F) -> Condition
where
    F: Fn(&ElementAttributes) -> bool + Send + Sync + 'static,
{
    Arc::new(f)
}

/// One data bit
pub fn one_bit() -> Condition {
    condition(|attrs| attrs.bits == 1)
}

/// Holds when every one of `conditions` holds
pub fn all_of(conditions: Vec<Condition>) -> Condition {
    condition(move |attrs| conditions.iter().all(|c| c(attrs)))
}

/// Integer attribute `key` equals `value`
pub fn attr_equals(key: &str, value: u64) -> Condition {
    let key = key.to_string();
    condition(move |attrs| attrs.get_u64(&key) == Some(value))
}

struct DispatchEntry {
    condition: Option<Condition>,
    factory: Arc<dyn InsightFactory>,
}

impl DispatchEntry {
    fn is_met(&self, attrs: &ElementAttributes) -> bool {
        match &self.condition {
            Some(condition) => condition(attrs),
            None => true,
        }
    }
}

/// Ordered, first-match dispatch over insight factories
#[derive(Default)]
pub struct InsightDispatch {
    entries: Vec<DispatchEntry>,
    unconditional: bool,
}

impl InsightDispatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatch with a single unconditional template
    pub fn unconditional(name: &str) -> Self {
        Self::new().add_template(name, None)
    }

    /// Appends `factory`, used when `condition` holds (always when `None`).
    ///
    /// # Panics
    ///
    /// If an unconditional entry was already added: every later entry would
    /// be unreachable.
    pub fn add(mut self, factory: impl InsightFactory + 'static, condition: Option<Condition>) -> Self {
        if self.unconditional {
            panic!("insight dispatch already has an unconditional entry");
        }
        self.unconditional = condition.is_none();
        self.entries.push(DispatchEntry {
            condition,
            factory: Arc::new(factory),
        });
        self
    }

    /// Appends the template `name` from [`SIMPLE_DIR`].
    ///
    /// # Panics
    ///
    /// Like [`InsightDispatch::add`].
    pub fn add_template(self, name: &str, condition: Option<Condition>) -> Self {
        self.add(TemplateInsight::new(name), condition)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True if the last entry is a catch-all
    pub fn has_unconditional(&self) -> bool {
        self.unconditional
    }

    /// Resolves `element`, absorbing every failure into `None`.
    pub fn resolve(&self, element: &VisualElement, library: &ElementLibrary) -> Option<Circuit> {
        absorb(element, library, self.create_insight(element, library))
    }
}

impl InsightFactory for InsightDispatch {
    fn create_insight(&self, element: &VisualElement, library: &ElementLibrary) -> InsightResult<Option<Circuit>> {
        match self.entries.iter().find(|entry| entry.is_met(&element.attributes)) {
            Some(entry) => entry.factory.create_insight(element, library),
            None => Ok(None),
        }
    }

    fn templates(&self) -> Vec<TemplateRef> {
        self.entries.iter().flat_map(|entry| entry.factory.templates()).collect()
    }
}

impl fmt::Debug for InsightDispatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InsightDispatch")
            .field("entries", &self.entries.len())
            .field("unconditional", &self.unconditional)
            .finish()
    }
}

/// Insight backed by one template, polarized to the element's inverted pins
#[derive(Debug, Clone)]
pub struct TemplateInsight {
    path: String,
}

impl TemplateInsight {
    /// Template `name` inside [`SIMPLE_DIR`]
    pub fn new(name: &str) -> Self {
        Self::at_path(format!("{}/{}", SIMPLE_DIR, name))
    }

    /// Template at a full resource path
    pub fn at_path(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl InsightFactory for TemplateInsight {
    fn create_insight(&self, element: &VisualElement, library: &ElementLibrary) -> InsightResult<Option<Circuit>> {
        let mut circuit = library.templates().load(&self.path)?;
        PostProcess::new()
            .invert(&element.attributes.inverter_config)
            .apply(&mut circuit, library.layout_unit())?;
        Ok(Some(circuit))
    }

    fn templates(&self) -> Vec<TemplateRef> {
        vec![TemplateRef::new(self.path.clone(), false).inverting()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::names;

    fn marker(label: &'static str) -> impl InsightFactory {
        move |_: &VisualElement, _: &ElementLibrary| -> InsightResult<Option<Circuit>> {
            let mut c = Circuit::new();
            c.add_element(VisualElement::new(names::OUT).with_attributes(ElementAttributes::new().with_label(label)));
            Ok(Some(c))
        }
    }

    fn produced_by(circuit: Option<Circuit>) -> Option<String> {
        circuit.map(|c| c.elements()[0].label().to_string())
    }

    fn element(attrs: ElementAttributes) -> VisualElement {
        VisualElement::new("Anything").with_attributes(attrs)
    }

    #[test]
    fn test_first_match_wins() {
        let library = ElementLibrary::new();
        let dispatch = InsightDispatch::new()
            .add(marker("A"), Some(one_bit()))
            .add(marker("B"), Some(attr_equals("width", 3)))
            .add(marker("C"), None);

        let both = element(ElementAttributes::new().with_extra("width", 3));
        assert_eq!(produced_by(dispatch.resolve(&both, &library)).as_deref(), Some("A"));

        let second = element(ElementAttributes::new().with_bits(8).with_extra("width", 3));
        assert_eq!(produced_by(dispatch.resolve(&second, &library)).as_deref(), Some("B"));

        let neither = element(ElementAttributes::new().with_bits(8));
        assert_eq!(produced_by(dispatch.resolve(&neither, &library)).as_deref(), Some("C"));
    }

    #[test]
    fn test_no_match_is_none() {
        let library = ElementLibrary::new();
        let dispatch = InsightDispatch::new().add(marker("A"), Some(one_bit()));
        assert!(dispatch.resolve(&element(ElementAttributes::new().with_bits(4)), &library).is_none());
    }

    #[test]
    fn test_matched_none_is_not_retried() {
        let library = ElementLibrary::new();
        let nothing = |_: &VisualElement, _: &ElementLibrary| -> InsightResult<Option<Circuit>> { Ok(None) };
        let dispatch = InsightDispatch::new()
            .add(nothing, Some(one_bit()))
            .add(marker("C"), None);
        assert!(dispatch.resolve(&element(ElementAttributes::new()), &library).is_none());
    }

    #[test]
    #[should_panic(expected = "unconditional")]
    fn test_second_unconditional_entry_panics() {
        let _ = InsightDispatch::new().add(marker("A"), None).add(marker("B"), None);
    }

    #[test]
    #[should_panic(expected = "unconditional")]
    fn test_entry_after_unconditional_panics() {
        let _ = InsightDispatch::new().add(marker("A"), None).add(marker("B"), Some(one_bit()));
    }

    #[test]
    fn test_all_of() {
        let c = all_of(vec![one_bit(), attr_equals("selector_bits", 1)]);
        assert!(c(&ElementAttributes::new().with_extra("selector_bits", 1)));
        assert!(!c(&ElementAttributes::new().with_extra("selector_bits", 2)));
        assert!(!c(&ElementAttributes::new().with_bits(2).with_extra("selector_bits", 1)));
        assert!(all_of(Vec::new())(&ElementAttributes::new()));
    }

    #[test]
    fn test_template_insight_inverts_matching_inputs() {
        let library = ElementLibrary::new();
        let plain = TemplateInsight::new("not.json")
            .create_insight(&element(ElementAttributes::new()), &library)
            .unwrap()
            .unwrap();
        let inverted = TemplateInsight::new("not.json")
            .create_insight(&element(ElementAttributes::new().with_inverted("in")), &library)
            .unwrap()
            .unwrap();
        assert_eq!(inverted.element_count(), plain.element_count() + 1);
        assert_eq!(inverted.wire_count(), plain.wire_count() + 1);

        let input = plain.find_elements(|e| e.is(names::IN))[0];
        let pos = plain.element(input).unwrap().pos;
        assert!(inverted.element_at(names::NOT, pos.shift_x(-40)).is_some());
        assert!(inverted.element_at(names::IN, pos.shift_x(-60)).is_some());
        assert_eq!(inverted.element_at(names::IN, pos), None);
    }

    #[test]
    fn test_unconditional_template_missing_resource() {
        let library = ElementLibrary::new();
        let dispatch = InsightDispatch::unconditional("missing.json");
        assert!(dispatch.has_unconditional());
        assert!(dispatch.resolve(&element(ElementAttributes::new()), &library).is_none());
    }

    #[test]
    fn test_templates_are_listed() {
        let dispatch = InsightDispatch::new()
            .add_template("not.json", Some(one_bit()))
            .add_template("driver.json", None);
        let paths: Vec<String> = dispatch.templates().into_iter().map(|t| t.path).collect();
        assert_eq!(paths, vec!["insight/simple/not.json", "insight/simple/driver.json"]);
    }
}
