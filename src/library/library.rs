//! Element library: the registry of element types
//!
//! The insight pipeline consumes the library through three questions:
//! which logic core factory backs a type, what are its input pins for a
//! given attribute set, and which insight factory (if any) explains it.
//! The library also owns the template loader and the insight counters so
//! that one value carries everything a resolution needs.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::circuit::ElementAttributes;
use crate::config::InsightConfig;
use crate::insight::{
    verify_templates, DirectoryResources, EmbeddedResources, InsightFactory, InsightResult, ResourceStore,
    TemplateLoader,
};
use crate::observability::InsightMetrics;

use super::builtin;
use super::errors::{LibraryError, LibraryResult};
use super::logic::LogicCoreFactory;

/// Description of one input pin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinDescription {
    name: String,
}

impl PinDescription {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// How a type names its input pins
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputPins {
    /// `<prefix>1` .. `<prefix>N` for the declared input count
    Numbered(&'static str),
    /// Fixed pin list
    Fixed(Vec<String>),
    /// `sel`, then `in_0` .. `in_{2^selector_bits - 1}`
    Selector,
}

impl InputPins {
    pub fn fixed<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        InputPins::Fixed(names.into_iter().map(Into::into).collect())
    }

    fn describe(&self, attrs: &ElementAttributes) -> LibraryResult<Vec<PinDescription>> {
        Ok(match self {
            InputPins::Numbered(prefix) => (1..=attrs.input_count())
                .map(|i| PinDescription::new(format!("{}{}", prefix, i)))
                .collect(),
            InputPins::Fixed(names) => names.iter().map(PinDescription::new).collect(),
            InputPins::Selector => {
                let data_inputs = 1usize << super::gates::selector_bits(attrs)?;
                std::iter::once(PinDescription::new("sel"))
                    .chain((0..data_inputs).map(|i| PinDescription::new(format!("in_{}", i))))
                    .collect()
            }
        })
    }
}

/// A registered element type
#[derive(Clone)]
pub struct ElementTypeDescription {
    name: String,
    inputs: InputPins,
    factory: Arc<dyn LogicCoreFactory>,
    insight: Option<Arc<dyn InsightFactory>>,
}

impl ElementTypeDescription {
    pub fn new(name: impl Into<String>, inputs: InputPins, factory: impl LogicCoreFactory + 'static) -> Self {
        Self {
            name: name.into(),
            inputs,
            factory: Arc::new(factory),
            insight: None,
        }
    }

    /// Attaches the factory that explains elements of this type.
    pub fn with_insight(mut self, insight: impl InsightFactory + 'static) -> Self {
        self.insight = Some(Arc::new(insight));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn factory(&self) -> Arc<dyn LogicCoreFactory> {
        Arc::clone(&self.factory)
    }

    pub fn input_description(&self, attrs: &ElementAttributes) -> LibraryResult<Vec<PinDescription>> {
        self.inputs.describe(attrs)
    }

    pub fn insight(&self) -> Option<&dyn InsightFactory> {
        self.insight.as_deref()
    }
}

impl fmt::Debug for ElementTypeDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementTypeDescription")
            .field("name", &self.name)
            .field("inputs", &self.inputs)
            .field("has_insight", &self.insight.is_some())
            .finish()
    }
}

/// Registry of element types plus the resources insights are built from
pub struct ElementLibrary {
    types: BTreeMap<String, ElementTypeDescription>,
    templates: TemplateLoader,
    layout_unit: i32,
    metrics: Arc<InsightMetrics>,
}

impl Default for ElementLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementLibrary {
    /// Library with the built-in types and the embedded templates.
    pub fn new() -> Self {
        Self::with_config(&InsightConfig::default())
    }

    /// Library with the built-in types, configured from `config`.
    pub fn with_config(config: &InsightConfig) -> Self {
        let store: Box<dyn ResourceStore> = match &config.template_dir {
            Some(dir) => Box::new(DirectoryResources::new(dir)),
            None => Box::new(EmbeddedResources::builtin()),
        };
        Self::with_resources(store, config)
    }

    /// Like [`ElementLibrary::with_config`], but loads and checks every
    /// template up front. A broken template aborts construction.
    pub fn verified(config: &InsightConfig) -> InsightResult<Self> {
        let library = Self::with_config(config);
        verify_templates(&library)?;
        Ok(library)
    }

    /// Library with the built-in types reading templates from `store`.
    pub fn with_resources(store: Box<dyn ResourceStore>, config: &InsightConfig) -> Self {
        let metrics = Arc::new(InsightMetrics::new());
        let mut library = Self {
            types: BTreeMap::new(),
            templates: TemplateLoader::new(store, config.cache_templates, Arc::clone(&metrics)),
            layout_unit: config.layout_unit,
            metrics,
        };
        for description in builtin::descriptions() {
            library.types.insert(description.name().to_string(), description);
        }
        library
    }

    /// Adds a type. Names are unique.
    pub fn register(&mut self, description: ElementTypeDescription) -> LibraryResult<()> {
        if self.types.contains_key(description.name()) {
            return Err(LibraryError::DuplicateElementType(description.name().to_string()));
        }
        self.types.insert(description.name().to_string(), description);
        Ok(())
    }

    pub fn element_type(&self, name: &str) -> LibraryResult<&ElementTypeDescription> {
        self.types
            .get(name)
            .ok_or_else(|| LibraryError::UnknownElementType(name.to_string()))
    }

    pub fn get_logic_core_factory(&self, name: &str) -> LibraryResult<Arc<dyn LogicCoreFactory>> {
        Ok(self.element_type(name)?.factory())
    }

    pub fn get_input_pin_descriptions(
        &self,
        name: &str,
        attrs: &ElementAttributes,
    ) -> LibraryResult<Vec<PinDescription>> {
        self.element_type(name)?.input_description(attrs)
    }

    /// All registered types, ordered by name
    pub fn element_types(&self) -> impl Iterator<Item = &ElementTypeDescription> {
        self.types.values()
    }

    pub fn templates(&self) -> &TemplateLoader {
        &self.templates
    }

    /// Fixed layout distance used when inserting elements into templates
    pub fn layout_unit(&self) -> i32 {
        self.layout_unit
    }

    pub fn metrics(&self) -> &InsightMetrics {
        &self.metrics
    }
}
