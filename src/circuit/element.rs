//! Placed elements and their attributes

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::types::Vector;

/// Number of inputs a gate has when its attributes don't say otherwise
pub const DEFAULT_INPUT_COUNT: u32 = 2;

/// Set of pin names whose signal is logically inverted at the pin
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InverterConfig {
    pins: BTreeSet<String>,
}

impl InverterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style: mark `pin` as inverted
    pub fn with(mut self, pin: impl Into<String>) -> Self {
        self.pins.insert(pin.into());
        self
    }

    pub fn add(&mut self, pin: impl Into<String>) {
        self.pins.insert(pin.into());
    }

    pub fn contains(&self, pin: &str) -> bool {
        self.pins.contains(pin)
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.pins.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for InverterConfig {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            pins: iter.into_iter().map(Into::into).collect(),
        }
    }
}

fn default_bits() -> u32 {
    1
}

fn is_one(bits: &u32) -> bool {
    *bits == 1
}

/// Attribute set of a placed element.
///
/// The common keys are typed fields; family-specific keys (for example
/// `selector_bits` of a multiplexer) live in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementAttributes {
    /// Data bit width
    #[serde(default = "default_bits", skip_serializing_if = "is_one")]
    pub bits: u32,
    /// Declared number of inputs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputs: Option<u32>,
    /// Element label
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub label: String,
    /// Pins inverted at this element
    #[serde(default, rename = "inverted", skip_serializing_if = "InverterConfig::is_empty")]
    pub inverter_config: InverterConfig,
    /// Any other attribute
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Default for ElementAttributes {
    fn default() -> Self {
        Self {
            bits: default_bits(),
            inputs: None,
            label: String::new(),
            inverter_config: InverterConfig::default(),
            extra: BTreeMap::new(),
        }
    }
}

impl ElementAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bits(mut self, bits: u32) -> Self {
        self.bits = bits;
        self
    }

    pub fn with_inputs(mut self, inputs: u32) -> Self {
        self.inputs = Some(inputs);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_inverted(mut self, pin: impl Into<String>) -> Self {
        self.inverter_config.add(pin);
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Declared input count, falling back to [`DEFAULT_INPUT_COUNT`]
    pub fn input_count(&self) -> u32 {
        self.inputs.unwrap_or(DEFAULT_INPUT_COUNT)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// Integer attribute from `extra`
    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.extra.get(key).and_then(Value::as_u64)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.extra.get(key).and_then(Value::as_bool)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.extra.insert(key.into(), value.into());
    }
}

/// A placed element: type name, attributes and grid position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualElement {
    /// Element type name as registered in the element library
    pub name: String,
    #[serde(default)]
    pub pos: Vector,
    #[serde(default)]
    pub attributes: ElementAttributes,
}

impl VisualElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pos: Vector::default(),
            attributes: ElementAttributes::default(),
        }
    }

    pub fn at(mut self, pos: Vector) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_attributes(mut self, attributes: ElementAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }

    pub fn label(&self) -> &str {
        &self.attributes.label
    }
}
