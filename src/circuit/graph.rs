//! Mutable circuit graph

use serde::{Deserialize, Serialize};

use super::element::VisualElement;
use super::errors::{CircuitError, CircuitResult};
use super::types::{Vector, Wire};

/// Document version written and accepted by this crate
pub const CIRCUIT_VERSION: u32 = 1;

fn current_version() -> u32 {
    CIRCUIT_VERSION
}

/// Handle to an element inside one [`Circuit`].
///
/// Elements are never removed, so a handle stays valid for the lifetime of
/// the circuit that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

impl ElementId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A circuit: placed elements plus the wires between grid points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    #[serde(default = "current_version")]
    version: u32,
    #[serde(default)]
    elements: Vec<VisualElement>,
    #[serde(default)]
    wires: Vec<Wire>,
}

impl Default for Circuit {
    fn default() -> Self {
        Self::new()
    }
}

impl Circuit {
    pub fn new() -> Self {
        Self {
            version: CIRCUIT_VERSION,
            elements: Vec::new(),
            wires: Vec::new(),
        }
    }

    /// Parses a circuit document and checks its structure.
    pub fn from_json_slice(bytes: &[u8]) -> CircuitResult<Self> {
        let circuit: Circuit = serde_json::from_slice(bytes)?;
        circuit.validate_structure()?;
        Ok(circuit)
    }

    pub fn to_json_pretty(&self) -> CircuitResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn validate_structure(&self) -> CircuitResult<()> {
        if self.version != CIRCUIT_VERSION {
            return Err(CircuitError::UnsupportedVersion {
                found: self.version,
                expected: CIRCUIT_VERSION,
            });
        }
        if let Some(index) = self.elements.iter().position(|e| e.name.trim().is_empty()) {
            return Err(CircuitError::UnnamedElement { index });
        }
        Ok(())
    }

    pub fn add_element(&mut self, element: VisualElement) -> ElementId {
        self.elements.push(element);
        ElementId(self.elements.len() - 1)
    }

    pub fn add_wire(&mut self, wire: Wire) {
        self.wires.push(wire);
    }

    pub fn element(&self, id: ElementId) -> Option<&VisualElement> {
        self.elements.get(id.0)
    }

    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut VisualElement> {
        self.elements.get_mut(id.0)
    }

    pub fn elements(&self) -> &[VisualElement] {
        &self.elements
    }

    pub fn wires(&self) -> &[Wire] {
        &self.wires
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn wire_count(&self) -> usize {
        self.wires.len()
    }

    /// Handles of all elements matching `predicate`, in document order.
    pub fn find_elements<P>(&self, predicate: P) -> Vec<ElementId>
    where
        P: Fn(&VisualElement) -> bool,
    {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, e)| predicate(e))
            .map(|(i, _)| ElementId(i))
            .collect()
    }

    /// Handles of all elements of the given type name.
    pub fn elements_named(&self, name: &str) -> Vec<ElementId> {
        self.find_elements(|e| e.is(name))
    }

    /// First element of type `name` placed exactly at `pos`.
    pub fn element_at(&self, name: &str, pos: Vector) -> Option<ElementId> {
        self.elements
            .iter()
            .position(|e| e.is(name) && e.pos == pos)
            .map(ElementId)
    }

    pub fn label(&self, id: ElementId) -> Option<&str> {
        self.element(id).map(VisualElement::label)
    }

    /// Replaces the label of `id`. Returns false for a foreign handle.
    pub fn set_label(&mut self, id: ElementId, label: impl Into<String>) -> bool {
        match self.element_mut(id) {
            Some(element) => {
                element.attributes.label = label.into();
                true
            }
            None => false,
        }
    }
}
