//! Canonical index → two-input template
//!
//! A function and its input-order mirror share one template file: the
//! mirror is served by the same file with its two input labels swapped.
//! Constant functions (index 0 and 15) have no template.

use serde::Serialize;

use super::classifier::CanonicalIndex;

/// Resource directory of the two-input templates
pub const TWO_INPUT_DIR: &str = "insight/twoInputs";

/// One entry of the template table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TemplateEntry {
    /// File name inside [`TWO_INPUT_DIR`]
    pub name: &'static str,
    /// Swap the two input labels after loading
    pub swap_inputs: bool,
}

impl TemplateEntry {
    const fn plain(name: &'static str) -> Option<Self> {
        Some(Self { name, swap_inputs: false })
    }

    const fn swapped(name: &'static str) -> Option<Self> {
        Some(Self { name, swap_inputs: true })
    }

    /// Full resource path of the template
    pub fn resource_path(&self) -> String {
        format!("{}/{}", TWO_INPUT_DIR, self.name)
    }
}

static TEMPLATES: [Option<TemplateEntry>; CanonicalIndex::COUNT] = [
    None,                               // 0000 constant 0
    TemplateEntry::plain("ins5.json"),  // 0001 NOR
    TemplateEntry::plain("ins6.json"),  // 0010 !a & b
    TemplateEntry::plain("ins9.json"),  // 0011 !a
    TemplateEntry::swapped("ins6.json"), // 0100 a & !b
    TemplateEntry::swapped("ins9.json"), // 0101 !b
    TemplateEntry::plain("ins7.json"),  // 0110 XOR
    TemplateEntry::plain("ins1.json"),  // 0111 NAND
    TemplateEntry::plain("ins2.json"),  // 1000 AND
    TemplateEntry::plain("ins8.json"),  // 1001 XNOR
    TemplateEntry::swapped("ins10.json"), // 1010 b
    TemplateEntry::plain("ins3.json"),  // 1011 !a | b
    TemplateEntry::plain("ins10.json"), // 1100 a
    TemplateEntry::swapped("ins3.json"), // 1101 a | !b
    TemplateEntry::plain("ins4.json"),  // 1110 OR
    None,                               // 1111 constant 1
];

/// Template explaining the function `index`, if there is one.
pub fn lookup(index: CanonicalIndex) -> Option<TemplateEntry> {
    TEMPLATES[usize::from(index.value())]
}

/// Every index together with its entry
pub fn entries() -> impl Iterator<Item = (CanonicalIndex, Option<TemplateEntry>)> {
    CanonicalIndex::all().map(|index| (index, lookup(index)))
}
