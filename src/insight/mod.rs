//! Explanatory circuits ("insights") for placed elements
//!
//! Given an element, decide whether a pre-authored circuit explains its
//! behavior and return a private, correctly polarized copy of it.
//!
//! Two routes lead to a template:
//!
//! - generic two-input gates are classified by simulation into a
//!   [`CanonicalIndex`], which the template table maps to a template and a
//!   swap flag ([`TwoInputGateInsight`])
//! - other families register an [`InsightDispatch`] whose first matching
//!   entry names a template; inverted input and clock pins get inverters
//!   inserted ahead of them
//!
//! [`create_explanatory_circuit`] wraps both and never fails: anything that
//! goes wrong is logged and the answer is `None`.

mod classifier;
mod dispatch;
mod errors;
mod loader;
mod postprocess;
mod resolver;
mod resources;
mod table;
mod two_input;

pub use classifier::{classify, CanonicalIndex};
pub use dispatch::{
    all_of, attr_equals, condition, one_bit, Condition, InsightDispatch, TemplateInsight, SIMPLE_DIR,
};
pub use errors::{ErrorSeverity, InsightError, InsightResult};
pub use loader::TemplateLoader;
pub use postprocess::{invert_inputs, swap_inputs, PostProcess, INVERTS_ATTR};
pub use resolver::{create_explanatory_circuit, verify_templates, InsightFactory, TemplateRef};
pub use resources::{DirectoryResources, EmbeddedResources, ResourceStore};
pub use table::{entries, lookup, TemplateEntry, TWO_INPUT_DIR};
pub use two_input::TwoInputGateInsight;
