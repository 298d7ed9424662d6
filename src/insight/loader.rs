//! Template loader
//!
//! Every call to [`TemplateLoader::load`] hands out a circuit the caller
//! owns outright. With caching enabled the parsed, unmodified template is
//! kept behind a read-write lock and cloned per caller, so post-processing
//! one copy never shows up in another.

use std::collections::HashMap;
use std::io;
use std::sync::{Arc, RwLock};

use crate::circuit::Circuit;
use crate::observability::{log_event, Event, InsightMetrics, Severity};

use super::errors::{InsightError, InsightResult};
use super::resources::ResourceStore;

/// Loads circuit templates from a resource store
pub struct TemplateLoader {
    store: Box<dyn ResourceStore>,
    cache: Option<RwLock<HashMap<String, Arc<Circuit>>>>,
    metrics: Arc<InsightMetrics>,
}

impl TemplateLoader {
    pub fn new(store: Box<dyn ResourceStore>, cache: bool, metrics: Arc<InsightMetrics>) -> Self {
        Self {
            store,
            cache: cache.then(|| RwLock::new(HashMap::new())),
            metrics,
        }
    }

    /// Loads the template at `path` as a private, mutable copy.
    pub fn load(&self, path: &str) -> InsightResult<Circuit> {
        if let Some(cached) = self.cached(path) {
            self.metrics.record_cache_hit();
            log_event(Event::TemplateCacheHit, Severity::Trace, &[("template", path)]);
            return Ok(Circuit::clone(&cached));
        }

        let circuit = self.read(path)?;

        if let Some(cache) = &self.cache {
            if let Ok(mut entries) = cache.write() {
                entries
                    .entry(path.to_string())
                    .or_insert_with(|| Arc::new(circuit.clone()));
            }
        }
        Ok(circuit)
    }

    fn cached(&self, path: &str) -> Option<Arc<Circuit>> {
        let cache = self.cache.as_ref()?;
        let entries = cache.read().ok()?;
        entries.get(path).cloned()
    }

    fn read(&self, path: &str) -> InsightResult<Circuit> {
        let bytes = self.store.open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => InsightError::TemplateNotFound(path.to_string()),
            _ => InsightError::malformed(path, e),
        })?;
        let circuit = Circuit::from_json_slice(&bytes).map_err(|e| InsightError::malformed(path, e))?;

        self.metrics.record_template_load();
        log_event(
            Event::TemplateLoaded,
            Severity::Trace,
            &[("store", &self.store.describe()), ("template", path)],
        );
        Ok(circuit)
    }

    pub fn is_caching(&self) -> bool {
        self.cache.is_some()
    }

    /// Number of templates held in the cache
    pub fn cached_count(&self) -> usize {
        self.cache
            .as_ref()
            .and_then(|c| c.read().ok().map(|entries| entries.len()))
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{ElementAttributes, Vector, VisualElement};
    use crate::insight::{DirectoryResources, EmbeddedResources};
    use std::fs;
    use tempfile::TempDir;

    fn loader(cache: bool) -> TemplateLoader {
        TemplateLoader::new(Box::new(EmbeddedResources::builtin()), cache, Arc::new(InsightMetrics::new()))
    }

    #[test]
    fn test_load_embedded_template() {
        let circuit = loader(false).load("insight/twoInputs/ins2.json").unwrap();
        assert_eq!(circuit.elements_named("In").len(), 2);
    }

    #[test]
    fn test_missing_template() {
        let err = loader(false).load("insight/twoInputs/ins99.json").unwrap_err();
        assert!(matches!(err, InsightError::TemplateNotFound(ref p) if p == "insight/twoInputs/ins99.json"));
    }

    #[test]
    fn test_malformed_template() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("bad.json"), b"{\"elements\": 5}").unwrap();
        let loader = TemplateLoader::new(
            Box::new(DirectoryResources::new(dir.path())),
            false,
            Arc::new(InsightMetrics::new()),
        );
        assert!(matches!(loader.load("bad.json"), Err(InsightError::TemplateMalformed { .. })));
    }

    #[test]
    fn test_loads_are_independent_without_cache() {
        let loader = loader(false);
        let mut first = loader.load("insight/simple/not.json").unwrap();
        first.add_element(VisualElement::new("Not").at(Vector::new(-100, 0)));
        let second = loader.load("insight/simple/not.json").unwrap();
        assert_eq!(second.element_count() + 1, first.element_count());
        assert_eq!(loader.cached_count(), 0);
    }

    #[test]
    fn test_cache_hands_out_copies() {
        let loader = loader(true);
        let mut first = loader.load("insight/twoInputs/ins2.json").unwrap();
        let input = first.elements_named("In")[0];
        first.set_label(input, "mutated");
        first.add_element(
            VisualElement::new("Not").with_attributes(ElementAttributes::new().with_label("extra")),
        );

        let second = loader.load("insight/twoInputs/ins2.json").unwrap();
        assert_ne!(first, second);
        assert!(second.elements().iter().all(|e| e.label() != "mutated"));
        assert_eq!(loader.cached_count(), 1);
        assert_eq!(loader.metrics.snapshot().template_cache_hits, 1);
        assert_eq!(loader.metrics.snapshot().template_loads, 1);
    }
}
