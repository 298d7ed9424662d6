//! Observable events of the insight pipeline
//!
//! Events are explicit and typed.

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// The editor asked for an explanatory circuit
    InsightRequested,
    /// An explanatory circuit was produced
    InsightCreated,
    /// No explanatory circuit is available for the element
    InsightUnavailable,
    /// Behavior classification was abandoned
    ClassificationAborted,
    /// A template was read and parsed from its resource
    TemplateLoaded,
    /// A template was served from the parsed-template cache
    TemplateCacheHit,
    /// A template could not be loaded or post-processed
    TemplateFailed,
    /// A template or dispatch configuration is broken
    TemplateFault,
    /// Configuration loaded
    ConfigLoaded,
}

impl Event {
    /// Returns the event name
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::InsightRequested => "INSIGHT_REQUESTED",
            Event::InsightCreated => "INSIGHT_CREATED",
            Event::InsightUnavailable => "INSIGHT_UNAVAILABLE",
            Event::ClassificationAborted => "CLASSIFICATION_ABORTED",
            Event::TemplateLoaded => "TEMPLATE_LOADED",
            Event::TemplateCacheHit => "TEMPLATE_CACHE_HIT",
            Event::TemplateFailed => "TEMPLATE_FAILED",
            Event::TemplateFault => "TEMPLATE_FAULT",
            Event::ConfigLoaded => "CONFIG_LOADED",
        }
    }

    /// Returns true for events that report a broken configuration
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::TemplateFault)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(Event::InsightCreated.as_str(), "INSIGHT_CREATED");
        assert_eq!(Event::TemplateCacheHit.to_string(), "TEMPLATE_CACHE_HIT");
    }

    #[test]
    fn test_only_faults_are_fatal() {
        assert!(Event::TemplateFault.is_fatal());
        assert!(!Event::TemplateFailed.is_fatal());
        assert!(!Event::InsightUnavailable.is_fatal());
    }
}
