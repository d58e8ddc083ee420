//! Record strategies.
//!
//! A strategy decides what is stored per `(object, key)`. The runner picks
//! one from its [`TrackingMode`] at construction and never branches on the
//! mode afterwards.
//!
//! Strategies only store labels the runner has already computed; they never
//! call into renderer code.

use std::sync::Arc;

use crate::diagnostics::Hazard;
use crate::table::RenderTable;
use crate::transaction::mode::TrackingMode;

/// Per-transaction bookkeeping for one tracking mode.
pub(crate) trait RecordStrategy {
    /// `(object, key)` was rendered.
    fn record<T>(&mut self, object: &Arc<T>, key: &str, labels: RenderLabels, generation: u64)
    where
        T: ?Sized + Send + Sync + 'static;

    fn has_rendered<T: ?Sized>(&self, object: &Arc<T>, key: &str, generation: u64) -> bool;

    /// Labels stored for `(object, key)`, if this strategy keeps any.
    fn labels<T: ?Sized>(&self, object: &Arc<T>, key: &str) -> Option<RenderLabels>;

    /// The transaction closed. Every record is dropped.
    fn end(&mut self);
}

/// What was rendered and where.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RenderLabels {
    /// Self-description of the rendered reference.
    pub last_ref: Option<String>,
    /// Debug stack label at the time of the render.
    pub last_rendered_in: Option<String>,
}

impl RenderLabels {
    /// Build the report for a modification of the pair these labels belong to.
    pub(crate) fn into_hazard(self, object: String, key: &str, modified_in: Option<String>) -> Hazard {
        Hazard {
            object,
            key: key.to_string(),
            label: self.last_ref,
            rendered_in: self.last_rendered_in,
            modified_in,
        }
    }
}

/// Records the generation id of the transaction that rendered each pair.
#[derive(Debug, Default)]
pub(crate) struct SignalStrategy {
    table: RenderTable<u64>,
}

impl RecordStrategy for SignalStrategy {
    fn record<T>(&mut self, object: &Arc<T>, key: &str, _labels: RenderLabels, generation: u64)
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.table.insert(object, key, generation);
    }

    fn has_rendered<T: ?Sized>(&self, object: &Arc<T>, key: &str, generation: u64) -> bool {
        // A record from an earlier generation is stale even if it survived.
        self.table.get(object, key) == Some(&generation)
    }

    fn labels<T: ?Sized>(&self, _object: &Arc<T>, _key: &str) -> Option<RenderLabels> {
        None
    }

    fn end(&mut self) {
        drop(self.table.take());
    }
}

/// Records labels so hazards can be reported with their locations.
#[derive(Debug, Default)]
pub(crate) struct DiagnosticStrategy {
    table: RenderTable<RenderLabels>,
}

impl RecordStrategy for DiagnosticStrategy {
    fn record<T>(&mut self, object: &Arc<T>, key: &str, labels: RenderLabels, _generation: u64)
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.table.insert(object, key, labels);
    }

    fn has_rendered<T: ?Sized>(&self, object: &Arc<T>, key: &str, _generation: u64) -> bool {
        // The table is replaced every transaction, so presence is enough.
        self.table.contains(object, key)
    }

    fn labels<T: ?Sized>(&self, object: &Arc<T>, key: &str) -> Option<RenderLabels> {
        self.table.get(object, key).cloned()
    }

    fn end(&mut self) {
        drop(self.table.take());
    }
}

/// The strategy chosen for a runner.
#[derive(Debug)]
pub(crate) enum Strategy {
    Disabled,
    Signal(SignalStrategy),
    Diagnostic(DiagnosticStrategy),
}

impl Strategy {
    pub(crate) fn for_mode(mode: TrackingMode) -> Self {
        match mode {
            TrackingMode::Disabled => Strategy::Disabled,
            TrackingMode::SignalOnly => Strategy::Signal(SignalStrategy::default()),
            TrackingMode::Diagnostic => Strategy::Diagnostic(DiagnosticStrategy::default()),
        }
    }
}

impl RecordStrategy for Strategy {
    fn record<T>(&mut self, object: &Arc<T>, key: &str, labels: RenderLabels, generation: u64)
    where
        T: ?Sized + Send + Sync + 'static,
    {
        match self {
            Strategy::Disabled => {}
            Strategy::Signal(s) => s.record(object, key, labels, generation),
            Strategy::Diagnostic(s) => s.record(object, key, labels, generation),
        }
    }

    fn has_rendered<T: ?Sized>(&self, object: &Arc<T>, key: &str, generation: u64) -> bool {
        match self {
            Strategy::Disabled => false,
            Strategy::Signal(s) => s.has_rendered(object, key, generation),
            Strategy::Diagnostic(s) => s.has_rendered(object, key, generation),
        }
    }

    fn labels<T: ?Sized>(&self, object: &Arc<T>, key: &str) -> Option<RenderLabels> {
        match self {
            Strategy::Disabled => None,
            Strategy::Signal(s) => s.labels(object, key),
            Strategy::Diagnostic(s) => s.labels(object, key),
        }
    }

    fn end(&mut self) {
        match self {
            Strategy::Disabled => {}
            Strategy::Signal(s) => s.end(),
            Strategy::Diagnostic(s) => s.end(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(reference: &str, location: &str) -> RenderLabels {
        RenderLabels {
            last_ref: Some(reference.to_string()),
            last_rendered_in: Some(location.to_string()),
        }
    }

    #[test]
    fn test_signal_checks_generation() {
        let mut strategy = SignalStrategy::default();
        let obj = Arc::new(0u8);

        strategy.record(&obj, "x", RenderLabels::default(), 4);

        assert!(strategy.has_rendered(&obj, "x", 4));
        assert!(!strategy.has_rendered(&obj, "x", 5));
        assert!(strategy.labels(&obj, "x").is_none());
    }

    #[test]
    fn test_diagnostic_keeps_labels() {
        let mut strategy = DiagnosticStrategy::default();
        let obj = Arc::new("person");

        strategy.record(&obj, "name", labels("person.name", "{{person-card}}"), 0);

        let hazard = strategy
            .labels(&obj, "name")
            .unwrap()
            .into_hazard(format!("{:?}", obj), "name", Some("{{person-editor}}".to_string()));
        assert_eq!(hazard.label.as_deref(), Some("person.name"));
        assert_eq!(hazard.rendered_in.as_deref(), Some("{{person-card}}"));
        assert_eq!(hazard.modified_in.as_deref(), Some("{{person-editor}}"));
        assert_eq!(hazard.object, "\"person\"");
        assert_eq!(hazard.key, "name");
    }

    #[test]
    fn test_end_drops_records() {
        let mut strategy = Strategy::for_mode(TrackingMode::Diagnostic);
        let obj = Arc::new(0u8);
        strategy.record(&obj, "x", labels("x", "{{app}}"), 0);

        strategy.end();

        assert!(!strategy.has_rendered(&obj, "x", 0));
        assert!(strategy.labels(&obj, "x").is_none());
    }

    #[test]
    fn test_disabled_records_nothing() {
        let mut strategy = Strategy::for_mode(TrackingMode::Disabled);
        let obj = Arc::new(0u8);

        strategy.record(&obj, "x", RenderLabels::default(), 0);

        assert!(!strategy.has_rendered(&obj, "x", 0));
    }
}
