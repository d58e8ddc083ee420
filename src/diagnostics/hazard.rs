//! Hazard reports and the reporters that surface them.

use std::fmt;

const SAME_VALUE: &str = "the same value";
const UNKNOWN_LOCATION: &str = "an unknown location";

/// A value modified after it was rendered in the same transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hazard {
    /// `Debug` rendering of the object that owns the value.
    pub object: String,
    /// Facet of the object that was rendered and is now being modified.
    pub key: String,
    /// Self-description of the rendered reference, if it had one.
    pub label: Option<String>,
    /// Debug stack label captured when the value was rendered.
    pub rendered_in: Option<String>,
    /// Debug stack label at the time of the modification.
    pub modified_in: Option<String>,
}

impl Hazard {
    /// The human-readable report.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Hazard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "You modified \"{}\" twice on {} in a single render. \
             It was rendered in {} and modified in {}. \
             This was unreliable and slow and is no longer supported.",
            self.label.as_deref().unwrap_or(SAME_VALUE),
            self.object,
            self.rendered_in.as_deref().unwrap_or(UNKNOWN_LOCATION),
            self.modified_in.as_deref().unwrap_or(UNKNOWN_LOCATION),
        )
    }
}

/// Surfaces hazard reports in diagnostic mode.
///
/// Whether a report halts execution is up to the reporter. The runner sets
/// the reflush flag whether or not `report` returns.
pub trait HazardReporter: Send + Sync {
    fn report(&self, hazard: &Hazard);
}

impl<F> HazardReporter for F
where
    F: Fn(&Hazard) + Send + Sync,
{
    fn report(&self, hazard: &Hazard) {
        self(hazard)
    }
}

/// Emits each hazard as a `tracing` warning. Never halts.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl HazardReporter for TracingReporter {
    fn report(&self, hazard: &Hazard) {
        tracing::warn!(
            key = %hazard.key,
            object = %hazard.object,
            "{}",
            hazard
        );
    }
}

/// Panics with the hazard message, turning every hazard into a hard failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanicReporter;

impl HazardReporter for PanicReporter {
    fn report(&self, hazard: &Hazard) {
        panic!("{hazard}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hazard() -> Hazard {
        Hazard {
            object: "Person { name: \"Ada\" }".to_string(),
            key: "name".to_string(),
            label: Some("model.name".to_string()),
            rendered_in: Some("{{person-card}}".to_string()),
            modified_in: Some("{{person-editor}}".to_string()),
        }
    }

    #[test]
    fn test_message_names_everything() {
        let msg = hazard().message();
        assert!(msg.starts_with("You modified \"model.name\" twice on Person { name: \"Ada\" }"));
        assert!(msg.contains("rendered in {{person-card}}"));
        assert!(msg.contains("modified in {{person-editor}}"));
    }

    #[test]
    fn test_message_fallbacks() {
        let msg = Hazard {
            label: None,
            rendered_in: None,
            modified_in: None,
            ..hazard()
        }
        .message();
        assert!(msg.contains("\"the same value\""));
        assert!(msg.contains("rendered in an unknown location and modified in an unknown location"));
    }

    #[test]
    fn test_tracing_reporter_does_not_halt() {
        TracingReporter.report(&hazard());
    }

    #[test]
    #[should_panic(expected = "You modified \"model.name\"")]
    fn test_panic_reporter_halts() {
        PanicReporter.report(&hazard());
    }

    #[test]
    fn test_closure_reporter() {
        let seen = parking_lot::Mutex::new(Vec::new());
        let reporter = |h: &Hazard| seen.lock().push(h.key.clone());
        reporter.report(&hazard());
        assert_eq!(seen.lock().as_slice(), ["name".to_string()]);
    }
}
