//! Runner configuration.

use std::fmt;
use std::sync::Arc;

use crate::diagnostics::{HazardReporter, TracingReporter};
use crate::transaction::error::TransactionResult;
use crate::transaction::mode::TrackingMode;

/// Environment variable read by [`RunnerConfig::from_env`].
pub const MODE_ENV_VAR: &str = "RENDERTX_MODE";

/// Transaction runner configuration options.
#[derive(Clone)]
pub struct RunnerConfig {
    /// How much tracking to perform.
    pub mode: TrackingMode,
    /// Fail fast when a transaction is started inside another one.
    pub reject_reentrant: bool,
    /// Where hazard reports go in diagnostic mode.
    pub reporter: Arc<dyn HazardReporter>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            mode: TrackingMode::default(),
            reject_reentrant: true,
            reporter: Arc::new(TracingReporter),
        }
    }
}

impl RunnerConfig {
    /// Create a new configuration with the given mode.
    pub fn new(mode: TrackingMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Build a configuration from `RENDERTX_MODE`, falling back to the
    /// build default when it is unset.
    pub fn from_env() -> TransactionResult<Self> {
        Self::from_mode_var(std::env::var(MODE_ENV_VAR).ok())
    }

    fn from_mode_var(value: Option<String>) -> TransactionResult<Self> {
        match value {
            Some(raw) if !raw.trim().is_empty() => Ok(Self::new(raw.parse()?)),
            _ => Ok(Self::default()),
        }
    }

    /// Set the tracking mode.
    pub fn mode(mut self, mode: TrackingMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set reject_reentrant flag.
    pub fn reject_reentrant(mut self, value: bool) -> Self {
        self.reject_reentrant = value;
        self
    }

    /// Set the hazard reporter.
    pub fn reporter(mut self, reporter: impl HazardReporter + 'static) -> Self {
        self.reporter = Arc::new(reporter);
        self
    }
}

impl fmt::Debug for RunnerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunnerConfig")
            .field("mode", &self.mode)
            .field("reject_reentrant", &self.reject_reentrant)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::PanicReporter;
    use crate::transaction::error::TransactionError;

    #[test]
    fn test_default_config() {
        let config = RunnerConfig::default();
        assert_eq!(config.mode, TrackingMode::default());
        assert!(config.reject_reentrant);
    }

    #[test]
    fn test_builder() {
        let config = RunnerConfig::new(TrackingMode::SignalOnly)
            .reject_reentrant(false)
            .reporter(PanicReporter)
            .mode(TrackingMode::Diagnostic);

        assert_eq!(config.mode, TrackingMode::Diagnostic);
        assert!(!config.reject_reentrant);
    }

    #[test]
    fn test_mode_var() {
        let config = RunnerConfig::from_mode_var(Some("disabled".to_string())).unwrap();
        assert_eq!(config.mode, TrackingMode::Disabled);

        let config = RunnerConfig::from_mode_var(None).unwrap();
        assert_eq!(config.mode, TrackingMode::default());

        let config = RunnerConfig::from_mode_var(Some("  ".to_string())).unwrap();
        assert_eq!(config.mode, TrackingMode::default());

        let err = RunnerConfig::from_mode_var(Some("verbose".to_string())).unwrap_err();
        assert_eq!(
            err,
            TransactionError::InvalidConfig("unknown tracking mode: verbose".to_string())
        );
    }
}
