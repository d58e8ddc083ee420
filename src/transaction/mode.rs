//! Tracking modes.
//!
//! The runner supports three levels of hazard tracking:
//! - Disabled: nothing is recorded, transactions never ask for a reflush
//! - SignalOnly: hazards request a reflush, no report is built
//! - Diagnostic: hazards request a reflush and are reported with labels

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::transaction::error::TransactionError;

/// How much render tracking the runner performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackingMode {
    /// No tracking at all.
    ///
    /// `run_in_transaction` still runs the operation inside a transaction
    /// scope, but `did_render` and `assert_not_rendered` return immediately
    /// and the transaction always reports that no reflush is needed.
    #[serde(rename = "disabled")]
    Disabled,

    /// Minimal tracking.
    ///
    /// Each record is the generation id of the transaction that made it.
    /// A hazard sets the reflush flag and nothing else.
    #[serde(rename = "signal", alias = "signal_only")]
    SignalOnly,

    /// Full tracking.
    ///
    /// Each record keeps the reference label and the debug stack location it
    /// was rendered in. A hazard sets the reflush flag and is handed to the
    /// configured reporter.
    #[serde(rename = "diagnostic")]
    Diagnostic,
}

impl Default for TrackingMode {
    /// `Diagnostic` in debug builds, `SignalOnly` otherwise.
    fn default() -> Self {
        if cfg!(debug_assertions) {
            TrackingMode::Diagnostic
        } else {
            TrackingMode::SignalOnly
        }
    }
}

impl TrackingMode {
    /// Check if renders are recorded at all.
    pub fn is_tracking(&self) -> bool {
        !matches!(self, TrackingMode::Disabled)
    }

    /// Check if hazards produce a report.
    pub fn reports_hazards(&self) -> bool {
        matches!(self, TrackingMode::Diagnostic)
    }

    /// Get a human-readable description of this mode.
    pub fn description(&self) -> &'static str {
        match self {
            TrackingMode::Disabled => "Render tracking is off; no reflush is ever requested",
            TrackingMode::SignalOnly => "Hazards request a reflush without a report",
            TrackingMode::Diagnostic => "Hazards request a reflush and are reported with locations",
        }
    }
}

impl fmt::Display for TrackingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackingMode::Disabled => write!(f, "disabled"),
            TrackingMode::SignalOnly => write!(f, "signal"),
            TrackingMode::Diagnostic => write!(f, "diagnostic"),
        }
    }
}

impl std::str::FromStr for TrackingMode {
    type Err = TransactionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "disabled" | "off" | "none" => Ok(TrackingMode::Disabled),
            "signal" | "signal_only" | "signal-only" => Ok(TrackingMode::SignalOnly),
            "diagnostic" | "debug" => Ok(TrackingMode::Diagnostic),
            _ => Err(TransactionError::InvalidConfig(format!(
                "unknown tracking mode: {}",
                s
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mode_follows_build() {
        let expected = if cfg!(debug_assertions) {
            TrackingMode::Diagnostic
        } else {
            TrackingMode::SignalOnly
        };
        assert_eq!(TrackingMode::default(), expected);
    }

    #[test]
    fn test_mode_flags() {
        assert!(!TrackingMode::Disabled.is_tracking());
        assert!(TrackingMode::SignalOnly.is_tracking());
        assert!(!TrackingMode::SignalOnly.reports_hazards());
        assert!(TrackingMode::Diagnostic.reports_hazards());
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!("off".parse::<TrackingMode>().unwrap(), TrackingMode::Disabled);
        assert_eq!(
            "Signal-Only".parse::<TrackingMode>().unwrap(),
            TrackingMode::SignalOnly
        );
        assert_eq!(
            " diagnostic ".parse::<TrackingMode>().unwrap(),
            TrackingMode::Diagnostic
        );
        assert!(matches!(
            "loud".parse::<TrackingMode>(),
            Err(TransactionError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_display_parses_back() {
        for mode in [
            TrackingMode::Disabled,
            TrackingMode::SignalOnly,
            TrackingMode::Diagnostic,
        ] {
            assert_eq!(mode.to_string().parse::<TrackingMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(
            serde_json::to_string(&TrackingMode::SignalOnly).unwrap(),
            "\"signal\""
        );
        let mode: TrackingMode = serde_json::from_str("\"signal_only\"").unwrap();
        assert_eq!(mode, TrackingMode::SignalOnly);
        let mode: TrackingMode = serde_json::from_str("\"diagnostic\"").unwrap();
        assert_eq!(mode, TrackingMode::Diagnostic);
    }
}
