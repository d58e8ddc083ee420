//! Collaborator seams used to label and surface hazards.
//!
//! None of these affect whether a reflush is required; they only shape the
//! diagnostic report produced in [`TrackingMode::Diagnostic`](crate::transaction::TrackingMode::Diagnostic).

mod describe;
mod hazard;
mod stack;

pub use describe::{Describe, PropertyRef};
pub use hazard::{Hazard, HazardReporter, PanicReporter, TracingReporter};
pub use stack::{DebugStack, RenderContext, RenderStack};
