//! rendertx - render-transaction integrity tracking
//!
//! Detects values that are modified after they were rendered within the same
//! render pass. Such a write makes the pass's output inconsistent, so the
//! transaction that scoped the pass reports that a reflush is required and,
//! in diagnostic mode, reports where the value was rendered and where it was
//! modified.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use rendertx::diagnostics::{PropertyRef, RenderStack};
//! use rendertx::transaction::{RunnerConfig, TrackingMode, TransactionResult, TransactionRunner};
//!
//! let runner = TransactionRunner::new(RunnerConfig::new(TrackingMode::Diagnostic));
//! let stack = Arc::new(RenderStack::new());
//! let user: Arc<String> = Arc::new("Ada".to_string());
//! let name = PropertyRef::root("user").child("name");
//!
//! let reflush = runner.run_in_transaction(&stack, |stack| -> TransactionResult<()> {
//!     stack.push("{{user-card}}");
//!     runner.did_render(&user, "name", Some(&*name));
//!     stack.pop();
//!     Ok(())
//! })?;
//!
//! assert!(!reflush);
//! # Ok::<(), rendertx::transaction::TransactionError>(())
//! ```

pub mod diagnostics;
pub mod table;
pub mod transaction;
