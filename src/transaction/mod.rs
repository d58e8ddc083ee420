//! Render transactions.
//!
//! A render transaction scopes one render pass. While it is open the
//! renderer reports every `(object, key)` it renders and every `(object, key)`
//! it is about to modify. Modifying a pair that was already rendered in the
//! same pass is a hazard: the output of the pass can't be trusted and the
//! transaction reports that a reflush is required.
//!
//! # Architecture
//!
//! ```text
//!  run_in_transaction ──► begin ─► operation ─► TransactionGuard::drop ─► end
//!                                     │
//!              did_render / assert_not_rendered / has_rendered
//!                                     │
//!                                     ▼
//!                    RunnerState { active, pending_reflush,
//!                                  generation, stack, strategy }
//!                                                       │
//!                        chosen once from TrackingMode  │
//!             ┌──────────────────────┬──────────────────┴──────┐
//!             ▼                      ▼                         ▼
//!         Disabled              Signal                    Diagnostic
//!      (no records)     RenderTable<generation>    RenderTable<labels>
//! ```
//!
//! Labels, debug stack frames and object descriptions are computed with the
//! runner unlocked; the strategies only store and compare them.
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use rendertx::transaction::{TrackingMode, TransactionResult, TransactionRunner};
//!
//! let runner = TransactionRunner::with_mode(TrackingMode::SignalOnly);
//! let title: Arc<str> = Arc::from("Welcome");
//!
//! let reflush = runner.run_in_transaction(&(), |_| -> TransactionResult<()> {
//!     runner.did_render(&title, "text", None);
//!     // A later component writes to what was just rendered.
//!     runner.assert_not_rendered(&title, "text");
//!     Ok(())
//! })?;
//!
//! assert!(reflush);
//! # Ok::<(), rendertx::transaction::TransactionError>(())
//! ```

mod config;
mod error;
mod mode;
mod runner;
mod strategy;

pub use config::{RunnerConfig, MODE_ENV_VAR};
pub use error::{TransactionError, TransactionResult};
pub use mode::TrackingMode;
pub use runner::TransactionRunner;
