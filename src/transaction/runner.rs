//! Transaction runner - scopes render passes and tracks hazards inside them.
//!
//! The TransactionRunner is the entry point for renderers. It handles:
//! - Opening and closing the single active transaction
//! - Recording which `(object, key)` pairs were rendered
//! - Detecting a modification of a pair rendered in the same transaction
//! - Resetting all per-transaction state, even when the render fails

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::diagnostics::{DebugStack, Describe, HazardReporter, RenderContext};
use crate::table::ObjectId;
use crate::transaction::config::RunnerConfig;
use crate::transaction::error::{TransactionError, TransactionResult};
use crate::transaction::mode::TrackingMode;
use crate::transaction::strategy::{RecordStrategy, RenderLabels, Strategy};

/// Render transaction runner.
///
/// One runner is meant to live as long as the renderer that owns it and be
/// reused for every render pass. Only one transaction can be open at a time.
///
/// Renderer code the runner calls ([`Describe`], [`DebugStack`], `Debug`
/// impls of tracked objects and the hazard reporter) always runs with the
/// runner unlocked and may query it.
pub struct TransactionRunner {
    config: RunnerConfig,
    state: Mutex<RunnerState>,
}

struct RunnerState {
    /// Whether a transaction is open.
    active: bool,
    /// Set by the first hazard of the open transaction.
    pending_reflush: bool,
    /// Incremented once per finished transaction.
    generation: u64,
    /// Debug stack of the open transaction (diagnostic mode only).
    stack: Option<Arc<dyn DebugStack>>,
    strategy: Strategy,
}

impl Default for TransactionRunner {
    fn default() -> Self {
        Self::new(RunnerConfig::default())
    }
}

impl TransactionRunner {
    /// Create a new runner with the given configuration.
    pub fn new(config: RunnerConfig) -> Self {
        let strategy = Strategy::for_mode(config.mode);
        Self {
            config,
            state: Mutex::new(RunnerState {
                active: false,
                pending_reflush: false,
                generation: 0,
                stack: None,
                strategy,
            }),
        }
    }

    /// Create a runner for `mode` with otherwise default settings.
    pub fn with_mode(mode: TrackingMode) -> Self {
        Self::new(RunnerConfig::new(mode))
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn mode(&self) -> TrackingMode {
        self.config.mode
    }

    /// Check if a transaction is open.
    pub fn in_transaction(&self) -> bool {
        self.state.lock().active
    }

    /// Number of transactions finished so far.
    pub fn generation(&self) -> u64 {
        self.state.lock().generation
    }

    /// Check if the open transaction has already detected a hazard.
    pub fn pending_reflush(&self) -> bool {
        self.state.lock().pending_reflush
    }

    /// Run `operation` inside a render transaction.
    ///
    /// Returns `Ok(true)` if a value was modified after it was rendered during
    /// the operation, meaning the render must be redone.
    ///
    /// Whether the operation returns, fails or panics, the transaction is
    /// closed, the generation advances by one and every render record is
    /// dropped before control returns to the caller. An operation error is
    /// returned unchanged.
    ///
    /// Fails with [`TransactionError::AlreadyInTransaction`] if a transaction
    /// is already open and the runner is configured to reject reentrancy.
    pub fn run_in_transaction<C, F, E>(&self, context: &C, operation: F) -> Result<bool, E>
    where
        C: RenderContext + ?Sized,
        F: FnOnce(&C) -> Result<(), E>,
        E: From<TransactionError>,
    {
        let guard = self.begin(context)?;
        operation(context)?;
        Ok(guard.finish())
    }

    fn begin<C>(&self, context: &C) -> TransactionResult<TransactionGuard<'_>>
    where
        C: RenderContext + ?Sized,
    {
        let stack = if self.config.mode.reports_hazards() {
            context.debug_stack()
        } else {
            None
        };

        let mut state = self.state.lock();
        if state.active {
            if self.config.reject_reentrant {
                return Err(TransactionError::AlreadyInTransaction {
                    generation: state.generation,
                });
            }
            tracing::warn!(
                generation = state.generation,
                "render transaction started inside another; outer tracking is reset"
            );
        }

        state.active = true;
        state.pending_reflush = false;
        state.stack = stack;

        tracing::trace!(
            generation = state.generation,
            mode = %self.config.mode,
            "render transaction started"
        );

        Ok(TransactionGuard { runner: self })
    }

    /// Record that `key` of `object` was rendered from `reference`.
    ///
    /// Does nothing outside a transaction. Rendering the same pair again
    /// overwrites the record and is not a hazard.
    pub fn did_render<T>(&self, object: &Arc<T>, key: &str, reference: Option<&dyn Describe>)
    where
        T: ?Sized + Send + Sync + 'static,
    {
        if !self.config.mode.is_tracking() {
            return;
        }

        let mut labels = RenderLabels::default();
        if self.config.mode.reports_hazards() {
            let Some(stack) = self.open_stack() else {
                return;
            };
            labels.last_ref = reference.and_then(|r| r.describe());
            labels.last_rendered_in = stack.and_then(|s| s.peek());
        }

        let mut state = self.state.lock();
        if !state.active {
            return;
        }
        let generation = state.generation;
        state.strategy.record(object, key, labels, generation);
    }

    /// Declare that `key` of `object` is about to be modified.
    ///
    /// Does nothing outside a transaction. If the pair was rendered in the
    /// open transaction, the transaction will report that a reflush is
    /// required; in diagnostic mode the hazard is also handed to the
    /// configured reporter.
    ///
    /// `T: Debug` is required in every mode because the mode is chosen at
    /// runtime. The object is only formatted when a hazard is reported, so
    /// in `SignalOnly` and `Disabled` the impl is never called.
    pub fn assert_not_rendered<T>(&self, object: &Arc<T>, key: &str)
    where
        T: ?Sized + fmt::Debug,
    {
        if !self.config.mode.is_tracking() {
            return;
        }

        let (labels, stack) = {
            let mut state = self.state.lock();
            if !state.active || !state.strategy.has_rendered(object, key, state.generation) {
                return;
            }

            state.pending_reflush = true;
            tracing::debug!(
                generation = state.generation,
                object = %ObjectId::of(object),
                key,
                "rendered value modified in the same transaction, reflush required"
            );

            match state.strategy.labels(object, key) {
                Some(labels) => (labels, state.stack.clone()),
                None => return,
            }
        };

        let modified_in = stack.and_then(|s| s.peek());
        let hazard = labels.into_hazard(format!("{:?}", object), key, modified_in);
        self.config.reporter.report(&hazard);
    }

    /// Check if `key` of `object` was rendered in the open transaction.
    ///
    /// Always false outside a transaction.
    pub fn has_rendered<T: ?Sized>(&self, object: &Arc<T>, key: &str) -> bool {
        let state = self.state.lock();
        state.active && state.strategy.has_rendered(object, key, state.generation)
    }

    /// Debug stack of the open transaction, or `None` if none is open.
    fn open_stack(&self) -> Option<Option<Arc<dyn DebugStack>>> {
        let state = self.state.lock();
        state.active.then(|| state.stack.clone())
    }

    /// Close the open transaction.
    fn end(&self) {
        let stack = {
            let mut state = self.state.lock();
            state.active = false;
            state.strategy.end();

            tracing::trace!(
                generation = state.generation,
                reflush = state.pending_reflush,
                "render transaction finished"
            );

            state.generation = state.generation.wrapping_add(1);
            state.stack.take()
        };
        // Dropped unlocked: the stack's own Drop is renderer code too.
        drop(stack);
    }
}

/// Closes the transaction when dropped, on every exit path of
/// `run_in_transaction` including unwinding.
struct TransactionGuard<'a> {
    runner: &'a TransactionRunner,
}

impl TransactionGuard<'_> {
    /// Read the reflush flag, then close the transaction.
    fn finish(self) -> bool {
        let reflush = self.runner.pending_reflush();
        drop(self);
        reflush
    }
}

impl Drop for TransactionGuard<'_> {
    fn drop(&mut self) {
        self.runner.end();
    }
}

impl fmt::Debug for TransactionRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("TransactionRunner")
            .field("mode", &self.config.mode)
            .field("active", &state.active)
            .field("generation", &state.generation)
            .field("strategy", &state.strategy)
            .finish()
    }
}
