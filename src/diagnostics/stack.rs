//! Debug stack seam: where in the render tree execution currently is.

use std::sync::Arc;

use parking_lot::Mutex;

/// Reports the current logical location inside a render tree.
///
/// Used only to label hazard reports; the runner never interprets the label.
pub trait DebugStack: Send + Sync {
    /// Label of the innermost frame, if any.
    fn peek(&self) -> Option<String>;
}

/// The value a renderer hands to
/// [`TransactionRunner::run_in_transaction`](crate::transaction::TransactionRunner::run_in_transaction).
///
/// The runner only asks it for its debug stack, once per transaction.
pub trait RenderContext {
    fn debug_stack(&self) -> Option<Arc<dyn DebugStack>>;
}

/// A context without a debug stack. Hazard reports fall back to
/// "an unknown location".
impl RenderContext for () {
    fn debug_stack(&self) -> Option<Arc<dyn DebugStack>> {
        None
    }
}

impl RenderContext for Arc<RenderStack> {
    fn debug_stack(&self) -> Option<Arc<dyn DebugStack>> {
        Some(Arc::clone(self) as Arc<dyn DebugStack>)
    }
}

/// Stock [`DebugStack`]: a stack of frame labels pushed and popped by the
/// renderer as it descends the tree.
#[derive(Debug, Default)]
pub struct RenderStack {
    frames: Mutex<Vec<String>>,
}

impl RenderStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter a frame.
    pub fn push(&self, label: impl Into<String>) {
        self.frames.lock().push(label.into());
    }

    /// Leave the innermost frame.
    pub fn pop(&self) -> Option<String> {
        self.frames.lock().pop()
    }

    pub fn depth(&self) -> usize {
        self.frames.lock().len()
    }
}

impl DebugStack for RenderStack {
    fn peek(&self) -> Option<String> {
        self.frames.lock().last().cloned()
    }
}
