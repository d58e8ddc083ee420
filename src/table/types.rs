//! Identity and liveness wrappers for objects tracked by the render table.

use std::fmt;
use std::sync::{Arc, Weak};

/// Identity of a rendered object: the address of its `Arc` allocation.
///
/// Two `Arc`s pointing at the same allocation share an id. An id alone says
/// nothing about whether the object is still alive; addresses are reused once
/// the allocation is freed, so the table pairs every id with a [`Liveness`]
/// probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(usize);

impl ObjectId {
    /// Identity of the allocation behind `object`.
    pub fn of<T: ?Sized>(object: &Arc<T>) -> Self {
        Self(Arc::as_ptr(object).cast::<()>() as usize)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Non-owning probe answering "is this object still reachable?".
///
/// Implemented for `Weak<T>`, so holding a probe never keeps the object alive.
pub trait Liveness: Send + Sync {
    fn is_alive(&self) -> bool;
}

impl<T: ?Sized + Send + Sync> Liveness for Weak<T> {
    fn is_alive(&self) -> bool {
        self.strong_count() > 0
    }
}
