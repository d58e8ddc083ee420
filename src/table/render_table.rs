//! Weak-keyed mapping from object identity to per-key render records.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::table::types::{Liveness, ObjectId};

/// Records for a single object, keyed by the facet that was rendered.
struct ObjectEntry<R> {
    /// Probe for the object this entry was created for.
    probe: Box<dyn Liveness>,
    /// Render records per key.
    keys: HashMap<String, R>,
}

impl<R> ObjectEntry<R> {
    fn is_alive(&self) -> bool {
        self.probe.is_alive()
    }
}

/// Render record table.
///
/// Maps `object -> key -> record` without extending the lifetime of any
/// object: the outer map is keyed by [`ObjectId`] and each entry only holds a
/// `Weak` probe. Dropping the last `Arc` still drops the object; the probe
/// only keeps the allocation reserved, so no other object can take over its
/// id while the table lives. Entries of dropped objects are treated as absent.
///
/// There is no per-entry removal. The owner discards the whole table with
/// [`RenderTable::take`] at the end of every transaction.
///
/// A dropped object's destructor runs on time, but the memory of its `Arc`
/// allocation is freed only when the table holding its probe is taken and
/// dropped, i.e. at transaction end.
pub struct RenderTable<R> {
    objects: HashMap<ObjectId, ObjectEntry<R>>,
}

impl<R> Default for RenderTable<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> RenderTable<R> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            objects: HashMap::new(),
        }
    }

    /// Record `record` for `(object, key)`, overwriting any previous record
    /// for that exact pair.
    ///
    /// The per-object map is created lazily on first use.
    pub fn insert<T>(&mut self, object: &Arc<T>, key: &str, record: R)
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.objects
            .entry(ObjectId::of(object))
            .or_insert_with(|| ObjectEntry {
                probe: Box::new(Arc::downgrade(object)),
                keys: HashMap::new(),
            })
            .keys
            .insert(key.to_string(), record);
    }

    /// Get the record for `(object, key)`.
    pub fn get<T: ?Sized>(&self, object: &Arc<T>, key: &str) -> Option<&R> {
        self.objects
            .get(&ObjectId::of(object))
            .filter(|entry| entry.is_alive())
            .and_then(|entry| entry.keys.get(key))
    }

    /// Check if a record exists for `(object, key)`.
    pub fn contains<T: ?Sized>(&self, object: &Arc<T>, key: &str) -> bool {
        self.get(object, key).is_some()
    }

    /// Number of live objects with at least one record.
    pub fn len(&self) -> usize {
        self.objects.values().filter(|e| e.is_alive()).count()
    }

    /// Check if no live object has a record.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Take the current contents, leaving a fresh empty table behind.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}

impl<R> fmt::Debug for RenderTable<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderTable")
            .field("objects", &self.objects.len())
            .field("live", &self.len())
            .finish()
    }
}
