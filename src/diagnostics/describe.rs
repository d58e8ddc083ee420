//! Optional self-description for rendered references.

use std::sync::Arc;

/// A rendered value that can name itself in a hazard report.
pub trait Describe {
    fn describe(&self) -> Option<String>;
}

impl Describe for String {
    fn describe(&self) -> Option<String> {
        Some(self.clone())
    }
}

impl Describe for &str {
    fn describe(&self) -> Option<String> {
        Some((*self).to_string())
    }
}

/// A property read, chained to the reference it was read from.
///
/// Describes itself as the dotted path from the root, e.g. `model.user.name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyRef {
    key: String,
    parent: Option<Arc<PropertyRef>>,
}

impl PropertyRef {
    /// Create a root reference.
    pub fn root(key: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            key: key.into(),
            parent: None,
        })
    }

    /// Create a reference to property `key` of `self`.
    pub fn child(self: &Arc<Self>, key: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            key: key.into(),
            parent: Some(Arc::clone(self)),
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn parent(&self) -> Option<&Arc<PropertyRef>> {
        self.parent.as_ref()
    }

    /// Dotted path from the root to this reference.
    pub fn path(&self) -> String {
        let mut parts = vec![self.key.as_str()];
        let mut current = self.parent.as_deref();
        while let Some(node) = current {
            parts.push(node.key.as_str());
            current = node.parent.as_deref();
        }
        parts.reverse();
        parts.join(".")
    }
}

impl Describe for PropertyRef {
    fn describe(&self) -> Option<String> {
        Some(self.path())
    }
}
