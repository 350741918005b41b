/// Attachment name, the identity used to link attachment uses across subpasses

use std::fmt;
use std::sync::Arc;

/// Name of a render attachment
///
/// Cheap to clone and compared by value. The empty name is the anonymous
/// attachment: it always gets its own slot and can't be referenced by a
/// later declaration.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttachmentName(Arc<str>);

impl AttachmentName {
    /// Create a name from a string
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    /// The anonymous (empty) name
    pub fn anonymous() -> Self {
        Self::new("")
    }

    /// Get the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true for the anonymous name
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for AttachmentName {
    fn default() -> Self {
        Self::anonymous()
    }
}

impl From<&str> for AttachmentName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for AttachmentName {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

impl From<&AttachmentName> for AttachmentName {
    fn from(name: &AttachmentName) -> Self {
        name.clone()
    }
}

impl fmt::Display for AttachmentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "<anonymous>")
        } else {
            write!(f, "'{}'", self.0)
        }
    }
}

impl fmt::Debug for AttachmentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AttachmentName({:?})", &*self.0)
    }
}
