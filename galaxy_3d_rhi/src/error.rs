//! Error types for the Galaxy3D RHI
//!
//! Attachment declarations never fail on the spot: every problem in a layout
//! description is reported by `RenderAttachmentLayoutBuilder::end()` through
//! the `Error` type defined here.

use std::fmt;
use crate::attachment::{AttachmentName, AttachmentUsage, Format};

/// Result type for Galaxy3D RHI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse result code, for callers that only need to know the failure class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultCode {
    /// The operation succeeded
    Success,
    /// Generic failure
    Fail,
    /// A capacity limit was exceeded
    OutOfMemory,
    /// The object was not in a state allowing the operation
    InvalidOperation,
    /// The description contains an invalid or unresolved value
    InvalidArgument,
}

impl ResultCode {
    /// Returns true for `ResultCode::Success`
    pub fn is_success(self) -> bool {
        self == ResultCode::Success
    }

    /// Result code of an operation result
    pub fn from_result<T>(result: &Result<T>) -> Self {
        match result {
            Ok(_) => ResultCode::Success,
            Err(error) => error.result_code(),
        }
    }
}

/// Galaxy3D RHI errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A reuse-by-name declaration or subpass input references a name that no
    /// earlier-or-equal subpass defined
    UnresolvedAttachment {
        subpass: u32,
        name: AttachmentName,
    },

    /// A reuse-by-name declaration supplies a format different from the
    /// format the attachment was defined with
    FormatMismatch {
        subpass: u32,
        name: AttachmentName,
        expected: Format,
        found: Format,
    },

    /// An attachment is referenced in a role incompatible with its definition
    /// (e.g. a depth/stencil attachment reused as a render target)
    AttachmentUsageMismatch {
        subpass: u32,
        name: AttachmentName,
        defined_as: AttachmentUsage,
        used_as: AttachmentUsage,
    },

    /// The same attachment is used twice as an output of one subpass
    DuplicateAttachment {
        subpass: u32,
        name: AttachmentName,
    },

    /// Resolve source or destination is malformed
    InvalidResolve {
        subpass: u32,
        name: AttachmentName,
        reason: String,
    },

    /// A platform limit was exceeded
    LimitExceeded {
        what: &'static str,
        count: usize,
        max: usize,
    },

    /// Invalid value in a description
    InvalidArgument(String),

    /// Operation not allowed in the current state
    InvalidOperation(String),
}

impl Error {
    /// Coarse failure class of this error
    pub fn result_code(&self) -> ResultCode {
        match self {
            Error::LimitExceeded { .. } => ResultCode::OutOfMemory,
            Error::InvalidOperation(_) => ResultCode::InvalidOperation,
            Error::UnresolvedAttachment { .. }
            | Error::FormatMismatch { .. }
            | Error::AttachmentUsageMismatch { .. }
            | Error::DuplicateAttachment { .. }
            | Error::InvalidResolve { .. }
            | Error::InvalidArgument(_) => ResultCode::InvalidArgument,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnresolvedAttachment { subpass, name } => {
                write!(f, "Unresolved attachment {} in subpass {}", name, subpass)
            }
            Error::FormatMismatch { subpass, name, expected, found } => write!(
                f,
                "Format mismatch for attachment {} in subpass {}: defined as {:?}, used as {:?}",
                name, subpass, expected, found
            ),
            Error::AttachmentUsageMismatch { subpass, name, defined_as, used_as } => write!(
                f,
                "Attachment {} in subpass {} is a {} attachment and cannot be used as {}",
                name, subpass, defined_as, used_as
            ),
            Error::DuplicateAttachment { subpass, name } => {
                write!(f, "Attachment {} is used more than once in subpass {}", name, subpass)
            }
            Error::InvalidResolve { subpass, name, reason } => {
                write!(f, "Invalid resolve for {} in subpass {}: {}", name, subpass, reason)
            }
            Error::LimitExceeded { what, count, max } => {
                write!(f, "Limit exceeded: {} {} (max {})", count, what, max)
            }
            Error::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            Error::InvalidOperation(msg) => write!(f, "Invalid operation: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
