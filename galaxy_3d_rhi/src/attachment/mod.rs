//! Attachment value types
//!
//! Plain data describing one attachment use: its name, pixel format,
//! load/store behaviour and the scope access/stage metadata a backend needs
//! to compute subpass dependencies.

mod format;
mod load_store;
mod name;
mod scope;

use std::fmt;

pub use format::{Format, ImageAspectFlags};
pub use load_store::{AttachmentLoadStoreAction, ClearValue, LoadOp, StoreOp};
pub use name::AttachmentName;
pub use scope::{ScopeAttachmentAccess, ScopeAttachmentStage};

/// Role an attachment plays in a subpass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttachmentUsage {
    /// Color output
    RenderTarget,
    /// Destination of a multisample resolve
    Resolve,
    /// Depth/stencil
    DepthStencil,
    /// Variable rate shading image
    ShadingRate,
    /// Read through a subpass input
    SubpassInput,
}

impl AttachmentUsage {
    /// Returns true if an attachment defined with `self` can be used as `other`
    ///
    /// Render targets and resolve destinations are both color images and can
    /// take each other's role. Any output attachment except a shading rate
    /// image can be read as a subpass input.
    pub fn is_compatible_with(self, other: AttachmentUsage) -> bool {
        use AttachmentUsage::*;
        match (self, other) {
            (RenderTarget | Resolve, RenderTarget | Resolve) => true,
            (RenderTarget | Resolve | DepthStencil, SubpassInput) => true,
            (DepthStencil, DepthStencil) => true,
            (ShadingRate, ShadingRate) => true,
            _ => false,
        }
    }
}

impl fmt::Display for AttachmentUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AttachmentUsage::RenderTarget => "render target",
            AttachmentUsage::Resolve => "resolve",
            AttachmentUsage::DepthStencil => "depth/stencil",
            AttachmentUsage::ShadingRate => "shading rate",
            AttachmentUsage::SubpassInput => "subpass input",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
#[path = "attachment_tests.rs"]
mod tests;
