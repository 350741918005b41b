/*!
# Galaxy 3D RHI

Render attachment layouts for the Galaxy 3D rendering engine.

This crate lets a caller describe, subpass by subpass, which attachments
(color, depth/stencil, resolve, subpass input, shading rate) a render pass
uses, and compiles that description into an immutable, validated layout that
a backend (Vulkan, Direct3D 12, etc.) turns into its native render pass.

## Architecture

- **RenderAttachmentLayoutBuilder**: owns the subpasses and builds the layout
- **SubpassAttachmentLayoutBuilder**: attachment declarations of one subpass
- **RenderAttachmentLayout**: deduplicated attachment table + per-subpass uses
- **RenderAttachmentConfiguration**: one subpass of a layout, as seen by a pipeline
*/

// Internal modules
mod error;
mod rhi;
pub mod attachment;
pub mod limits;
pub mod log;
pub mod render_attachment;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{Error, Result, ResultCode};

    // Logger facade
    pub use crate::rhi::Rhi;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Render attachment layouts and their value types
    pub mod rhi {
        pub use crate::attachment::*;
        pub use crate::limits::*;
        pub use crate::render_attachment::*;
    }
}
