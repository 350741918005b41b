//! Render attachment layouts
//!
//! Describes, subpass by subpass, the attachments a render pass uses and
//! compiles the description into a validated `RenderAttachmentLayout`.
//! Subpasses reference attachments of earlier subpasses by name so that a
//! backend can merge them into one native render pass.

mod attachment_table;
mod layout;
mod layout_builder;
mod subpass_builder;

pub use layout::{
    RenderAttachment, RenderAttachmentConfiguration, RenderAttachmentDescriptor,
    RenderAttachmentLayout, SubpassInputDescriptor, SubpassRenderAttachmentLayout,
};
pub use layout_builder::{BuilderState, RenderAttachmentLayoutBuilder};
pub use subpass_builder::SubpassAttachmentLayoutBuilder;
