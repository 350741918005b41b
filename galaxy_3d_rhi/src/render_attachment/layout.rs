/// Render attachment layout: the validated, immutable output of
/// `RenderAttachmentLayoutBuilder::end()`
///
/// A layout holds one table of distinct attachments and, per subpass, the
/// indices into that table with the metadata of each use. Backends read it
/// to create their native render pass and framebuffer objects.

use std::hash::{Hash, Hasher};
use rustc_hash::FxHasher;
use smallvec::SmallVec;
use crate::attachment::{
    AttachmentLoadStoreAction, AttachmentName, AttachmentUsage, Format, ImageAspectFlags,
    ScopeAttachmentAccess, ScopeAttachmentStage,
};
use crate::error::{Error, Result};
use crate::limits::{ATTACHMENT_COLOR_COUNT_MAX, RENDER_ATTACHMENT_COUNT_MAX, SUBPASS_COUNT_MAX};

/// Entry of the attachment table
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RenderAttachment {
    /// Name (anonymous attachments have an empty name)
    pub name: AttachmentName,
    /// Pixel format
    pub format: Format,
    /// Role of the declaration that created the attachment
    pub usage: AttachmentUsage,
    /// Subpass that created the attachment
    pub first_subpass: u32,
}

/// Use of a table attachment as render target, depth/stencil or shading rate
#[derive(Debug, Clone, PartialEq, Hash)]
pub struct RenderAttachmentDescriptor {
    /// Index in the attachment table
    pub attachment_index: u32,
    /// Index of the resolve destination (render targets only)
    pub resolve_attachment_index: Option<u32>,
    pub load_store_action: AttachmentLoadStoreAction,
    pub scope_attachment_access: ScopeAttachmentAccess,
    pub scope_attachment_stage: ScopeAttachmentStage,
}

/// Use of a table attachment as subpass input
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubpassInputDescriptor {
    /// Index in the attachment table
    pub attachment_index: u32,
    /// Planes read by the subpass
    pub aspect_flags: ImageAspectFlags,
    pub scope_attachment_access: ScopeAttachmentAccess,
    pub scope_attachment_stage: ScopeAttachmentStage,
}

/// Attachment uses of one subpass
#[derive(Debug, Clone, PartialEq, Hash, Default)]
pub struct SubpassRenderAttachmentLayout {
    pub(crate) render_targets: SmallVec<[RenderAttachmentDescriptor; ATTACHMENT_COLOR_COUNT_MAX]>,
    pub(crate) subpass_inputs: SmallVec<[SubpassInputDescriptor; ATTACHMENT_COLOR_COUNT_MAX]>,
    pub(crate) depth_stencil: Option<RenderAttachmentDescriptor>,
    pub(crate) shading_rate: Option<RenderAttachmentDescriptor>,
}

impl SubpassRenderAttachmentLayout {
    /// Render targets, in declaration order
    pub fn render_targets(&self) -> &[RenderAttachmentDescriptor] {
        &self.render_targets
    }

    /// Subpass inputs, in declaration order
    pub fn subpass_inputs(&self) -> &[SubpassInputDescriptor] {
        &self.subpass_inputs
    }

    /// Depth/stencil use, if any
    pub fn depth_stencil(&self) -> Option<&RenderAttachmentDescriptor> {
        self.depth_stencil.as_ref()
    }

    /// Shading rate use, if any
    pub fn shading_rate(&self) -> Option<&RenderAttachmentDescriptor> {
        self.shading_rate.as_ref()
    }

    /// Table indices of the render targets, in declaration order
    pub fn render_target_indices(&self) -> impl Iterator<Item = u32> + '_ {
        self.render_targets.iter().map(|rt| rt.attachment_index)
    }

    /// Table indices of the resolve destinations, in render target order
    pub fn resolve_indices(&self) -> impl Iterator<Item = u32> + '_ {
        self.render_targets.iter().filter_map(|rt| rt.resolve_attachment_index)
    }

    /// Table indices of the subpass inputs, in declaration order
    pub fn subpass_input_indices(&self) -> impl Iterator<Item = u32> + '_ {
        self.subpass_inputs.iter().map(|input| input.attachment_index)
    }
}

/// Validated attachment layout of a (possibly multi-subpass) render pass
#[derive(Debug, Clone, PartialEq, Hash, Default)]
pub struct RenderAttachmentLayout {
    pub(crate) attachments: SmallVec<[RenderAttachment; RENDER_ATTACHMENT_COUNT_MAX]>,
    pub(crate) subpasses: SmallVec<[SubpassRenderAttachmentLayout; SUBPASS_COUNT_MAX]>,
}

impl RenderAttachmentLayout {
    /// The attachment table
    pub fn attachments(&self) -> &[RenderAttachment] {
        &self.attachments
    }

    /// Number of distinct attachments
    pub fn attachment_count(&self) -> usize {
        self.attachments.len()
    }

    /// Format of a table attachment
    pub fn attachment_format(&self, index: u32) -> Option<Format> {
        self.attachments.get(index as usize).map(|a| a.format)
    }

    /// Table index of a named attachment
    ///
    /// Anonymous attachments can't be looked up.
    pub fn attachment_index(&self, name: &AttachmentName) -> Option<u32> {
        if name.is_empty() {
            return None;
        }
        self.attachments
            .iter()
            .position(|a| &a.name == name)
            .map(|index| index as u32)
    }

    /// Per-subpass uses, in subpass order
    pub fn subpasses(&self) -> &[SubpassRenderAttachmentLayout] {
        &self.subpasses
    }

    /// Number of subpasses
    pub fn subpass_count(&self) -> usize {
        self.subpasses.len()
    }

    /// Uses of one subpass
    pub fn subpass(&self, index: u32) -> Option<&SubpassRenderAttachmentLayout> {
        self.subpasses.get(index as usize)
    }

    /// 64-bit hash of the whole layout, for pipeline state caches
    pub fn hash_value(&self) -> u64 {
        let mut hasher = FxHasher::default();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

// ============================================================================
// RenderAttachmentConfiguration
// ============================================================================

/// The view a pipeline state has of a layout: one of its subpasses
#[derive(Debug, Clone, PartialEq, Hash)]
pub struct RenderAttachmentConfiguration {
    layout: RenderAttachmentLayout,
    subpass_index: u32,
}

impl RenderAttachmentConfiguration {
    /// Create a configuration for subpass `subpass_index` of `layout`
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if the layout has no such subpass.
    pub fn new(layout: RenderAttachmentLayout, subpass_index: u32) -> Result<Self> {
        if subpass_index as usize >= layout.subpass_count() {
            crate::rhi_bail!("galaxy3d::rhi::RenderAttachmentConfiguration",
                Error::InvalidArgument(format!(
                    "Subpass {} out of range (layout has {} subpasses)",
                    subpass_index,
                    layout.subpass_count()
                )));
        }
        Ok(Self { layout, subpass_index })
    }

    /// The whole layout
    pub fn layout(&self) -> &RenderAttachmentLayout {
        &self.layout
    }

    /// Subpass of the layout this configuration describes
    pub fn subpass_index(&self) -> u32 {
        self.subpass_index
    }

    fn subpass(&self) -> &SubpassRenderAttachmentLayout {
        // Checked by new()
        &self.layout.subpasses[self.subpass_index as usize]
    }

    fn format_of(&self, index: u32) -> Format {
        self.layout.attachment_format(index).unwrap_or(Format::Unknown)
    }

    /// Number of render targets of the subpass
    pub fn render_target_count(&self) -> usize {
        self.subpass().render_targets.len()
    }

    /// Format of render target `index` (Unknown if out of range)
    pub fn render_target_format(&self, index: usize) -> Format {
        self.subpass()
            .render_targets
            .get(index)
            .map_or(Format::Unknown, |rt| self.format_of(rt.attachment_index))
    }

    /// Format of the resolve destination of render target `index`
    /// (Unknown if it isn't resolved)
    pub fn resolve_format(&self, index: usize) -> Format {
        self.subpass()
            .render_targets
            .get(index)
            .and_then(|rt| rt.resolve_attachment_index)
            .map_or(Format::Unknown, |resolve| self.format_of(resolve))
    }

    /// Depth/stencil format (Unknown without depth/stencil)
    pub fn depth_stencil_format(&self) -> Format {
        self.subpass()
            .depth_stencil
            .as_ref()
            .map_or(Format::Unknown, |ds| self.format_of(ds.attachment_index))
    }

    /// Shading rate format (Unknown without shading rate)
    pub fn shading_rate_format(&self) -> Format {
        self.subpass()
            .shading_rate
            .as_ref()
            .map_or(Format::Unknown, |sr| self.format_of(sr.attachment_index))
    }

    /// Number of subpass inputs of the subpass
    pub fn subpass_input_count(&self) -> usize {
        self.subpass().subpass_inputs.len()
    }

    /// Format of subpass input `index` (Unknown if out of range)
    pub fn subpass_input_format(&self, index: usize) -> Format {
        self.subpass()
            .subpass_inputs
            .get(index)
            .map_or(Format::Unknown, |input| self.format_of(input.attachment_index))
    }

    /// 64-bit hash of layout and subpass index
    pub fn hash_value(&self) -> u64 {
        let mut hasher = FxHasher::default();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
