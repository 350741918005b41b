/// Builder for RenderAttachmentLayout
///
/// Owns one SubpassAttachmentLayoutBuilder per subpass. `end()` resolves
/// every attachment name across the subpasses, deduplicates the attachments
/// into one table and validates the whole description.

use smallvec::SmallVec;
use crate::attachment::{AttachmentName, AttachmentUsage};
use crate::error::{Error, Result, ResultCode};
use crate::limits::{LayoutLimits, RENDER_ATTACHMENT_COUNT_MAX};
use super::attachment_table::AttachmentTable;
use super::layout::{
    RenderAttachmentDescriptor, RenderAttachmentLayout, SubpassInputDescriptor,
    SubpassRenderAttachmentLayout,
};
use super::subpass_builder::{RenderAttachmentEntry, SubpassAttachmentLayoutBuilder};

/// Builder lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderState {
    /// Accepting subpasses (after construction or reset())
    Building,
    /// A layout was built; reset() before describing another one
    Finalized,
    /// Subpasses were added after end(); end() fails until reset()
    Invalidated,
}

/// Outputs already bound in the subpass being resolved
type UsedAttachments = SmallVec<[u32; RENDER_ATTACHMENT_COUNT_MAX]>;

/// Builder for RenderAttachmentLayout
///
/// # Example
///
/// ```
/// use galaxy_3d_rhi::galaxy3d::rhi::*;
///
/// let mut builder = RenderAttachmentLayoutBuilder::new();
/// builder.add_subpass()
///     .render_target_attachment(Format::R16G16B16A16_FLOAT, "Color0")
///     .render_target_attachment(Format::R16G16B16A16_FLOAT, "Color1")
///     .render_target_attachment(Format::R8G8B8A8_UNORM, "Swapchain")
///     .depth_stencil_attachment(Format::D32_FLOAT, "Depth");
/// builder.add_subpass()
///     .subpass_input_attachment("Color0", ImageAspectFlags::COLOR)
///     .reuse_render_target_attachment("Color1")
///     .reuse_depth_stencil_attachment("Depth");
/// builder.add_subpass()
///     .subpass_input_attachment("Color1", ImageAspectFlags::COLOR)
///     .reuse_render_target_attachment("Swapchain");
///
/// let layout = builder.end()?;
/// assert_eq!(layout.attachment_count(), 4);
/// assert_eq!(layout.subpass_count(), 3);
/// # Ok::<(), galaxy_3d_rhi::galaxy3d::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct RenderAttachmentLayoutBuilder {
    subpass_layout_builders: Vec<SubpassAttachmentLayoutBuilder>,
    limits: LayoutLimits,
    state: BuilderState,
}

impl Default for RenderAttachmentLayoutBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderAttachmentLayoutBuilder {
    /// Create a builder enforcing the default platform limits
    pub fn new() -> Self {
        Self::with_limits(LayoutLimits::default())
    }

    /// Create a builder enforcing custom limits
    pub fn with_limits(limits: LayoutLimits) -> Self {
        Self {
            subpass_layout_builders: Vec::new(),
            limits,
            state: BuilderState::Building,
        }
    }

    /// Limits checked by `end()`
    pub fn limits(&self) -> &LayoutLimits {
        &self.limits
    }

    /// Current lifecycle state
    pub fn state(&self) -> BuilderState {
        self.state
    }

    /// Add a new subpass to the layout
    ///
    /// The subpass gets the next index. The subpass limit is checked by
    /// `end()`, not here.
    pub fn add_subpass(&mut self) -> &mut SubpassAttachmentLayoutBuilder {
        self.invalidate_if_finalized();

        let index = self.subpass_layout_builders.len();
        self.subpass_layout_builders.push(SubpassAttachmentLayoutBuilder::new(index as u32));
        &mut self.subpass_layout_builders[index]
    }

    /// Number of subpasses added so far
    pub fn subpass_count(&self) -> usize {
        self.subpass_layout_builders.len()
    }

    /// Get a subpass added earlier
    pub fn subpass(&self, index: u32) -> Option<&SubpassAttachmentLayoutBuilder> {
        self.subpass_layout_builders.get(index as usize)
    }

    /// Get a subpass added earlier, to declare more attachments
    pub fn subpass_mut(&mut self, index: u32) -> Option<&mut SubpassAttachmentLayoutBuilder> {
        if (index as usize) < self.subpass_layout_builders.len() {
            self.invalidate_if_finalized();
        }
        self.subpass_layout_builders.get_mut(index as usize)
    }

    fn invalidate_if_finalized(&mut self) {
        if self.state == BuilderState::Finalized {
            crate::rhi_warn!("galaxy3d::rhi::RenderAttachmentLayoutBuilder",
                "Layout modified after end() without reset(); the next end() will fail");
            self.state = BuilderState::Invalidated;
        }
    }

    /// Discard all subpasses so the builder can be reused
    ///
    /// Keeps the subpass storage allocated.
    pub fn reset(&mut self) {
        self.subpass_layout_builders.clear();
        self.state = BuilderState::Building;
    }

    /// Ends the building of the layout
    ///
    /// # Errors
    ///
    /// - `UnresolvedAttachment` if a reuse or subpass input names an
    ///   attachment no earlier-or-equal subpass defined
    /// - `FormatMismatch` / `AttachmentUsageMismatch` if a reuse conflicts
    ///   with the definition
    /// - `InvalidResolve` for malformed resolve pairs
    /// - `DuplicateAttachment` if one subpass outputs to an attachment twice
    /// - `LimitExceeded` if a limit of `LayoutLimits` is exceeded
    /// - `InvalidArgument` for unnamed reuses or invalid limits
    /// - `InvalidOperation` if subpasses were added after a previous end()
    ///
    /// Nothing is built on error and the builder state is unchanged.
    pub fn end(&mut self) -> Result<RenderAttachmentLayout> {
        match self.build() {
            Ok(layout) => {
                self.state = BuilderState::Finalized;
                crate::rhi_debug!("galaxy3d::rhi::RenderAttachmentLayoutBuilder",
                    "Render attachment layout built: {} attachments, {} subpasses",
                    layout.attachment_count(), layout.subpass_count());
                Ok(layout)
            }
            Err(error) => {
                crate::rhi_error!("galaxy3d::rhi::RenderAttachmentLayoutBuilder", "{}", error);
                Err(error)
            }
        }
    }

    /// Ends the building of the layout into `layout`
    ///
    /// `layout` is only written on success.
    pub fn end_into(&mut self, layout: &mut RenderAttachmentLayout) -> ResultCode {
        match self.end() {
            Ok(built) => {
                *layout = built;
                ResultCode::Success
            }
            Err(error) => error.result_code(),
        }
    }

    fn build(&self) -> Result<RenderAttachmentLayout> {
        if self.state == BuilderState::Invalidated {
            return Err(Error::InvalidOperation(
                "Subpasses were modified after end(); call reset() first".to_string(),
            ));
        }

        self.limits.validate()?;

        if self.subpass_layout_builders.len() > self.limits.max_subpasses {
            return Err(Error::LimitExceeded {
                what: "subpasses",
                count: self.subpass_layout_builders.len(),
                max: self.limits.max_subpasses,
            });
        }

        let mut table = AttachmentTable::new(self.limits.max_render_attachments);
        let mut subpasses = SmallVec::new();
        for subpass_builder in &self.subpass_layout_builders {
            subpasses.push(self.build_subpass(subpass_builder, &mut table)?);
        }

        Ok(RenderAttachmentLayout {
            attachments: table.into_attachments(),
            subpasses,
        })
    }

    fn build_subpass(
        &self,
        builder: &SubpassAttachmentLayoutBuilder,
        table: &mut AttachmentTable,
    ) -> Result<SubpassRenderAttachmentLayout> {
        let subpass = builder.subpass_index();

        if let Some(error) = &builder.deferred_error {
            return Err(error.clone());
        }

        if builder.render_target_attachments.len() > self.limits.max_color_attachments {
            return Err(Error::LimitExceeded {
                what: "render targets in one subpass",
                count: builder.render_target_attachments.len(),
                max: self.limits.max_color_attachments,
            });
        }
        if builder.subpass_input_attachments.len() > self.limits.max_subpass_inputs {
            return Err(Error::LimitExceeded {
                what: "subpass inputs in one subpass",
                count: builder.subpass_input_attachments.len(),
                max: self.limits.max_subpass_inputs,
            });
        }

        let mut layout = SubpassRenderAttachmentLayout::default();
        let mut used = UsedAttachments::new();

        // Render targets
        for entry in &builder.render_target_attachments {
            let index = table.bind(subpass, &entry.name, entry.format, AttachmentUsage::RenderTarget)?;
            claim(&mut used, subpass, index, &entry.name)?;
            layout.render_targets.push(descriptor(index, entry));
        }

        // Resolve destinations, once all render targets of the subpass are bound
        for (entry, render_target) in builder.render_target_attachments.iter().zip(layout.render_targets.iter_mut()) {
            let Some(resolve_name) = &entry.resolve_name else {
                continue;
            };

            if entry.resolve_reuses_name && table.find(resolve_name).is_none() {
                return Err(Error::UnresolvedAttachment { subpass, name: resolve_name.clone() });
            }

            let source_format = table.get(render_target.attachment_index).format;
            let resolve_index = table
                .bind(subpass, resolve_name, source_format, AttachmentUsage::Resolve)
                .map_err(|error| match error {
                    Error::FormatMismatch { .. } | Error::AttachmentUsageMismatch { .. } => Error::InvalidResolve {
                        subpass,
                        name: resolve_name.clone(),
                        reason: error.to_string(),
                    },
                    other => other,
                })?;

            if used.contains(&resolve_index) {
                return Err(Error::InvalidResolve {
                    subpass,
                    name: resolve_name.clone(),
                    reason: "resolve destination is already an output of this subpass".to_string(),
                });
            }
            used.push(resolve_index);
            render_target.resolve_attachment_index = Some(resolve_index);
        }

        if let Some(entry) = &builder.depth_stencil_attachment {
            let index = table.bind(subpass, &entry.name, entry.format, AttachmentUsage::DepthStencil)?;
            claim(&mut used, subpass, index, &entry.name)?;
            layout.depth_stencil = Some(descriptor(index, entry));
        }

        if let Some(entry) = &builder.shading_rate_attachment {
            let index = table.bind(subpass, &entry.name, entry.format, AttachmentUsage::ShadingRate)?;
            claim(&mut used, subpass, index, &entry.name)?;
            layout.shading_rate = Some(descriptor(index, entry));
        }

        // Subpass inputs only reference attachments bound so far
        for entry in &builder.subpass_input_attachments {
            if entry.name.is_empty() {
                return Err(Error::InvalidArgument(format!(
                    "Subpass {}: subpass input without a name", subpass
                )));
            }

            let index = table
                .find(&entry.name)
                .ok_or_else(|| Error::UnresolvedAttachment { subpass, name: entry.name.clone() })?;

            let attachment = table.get(index);
            if !attachment.usage.is_compatible_with(AttachmentUsage::SubpassInput) {
                return Err(Error::AttachmentUsageMismatch {
                    subpass,
                    name: entry.name.clone(),
                    defined_as: attachment.usage,
                    used_as: AttachmentUsage::SubpassInput,
                });
            }

            let aspect_flags = if entry.image_aspects.is_empty() {
                attachment.format.aspect_flags()
            } else {
                entry.image_aspects
            };

            layout.subpass_inputs.push(SubpassInputDescriptor {
                attachment_index: index,
                aspect_flags,
                scope_attachment_access: entry.scope_attachment_access,
                scope_attachment_stage: entry.scope_attachment_stage,
            });
        }

        Ok(layout)
    }
}

fn descriptor(index: u32, entry: &RenderAttachmentEntry) -> RenderAttachmentDescriptor {
    RenderAttachmentDescriptor {
        attachment_index: index,
        resolve_attachment_index: None,
        load_store_action: entry.load_store_action,
        scope_attachment_access: entry.scope_attachment_access,
        scope_attachment_stage: entry.scope_attachment_stage,
    }
}

fn claim(used: &mut UsedAttachments, subpass: u32, index: u32, name: &AttachmentName) -> Result<()> {
    if used.contains(&index) {
        return Err(Error::DuplicateAttachment { subpass, name: name.clone() });
    }
    used.push(index);
    Ok(())
}

#[cfg(test)]
#[path = "layout_builder_tests.rs"]
mod tests;
