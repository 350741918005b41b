/// Per-subpass attachment collector
///
/// Accumulates the attachment declarations of one subpass. Declarations are
/// never rejected on the spot: a malformed one is recorded and reported by
/// `RenderAttachmentLayoutBuilder::end()`.

use smallvec::SmallVec;
use crate::attachment::{
    AttachmentLoadStoreAction, AttachmentName, Format, ImageAspectFlags,
    ScopeAttachmentAccess, ScopeAttachmentStage,
};
use crate::error::Error;
use crate::limits::ATTACHMENT_COLOR_COUNT_MAX;

/// One color, depth/stencil or shading rate attachment use
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RenderAttachmentEntry {
    pub name: AttachmentName,
    /// `Format::Unknown` reuses the format of an earlier declaration
    pub format: Format,
    pub load_store_action: AttachmentLoadStoreAction,
    /// Resolve destination (anonymous name = new unnamed attachment)
    pub resolve_name: Option<AttachmentName>,
    /// The resolve destination must be declared by this or an earlier subpass
    pub resolve_reuses_name: bool,
    pub scope_attachment_access: ScopeAttachmentAccess,
    pub scope_attachment_stage: ScopeAttachmentStage,
}

/// One subpass input use
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SubpassAttachmentEntry {
    pub name: AttachmentName,
    /// Empty = aspects of the referenced attachment's format
    pub image_aspects: ImageAspectFlags,
    pub scope_attachment_access: ScopeAttachmentAccess,
    pub scope_attachment_stage: ScopeAttachmentStage,
}

fn depth_stencil_stage() -> ScopeAttachmentStage {
    ScopeAttachmentStage::EARLY_FRAGMENT_TEST | ScopeAttachmentStage::LATE_FRAGMENT_TEST
}

/// Attachment declarations of one subpass
///
/// Obtained from `RenderAttachmentLayoutBuilder::add_subpass()`. Every
/// declaration returns `&mut Self` so a subpass is described in one chain:
///
/// ```
/// use galaxy_3d_rhi::galaxy3d::rhi::*;
///
/// let mut builder = RenderAttachmentLayoutBuilder::new();
/// builder.add_subpass()
///     .render_target_attachment(Format::R16G16B16A16_FLOAT, "Color0")
///     .depth_stencil_attachment(Format::D32_FLOAT, "Depth");
/// builder.add_subpass()
///     .subpass_input_attachment("Color0", ImageAspectFlags::COLOR)
///     .render_target_attachment(Format::R8G8B8A8_UNORM, "Swapchain")
///     .reuse_depth_stencil_attachment("Depth");
///
/// let layout = builder.end().unwrap();
/// assert_eq!(layout.attachment_count(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct SubpassAttachmentLayoutBuilder {
    pub(crate) render_target_attachments: SmallVec<[RenderAttachmentEntry; ATTACHMENT_COLOR_COUNT_MAX]>,
    pub(crate) subpass_input_attachments: SmallVec<[SubpassAttachmentEntry; ATTACHMENT_COLOR_COUNT_MAX]>,
    pub(crate) depth_stencil_attachment: Option<RenderAttachmentEntry>,
    pub(crate) shading_rate_attachment: Option<RenderAttachmentEntry>,
    /// First malformed declaration, reported at end()
    pub(crate) deferred_error: Option<Error>,
    subpass_index: u32,
}

impl SubpassAttachmentLayoutBuilder {
    pub(crate) fn new(subpass_index: u32) -> Self {
        Self {
            render_target_attachments: SmallVec::new(),
            subpass_input_attachments: SmallVec::new(),
            depth_stencil_attachment: None,
            shading_rate_attachment: None,
            deferred_error: None,
            subpass_index,
        }
    }

    /// Zero-based position of this subpass in the layout
    pub fn subpass_index(&self) -> u32 {
        self.subpass_index
    }

    /// Number of render targets declared so far
    pub fn render_target_count(&self) -> usize {
        self.render_target_attachments.len()
    }

    /// Number of subpass inputs declared so far
    pub fn subpass_input_count(&self) -> usize {
        self.subpass_input_attachments.len()
    }

    /// Returns true if a depth/stencil attachment is declared
    pub fn has_depth_stencil(&self) -> bool {
        self.depth_stencil_attachment.is_some()
    }

    /// Returns true if a shading rate attachment is declared
    pub fn has_shading_rate(&self) -> bool {
        self.shading_rate_attachment.is_some()
    }

    fn defer_error(&mut self, error: Error) {
        if self.deferred_error.is_none() {
            crate::rhi_warn!("galaxy3d::rhi::SubpassAttachmentLayoutBuilder",
                "Subpass {}: {}", self.subpass_index, error);
            self.deferred_error = Some(error);
        }
    }

    // ===== RENDER TARGETS =====

    /// Add the use of a new render target
    ///
    /// An empty `name` declares an anonymous attachment that later subpasses
    /// can't reference.
    pub fn render_target_attachment(&mut self, format: Format, name: impl Into<AttachmentName>) -> &mut Self {
        self.render_target_attachment_with(format, name, AttachmentLoadStoreAction::default(), false)
    }

    /// Add the use of a new render target with load/store and resolve information
    ///
    /// With `resolve`, the render target is resolved into a new attachment of
    /// the same format named `"<name>Resolve"` (anonymous if `name` is).
    pub fn render_target_attachment_with(
        &mut self,
        format: Format,
        name: impl Into<AttachmentName>,
        load_store_action: AttachmentLoadStoreAction,
        resolve: bool,
    ) -> &mut Self {
        let name = name.into();
        let resolve_name = resolve.then(|| {
            if name.is_empty() {
                AttachmentName::anonymous()
            } else {
                AttachmentName::from(format!("{}Resolve", name.as_str()))
            }
        });

        self.render_target_attachments.push(RenderAttachmentEntry {
            name,
            format,
            load_store_action,
            resolve_name,
            resolve_reuses_name: false,
            scope_attachment_access: ScopeAttachmentAccess::WRITE,
            scope_attachment_stage: ScopeAttachmentStage::COLOR_ATTACHMENT_OUTPUT,
        });
        self
    }

    /// Add the use of a render target declared by this or an earlier subpass
    pub fn reuse_render_target_attachment(&mut self, name: impl Into<AttachmentName>) -> &mut Self {
        self.reuse_render_target_attachment_with(name, AttachmentLoadStoreAction::default(), false)
    }

    /// Add the use of a previously declared render target with load/store
    /// and resolve information
    ///
    /// With `resolve`, the named attachment isn't added as a render target:
    /// it becomes the resolve destination of the latest render target of
    /// this subpass that isn't resolved yet. The name must still be declared
    /// by this or an earlier subpass.
    pub fn reuse_render_target_attachment_with(
        &mut self,
        name: impl Into<AttachmentName>,
        load_store_action: AttachmentLoadStoreAction,
        resolve: bool,
    ) -> &mut Self {
        let name = name.into();

        if !resolve {
            self.render_target_attachments.push(RenderAttachmentEntry {
                name,
                format: Format::Unknown,
                load_store_action,
                resolve_name: None,
                resolve_reuses_name: false,
                scope_attachment_access: ScopeAttachmentAccess::WRITE,
                scope_attachment_stage: ScopeAttachmentStage::COLOR_ATTACHMENT_OUTPUT,
            });
            return self;
        }

        let source = self
            .render_target_attachments
            .iter()
            .rposition(|entry| entry.resolve_name.is_none());

        match source {
            Some(index) => {
                let entry = &mut self.render_target_attachments[index];
                entry.resolve_name = Some(name);
                entry.resolve_reuses_name = true;
            }
            None => {
                let subpass = self.subpass_index;
                self.defer_error(Error::InvalidResolve {
                    subpass,
                    name,
                    reason: "no unresolved render target to resolve from".to_string(),
                });
            }
        }
        self
    }

    /// Resolve the render target `source_name` of this subpass into `resolve_name`
    ///
    /// `resolve_name` is created with the source format if no earlier
    /// declaration defined it.
    pub fn resolve_attachment(
        &mut self,
        source_name: impl Into<AttachmentName>,
        resolve_name: impl Into<AttachmentName>,
    ) -> &mut Self {
        let source_name = source_name.into();
        let resolve_name = resolve_name.into();
        let subpass = self.subpass_index;

        if resolve_name.is_empty() {
            self.defer_error(Error::InvalidResolve {
                subpass,
                name: source_name,
                reason: "resolve destination needs a name".to_string(),
            });
            return self;
        }

        let source = if source_name.is_empty() {
            None
        } else {
            self.render_target_attachments
                .iter()
                .position(|entry| entry.name == source_name)
        };

        match source {
            Some(index) if self.render_target_attachments[index].resolve_name.is_some() => {
                self.defer_error(Error::InvalidResolve {
                    subpass,
                    name: source_name,
                    reason: "render target is already resolved".to_string(),
                });
            }
            Some(index) => self.render_target_attachments[index].resolve_name = Some(resolve_name),
            None => {
                self.defer_error(Error::InvalidResolve {
                    subpass,
                    name: source_name,
                    reason: "source is not a render target of this subpass".to_string(),
                });
            }
        }
        self
    }

    // ===== DEPTH / STENCIL =====

    /// Add the use of a new depth/stencil attachment
    pub fn depth_stencil_attachment(&mut self, format: Format, name: impl Into<AttachmentName>) -> &mut Self {
        self.depth_stencil_attachment_with(
            format,
            name,
            AttachmentLoadStoreAction::default(),
            ScopeAttachmentAccess::WRITE,
            depth_stencil_stage(),
        )
    }

    /// Add the use of a new depth/stencil attachment with load/store and scope information
    ///
    /// Replaces any depth/stencil attachment already declared for this subpass.
    pub fn depth_stencil_attachment_with(
        &mut self,
        format: Format,
        name: impl Into<AttachmentName>,
        load_store_action: AttachmentLoadStoreAction,
        scope_attachment_access: ScopeAttachmentAccess,
        scope_attachment_stage: ScopeAttachmentStage,
    ) -> &mut Self {
        self.depth_stencil_attachment = Some(RenderAttachmentEntry {
            name: name.into(),
            format,
            load_store_action,
            resolve_name: None,
            resolve_reuses_name: false,
            scope_attachment_access,
            scope_attachment_stage,
        });
        self
    }

    /// Add the use of a depth/stencil attachment declared by this or an earlier subpass
    pub fn reuse_depth_stencil_attachment(&mut self, name: impl Into<AttachmentName>) -> &mut Self {
        self.reuse_depth_stencil_attachment_with(
            name,
            AttachmentLoadStoreAction::default(),
            ScopeAttachmentAccess::WRITE,
            depth_stencil_stage(),
        )
    }

    /// Add the use of a previously declared depth/stencil attachment with
    /// load/store and scope information
    pub fn reuse_depth_stencil_attachment_with(
        &mut self,
        name: impl Into<AttachmentName>,
        load_store_action: AttachmentLoadStoreAction,
        scope_attachment_access: ScopeAttachmentAccess,
        scope_attachment_stage: ScopeAttachmentStage,
    ) -> &mut Self {
        self.depth_stencil_attachment_with(
            Format::Unknown,
            name,
            load_store_action,
            scope_attachment_access,
            scope_attachment_stage,
        )
    }

    /// Set load/store and scope information of the depth/stencil attachment
    ///
    /// Keeps the name and format of the depth/stencil attachment already
    /// declared for this subpass. Without one, this declares an unnamed
    /// reuse, which `end()` rejects.
    pub fn depth_stencil_load_store(
        &mut self,
        load_store_action: AttachmentLoadStoreAction,
        scope_attachment_access: ScopeAttachmentAccess,
        scope_attachment_stage: ScopeAttachmentStage,
    ) -> &mut Self {
        match &mut self.depth_stencil_attachment {
            Some(entry) => {
                entry.load_store_action = load_store_action;
                entry.scope_attachment_access = scope_attachment_access;
                entry.scope_attachment_stage = scope_attachment_stage;
            }
            None => {
                self.reuse_depth_stencil_attachment_with(
                    AttachmentName::anonymous(),
                    load_store_action,
                    scope_attachment_access,
                    scope_attachment_stage,
                );
            }
        }
        self
    }

    // ===== SUBPASS INPUTS =====

    /// Add the use of a subpass input
    ///
    /// `name` must be a render target or depth/stencil attachment declared by
    /// this or an earlier subpass. `aspects` selects the planes read (empty =
    /// all planes of the attachment format).
    pub fn subpass_input_attachment(
        &mut self,
        name: impl Into<AttachmentName>,
        aspects: ImageAspectFlags,
    ) -> &mut Self {
        self.subpass_input_attachment_with(
            name,
            aspects,
            ScopeAttachmentAccess::READ,
            ScopeAttachmentStage::FRAGMENT_SHADER,
        )
    }

    /// Add the use of a subpass input with scope information
    pub fn subpass_input_attachment_with(
        &mut self,
        name: impl Into<AttachmentName>,
        aspects: ImageAspectFlags,
        scope_attachment_access: ScopeAttachmentAccess,
        scope_attachment_stage: ScopeAttachmentStage,
    ) -> &mut Self {
        self.subpass_input_attachments.push(SubpassAttachmentEntry {
            name: name.into(),
            image_aspects: aspects,
            scope_attachment_access,
            scope_attachment_stage,
        });
        self
    }

    // ===== SHADING RATE =====

    /// Add the use of a shading rate attachment
    ///
    /// `Format::Unknown` reuses the attachment `name` from an earlier declaration.
    pub fn shading_rate_attachment(&mut self, format: Format, name: impl Into<AttachmentName>) -> &mut Self {
        self.shading_rate_attachment = Some(RenderAttachmentEntry {
            name: name.into(),
            format,
            load_store_action: AttachmentLoadStoreAction::default(),
            resolve_name: None,
            resolve_reuses_name: false,
            scope_attachment_access: ScopeAttachmentAccess::READ,
            scope_attachment_stage: ScopeAttachmentStage::SHADING_RATE,
        });
        self
    }
}

#[cfg(test)]
#[path = "subpass_builder_tests.rs"]
mod tests;
