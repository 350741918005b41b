/// Attachment table built while a layout is resolved
///
/// Maps attachment names to table indices. Names are bound in subpass
/// order, so a name can only resolve to an attachment created by the same or
/// an earlier subpass.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use crate::attachment::{AttachmentName, AttachmentUsage, Format};
use crate::error::{Error, Result};
use crate::limits::RENDER_ATTACHMENT_COUNT_MAX;
use super::layout::RenderAttachment;

pub(crate) struct AttachmentTable {
    attachments: SmallVec<[RenderAttachment; RENDER_ATTACHMENT_COUNT_MAX]>,
    indices: FxHashMap<AttachmentName, u32>,
    max_attachments: usize,
}

impl AttachmentTable {
    pub fn new(max_attachments: usize) -> Self {
        Self {
            attachments: SmallVec::new(),
            indices: FxHashMap::default(),
            max_attachments,
        }
    }

    pub fn get(&self, index: u32) -> &RenderAttachment {
        &self.attachments[index as usize]
    }

    /// Look up a named attachment without creating it
    pub fn find(&self, name: &AttachmentName) -> Option<u32> {
        self.indices.get(name).copied()
    }

    /// Resolve one attachment use of `subpass` to a table index
    ///
    /// Unseen names (and anonymous ones) create a new attachment, which needs
    /// a known format. Seen names must be used in a compatible role and, if a
    /// format is given, with the format they were created with.
    pub fn bind(
        &mut self,
        subpass: u32,
        name: &AttachmentName,
        format: Format,
        usage: AttachmentUsage,
    ) -> Result<u32> {
        if let Some(index) = self.find(name) {
            let attachment = self.get(index);
            if !attachment.usage.is_compatible_with(usage) {
                return Err(Error::AttachmentUsageMismatch {
                    subpass,
                    name: name.clone(),
                    defined_as: attachment.usage,
                    used_as: usage,
                });
            }
            if !format.is_unknown() && format != attachment.format {
                return Err(Error::FormatMismatch {
                    subpass,
                    name: name.clone(),
                    expected: attachment.format,
                    found: format,
                });
            }
            return Ok(index);
        }

        if format.is_unknown() {
            if name.is_empty() {
                return Err(Error::InvalidArgument(format!(
                    "Subpass {}: {} attachment reused without a name",
                    subpass, usage
                )));
            }
            return Err(Error::UnresolvedAttachment { subpass, name: name.clone() });
        }

        self.allocate(subpass, name, format, usage)
    }

    fn allocate(
        &mut self,
        subpass: u32,
        name: &AttachmentName,
        format: Format,
        usage: AttachmentUsage,
    ) -> Result<u32> {
        if self.attachments.len() >= self.max_attachments {
            return Err(Error::LimitExceeded {
                what: "render attachments",
                count: self.attachments.len() + 1,
                max: self.max_attachments,
            });
        }

        let index = self.attachments.len() as u32;
        self.attachments.push(RenderAttachment {
            name: name.clone(),
            format,
            usage,
            first_subpass: subpass,
        });
        if !name.is_empty() {
            self.indices.insert(name.clone(), index);
        }

        crate::rhi_trace!("galaxy3d::rhi::RenderAttachmentLayoutBuilder",
            "Attachment {} = {} ({:?}, {}) from subpass {}", index, name, format, usage, subpass);

        Ok(index)
    }

    pub fn into_attachments(self) -> SmallVec<[RenderAttachment; RENDER_ATTACHMENT_COUNT_MAX]> {
        self.attachments
    }
}
