/// Platform limits for render attachment layouts
///
/// The constants size the inline storage of the builders. `LayoutLimits`
/// holds the limits actually enforced by `end()`, which a backend may lower
/// to match its device.

use crate::error::{Error, Result};

/// Maximum number of color attachments (and subpass inputs) per subpass
pub const ATTACHMENT_COLOR_COUNT_MAX: usize = 8;

/// Maximum number of subpasses in one layout
pub const SUBPASS_COUNT_MAX: usize = 10;

/// Maximum number of distinct attachments in one layout
/// (every color target resolved, plus depth/stencil and shading rate)
pub const RENDER_ATTACHMENT_COUNT_MAX: usize = 2 * ATTACHMENT_COLOR_COUNT_MAX + 2;

/// Limits enforced when a layout is built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutLimits {
    /// Render targets per subpass
    pub max_color_attachments: usize,
    /// Subpass inputs per subpass
    pub max_subpass_inputs: usize,
    /// Subpasses per layout
    pub max_subpasses: usize,
    /// Distinct attachments per layout
    pub max_render_attachments: usize,
}

impl Default for LayoutLimits {
    fn default() -> Self {
        Self {
            max_color_attachments: ATTACHMENT_COLOR_COUNT_MAX,
            max_subpass_inputs: ATTACHMENT_COLOR_COUNT_MAX,
            max_subpasses: SUBPASS_COUNT_MAX,
            max_render_attachments: RENDER_ATTACHMENT_COUNT_MAX,
        }
    }
}

impl LayoutLimits {
    /// Check that every limit allows at least one element
    pub fn validate(&self) -> Result<()> {
        let limits = [
            ("max_color_attachments", self.max_color_attachments),
            ("max_subpass_inputs", self.max_subpass_inputs),
            ("max_subpasses", self.max_subpasses),
            ("max_render_attachments", self.max_render_attachments),
        ];

        for (name, value) in limits {
            if value == 0 {
                return Err(Error::InvalidArgument(format!("Layout limit {} must not be 0", name)));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "limits_tests.rs"]
mod tests;
