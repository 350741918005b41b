/// Attachment pixel formats and image aspects

use bitflags::bitflags;

/// Pixel format of a render attachment
///
/// `Unknown` is the "no format given" sentinel: in a declaration it means the
/// attachment is reused from an earlier declaration and keeps its format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[allow(non_camel_case_types)]
pub enum Format {
    #[default]
    Unknown,

    // Color formats
    R8_UNORM,
    R8_UINT,
    R8G8_UNORM,
    R8G8B8A8_UNORM,
    R8G8B8A8_SRGB,
    B8G8R8A8_UNORM,
    B8G8R8A8_SRGB,
    R10G10B10A2_UNORM,
    R11G11B10_FLOAT,
    R16_FLOAT,
    R16G16_FLOAT,
    R16G16B16A16_FLOAT,
    R32_FLOAT,
    R32_UINT,
    R32G32_FLOAT,
    R32G32B32A32_FLOAT,

    // Depth / stencil formats
    D16_UNORM,
    D32_FLOAT,
    D24_UNORM_S8_UINT,
    D32_FLOAT_S8X24_UINT,
}

impl Format {
    /// Returns true for the `Unknown` sentinel
    pub fn is_unknown(self) -> bool {
        self == Format::Unknown
    }

    /// Image planes a view of this format exposes
    pub fn aspect_flags(self) -> ImageAspectFlags {
        match self {
            Format::Unknown => ImageAspectFlags::empty(),
            Format::D16_UNORM | Format::D32_FLOAT => ImageAspectFlags::DEPTH,
            Format::D24_UNORM_S8_UINT | Format::D32_FLOAT_S8X24_UINT => ImageAspectFlags::DEPTH_STENCIL,
            _ => ImageAspectFlags::COLOR,
        }
    }
}

bitflags! {
    /// Image planes read through a subpass input
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ImageAspectFlags: u32 {
        const COLOR = 1 << 0;
        const DEPTH = 1 << 1;
        const STENCIL = 1 << 2;
        const DEPTH_STENCIL = Self::DEPTH.bits() | Self::STENCIL.bits();
    }
}
