/// Scope access and stage metadata
///
/// Carried through the layout untouched; backends use it to build the
/// dependencies between merged subpasses.

use bitflags::bitflags;

bitflags! {
    /// How a scope accesses an attachment (empty = unknown)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ScopeAttachmentAccess: u32 {
        const READ = 1 << 0;
        const WRITE = 1 << 1;
        const READ_WRITE = Self::READ.bits() | Self::WRITE.bits();
    }
}

bitflags! {
    /// Pipeline stages in which a scope accesses an attachment (empty = uninitialized)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ScopeAttachmentStage: u32 {
        const VERTEX_SHADER = 1 << 0;
        const FRAGMENT_SHADER = 1 << 1;
        const COMPUTE_SHADER = 1 << 2;
        const RAY_TRACING_SHADER = 1 << 3;
        const EARLY_FRAGMENT_TEST = 1 << 4;
        const LATE_FRAGMENT_TEST = 1 << 5;
        const COLOR_ATTACHMENT_OUTPUT = 1 << 6;
        const DRAW_INDIRECT = 1 << 7;
        const COPY = 1 << 8;
        const SHADING_RATE = 1 << 9;

        const ANY_GRAPHICS = Self::VERTEX_SHADER.bits()
            | Self::FRAGMENT_SHADER.bits()
            | Self::EARLY_FRAGMENT_TEST.bits()
            | Self::LATE_FRAGMENT_TEST.bits()
            | Self::COLOR_ATTACHMENT_OUTPUT.bits();
    }
}
