/// Load/store behaviour of an attachment use

use std::hash::{Hash, Hasher};

/// Load operation for an attachment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadOp {
    /// Load existing content
    Load,
    /// Clear the content
    Clear,
    /// Don't care about existing content
    DontCare,
}

/// Store operation for an attachment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    /// Store the rendered content
    Store,
    /// Don't care about storing the content
    DontCare,
}

/// Value written by `LoadOp::Clear`
///
/// Compared and hashed bitwise: `0.0` and `-0.0` are different clear values.
#[derive(Debug, Clone, Copy)]
pub enum ClearValue {
    /// Float / normalized color
    Color([f32; 4]),
    /// Integer color
    ColorUint([u32; 4]),
    /// Depth and stencil
    DepthStencil { depth: f32, stencil: u32 },
}

impl ClearValue {
    /// Depth-only clear value (stencil cleared to 0)
    pub fn depth(depth: f32) -> Self {
        ClearValue::DepthStencil { depth, stencil: 0 }
    }
}

impl Default for ClearValue {
    fn default() -> Self {
        ClearValue::Color([0.0; 4])
    }
}

fn color_bits(color: &[f32; 4]) -> [u32; 4] {
    color.map(f32::to_bits)
}

impl PartialEq for ClearValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ClearValue::Color(a), ClearValue::Color(b)) => color_bits(a) == color_bits(b),
            (ClearValue::ColorUint(a), ClearValue::ColorUint(b)) => a == b,
            (
                ClearValue::DepthStencil { depth: depth_a, stencil: stencil_a },
                ClearValue::DepthStencil { depth: depth_b, stencil: stencil_b },
            ) => depth_a.to_bits() == depth_b.to_bits() && stencil_a == stencil_b,
            _ => false,
        }
    }
}

impl Eq for ClearValue {}

// Must agree with PartialEq.
impl Hash for ClearValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            ClearValue::Color(color) => color_bits(color).hash(state),
            ClearValue::ColorUint(color) => color.hash(state),
            ClearValue::DepthStencil { depth, stencil } => {
                depth.to_bits().hash(state);
                stencil.hash(state);
            }
        }
    }
}

/// Load and store operations of one attachment use
#[derive(Debug, Clone, Copy, PartialEq, Hash)]
pub struct AttachmentLoadStoreAction {
    /// Clear value used when a load op is `Clear`
    pub clear_value: ClearValue,
    /// Load operation for color/depth
    pub load_op: LoadOp,
    /// Store operation for color/depth
    pub store_op: StoreOp,
    /// Load operation for stencil
    pub stencil_load_op: LoadOp,
    /// Store operation for stencil
    pub stencil_store_op: StoreOp,
}

impl AttachmentLoadStoreAction {
    /// Same load/store operations for all aspects
    pub fn new(clear_value: ClearValue, load_op: LoadOp, store_op: StoreOp) -> Self {
        Self {
            clear_value,
            load_op,
            store_op,
            stencil_load_op: load_op,
            stencil_store_op: store_op,
        }
    }

    /// Clear on load, store at the end
    pub fn clear(clear_value: ClearValue) -> Self {
        Self::new(clear_value, LoadOp::Clear, StoreOp::Store)
    }
}

impl Default for AttachmentLoadStoreAction {
    fn default() -> Self {
        Self::new(ClearValue::default(), LoadOp::Load, StoreOp::Store)
    }
}
