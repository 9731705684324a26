//! Pipeline state descriptor
//!
//! [`StateDescriptor`] is one complete snapshot of device pipeline state:
//! toggles, fixed-function parameters and object bindings. Renderers fill a
//! local copy and hand it to [`StateCache::apply`](crate::StateCache::apply).
//! The cache keeps its own copy as the shadow of what the device holds.

use std::ops::{Index, IndexMut};

use crate::enums::{
    BlendEquation, BlendFactor, CompareFunc, CullFace, FrontFace, ImageAccess, LogicOp, StencilOp,
};
use crate::handle::{
    BufferHandle, FramebufferHandle, PipelineHandle, ProgramHandle, RenderbufferHandle,
    SamplerHandle, TextureHandle, VertexArrayHandle,
};
use crate::rect::Rect;

/// Number of 2D texture units tracked
pub const NUM_TEXTURE_UNITS: usize = 3;

/// Number of clip-distance enables tracked
pub const NUM_CLIP_DISTANCES: usize = 2;

/// Number of shadow image bindings (one buffer plus six cube faces)
pub const NUM_SHADOW_IMAGES: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CullState {
    pub enabled: bool,
    pub mode: CullFace,
    pub front_face: FrontFace,
}

impl Default for CullState {
    fn default() -> Self {
        Self {
            enabled: true,
            mode: CullFace::Back,
            front_face: FrontFace::Ccw,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthState {
    pub test_enabled: bool,
    pub test_func: CompareFunc,
    pub write_mask: bool,
}

impl Default for DepthState {
    fn default() -> Self {
        Self {
            test_enabled: false,
            test_func: CompareFunc::Less,
            write_mask: true,
        }
    }
}

/// Per-channel color write enables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorMask {
    pub red: bool,
    pub green: bool,
    pub blue: bool,
    pub alpha: bool,
}

impl ColorMask {
    pub const ALL: ColorMask = ColorMask {
        red: true,
        green: true,
        blue: true,
        alpha: true,
    };

    pub const NONE: ColorMask = ColorMask {
        red: false,
        green: false,
        blue: false,
        alpha: false,
    };
}

impl Default for ColorMask {
    fn default() -> Self {
        Self::ALL
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StencilState {
    pub test_enabled: bool,
    pub test_func: CompareFunc,
    pub test_ref: i32,
    pub test_mask: u32,
    pub write_mask: u32,
    /// Action when the stencil test fails
    pub action_stencil_fail: StencilOp,
    /// Action when the stencil test passes but the depth test fails
    pub action_depth_fail: StencilOp,
    /// Action when both tests pass
    pub action_depth_pass: StencilOp,
}

impl Default for StencilState {
    fn default() -> Self {
        Self {
            test_enabled: false,
            test_func: CompareFunc::Always,
            test_ref: 0,
            test_mask: 0xFF,
            write_mask: 0xFF,
            action_stencil_fail: StencilOp::Keep,
            action_depth_fail: StencilOp::Keep,
            action_depth_pass: StencilOp::Keep,
        }
    }
}

/// Constant blend color
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BlendColor {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub alpha: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendState {
    /// Blending on; on devices with logic ops this also turns the logic op off
    pub enabled: bool,
    pub rgb_equation: BlendEquation,
    pub a_equation: BlendEquation,
    pub src_rgb_func: BlendFactor,
    pub dst_rgb_func: BlendFactor,
    pub src_a_func: BlendFactor,
    pub dst_a_func: BlendFactor,
    pub color: BlendColor,
}

impl Default for BlendState {
    fn default() -> Self {
        Self {
            enabled: false,
            rgb_equation: BlendEquation::Add,
            a_equation: BlendEquation::Add,
            src_rgb_func: BlendFactor::One,
            dst_rgb_func: BlendFactor::Zero,
            src_a_func: BlendFactor::One,
            dst_a_func: BlendFactor::Zero,
            color: BlendColor::default(),
        }
    }
}

/// 2D texture unit: bound texture plus sampler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextureUnitState {
    pub texture_2d: TextureHandle,
    pub sampler: SamplerHandle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextureCubeUnitState {
    pub texture_cube: TextureHandle,
    pub sampler: SamplerHandle,
}

/// Buffer-backed texture used as a lookup table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextureBufferUnitState {
    pub texture_buffer: TextureHandle,
}

/// One of the shadow image bindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShadowImageSlot {
    /// Read-write buffer image
    Buffer,
    PositiveX,
    NegativeX,
    PositiveY,
    NegativeY,
    PositiveZ,
    NegativeZ,
}

impl ShadowImageSlot {
    /// All slots in emission order
    pub const ALL: [ShadowImageSlot; NUM_SHADOW_IMAGES] = [
        ShadowImageSlot::Buffer,
        ShadowImageSlot::PositiveX,
        ShadowImageSlot::NegativeX,
        ShadowImageSlot::PositiveY,
        ShadowImageSlot::NegativeY,
        ShadowImageSlot::PositiveZ,
        ShadowImageSlot::NegativeZ,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The buffer image is written by the shader; cube faces are only read
    #[inline]
    pub const fn access(self) -> ImageAccess {
        match self {
            ShadowImageSlot::Buffer => ImageAccess::ReadWrite,
            _ => ImageAccess::ReadOnly,
        }
    }
}

/// Shadow image bindings, indexed by [`ShadowImageSlot`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShadowImages([TextureHandle; NUM_SHADOW_IMAGES]);

impl ShadowImages {
    /// Iterate slots with their bound texture, in emission order
    pub fn iter(&self) -> impl Iterator<Item = (ShadowImageSlot, TextureHandle)> + '_ {
        ShadowImageSlot::ALL
            .into_iter()
            .map(|slot| (slot, self.0[slot.index()]))
    }
}

impl Index<ShadowImageSlot> for ShadowImages {
    type Output = TextureHandle;

    fn index(&self, slot: ShadowImageSlot) -> &TextureHandle {
        &self.0[slot.index()]
    }
}

impl IndexMut<ShadowImageSlot> for ShadowImages {
    fn index_mut(&mut self, slot: ShadowImageSlot) -> &mut TextureHandle {
        &mut self.0[slot.index()]
    }
}

/// Objects bound for drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DrawBindings {
    pub read_framebuffer: FramebufferHandle,
    pub draw_framebuffer: FramebufferHandle,
    pub vertex_array: VertexArrayHandle,
    pub vertex_buffer: BufferHandle,
    pub uniform_buffer: BufferHandle,
    pub shader_program: ProgramHandle,
    pub program_pipeline: PipelineHandle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScissorState {
    pub enabled: bool,
    pub rect: Rect,
}

/// Complete pipeline state snapshot.
///
/// `Default` reproduces the device's own initial state. The value has no
/// identity beyond its fields; copy and mutate freely.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateDescriptor {
    pub cull: CullState,
    pub depth: DepthState,
    pub color_mask: ColorMask,
    pub stencil: StencilState,
    pub blend: BlendState,
    /// Logic op mode, applied only when blending is off and the device supports it
    pub logic_op: LogicOp,

    pub texture_units: [TextureUnitState; NUM_TEXTURE_UNITS],
    pub texture_cube_unit: TextureCubeUnitState,
    /// Low-frequency lookup table
    pub texture_buffer_lut_lf: TextureBufferUnitState,
    pub texture_buffer_lut_rg: TextureBufferUnitState,
    pub texture_buffer_lut_rgba: TextureBufferUnitState,

    /// Only reconciled when [`DeviceCaps::allow_shadow`](crate::DeviceCaps::allow_shadow) is set
    pub shadow_images: ShadowImages,

    pub draw: DrawBindings,
    pub scissor: ScissorState,
    pub viewport: Rect,
    pub clip_distance: [bool; NUM_CLIP_DISTANCES],

    /// Tracked for callers; the reconcilers never bind it
    pub renderbuffer: RenderbufferHandle,
}

impl Default for StateDescriptor {
    fn default() -> Self {
        Self {
            cull: CullState::default(),
            depth: DepthState::default(),
            color_mask: ColorMask::default(),
            stencil: StencilState::default(),
            blend: BlendState::default(),
            logic_op: LogicOp::Copy,
            texture_units: [TextureUnitState::default(); NUM_TEXTURE_UNITS],
            texture_cube_unit: TextureCubeUnitState::default(),
            texture_buffer_lut_lf: TextureBufferUnitState::default(),
            texture_buffer_lut_rg: TextureBufferUnitState::default(),
            texture_buffer_lut_rgba: TextureBufferUnitState::default(),
            shadow_images: ShadowImages::default(),
            draw: DrawBindings::default(),
            scissor: ScissorState::default(),
            viewport: Rect::ZERO,
            clip_distance: [false; NUM_CLIP_DISTANCES],
            renderbuffer: RenderbufferHandle::NONE,
        }
    }
}

impl StateDescriptor {
    /// Default state with the given viewport
    pub fn with_viewport(viewport: Rect) -> Self {
        Self {
            viewport,
            ..Default::default()
        }
    }
}
