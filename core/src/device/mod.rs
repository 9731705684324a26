//! Device call surface
//!
//! [`Device`] is the only way the cache talks to the driver. Every method
//! is fire-and-forget: errors surface through the driver's own debug
//! output, never through the cache.
//!
//! Two implementations ship with the crate:
//! - [`RecordingDevice`] - records calls as [`DeviceCall`] values (tests, tooling)
//! - [`TracedDevice`] - logs each call through `tracing`, then forwards

mod recording;
mod traced;

pub use recording::{DeviceCall, RecordingDevice};
pub use traced::TracedDevice;

use crate::descriptor::{BlendColor, ColorMask};
use crate::enums::{
    BlendEquation, BlendFactor, BufferTarget, Capability, CompareFunc, CullFace, FramebufferTarget,
    FrontFace, ImageAccess, ImageFormat, LogicOp, StencilOp, TextureTarget,
};
use crate::handle::{
    BufferHandle, FramebufferHandle, PipelineHandle, ProgramHandle, SamplerHandle, TextureHandle,
    VertexArrayHandle,
};
use crate::rect::Rect;
use crate::units::{ImageUnitId, TextureUnitId};

/// Driver entry points issued by the state cache.
///
/// Implementations must perform the call on the thread that owns the
/// device context. Handles arrive typed; backends pass [`id`](TextureHandle::id)
/// to the driver and ignore the generation.
pub trait Device {
    fn set_capability(&mut self, capability: Capability, enabled: bool);

    fn cull_face(&mut self, mode: CullFace);
    fn front_face(&mut self, winding: FrontFace);

    fn depth_func(&mut self, func: CompareFunc);
    fn depth_mask(&mut self, write: bool);

    fn color_mask(&mut self, mask: ColorMask);

    fn stencil_func(&mut self, func: CompareFunc, reference: i32, mask: u32);
    fn stencil_op(&mut self, stencil_fail: StencilOp, depth_fail: StencilOp, depth_pass: StencilOp);
    fn stencil_mask(&mut self, mask: u32);

    fn blend_color(&mut self, color: BlendColor);
    fn blend_func_separate(
        &mut self,
        src_rgb: BlendFactor,
        dst_rgb: BlendFactor,
        src_alpha: BlendFactor,
        dst_alpha: BlendFactor,
    );
    fn blend_equation_separate(&mut self, rgb: BlendEquation, alpha: BlendEquation);

    fn logic_op(&mut self, op: LogicOp);

    /// Select the unit that subsequent [`bind_texture`](Device::bind_texture) calls affect
    fn active_texture(&mut self, unit: TextureUnitId);
    fn bind_texture(&mut self, target: TextureTarget, texture: TextureHandle);
    fn bind_sampler(&mut self, unit: TextureUnitId, sampler: SamplerHandle);
    fn bind_image_texture(
        &mut self,
        unit: ImageUnitId,
        texture: TextureHandle,
        access: ImageAccess,
        format: ImageFormat,
    );

    fn bind_framebuffer(&mut self, target: FramebufferTarget, framebuffer: FramebufferHandle);
    fn bind_vertex_array(&mut self, vertex_array: VertexArrayHandle);
    fn bind_buffer(&mut self, target: BufferTarget, buffer: BufferHandle);
    fn use_program(&mut self, program: ProgramHandle);
    fn bind_program_pipeline(&mut self, pipeline: PipelineHandle);

    fn scissor(&mut self, rect: Rect);
    fn viewport(&mut self, rect: Rect);
}

impl<D: Device + ?Sized> Device for &mut D {
    fn set_capability(&mut self, capability: Capability, enabled: bool) {
        (**self).set_capability(capability, enabled)
    }
    fn cull_face(&mut self, mode: CullFace) {
        (**self).cull_face(mode)
    }
    fn front_face(&mut self, winding: FrontFace) {
        (**self).front_face(winding)
    }
    fn depth_func(&mut self, func: CompareFunc) {
        (**self).depth_func(func)
    }
    fn depth_mask(&mut self, write: bool) {
        (**self).depth_mask(write)
    }
    fn color_mask(&mut self, mask: ColorMask) {
        (**self).color_mask(mask)
    }
    fn stencil_func(&mut self, func: CompareFunc, reference: i32, mask: u32) {
        (**self).stencil_func(func, reference, mask)
    }
    fn stencil_op(&mut self, stencil_fail: StencilOp, depth_fail: StencilOp, depth_pass: StencilOp) {
        (**self).stencil_op(stencil_fail, depth_fail, depth_pass)
    }
    fn stencil_mask(&mut self, mask: u32) {
        (**self).stencil_mask(mask)
    }
    fn blend_color(&mut self, color: BlendColor) {
        (**self).blend_color(color)
    }
    fn blend_func_separate(
        &mut self,
        src_rgb: BlendFactor,
        dst_rgb: BlendFactor,
        src_alpha: BlendFactor,
        dst_alpha: BlendFactor,
    ) {
        (**self).blend_func_separate(src_rgb, dst_rgb, src_alpha, dst_alpha)
    }
    fn blend_equation_separate(&mut self, rgb: BlendEquation, alpha: BlendEquation) {
        (**self).blend_equation_separate(rgb, alpha)
    }
    fn logic_op(&mut self, op: LogicOp) {
        (**self).logic_op(op)
    }
    fn active_texture(&mut self, unit: TextureUnitId) {
        (**self).active_texture(unit)
    }
    fn bind_texture(&mut self, target: TextureTarget, texture: TextureHandle) {
        (**self).bind_texture(target, texture)
    }
    fn bind_sampler(&mut self, unit: TextureUnitId, sampler: SamplerHandle) {
        (**self).bind_sampler(unit, sampler)
    }
    fn bind_image_texture(
        &mut self,
        unit: ImageUnitId,
        texture: TextureHandle,
        access: ImageAccess,
        format: ImageFormat,
    ) {
        (**self).bind_image_texture(unit, texture, access, format)
    }
    fn bind_framebuffer(&mut self, target: FramebufferTarget, framebuffer: FramebufferHandle) {
        (**self).bind_framebuffer(target, framebuffer)
    }
    fn bind_vertex_array(&mut self, vertex_array: VertexArrayHandle) {
        (**self).bind_vertex_array(vertex_array)
    }
    fn bind_buffer(&mut self, target: BufferTarget, buffer: BufferHandle) {
        (**self).bind_buffer(target, buffer)
    }
    fn use_program(&mut self, program: ProgramHandle) {
        (**self).use_program(program)
    }
    fn bind_program_pipeline(&mut self, pipeline: PipelineHandle) {
        (**self).bind_program_pipeline(pipeline)
    }
    fn scissor(&mut self, rect: Rect) {
        (**self).scissor(rect)
    }
    fn viewport(&mut self, rect: Rect) {
        (**self).viewport(rect)
    }
}
