//! Tracing decorator for any device

use super::Device;
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

/// Logs every call at TRACE level under the `glstate::device` target, then
/// forwards it to the wrapped device.
#[derive(Debug, Default)]
pub struct TracedDevice<D> {
    inner: D,
}

impl<D: Device> TracedDevice<D> {
    pub fn new(inner: D) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &D {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut D {
        &mut self.inner
    }

    pub fn into_inner(self) -> D {
        self.inner
    }
}

impl<D: Device> Device for TracedDevice<D> {
    fn set_capability(&mut self, capability: Capability, enabled: bool) {
        tracing::trace!(target: "glstate::device", ?capability, enabled, "set_capability");
        self.inner.set_capability(capability, enabled);
    }

    fn cull_face(&mut self, mode: CullFace) {
        tracing::trace!(target: "glstate::device", ?mode, "cull_face");
        self.inner.cull_face(mode);
    }

    fn front_face(&mut self, winding: FrontFace) {
        tracing::trace!(target: "glstate::device", ?winding, "front_face");
        self.inner.front_face(winding);
    }

    fn depth_func(&mut self, func: CompareFunc) {
        tracing::trace!(target: "glstate::device", ?func, "depth_func");
        self.inner.depth_func(func);
    }

    fn depth_mask(&mut self, write: bool) {
        tracing::trace!(target: "glstate::device", write, "depth_mask");
        self.inner.depth_mask(write);
    }

    fn color_mask(&mut self, mask: ColorMask) {
        tracing::trace!(target: "glstate::device", ?mask, "color_mask");
        self.inner.color_mask(mask);
    }

    fn stencil_func(&mut self, func: CompareFunc, reference: i32, mask: u32) {
        tracing::trace!(target: "glstate::device", ?func, reference, mask, "stencil_func");
        self.inner.stencil_func(func, reference, mask);
    }

    fn stencil_op(&mut self, stencil_fail: StencilOp, depth_fail: StencilOp, depth_pass: StencilOp) {
        tracing::trace!(
            target: "glstate::device",
            ?stencil_fail,
            ?depth_fail,
            ?depth_pass,
            "stencil_op"
        );
        self.inner.stencil_op(stencil_fail, depth_fail, depth_pass);
    }

    fn stencil_mask(&mut self, mask: u32) {
        tracing::trace!(target: "glstate::device", mask, "stencil_mask");
        self.inner.stencil_mask(mask);
    }

    fn blend_color(&mut self, color: BlendColor) {
        tracing::trace!(target: "glstate::device", ?color, "blend_color");
        self.inner.blend_color(color);
    }

    fn blend_func_separate(
        &mut self,
        src_rgb: BlendFactor,
        dst_rgb: BlendFactor,
        src_alpha: BlendFactor,
        dst_alpha: BlendFactor,
    ) {
        tracing::trace!(
            target: "glstate::device",
            ?src_rgb,
            ?dst_rgb,
            ?src_alpha,
            ?dst_alpha,
            "blend_func_separate"
        );
        self.inner
            .blend_func_separate(src_rgb, dst_rgb, src_alpha, dst_alpha);
    }

    fn blend_equation_separate(&mut self, rgb: BlendEquation, alpha: BlendEquation) {
        tracing::trace!(target: "glstate::device", ?rgb, ?alpha, "blend_equation_separate");
        self.inner.blend_equation_separate(rgb, alpha);
    }

    fn logic_op(&mut self, op: LogicOp) {
        tracing::trace!(target: "glstate::device", ?op, "logic_op");
        self.inner.logic_op(op);
    }

    fn active_texture(&mut self, unit: TextureUnitId) {
        tracing::trace!(target: "glstate::device", unit = unit.index(), "active_texture");
        self.inner.active_texture(unit);
    }

    fn bind_texture(&mut self, target: TextureTarget, texture: TextureHandle) {
        tracing::trace!(target: "glstate::device", kind = ?target, texture = texture.id(), "bind_texture");
        self.inner.bind_texture(target, texture);
    }

    fn bind_sampler(&mut self, unit: TextureUnitId, sampler: SamplerHandle) {
        tracing::trace!(
            target: "glstate::device",
            unit = unit.index(),
            sampler = sampler.id(),
            "bind_sampler"
        );
        self.inner.bind_sampler(unit, sampler);
    }

    fn bind_image_texture(
        &mut self,
        unit: ImageUnitId,
        texture: TextureHandle,
        access: ImageAccess,
        format: ImageFormat,
    ) {
        tracing::trace!(
            target: "glstate::device",
            unit = unit.0,
            texture = texture.id(),
            ?access,
            ?format,
            "bind_image_texture"
        );
        self.inner.bind_image_texture(unit, texture, access, format);
    }

    fn bind_framebuffer(&mut self, target: FramebufferTarget, framebuffer: FramebufferHandle) {
        tracing::trace!(
            target: "glstate::device",
            kind = ?target,
            framebuffer = framebuffer.id(),
            "bind_framebuffer"
        );
        self.inner.bind_framebuffer(target, framebuffer);
    }

    fn bind_vertex_array(&mut self, vertex_array: VertexArrayHandle) {
        tracing::trace!(target: "glstate::device", vertex_array = vertex_array.id(), "bind_vertex_array");
        self.inner.bind_vertex_array(vertex_array);
    }

    fn bind_buffer(&mut self, target: BufferTarget, buffer: BufferHandle) {
        tracing::trace!(target: "glstate::device", kind = ?target, buffer = buffer.id(), "bind_buffer");
        self.inner.bind_buffer(target, buffer);
    }

    fn use_program(&mut self, program: ProgramHandle) {
        tracing::trace!(target: "glstate::device", program = program.id(), "use_program");
        self.inner.use_program(program);
    }

    fn bind_program_pipeline(&mut self, pipeline: PipelineHandle) {
        tracing::trace!(target: "glstate::device", pipeline = pipeline.id(), "bind_program_pipeline");
        self.inner.bind_program_pipeline(pipeline);
    }

    fn scissor(&mut self, rect: Rect) {
        tracing::trace!(target: "glstate::device", ?rect, "scissor");
        self.inner.scissor(rect);
    }

    fn viewport(&mut self, rect: Rect) {
        tracing::trace!(target: "glstate::device", ?rect, "viewport");
        self.inner.viewport(rect);
    }
}
