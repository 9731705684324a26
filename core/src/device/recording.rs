//! Call-recording device for tests and tooling

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

/// One recorded driver call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeviceCall {
    SetCapability {
        capability: Capability,
        enabled: bool,
    },
    CullFace(CullFace),
    FrontFace(FrontFace),
    DepthFunc(CompareFunc),
    DepthMask(bool),
    ColorMask(ColorMask),
    StencilFunc {
        func: CompareFunc,
        reference: i32,
        mask: u32,
    },
    StencilOp {
        stencil_fail: StencilOp,
        depth_fail: StencilOp,
        depth_pass: StencilOp,
    },
    StencilMask(u32),
    BlendColor(BlendColor),
    BlendFuncSeparate {
        src_rgb: BlendFactor,
        dst_rgb: BlendFactor,
        src_alpha: BlendFactor,
        dst_alpha: BlendFactor,
    },
    BlendEquationSeparate {
        rgb: BlendEquation,
        alpha: BlendEquation,
    },
    LogicOp(LogicOp),
    ActiveTexture(TextureUnitId),
    BindTexture {
        target: TextureTarget,
        texture: TextureHandle,
    },
    BindSampler {
        unit: TextureUnitId,
        sampler: SamplerHandle,
    },
    BindImageTexture {
        unit: ImageUnitId,
        texture: TextureHandle,
        access: ImageAccess,
        format: ImageFormat,
    },
    BindFramebuffer {
        target: FramebufferTarget,
        framebuffer: FramebufferHandle,
    },
    BindVertexArray(VertexArrayHandle),
    BindBuffer {
        target: BufferTarget,
        buffer: BufferHandle,
    },
    UseProgram(ProgramHandle),
    BindProgramPipeline(PipelineHandle),
    Scissor(Rect),
    Viewport(Rect),
}

impl DeviceCall {
    /// True for parameter-only calls that the full reconciler re-issues every time
    pub fn is_parameter(&self) -> bool {
        matches!(
            self,
            DeviceCall::CullFace(_)
                | DeviceCall::FrontFace(_)
                | DeviceCall::DepthFunc(_)
                | DeviceCall::DepthMask(_)
                | DeviceCall::ColorMask(_)
                | DeviceCall::StencilFunc { .. }
                | DeviceCall::StencilOp { .. }
                | DeviceCall::StencilMask(_)
                | DeviceCall::BlendColor(_)
                | DeviceCall::BlendFuncSeparate { .. }
                | DeviceCall::BlendEquationSeparate { .. }
                | DeviceCall::Scissor(_)
                | DeviceCall::Viewport(_)
        )
    }
}

/// Device that records every call instead of driving hardware.
#[derive(Debug, Default)]
pub struct RecordingDevice {
    calls: Vec<DeviceCall>,
}

impl RecordingDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls recorded so far, oldest first
    pub fn calls(&self) -> &[DeviceCall] {
        &self.calls
    }

    /// Drain the recorded calls
    pub fn take(&mut self) -> Vec<DeviceCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    #[inline]
    fn record(&mut self, call: DeviceCall) {
        self.calls.push(call);
    }
}

impl Device for RecordingDevice {
    fn set_capability(&mut self, capability: Capability, enabled: bool) {
        self.record(DeviceCall::SetCapability {
            capability,
            enabled,
        });
    }

    fn cull_face(&mut self, mode: CullFace) {
        self.record(DeviceCall::CullFace(mode));
    }

    fn front_face(&mut self, winding: FrontFace) {
        self.record(DeviceCall::FrontFace(winding));
    }

    fn depth_func(&mut self, func: CompareFunc) {
        self.record(DeviceCall::DepthFunc(func));
    }

    fn depth_mask(&mut self, write: bool) {
        self.record(DeviceCall::DepthMask(write));
    }

    fn color_mask(&mut self, mask: ColorMask) {
        self.record(DeviceCall::ColorMask(mask));
    }

    fn stencil_func(&mut self, func: CompareFunc, reference: i32, mask: u32) {
        self.record(DeviceCall::StencilFunc {
            func,
            reference,
            mask,
        });
    }

    fn stencil_op(&mut self, stencil_fail: StencilOp, depth_fail: StencilOp, depth_pass: StencilOp) {
        self.record(DeviceCall::StencilOp {
            stencil_fail,
            depth_fail,
            depth_pass,
        });
    }

    fn stencil_mask(&mut self, mask: u32) {
        self.record(DeviceCall::StencilMask(mask));
    }

    fn blend_color(&mut self, color: BlendColor) {
        self.record(DeviceCall::BlendColor(color));
    }

    fn blend_func_separate(
        &mut self,
        src_rgb: BlendFactor,
        dst_rgb: BlendFactor,
        src_alpha: BlendFactor,
        dst_alpha: BlendFactor,
    ) {
        self.record(DeviceCall::BlendFuncSeparate {
            src_rgb,
            dst_rgb,
            src_alpha,
            dst_alpha,
        });
    }

    fn blend_equation_separate(&mut self, rgb: BlendEquation, alpha: BlendEquation) {
        self.record(DeviceCall::BlendEquationSeparate { rgb, alpha });
    }

    fn logic_op(&mut self, op: LogicOp) {
        self.record(DeviceCall::LogicOp(op));
    }

    fn active_texture(&mut self, unit: TextureUnitId) {
        self.record(DeviceCall::ActiveTexture(unit));
    }

    fn bind_texture(&mut self, target: TextureTarget, texture: TextureHandle) {
        self.record(DeviceCall::BindTexture { target, texture });
    }

    fn bind_sampler(&mut self, unit: TextureUnitId, sampler: SamplerHandle) {
        self.record(DeviceCall::BindSampler { unit, sampler });
    }

    fn bind_image_texture(
        &mut self,
        unit: ImageUnitId,
        texture: TextureHandle,
        access: ImageAccess,
        format: ImageFormat,
    ) {
        self.record(DeviceCall::BindImageTexture {
            unit,
            texture,
            access,
            format,
        });
    }

    fn bind_framebuffer(&mut self, target: FramebufferTarget, framebuffer: FramebufferHandle) {
        self.record(DeviceCall::BindFramebuffer {
            target,
            framebuffer,
        });
    }

    fn bind_vertex_array(&mut self, vertex_array: VertexArrayHandle) {
        self.record(DeviceCall::BindVertexArray(vertex_array));
    }

    fn bind_buffer(&mut self, target: BufferTarget, buffer: BufferHandle) {
        self.record(DeviceCall::BindBuffer { target, buffer });
    }

    fn use_program(&mut self, program: ProgramHandle) {
        self.record(DeviceCall::UseProgram(program));
    }

    fn bind_program_pipeline(&mut self, pipeline: PipelineHandle) {
        self.record(DeviceCall::BindProgramPipeline(pipeline));
    }

    fn scissor(&mut self, rect: Rect) {
        self.record(DeviceCall::Scissor(rect));
    }

    fn viewport(&mut self, rect: Rect) {
        self.record(DeviceCall::Viewport(rect));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let mut device = RecordingDevice::new();
        device.active_texture(TextureUnitId(1));
        device.bind_texture(TextureTarget::Texture2D, TextureHandle::new(5));
        device.viewport(Rect::from_size(400, 240));

        assert_eq!(
            device.calls(),
            &[
                DeviceCall::ActiveTexture(TextureUnitId(1)),
                DeviceCall::BindTexture {
                    target: TextureTarget::Texture2D,
                    texture: TextureHandle::new(5),
                },
                DeviceCall::Viewport(Rect::from_size(400, 240)),
            ]
        );
    }

    #[test]
    fn test_take_drains() {
        let mut device = RecordingDevice::new();
        device.depth_mask(false);
        assert_eq!(device.len(), 1);
        let calls = device.take();
        assert_eq!(calls, vec![DeviceCall::DepthMask(false)]);
        assert!(device.is_empty());
    }

    #[test]
    fn test_parameter_classification() {
        assert!(DeviceCall::Viewport(Rect::ZERO).is_parameter());
        assert!(DeviceCall::StencilMask(0xFF).is_parameter());
        assert!(
            !DeviceCall::SetCapability {
                capability: Capability::Blend,
                enabled: true,
            }
            .is_parameter()
        );
        assert!(!DeviceCall::UseProgram(ProgramHandle::new(1)).is_parameter());
    }
}
