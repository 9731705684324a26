//! Shared helpers for unit tests

use crate::cache::StateCache;
use crate::config::{CacheConfig, DeviceCaps};
use crate::descriptor::{ColorMask, ShadowImageSlot, StateDescriptor};
use crate::device::{DeviceCall, RecordingDevice};
use crate::enums::{BlendFactor, CompareFunc, CullFace, LogicOp};
use crate::handle::{
    BufferHandle, FramebufferHandle, PipelineHandle, ProgramHandle, SamplerHandle, TextureHandle,
    VertexArrayHandle,
};
use crate::rect::Rect;

/// Calls every full reconcile makes even when nothing changed
pub const PARAMETER_CALLS_PER_APPLY: usize = 13;

/// Desktop cache on a recording device
pub fn recording_cache() -> StateCache<RecordingDevice> {
    recording_cache_with(DeviceCaps::desktop())
}

pub fn recording_cache_with(caps: DeviceCaps) -> StateCache<RecordingDevice> {
    StateCache::new(RecordingDevice::new(), CacheConfig::with_caps(caps))
}

/// Calls that depend on the diff, i.e. everything except parameter calls
pub fn diffed_calls(calls: &[DeviceCall]) -> Vec<DeviceCall> {
    calls.iter().copied().filter(|c| !c.is_parameter()).collect()
}

/// A descriptor that differs from the default in every group
pub fn busy_state() -> StateDescriptor {
    let mut state = StateDescriptor::with_viewport(Rect::from_size(960, 540));
    state.cull.enabled = false;
    state.cull.mode = CullFace::Front;
    state.depth.test_enabled = true;
    state.depth.test_func = CompareFunc::LessEqual;
    state.depth.write_mask = false;
    state.color_mask = ColorMask {
        alpha: false,
        ..ColorMask::ALL
    };
    state.stencil.test_enabled = true;
    state.stencil.test_ref = 1;
    state.blend.enabled = true;
    state.blend.src_rgb_func = BlendFactor::SrcAlpha;
    state.blend.dst_rgb_func = BlendFactor::OneMinusSrcAlpha;
    state.logic_op = LogicOp::Xor;
    for (i, unit) in state.texture_units.iter_mut().enumerate() {
        unit.texture_2d = TextureHandle::new(10 + i as u32);
        unit.sampler = SamplerHandle::new(20 + i as u32);
    }
    state.texture_cube_unit.texture_cube = TextureHandle::new(30);
    state.texture_cube_unit.sampler = SamplerHandle::new(31);
    state.texture_buffer_lut_lf.texture_buffer = TextureHandle::new(40);
    state.texture_buffer_lut_rg.texture_buffer = TextureHandle::new(41);
    state.texture_buffer_lut_rgba.texture_buffer = TextureHandle::new(42);
    for (slot, id) in ShadowImageSlot::ALL.into_iter().zip(50..) {
        state.shadow_images[slot] = TextureHandle::new(id);
    }
    state.draw.read_framebuffer = FramebufferHandle::new(60);
    state.draw.draw_framebuffer = FramebufferHandle::new(61);
    state.draw.vertex_array = VertexArrayHandle::new(62);
    state.draw.vertex_buffer = BufferHandle::new(63);
    state.draw.uniform_buffer = BufferHandle::new(64);
    state.draw.shader_program = ProgramHandle::new(65);
    state.draw.program_pipeline = PipelineHandle::new(66);
    state.scissor.enabled = true;
    state.scissor.rect = Rect::new(8, 8, 320, 200);
    state.clip_distance = [true, false];
    state
}
