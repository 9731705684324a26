//! Canned frame sequence
//!
//! Each frame renders a shadow-map pass, an opaque pass, a blended pass
//! and a scissored overlay. Every fourth frame the scene streams in a new
//! albedo texture, which recycles the old texture's id.

use anyhow::Result;
use glstate_core::{
    Binding, BlendFactor, BufferHandle, ColorMask, CompareFunc, CullFace, Device, FramebufferHandle,
    ProgramHandle, Rect, SamplerHandle, StateCache, StateDescriptor, TextureHandle,
    VertexArrayHandle,
};

const SCREEN: Rect = Rect::from_size(1280, 720);
const SHADOW_MAP_SIZE: i32 = 1024;

const SHADOW_FBO: FramebufferHandle = FramebufferHandle::new(1);
const SHADOW_DEPTH: TextureHandle = TextureHandle::new(2);
const DEPTH_PROGRAM: ProgramHandle = ProgramHandle::new(3);
const LIT_PROGRAM: ProgramHandle = ProgramHandle::new(4);
const UI_PROGRAM: ProgramHandle = ProgramHandle::new(5);
const MESH_VAO: VertexArrayHandle = VertexArrayHandle::new(6);
const MESH_VBO: BufferHandle = BufferHandle::new(7);
const CAMERA_UBO: BufferHandle = BufferHandle::new(8);
const LINEAR: SamplerHandle = SamplerHandle::new(9);
/// Raw id the albedo texture lives at; recycled on every reload
const ALBEDO_ID: u32 = 10;

pub struct Scene {
    albedo: TextureHandle,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            albedo: TextureHandle::new(ALBEDO_ID),
        }
    }

    pub fn render<D: Device>(&mut self, cache: &mut StateCache<D>, frame: u32) -> Result<()> {
        if frame > 0 && frame % 4 == 0 {
            self.reload_albedo(cache)?;
        }

        // Shadow map: depth only, front faces culled
        let mut shadow =
            StateDescriptor::with_viewport(Rect::from_size(SHADOW_MAP_SIZE, SHADOW_MAP_SIZE));
        shadow.cull.mode = CullFace::Front;
        shadow.depth.test_enabled = true;
        shadow.color_mask = ColorMask::NONE;
        shadow.draw.draw_framebuffer = SHADOW_FBO;
        shadow.draw.vertex_array = MESH_VAO;
        shadow.draw.vertex_buffer = MESH_VBO;
        shadow.draw.uniform_buffer = CAMERA_UBO;
        shadow.draw.shader_program = DEPTH_PROGRAM;
        cache.apply(&shadow);

        // Opaque geometry sampling the shadow map
        let mut opaque = StateDescriptor::with_viewport(SCREEN);
        opaque.depth.test_enabled = true;
        opaque.depth.test_func = CompareFunc::LessEqual;
        opaque.texture_units[0].texture_2d = self.albedo;
        opaque.texture_units[0].sampler = LINEAR;
        opaque.texture_units[1].texture_2d = SHADOW_DEPTH;
        opaque.draw.vertex_array = MESH_VAO;
        opaque.draw.vertex_buffer = MESH_VBO;
        opaque.draw.uniform_buffer = CAMERA_UBO;
        opaque.draw.shader_program = LIT_PROGRAM;
        for _ in 0..3 {
            cache.apply(&opaque);
        }

        // Transparent geometry
        let mut blended = opaque;
        blended.depth.write_mask = false;
        blended.blend.enabled = true;
        blended.blend.src_rgb_func = BlendFactor::SrcAlpha;
        blended.blend.dst_rgb_func = BlendFactor::OneMinusSrcAlpha;
        cache.apply(&blended);

        // Overlay: only masks, scissor and viewport change
        let mut overlay = blended;
        overlay.scissor.enabled = true;
        overlay.scissor.rect = Rect::new(16, 16, 320, 96);
        cache.sub_apply(&overlay);
        let previous = cache.bind_shader_program(UI_PROGRAM);
        cache.bind_shader_program(previous);

        Ok(())
    }

    /// Replace the albedo texture. The driver hands the same id back.
    fn reload_albedo<D: Device>(&mut self, cache: &mut StateCache<D>) -> Result<()> {
        cache.reset_texture(self.albedo);
        self.albedo = TextureHandle::with_generation(ALBEDO_ID, self.albedo.generation() + 1);

        // Upload goes through a scratch binding on unit 2
        let scratch = cache.scoped(Binding::Texture2D {
            unit: 2,
            texture: self.albedo,
        })?;
        tracing::info!(
            generation = self.albedo.generation(),
            restores = ?scratch.previous(),
            "reloaded albedo texture"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glstate_core::{CacheConfig, DeviceCall, RecordingDevice};

    #[test]
    fn test_steady_frames_issue_same_traffic() {
        let mut cache = StateCache::new(RecordingDevice::new(), CacheConfig::default());
        let mut scene = Scene::new();

        scene.render(&mut cache, 0).unwrap();
        cache.device_mut().clear();
        scene.render(&mut cache, 1).unwrap();
        let second = cache.device_mut().take();
        scene.render(&mut cache, 2).unwrap();
        let third = cache.device_mut().take();

        assert_eq!(second, third);
    }

    #[test]
    fn test_reload_rebinds_recycled_id() {
        let mut cache = StateCache::new(RecordingDevice::new(), CacheConfig::default());
        let mut scene = Scene::new();
        for frame in 0..4 {
            scene.render(&mut cache, frame).unwrap();
        }
        cache.device_mut().clear();

        scene.render(&mut cache, 4).unwrap();

        assert_eq!(scene.albedo.generation(), 1);
        assert!(cache.device().calls().contains(&DeviceCall::BindTexture {
            target: glstate_core::TextureTarget::Texture2D,
            texture: TextureHandle::with_generation(ALBEDO_ID, 1),
        }));
        assert!(cache.stats().slots_invalidated >= 1);
    }
}
