//! Direct binding helpers
//!
//! Resource upload and setup code often needs one object bound for a few
//! calls without building a whole descriptor. These helpers bind
//! immediately, record the new binding in the shadow and hand back the
//! previous one so the caller can restore it. [`StateCache::scoped`] does
//! the restore automatically.

use std::ops::{Deref, DerefMut};

use crate::cache::StateCache;
use crate::descriptor::NUM_TEXTURE_UNITS;
use crate::device::Device;
use crate::enums::{BufferTarget, FramebufferTarget, TextureTarget};
use crate::error::StateError;
use crate::handle::{
    BufferHandle, FramebufferHandle, ProgramHandle, SamplerHandle, TextureHandle, VertexArrayHandle,
};
use crate::units::TextureUnitId;

/// A single binding slot together with the object bound to it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    VertexArray(VertexArrayHandle),
    UniformBuffer(BufferHandle),
    Texture2D { unit: usize, texture: TextureHandle },
    Sampler { unit: usize, sampler: SamplerHandle },
    TextureCube(TextureHandle),
    ReadFramebuffer(FramebufferHandle),
    DrawFramebuffer(FramebufferHandle),
    ShaderProgram(ProgramHandle),
}

impl<D: Device> StateCache<D> {
    fn texture_unit(&self, index: usize) -> Result<TextureUnitId, StateError> {
        self.units
            .texture(index)
            .ok_or(StateError::TextureUnitOutOfRange {
                index,
                count: NUM_TEXTURE_UNITS,
            })
    }

    /// Bind a vertex array, returning the one it replaced
    pub fn bind_vertex_array(&mut self, vertex_array: VertexArrayHandle) -> VertexArrayHandle {
        let previous = self.shadow.draw.vertex_array;
        self.device.bind_vertex_array(vertex_array);
        self.shadow.draw.vertex_array = vertex_array;
        self.stats.issued(1);
        previous
    }

    pub fn bind_uniform_buffer(&mut self, buffer: BufferHandle) -> BufferHandle {
        let previous = self.shadow.draw.uniform_buffer;
        self.device.bind_buffer(BufferTarget::Uniform, buffer);
        self.shadow.draw.uniform_buffer = buffer;
        self.stats.issued(1);
        previous
    }

    /// Bind a 2D texture to logical unit `unit`, leaving that unit active.
    ///
    /// # Errors
    ///
    /// [`StateError::TextureUnitOutOfRange`] if `unit` is not a tracked
    /// texture unit. Nothing is issued in that case.
    pub fn bind_texture_2d(
        &mut self,
        unit: usize,
        texture: TextureHandle,
    ) -> Result<TextureHandle, StateError> {
        let device_unit = self.texture_unit(unit)?;
        let slot = &mut self.shadow.texture_units[unit];
        let previous = slot.texture_2d;
        self.device.active_texture(device_unit);
        self.device.bind_texture(TextureTarget::Texture2D, texture);
        slot.texture_2d = texture;
        self.stats.issued(2);
        Ok(previous)
    }

    pub fn bind_sampler(
        &mut self,
        unit: usize,
        sampler: SamplerHandle,
    ) -> Result<SamplerHandle, StateError> {
        let device_unit = self.texture_unit(unit)?;
        let slot = &mut self.shadow.texture_units[unit];
        let previous = slot.sampler;
        self.device.bind_sampler(device_unit, sampler);
        slot.sampler = sampler;
        self.stats.issued(1);
        Ok(previous)
    }

    /// Bind a cube map on the cube unit, leaving that unit active
    pub fn bind_texture_cube(&mut self, texture: TextureHandle) -> TextureHandle {
        let previous = self.shadow.texture_cube_unit.texture_cube;
        self.device.active_texture(self.units.texture_cube);
        self.device.bind_texture(TextureTarget::CubeMap, texture);
        self.shadow.texture_cube_unit.texture_cube = texture;
        self.stats.issued(2);
        previous
    }

    pub fn bind_read_framebuffer(&mut self, framebuffer: FramebufferHandle) -> FramebufferHandle {
        let previous = self.shadow.draw.read_framebuffer;
        self.device
            .bind_framebuffer(FramebufferTarget::Read, framebuffer);
        self.shadow.draw.read_framebuffer = framebuffer;
        self.stats.issued(1);
        previous
    }

    /// Bind the draw framebuffer. Skips the device call when it is already bound.
    pub fn bind_draw_framebuffer(&mut self, framebuffer: FramebufferHandle) -> FramebufferHandle {
        let previous = self.shadow.draw.draw_framebuffer;
        if previous == framebuffer {
            self.stats.skipped();
        } else {
            self.device
                .bind_framebuffer(FramebufferTarget::Draw, framebuffer);
            self.shadow.draw.draw_framebuffer = framebuffer;
            self.stats.issued(1);
        }
        previous
    }

    pub fn bind_shader_program(&mut self, program: ProgramHandle) -> ProgramHandle {
        let previous = self.shadow.draw.shader_program;
        self.device.use_program(program);
        self.shadow.draw.shader_program = program;
        self.stats.issued(1);
        previous
    }

    /// Bind through the matching helper, returning the binding it replaced
    pub fn bind(&mut self, binding: Binding) -> Result<Binding, StateError> {
        Ok(match binding {
            Binding::VertexArray(h) => Binding::VertexArray(self.bind_vertex_array(h)),
            Binding::UniformBuffer(h) => Binding::UniformBuffer(self.bind_uniform_buffer(h)),
            Binding::Texture2D { unit, texture } => Binding::Texture2D {
                unit,
                texture: self.bind_texture_2d(unit, texture)?,
            },
            Binding::Sampler { unit, sampler } => Binding::Sampler {
                unit,
                sampler: self.bind_sampler(unit, sampler)?,
            },
            Binding::TextureCube(h) => Binding::TextureCube(self.bind_texture_cube(h)),
            Binding::ReadFramebuffer(h) => Binding::ReadFramebuffer(self.bind_read_framebuffer(h)),
            Binding::DrawFramebuffer(h) => Binding::DrawFramebuffer(self.bind_draw_framebuffer(h)),
            Binding::ShaderProgram(h) => Binding::ShaderProgram(self.bind_shader_program(h)),
        })
    }

    /// Bind for the lifetime of the returned guard, then restore.
    ///
    /// The guard derefs to the cache, so it can be used in place of it.
    /// Whatever the slot holds when the guard drops is replaced by the
    /// binding that was there before.
    pub fn scoped(&mut self, binding: Binding) -> Result<ScopedBinding<'_, D>, StateError> {
        let previous = self.bind(binding)?;
        Ok(ScopedBinding {
            cache: self,
            previous,
        })
    }
}

/// Restores a binding on drop. Created by [`StateCache::scoped`].
pub struct ScopedBinding<'a, D: Device> {
    cache: &'a mut StateCache<D>,
    previous: Binding,
}

impl<D: Device> ScopedBinding<'_, D> {
    /// Binding that will be restored
    pub fn previous(&self) -> Binding {
        self.previous
    }
}

impl<D: Device> Deref for ScopedBinding<'_, D> {
    type Target = StateCache<D>;

    fn deref(&self) -> &StateCache<D> {
        &*self.cache
    }
}

impl<D: Device> DerefMut for ScopedBinding<'_, D> {
    fn deref_mut(&mut self) -> &mut StateCache<D> {
        &mut *self.cache
    }
}

impl<D: Device> Drop for ScopedBinding<'_, D> {
    fn drop(&mut self) {
        // The unit index was validated when the guard was created
        if let Err(err) = self.cache.bind(self.previous) {
            tracing::warn!(%err, binding = ?self.previous, "failed to restore scoped binding");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::DeviceCall;
    use crate::test_utils::recording_cache;

    #[test]
    fn test_bind_returns_previous_and_updates_shadow() {
        let mut cache = recording_cache();
        let vao = VertexArrayHandle::new(4);

        assert!(cache.bind_vertex_array(vao).is_none());
        assert_eq!(cache.shadow().draw.vertex_array, vao);
        assert_eq!(cache.bind_vertex_array(VertexArrayHandle::NONE), vao);

        assert_eq!(
            cache.device_mut().take(),
            vec![
                DeviceCall::BindVertexArray(vao),
                DeviceCall::BindVertexArray(VertexArrayHandle::NONE),
            ]
        );
    }

    #[test]
    fn test_bind_texture_2d_activates_unit() {
        let mut cache = recording_cache();
        let texture = TextureHandle::new(11);

        let previous = cache.bind_texture_2d(2, texture).unwrap();
        assert!(previous.is_none());
        assert_eq!(cache.shadow().texture_units[2].texture_2d, texture);
        assert_eq!(
            cache.device_mut().take(),
            vec![
                DeviceCall::ActiveTexture(TextureUnitId(2)),
                DeviceCall::BindTexture {
                    target: TextureTarget::Texture2D,
                    texture,
                },
            ]
        );
    }

    #[test]
    fn test_texture_unit_out_of_range() {
        let mut cache = recording_cache();

        let err = cache
            .bind_texture_2d(NUM_TEXTURE_UNITS, TextureHandle::new(1))
            .unwrap_err();
        assert_eq!(
            err,
            StateError::TextureUnitOutOfRange {
                index: NUM_TEXTURE_UNITS,
                count: NUM_TEXTURE_UNITS,
            }
        );
        assert!(cache.bind_sampler(7, SamplerHandle::new(1)).is_err());
        assert!(cache.device().is_empty());
    }

    #[test]
    fn test_bind_sampler_uses_unit_number() {
        let mut cache = recording_cache();
        let sampler = SamplerHandle::new(6);

        cache.bind_sampler(1, sampler).unwrap();

        assert_eq!(
            cache.device().calls(),
            &[DeviceCall::BindSampler {
                unit: TextureUnitId(1),
                sampler,
            }]
        );
        assert_eq!(cache.shadow().texture_units[1].sampler, sampler);
    }

    #[test]
    fn test_bind_texture_cube_uses_cube_unit() {
        let mut cache = recording_cache();
        let cube = TextureHandle::new(30);

        cache.bind_texture_cube(cube);

        assert_eq!(
            cache.device().calls(),
            &[
                DeviceCall::ActiveTexture(cache.units().texture_cube),
                DeviceCall::BindTexture {
                    target: TextureTarget::CubeMap,
                    texture: cube,
                },
            ]
        );
    }

    #[test]
    fn test_draw_framebuffer_is_diffed() {
        let mut cache = recording_cache();
        let fbo = FramebufferHandle::new(2);

        cache.bind_draw_framebuffer(fbo);
        cache.bind_draw_framebuffer(fbo);
        // Read framebuffer binds are never skipped
        cache.bind_read_framebuffer(fbo);
        cache.bind_read_framebuffer(fbo);

        assert_eq!(
            cache.device_mut().take(),
            vec![
                DeviceCall::BindFramebuffer {
                    target: FramebufferTarget::Draw,
                    framebuffer: fbo,
                },
                DeviceCall::BindFramebuffer {
                    target: FramebufferTarget::Read,
                    framebuffer: fbo,
                },
                DeviceCall::BindFramebuffer {
                    target: FramebufferTarget::Read,
                    framebuffer: fbo,
                },
            ]
        );
        assert_eq!(cache.stats().calls_skipped, 1);
    }

    #[test]
    fn test_bind_then_restore_round_trip() {
        let mut cache = recording_cache();
        let original = ProgramHandle::new(1);
        cache.bind_shader_program(original);

        let previous = cache
            .bind(Binding::ShaderProgram(ProgramHandle::new(2)))
            .unwrap();
        assert_eq!(previous, Binding::ShaderProgram(original));

        cache.bind(previous).unwrap();
        assert_eq!(cache.shadow().draw.shader_program, original);
    }

    #[test]
    fn test_scoped_binding_restores_on_drop() {
        let mut cache = recording_cache();
        let ubo = BufferHandle::new(8);
        let scratch = BufferHandle::new(9);
        cache.bind_uniform_buffer(ubo);
        cache.device_mut().clear();

        {
            let guard = cache.scoped(Binding::UniformBuffer(scratch)).unwrap();
            assert_eq!(guard.previous(), Binding::UniformBuffer(ubo));
            assert_eq!(guard.shadow().draw.uniform_buffer, scratch);
        }

        assert_eq!(cache.shadow().draw.uniform_buffer, ubo);
        assert_eq!(
            cache.device().calls(),
            &[
                DeviceCall::BindBuffer {
                    target: BufferTarget::Uniform,
                    buffer: scratch,
                },
                DeviceCall::BindBuffer {
                    target: BufferTarget::Uniform,
                    buffer: ubo,
                },
            ]
        );
    }

    #[test]
    fn test_scoped_binding_out_of_range_binds_nothing() {
        let mut cache = recording_cache();
        let result = cache.scoped(Binding::Texture2D {
            unit: 9,
            texture: TextureHandle::new(1),
        });
        assert!(result.is_err());
        drop(result);
        assert!(cache.device().is_empty());
    }

    #[test]
    fn test_scoped_texture_restores_unit() {
        let mut cache = recording_cache();
        let base = TextureHandle::new(3);
        cache.bind_texture_2d(0, base).unwrap();

        {
            let mut guard = cache
                .scoped(Binding::Texture2D {
                    unit: 0,
                    texture: TextureHandle::new(4),
                })
                .unwrap();
            guard.bind_shader_program(ProgramHandle::new(5));
        }

        assert_eq!(cache.shadow().texture_units[0].texture_2d, base);
        // Bindings made through the guard outlive it
        assert_eq!(cache.shadow().draw.shader_program, ProgramHandle::new(5));
    }
}
