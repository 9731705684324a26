//! Invalidation hooks
//!
//! Device ids are recycled as soon as an object is deleted. Before deleting
//! an object the resource layer calls the matching `reset_*` hook, which
//! unbinds it from every slot the shadow has it in and zeroes those slots.
//! Otherwise a later bind of the recycled id would diff as already bound.
//!
//! Hooks match on the raw id only, so every generation of a recycled id is
//! scrubbed. Resetting [`NONE`](TextureHandle::NONE) does nothing.

use crate::cache::StateCache;
use crate::descriptor::ShadowImageSlot;
use crate::device::Device;
use crate::enums::{BufferTarget, FramebufferTarget, ImageFormat, TextureTarget};
use crate::handle::{
    BufferHandle, FramebufferHandle, PipelineHandle, ProgramHandle, SamplerHandle, TextureHandle,
    VertexArrayHandle,
};

impl<D: Device> StateCache<D> {
    /// Unbind a texture about to be deleted from every texture and image slot.
    pub fn reset_texture(&mut self, texture: TextureHandle) {
        if texture.is_none() {
            return;
        }
        let id = texture.id();

        for (index, slot) in self.shadow.texture_units.iter_mut().enumerate() {
            if slot.texture_2d.same_id(texture) {
                let unit = self.units.texture_units[index];
                self.device.active_texture(unit);
                self.device
                    .bind_texture(TextureTarget::Texture2D, TextureHandle::NONE);
                slot.texture_2d = TextureHandle::NONE;
                self.stats.issued(2);
                self.stats.invalidated();
                tracing::debug!(id, unit = index, "scrubbed 2D texture");
            }
        }

        if self.shadow.texture_cube_unit.texture_cube.same_id(texture) {
            self.device.active_texture(self.units.texture_cube);
            self.device
                .bind_texture(TextureTarget::CubeMap, TextureHandle::NONE);
            self.shadow.texture_cube_unit.texture_cube = TextureHandle::NONE;
            self.stats.issued(2);
            self.stats.invalidated();
            tracing::debug!(id, "scrubbed cube texture");
        }

        // Buffer textures recycle ids like any other texture
        let luts = [
            (&mut self.shadow.texture_buffer_lut_lf, self.units.texture_buffer_lut_lf),
            (&mut self.shadow.texture_buffer_lut_rg, self.units.texture_buffer_lut_rg),
            (&mut self.shadow.texture_buffer_lut_rgba, self.units.texture_buffer_lut_rgba),
        ];
        for (slot, unit) in luts {
            if slot.texture_buffer.same_id(texture) {
                self.device.active_texture(unit);
                self.device
                    .bind_texture(TextureTarget::Buffer, TextureHandle::NONE);
                slot.texture_buffer = TextureHandle::NONE;
                self.stats.issued(2);
                self.stats.invalidated();
                tracing::debug!(id, unit = unit.index(), "scrubbed buffer texture");
            }
        }

        if self.caps.allow_shadow {
            for slot in ShadowImageSlot::ALL {
                if self.shadow.shadow_images[slot].same_id(texture) {
                    self.device.bind_image_texture(
                        self.units.shadow_image(slot),
                        TextureHandle::NONE,
                        slot.access(),
                        ImageFormat::R32Ui,
                    );
                    self.shadow.shadow_images[slot] = TextureHandle::NONE;
                    self.stats.issued(1);
                    self.stats.invalidated();
                    tracing::debug!(id, ?slot, "scrubbed shadow image");
                }
            }
        }
    }

    pub fn reset_sampler(&mut self, sampler: SamplerHandle) {
        if sampler.is_none() {
            return;
        }
        let id = sampler.id();

        for (index, slot) in self.shadow.texture_units.iter_mut().enumerate() {
            if slot.sampler.same_id(sampler) {
                self.device
                    .bind_sampler(self.units.texture_units[index], SamplerHandle::NONE);
                slot.sampler = SamplerHandle::NONE;
                self.stats.issued(1);
                self.stats.invalidated();
                tracing::debug!(id, unit = index, "scrubbed sampler");
            }
        }

        if self.shadow.texture_cube_unit.sampler.same_id(sampler) {
            self.device
                .bind_sampler(self.units.texture_cube, SamplerHandle::NONE);
            self.shadow.texture_cube_unit.sampler = SamplerHandle::NONE;
            self.stats.issued(1);
            self.stats.invalidated();
            tracing::debug!(id, "scrubbed cube sampler");
        }
    }

    pub fn reset_program(&mut self, program: ProgramHandle) {
        if !program.is_none() && self.shadow.draw.shader_program.same_id(program) {
            self.device.use_program(ProgramHandle::NONE);
            self.shadow.draw.shader_program = ProgramHandle::NONE;
            self.stats.issued(1);
            self.stats.invalidated();
            tracing::debug!(id = program.id(), "scrubbed shader program");
        }
    }

    pub fn reset_pipeline(&mut self, pipeline: PipelineHandle) {
        if !pipeline.is_none() && self.shadow.draw.program_pipeline.same_id(pipeline) {
            self.device.bind_program_pipeline(PipelineHandle::NONE);
            self.shadow.draw.program_pipeline = PipelineHandle::NONE;
            self.stats.issued(1);
            self.stats.invalidated();
            tracing::debug!(id = pipeline.id(), "scrubbed program pipeline");
        }
    }

    /// Scrub a buffer from the vertex and uniform slots
    pub fn reset_buffer(&mut self, buffer: BufferHandle) {
        if buffer.is_none() {
            return;
        }
        let targets = [
            (&mut self.shadow.draw.vertex_buffer, BufferTarget::Array),
            (&mut self.shadow.draw.uniform_buffer, BufferTarget::Uniform),
        ];
        for (slot, target) in targets {
            if slot.same_id(buffer) {
                self.device.bind_buffer(target, BufferHandle::NONE);
                *slot = BufferHandle::NONE;
                self.stats.issued(1);
                self.stats.invalidated();
                tracing::debug!(id = buffer.id(), kind = ?target, "scrubbed buffer");
            }
        }
    }

    pub fn reset_vertex_array(&mut self, vertex_array: VertexArrayHandle) {
        if !vertex_array.is_none() && self.shadow.draw.vertex_array.same_id(vertex_array) {
            self.device.bind_vertex_array(VertexArrayHandle::NONE);
            self.shadow.draw.vertex_array = VertexArrayHandle::NONE;
            self.stats.issued(1);
            self.stats.invalidated();
            tracing::debug!(id = vertex_array.id(), "scrubbed vertex array");
        }
    }

    /// Scrub a framebuffer from the read and draw slots independently
    pub fn reset_framebuffer(&mut self, framebuffer: FramebufferHandle) {
        if framebuffer.is_none() {
            return;
        }
        let targets = [
            (&mut self.shadow.draw.read_framebuffer, FramebufferTarget::Read),
            (&mut self.shadow.draw.draw_framebuffer, FramebufferTarget::Draw),
        ];
        for (slot, target) in targets {
            if slot.same_id(framebuffer) {
                self.device.bind_framebuffer(target, FramebufferHandle::NONE);
                *slot = FramebufferHandle::NONE;
                self.stats.issued(1);
                self.stats.invalidated();
                tracing::debug!(id = framebuffer.id(), kind = ?target, "scrubbed framebuffer");
            }
        }
    }
}
