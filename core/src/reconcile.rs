//! Per-group device emission
//!
//! [`Emitter`] turns one plan step into device calls. A forced step
//! always issues; otherwise the requested slot is compared against the
//! shadow and the call is skipped when they match.

use crate::config::DeviceCaps;
use crate::descriptor::{ShadowImageSlot, StateDescriptor, TextureBufferUnitState};
use crate::device::Device;
use crate::enums::{BufferTarget, Capability, FramebufferTarget, ImageFormat, TextureTarget};
use crate::plan::StateGroup;
use crate::stats::CacheStats;
use crate::units::{TextureUnitId, UnitTable};

/// Format every shadow image is bound with
const SHADOW_IMAGE_FORMAT: ImageFormat = ImageFormat::R32Ui;

pub(crate) struct Emitter<'a, D> {
    pub device: &'a mut D,
    pub stats: &'a mut CacheStats,
    pub units: &'a UnitTable,
    pub caps: &'a DeviceCaps,
    /// Issue regardless of the shadow
    pub force: bool,
}

impl<D: Device> Emitter<'_, D> {
    #[inline]
    fn issue(&mut self, calls: u64, emit: impl FnOnce(&mut D)) {
        emit(&mut *self.device);
        self.stats.issued(calls);
    }

    /// Issue `emit` when forced or when `next` differs from `current`
    #[inline]
    fn sync<T: PartialEq>(
        &mut self,
        next: &T,
        current: &T,
        calls: u64,
        emit: impl FnOnce(&mut D),
    ) {
        if self.force || next != current {
            self.issue(calls, emit);
        } else {
            self.stats.skipped();
        }
    }

    fn sync_buffer_texture(
        &mut self,
        unit: TextureUnitId,
        next: &TextureBufferUnitState,
        current: &TextureBufferUnitState,
    ) {
        self.sync(&next.texture_buffer, &current.texture_buffer, 2, |d| {
            d.active_texture(unit);
            d.bind_texture(TextureTarget::Buffer, next.texture_buffer);
        });
    }

    /// Emit the device calls for one group
    pub fn group(&mut self, group: StateGroup, next: &StateDescriptor, current: &StateDescriptor) {
        match group {
            StateGroup::CullEnable => {
                let enabled = next.cull.enabled;
                self.sync(&enabled, &current.cull.enabled, 1, |d| {
                    d.set_capability(Capability::CullFace, enabled)
                });
            }
            StateGroup::CullFace => {
                self.sync(&next.cull.mode, &current.cull.mode, 1, |d| d.cull_face(next.cull.mode))
            }
            StateGroup::FrontFace => self.sync(&next.cull.front_face, &current.cull.front_face, 1, |d| {
                d.front_face(next.cull.front_face)
            }),

            StateGroup::DepthTestEnable => {
                let enabled = next.depth.test_enabled;
                self.sync(&enabled, &current.depth.test_enabled, 1, |d| {
                    d.set_capability(Capability::DepthTest, enabled)
                });
            }
            StateGroup::DepthFunc => self.sync(&next.depth.test_func, &current.depth.test_func, 1, |d| {
                d.depth_func(next.depth.test_func)
            }),
            StateGroup::DepthMask => self.sync(&next.depth.write_mask, &current.depth.write_mask, 1, |d| {
                d.depth_mask(next.depth.write_mask)
            }),

            StateGroup::ColorMask => {
                self.sync(&next.color_mask, &current.color_mask, 1, |d| d.color_mask(next.color_mask))
            }

            StateGroup::StencilTestEnable => {
                let enabled = next.stencil.test_enabled;
                self.sync(&enabled, &current.stencil.test_enabled, 1, |d| {
                    d.set_capability(Capability::StencilTest, enabled)
                });
            }
            StateGroup::StencilFunc => {
                let s = &next.stencil;
                let c = &current.stencil;
                self.sync(
                    &(s.test_func, s.test_ref, s.test_mask),
                    &(c.test_func, c.test_ref, c.test_mask),
                    1,
                    |d| d.stencil_func(s.test_func, s.test_ref, s.test_mask),
                );
            }
            StateGroup::StencilOp => {
                let s = &next.stencil;
                let c = &current.stencil;
                self.sync(
                    &(s.action_stencil_fail, s.action_depth_fail, s.action_depth_pass),
                    &(c.action_stencil_fail, c.action_depth_fail, c.action_depth_pass),
                    1,
                    |d| d.stencil_op(s.action_stencil_fail, s.action_depth_fail, s.action_depth_pass),
                );
            }
            StateGroup::StencilMask => {
                self.sync(&next.stencil.write_mask, &current.stencil.write_mask, 1, |d| {
                    d.stencil_mask(next.stencil.write_mask)
                })
            }

            StateGroup::BlendEnable => {
                let enabled = next.blend.enabled;
                // Blending and logic op are mutually exclusive on the device
                let logic_op = self.caps.logic_op;
                let calls = if logic_op { 2 } else { 1 };
                self.sync(&enabled, &current.blend.enabled, calls, |d| {
                    d.set_capability(Capability::Blend, enabled);
                    if logic_op {
                        d.set_capability(Capability::ColorLogicOp, !enabled);
                    }
                });
            }
            StateGroup::BlendColor => self.sync(&next.blend.color, &current.blend.color, 1, |d| {
                d.blend_color(next.blend.color)
            }),
            StateGroup::BlendFunc => {
                let b = &next.blend;
                let c = &current.blend;
                self.sync(
                    &(b.src_rgb_func, b.dst_rgb_func, b.src_a_func, b.dst_a_func),
                    &(c.src_rgb_func, c.dst_rgb_func, c.src_a_func, c.dst_a_func),
                    1,
                    |d| d.blend_func_separate(b.src_rgb_func, b.dst_rgb_func, b.src_a_func, b.dst_a_func),
                );
            }
            StateGroup::BlendEquation => {
                let b = &next.blend;
                let c = &current.blend;
                self.sync(
                    &(b.rgb_equation, b.a_equation),
                    &(c.rgb_equation, c.a_equation),
                    1,
                    |d| d.blend_equation_separate(b.rgb_equation, b.a_equation),
                );
            }
            StateGroup::LogicOp => {
                self.sync(&next.logic_op, &current.logic_op, 1, |d| d.logic_op(next.logic_op))
            }

            StateGroup::TextureUnits => {
                let units = self.units.texture_units;
                for ((unit, n), c) in units
                    .into_iter()
                    .zip(&next.texture_units)
                    .zip(&current.texture_units)
                {
                    self.sync(&n.texture_2d, &c.texture_2d, 2, |d| {
                        d.active_texture(unit);
                        d.bind_texture(TextureTarget::Texture2D, n.texture_2d);
                    });
                    self.sync(&n.sampler, &c.sampler, 1, |d| d.bind_sampler(unit, n.sampler));
                }
            }
            StateGroup::TextureCube => {
                let unit = self.units.texture_cube;
                let n = &next.texture_cube_unit;
                let c = &current.texture_cube_unit;
                self.sync(&n.texture_cube, &c.texture_cube, 2, |d| {
                    d.active_texture(unit);
                    d.bind_texture(TextureTarget::CubeMap, n.texture_cube);
                });
                self.sync(&n.sampler, &c.sampler, 1, |d| d.bind_sampler(unit, n.sampler));
            }
            StateGroup::TextureBufferLutLf => self.sync_buffer_texture(
                self.units.texture_buffer_lut_lf,
                &next.texture_buffer_lut_lf,
                &current.texture_buffer_lut_lf,
            ),
            StateGroup::TextureBufferLutRg => self.sync_buffer_texture(
                self.units.texture_buffer_lut_rg,
                &next.texture_buffer_lut_rg,
                &current.texture_buffer_lut_rg,
            ),
            StateGroup::TextureBufferLutRgba => self.sync_buffer_texture(
                self.units.texture_buffer_lut_rgba,
                &next.texture_buffer_lut_rgba,
                &current.texture_buffer_lut_rgba,
            ),
            StateGroup::ShadowImages => {
                for slot in ShadowImageSlot::ALL {
                    let unit = self.units.shadow_image(slot);
                    let texture = next.shadow_images[slot];
                    self.sync(&texture, &current.shadow_images[slot], 1, |d| {
                        d.bind_image_texture(unit, texture, slot.access(), SHADOW_IMAGE_FORMAT)
                    });
                }
            }

            StateGroup::ReadFramebuffer => {
                let framebuffer = next.draw.read_framebuffer;
                self.sync(&framebuffer, &current.draw.read_framebuffer, 1, |d| {
                    d.bind_framebuffer(FramebufferTarget::Read, framebuffer)
                });
            }
            StateGroup::DrawFramebuffer => {
                let framebuffer = next.draw.draw_framebuffer;
                self.sync(&framebuffer, &current.draw.draw_framebuffer, 1, |d| {
                    d.bind_framebuffer(FramebufferTarget::Draw, framebuffer)
                });
            }
            StateGroup::VertexArray => {
                let vertex_array = next.draw.vertex_array;
                self.sync(&vertex_array, &current.draw.vertex_array, 1, |d| {
                    d.bind_vertex_array(vertex_array)
                });
            }
            StateGroup::VertexBuffer => {
                let buffer = next.draw.vertex_buffer;
                self.sync(&buffer, &current.draw.vertex_buffer, 1, |d| {
                    d.bind_buffer(BufferTarget::Array, buffer)
                });
            }
            StateGroup::UniformBuffer => {
                let buffer = next.draw.uniform_buffer;
                self.sync(&buffer, &current.draw.uniform_buffer, 1, |d| {
                    d.bind_buffer(BufferTarget::Uniform, buffer)
                });
            }
            StateGroup::ShaderProgram => {
                let program = next.draw.shader_program;
                self.sync(&program, &current.draw.shader_program, 1, |d| d.use_program(program));
            }
            StateGroup::ProgramPipeline => {
                let pipeline = next.draw.program_pipeline;
                self.sync(&pipeline, &current.draw.program_pipeline, 1, |d| {
                    d.bind_program_pipeline(pipeline)
                });
            }

            StateGroup::ScissorEnable => {
                let enabled = next.scissor.enabled;
                self.sync(&enabled, &current.scissor.enabled, 1, |d| {
                    d.set_capability(Capability::ScissorTest, enabled)
                });
            }
            StateGroup::ScissorRect => {
                self.sync(&next.scissor.rect, &current.scissor.rect, 1, |d| d.scissor(next.scissor.rect))
            }
            StateGroup::Viewport => {
                self.sync(&next.viewport, &current.viewport, 1, |d| d.viewport(next.viewport))
            }

            StateGroup::ClipDistances => {
                for (plane, (&n, &c)) in next
                    .clip_distance
                    .iter()
                    .zip(&current.clip_distance)
                    .enumerate()
                {
                    self.sync(&n, &c, 1, |d| {
                        d.set_capability(Capability::ClipDistance(plane as u32), n)
                    });
                }
            }
        }
    }
}
