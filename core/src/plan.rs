//! Reconcile plans
//!
//! A plan is an ordered list of [`Step`]s. Each step names a state group,
//! whether the group is re-issued every time or only when it differs from
//! the shadow, and which optional device capability it needs. The order is
//! the order device calls are emitted in: later bindings assume earlier
//! ones (texture binds need the active unit, draws need the framebuffer).
//!
//! Parameter-only calls with no enable/disable side effect are cheap, so
//! they are issued unconditionally instead of being compared. Toggles and
//! object bindings are diffed.

use crate::config::DeviceCaps;
use crate::descriptor::StateDescriptor;

/// When a group's device call is issued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// On every reconcile
    Always,
    /// Only when the requested value differs from the shadow
    Diffed,
}

/// Optional device feature a step depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    None,
    LogicOp,
    ShadowImages,
    ClipDistances,
}

impl Requirement {
    #[inline]
    pub fn met(self, caps: &DeviceCaps) -> bool {
        match self {
            Requirement::None => true,
            Requirement::LogicOp => caps.logic_op,
            Requirement::ShadowImages => caps.allow_shadow,
            Requirement::ClipDistances => caps.clip_distances(),
        }
    }
}

/// A set of descriptor fields reconciled together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateGroup {
    CullEnable,
    CullFace,
    FrontFace,
    DepthTestEnable,
    DepthFunc,
    DepthMask,
    ColorMask,
    StencilTestEnable,
    /// Compare function, reference and compare mask
    StencilFunc,
    StencilOp,
    StencilMask,
    /// Blend toggle; flips the logic op the other way when the device has one
    BlendEnable,
    BlendColor,
    BlendFunc,
    BlendEquation,
    LogicOp,
    /// Every 2D texture unit, texture then sampler, in unit order
    TextureUnits,
    /// Cube texture then cube sampler
    TextureCube,
    TextureBufferLutLf,
    TextureBufferLutRg,
    TextureBufferLutRgba,
    ShadowImages,
    ReadFramebuffer,
    DrawFramebuffer,
    VertexArray,
    VertexBuffer,
    UniformBuffer,
    ShaderProgram,
    ProgramPipeline,
    ScissorEnable,
    ScissorRect,
    Viewport,
    ClipDistances,
}

impl StateGroup {
    /// Copy this group's fields from `from` into `to`
    pub(crate) fn copy_fields(self, from: &StateDescriptor, to: &mut StateDescriptor) {
        match self {
            StateGroup::CullEnable => to.cull.enabled = from.cull.enabled,
            StateGroup::CullFace => to.cull.mode = from.cull.mode,
            StateGroup::FrontFace => to.cull.front_face = from.cull.front_face,
            StateGroup::DepthTestEnable => to.depth.test_enabled = from.depth.test_enabled,
            StateGroup::DepthFunc => to.depth.test_func = from.depth.test_func,
            StateGroup::DepthMask => to.depth.write_mask = from.depth.write_mask,
            StateGroup::ColorMask => to.color_mask = from.color_mask,
            StateGroup::StencilTestEnable => to.stencil.test_enabled = from.stencil.test_enabled,
            StateGroup::StencilFunc => {
                to.stencil.test_func = from.stencil.test_func;
                to.stencil.test_ref = from.stencil.test_ref;
                to.stencil.test_mask = from.stencil.test_mask;
            }
            StateGroup::StencilOp => {
                to.stencil.action_stencil_fail = from.stencil.action_stencil_fail;
                to.stencil.action_depth_fail = from.stencil.action_depth_fail;
                to.stencil.action_depth_pass = from.stencil.action_depth_pass;
            }
            StateGroup::StencilMask => to.stencil.write_mask = from.stencil.write_mask,
            StateGroup::BlendEnable => to.blend.enabled = from.blend.enabled,
            StateGroup::BlendColor => to.blend.color = from.blend.color,
            StateGroup::BlendFunc => {
                to.blend.src_rgb_func = from.blend.src_rgb_func;
                to.blend.dst_rgb_func = from.blend.dst_rgb_func;
                to.blend.src_a_func = from.blend.src_a_func;
                to.blend.dst_a_func = from.blend.dst_a_func;
            }
            StateGroup::BlendEquation => {
                to.blend.rgb_equation = from.blend.rgb_equation;
                to.blend.a_equation = from.blend.a_equation;
            }
            StateGroup::LogicOp => to.logic_op = from.logic_op,
            StateGroup::TextureUnits => to.texture_units = from.texture_units,
            StateGroup::TextureCube => to.texture_cube_unit = from.texture_cube_unit,
            StateGroup::TextureBufferLutLf => to.texture_buffer_lut_lf = from.texture_buffer_lut_lf,
            StateGroup::TextureBufferLutRg => to.texture_buffer_lut_rg = from.texture_buffer_lut_rg,
            StateGroup::TextureBufferLutRgba => {
                to.texture_buffer_lut_rgba = from.texture_buffer_lut_rgba
            }
            StateGroup::ShadowImages => to.shadow_images = from.shadow_images,
            StateGroup::ReadFramebuffer => to.draw.read_framebuffer = from.draw.read_framebuffer,
            StateGroup::DrawFramebuffer => to.draw.draw_framebuffer = from.draw.draw_framebuffer,
            StateGroup::VertexArray => to.draw.vertex_array = from.draw.vertex_array,
            StateGroup::VertexBuffer => to.draw.vertex_buffer = from.draw.vertex_buffer,
            StateGroup::UniformBuffer => to.draw.uniform_buffer = from.draw.uniform_buffer,
            StateGroup::ShaderProgram => to.draw.shader_program = from.draw.shader_program,
            StateGroup::ProgramPipeline => to.draw.program_pipeline = from.draw.program_pipeline,
            StateGroup::ScissorEnable => to.scissor.enabled = from.scissor.enabled,
            StateGroup::ScissorRect => to.scissor.rect = from.scissor.rect,
            StateGroup::Viewport => to.viewport = from.viewport,
            StateGroup::ClipDistances => to.clip_distance = from.clip_distance,
        }
    }
}

/// One entry of a reconcile plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub group: StateGroup,
    pub policy: Policy,
    pub requires: Requirement,
}

impl Step {
    const fn always(group: StateGroup) -> Self {
        Self {
            group,
            policy: Policy::Always,
            requires: Requirement::None,
        }
    }

    const fn diffed(group: StateGroup) -> Self {
        Self {
            group,
            policy: Policy::Diffed,
            requires: Requirement::None,
        }
    }

    const fn requires(mut self, requirement: Requirement) -> Self {
        self.requires = requirement;
        self
    }
}

/// Full reconcile, in emission order
pub const FULL_APPLY: [Step; 33] = [
    // Culling
    Step::diffed(StateGroup::CullEnable),
    Step::always(StateGroup::CullFace),
    Step::always(StateGroup::FrontFace),
    // Depth
    Step::diffed(StateGroup::DepthTestEnable),
    Step::always(StateGroup::DepthFunc),
    Step::always(StateGroup::DepthMask),
    // Color mask
    Step::always(StateGroup::ColorMask),
    // Stencil
    Step::diffed(StateGroup::StencilTestEnable),
    Step::always(StateGroup::StencilFunc),
    Step::always(StateGroup::StencilOp),
    Step::always(StateGroup::StencilMask),
    // Blending
    Step::diffed(StateGroup::BlendEnable),
    Step::always(StateGroup::BlendColor),
    Step::always(StateGroup::BlendFunc),
    Step::always(StateGroup::BlendEquation),
    Step::diffed(StateGroup::LogicOp).requires(Requirement::LogicOp),
    // Textures
    Step::diffed(StateGroup::TextureUnits),
    Step::diffed(StateGroup::TextureCube),
    Step::diffed(StateGroup::TextureBufferLutLf),
    Step::diffed(StateGroup::TextureBufferLutRg),
    Step::diffed(StateGroup::TextureBufferLutRgba),
    Step::diffed(StateGroup::ShadowImages).requires(Requirement::ShadowImages),
    // Draw bindings
    Step::diffed(StateGroup::ReadFramebuffer),
    Step::diffed(StateGroup::DrawFramebuffer),
    Step::diffed(StateGroup::VertexArray),
    Step::diffed(StateGroup::VertexBuffer),
    Step::diffed(StateGroup::UniformBuffer),
    Step::diffed(StateGroup::ShaderProgram),
    Step::diffed(StateGroup::ProgramPipeline),
    // Scissor and viewport
    Step::diffed(StateGroup::ScissorEnable),
    Step::always(StateGroup::ScissorRect),
    Step::always(StateGroup::Viewport),
    // Clip distances
    Step::diffed(StateGroup::ClipDistances).requires(Requirement::ClipDistances),
];

/// Partial reconcile: masks, framebuffers, scissor and viewport only
pub const SUB_APPLY: [Step; 8] = [
    Step::always(StateGroup::DepthMask),
    Step::always(StateGroup::StencilMask),
    Step::always(StateGroup::ColorMask),
    Step::diffed(StateGroup::ReadFramebuffer),
    Step::diffed(StateGroup::DrawFramebuffer),
    Step::always(StateGroup::ScissorEnable),
    Step::always(StateGroup::ScissorRect),
    Step::always(StateGroup::Viewport),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::{FramebufferHandle, ProgramHandle};

    #[test]
    fn test_full_plan_covers_every_group_once() {
        let mut seen = hashbrown::HashSet::new();
        for step in FULL_APPLY {
            assert!(seen.insert(step.group), "{:?} listed twice", step.group);
        }
        assert_eq!(seen.len(), 33);
    }

    #[test]
    fn test_unconditional_groups() {
        let always: Vec<StateGroup> = FULL_APPLY
            .iter()
            .filter(|s| s.policy == Policy::Always)
            .map(|s| s.group)
            .collect();
        assert_eq!(
            always,
            vec![
                StateGroup::CullFace,
                StateGroup::FrontFace,
                StateGroup::DepthFunc,
                StateGroup::DepthMask,
                StateGroup::ColorMask,
                StateGroup::StencilFunc,
                StateGroup::StencilOp,
                StateGroup::StencilMask,
                StateGroup::BlendColor,
                StateGroup::BlendFunc,
                StateGroup::BlendEquation,
                StateGroup::ScissorRect,
                StateGroup::Viewport,
            ]
        );
    }

    #[test]
    fn test_binding_order() {
        let position = |group| FULL_APPLY.iter().position(|s| s.group == group).unwrap();
        assert!(position(StateGroup::BlendEnable) < position(StateGroup::TextureUnits));
        assert!(position(StateGroup::TextureUnits) < position(StateGroup::TextureCube));
        assert!(position(StateGroup::TextureBufferLutRgba) < position(StateGroup::ShadowImages));
        assert!(position(StateGroup::ReadFramebuffer) < position(StateGroup::DrawFramebuffer));
        assert!(position(StateGroup::DrawFramebuffer) < position(StateGroup::VertexArray));
        assert!(position(StateGroup::ShaderProgram) < position(StateGroup::ProgramPipeline));
        assert!(position(StateGroup::Viewport) < position(StateGroup::ClipDistances));
    }

    #[test]
    fn test_gated_steps() {
        let gles = DeviceCaps::gles();
        let desktop = DeviceCaps::desktop();
        for step in FULL_APPLY {
            match step.group {
                StateGroup::LogicOp => {
                    assert!(step.requires.met(&desktop));
                    assert!(!step.requires.met(&gles));
                }
                StateGroup::ShadowImages => {
                    assert!(!step.requires.met(&desktop));
                    assert!(step.requires.met(&desktop.with_shadow(true)));
                }
                StateGroup::ClipDistances => {
                    assert!(step.requires.met(&desktop));
                    assert!(!step.requires.met(&gles));
                }
                _ => assert_eq!(step.requires, Requirement::None),
            }
        }
    }

    #[test]
    fn test_sub_apply_is_subset_of_full() {
        for step in SUB_APPLY {
            assert!(FULL_APPLY.iter().any(|s| s.group == step.group));
        }
    }

    #[test]
    fn test_copy_fields_touches_only_its_group() {
        let mut from = StateDescriptor::default();
        from.draw.read_framebuffer = FramebufferHandle::new(5);
        from.draw.shader_program = ProgramHandle::new(9);

        let mut to = StateDescriptor::default();
        StateGroup::ReadFramebuffer.copy_fields(&from, &mut to);

        assert_eq!(to.draw.read_framebuffer, FramebufferHandle::new(5));
        assert!(to.draw.shader_program.is_none());
    }
}
