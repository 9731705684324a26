//! End-to-end reconcile scenarios through the public API

use glstate_core::{
    Binding, CacheConfig, Capability, CullFace, DeviceCall, DeviceCaps, FramebufferHandle,
    FramebufferTarget, FrontFace, ProgramHandle, RecordingDevice, StateCache, StateDescriptor,
    TextureHandle, TextureTarget, TextureUnitId,
};

fn cache() -> StateCache<RecordingDevice> {
    StateCache::new(RecordingDevice::new(), CacheConfig::default())
}

fn diffed(calls: &[DeviceCall]) -> Vec<DeviceCall> {
    calls.iter().copied().filter(|c| !c.is_parameter()).collect()
}

#[test]
fn default_descriptor_on_default_shadow() {
    let mut cache = cache();

    cache.apply(&StateDescriptor::default());

    let calls = cache.device().calls();
    assert_eq!(calls[0], DeviceCall::CullFace(CullFace::Back));
    assert_eq!(calls[1], DeviceCall::FrontFace(FrontFace::Ccw));
    // Toggles and bindings already match, so nothing but parameters goes out
    assert!(diffed(calls).is_empty());
    assert!(
        !calls
            .iter()
            .any(|c| matches!(c, DeviceCall::BindTexture { .. }))
    );
    assert_eq!(cache.shadow(), &StateDescriptor::default());
}

#[test]
fn default_descriptor_after_sync() {
    // A freshly created GL context has culling off; a synced cache fixes that first
    let cache = StateCache::with_sync(RecordingDevice::new(), CacheConfig::default());

    let calls = cache.device().calls();
    assert!(calls.contains(&DeviceCall::SetCapability {
        capability: Capability::CullFace,
        enabled: true,
    }));
    assert!(calls.contains(&DeviceCall::SetCapability {
        capability: Capability::DepthTest,
        enabled: false,
    }));
    assert!(calls.contains(&DeviceCall::SetCapability {
        capability: Capability::Blend,
        enabled: false,
    }));
}

#[test]
fn program_change_binds_program_only() {
    let mut cache = cache();
    let mut state = StateDescriptor::default();
    cache.apply(&state);
    cache.device_mut().clear();

    state.draw.shader_program = ProgramHandle::new(7);
    cache.apply(&state);

    assert_eq!(
        diffed(cache.device().calls()),
        vec![DeviceCall::UseProgram(ProgramHandle::new(7))]
    );
}

#[test]
fn framebuffer_reset_scrubs_only_matching_target() {
    let mut cache = cache();
    let mut state = StateDescriptor::default();
    state.draw.read_framebuffer = FramebufferHandle::new(5);
    state.draw.draw_framebuffer = FramebufferHandle::new(9);
    cache.apply(&state);
    cache.device_mut().clear();

    cache.reset_framebuffer(FramebufferHandle::new(5));

    assert_eq!(
        cache.device().calls(),
        &[DeviceCall::BindFramebuffer {
            target: FramebufferTarget::Read,
            framebuffer: FramebufferHandle::NONE,
        }]
    );
    assert!(cache.shadow().draw.read_framebuffer.is_none());
    assert_eq!(cache.shadow().draw.draw_framebuffer, FramebufferHandle::new(9));
}

#[test]
fn texture_bind_and_restore() {
    let mut cache = cache();

    let previous = cache.bind_texture_2d(2, TextureHandle::new(42)).unwrap();
    assert!(previous.is_none());

    cache.device_mut().clear();
    cache.bind_texture_2d(2, previous).unwrap();

    assert!(cache.shadow().texture_units[2].texture_2d.is_none());
    assert_eq!(
        cache.device().calls(),
        &[
            DeviceCall::ActiveTexture(TextureUnitId(2)),
            DeviceCall::BindTexture {
                target: TextureTarget::Texture2D,
                texture: TextureHandle::NONE,
            },
        ]
    );
}

#[test]
fn scoped_bind_restores_previous_texture() {
    let mut cache = cache();
    cache.bind_texture_2d(1, TextureHandle::new(3)).unwrap();

    {
        let mut scope = cache
            .scoped(Binding::Texture2D {
                unit: 1,
                texture: TextureHandle::new(8),
            })
            .unwrap();
        assert_eq!(
            scope.shadow().texture_units[1].texture_2d,
            TextureHandle::new(8)
        );
        scope.bind_read_framebuffer(FramebufferHandle::new(2));
    }

    assert_eq!(
        cache.shadow().texture_units[1].texture_2d,
        TextureHandle::new(3)
    );
}

#[test]
fn recycled_id_is_rebound_after_reset() {
    let mut cache = StateCache::new(
        RecordingDevice::new(),
        CacheConfig::with_caps(DeviceCaps::gles()),
    );
    let mut state = StateDescriptor::default();
    state.texture_units[0].texture_2d = TextureHandle::new(12);
    cache.apply(&state);

    // Texture 12 is deleted, and the driver hands 12 out again
    cache.reset_texture(TextureHandle::new(12));
    cache.device_mut().clear();
    cache.apply(&state);

    assert!(cache.device().calls().contains(&DeviceCall::BindTexture {
        target: TextureTarget::Texture2D,
        texture: TextureHandle::new(12),
    }));
}

#[test]
fn config_from_toml_drives_unit_layout() {
    let config = CacheConfig::from_toml_str(
        r#"
[device]
logic_op = false

[units]
texture_units = [8, 9, 10]
"#,
    )
    .unwrap();
    let mut cache = StateCache::new(RecordingDevice::new(), config);

    cache.bind_texture_2d(0, TextureHandle::new(1)).unwrap();

    assert_eq!(
        cache.device().calls()[0],
        DeviceCall::ActiveTexture(TextureUnitId(8))
    );
    assert!(!cache.caps().logic_op);
}
