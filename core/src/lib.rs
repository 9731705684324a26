//! GL State Cache - shadow copy of fixed-function and binding state
//!
//! Renderers describe the state each draw needs as a [`StateDescriptor`]
//! and hand it to a [`StateCache`]. The cache remembers what the device
//! holds and issues only the calls that change something.
//!
//! # Architecture
//!
//! - [`StateCache`] - owns the device, the shadow descriptor and the reconcilers
//! - [`plan`] - emission order and diff policy for every state group
//! - [`Device`] - driver seam; [`RecordingDevice`] and [`TracedDevice`] ship with the crate
//! - [`CacheConfig`] - device capabilities and unit layout, loadable from TOML
//! - Binding helpers ([`StateCache::bind`], [`StateCache::scoped`]) for one-off binds
//! - Invalidation hooks ([`StateCache::reset_texture`] and friends) to call
//!   before deleting a device object

mod bind;
mod cache;
pub mod config;
pub mod descriptor;
pub mod device;
pub mod enums;
mod error;
pub mod handle;
mod invalidate;
pub mod plan;
mod rect;
mod reconcile;
mod stats;
#[cfg(test)]
mod test_utils;
pub mod units;

pub use bind::{Binding, ScopedBinding};
pub use cache::StateCache;
pub use config::{CacheConfig, ConfigError, DeviceCaps};
pub use descriptor::{
    BlendColor, BlendState, ColorMask, CullState, DepthState, DrawBindings, NUM_CLIP_DISTANCES,
    NUM_SHADOW_IMAGES, NUM_TEXTURE_UNITS, ScissorState, ShadowImageSlot, ShadowImages,
    StateDescriptor, StencilState, TextureBufferUnitState, TextureCubeUnitState, TextureUnitState,
};
pub use device::{Device, DeviceCall, RecordingDevice, TracedDevice};
pub use enums::{
    BlendEquation, BlendFactor, BufferTarget, Capability, CompareFunc, CullFace, FramebufferTarget,
    FrontFace, ImageAccess, ImageFormat, LogicOp, StencilOp, TextureTarget,
};
pub use error::StateError;
pub use handle::{
    BufferHandle, FramebufferHandle, PipelineHandle, ProgramHandle, RenderbufferHandle,
    SamplerHandle, TextureHandle, VertexArrayHandle,
};
pub use rect::Rect;
pub use stats::CacheStats;
pub use units::{ImageUnitId, TextureUnitId, UnitTable};
