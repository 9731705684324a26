//! Device object handles
//!
//! Each resource kind gets its own handle type so a sampler can never be
//! bound where a texture is expected. A handle is the raw device id plus a
//! generation tag. Id 0 is the device's "nothing bound" value.
//!
//! Devices recycle ids after deletion. The generation lets a resource layer
//! mark a recycled id as a different object: two handles with the same id
//! but different generations compare unequal, so the reconciler rebinds
//! instead of trusting a stale shadow slot. Handles built with [`new`]
//! carry generation 0 and behave like bare ids.
//!
//! [`new`]: TextureHandle::new

macro_rules! define_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct $name {
            id: u32,
            generation: u32,
        }

        impl $name {
            /// Nothing bound (device id 0)
            pub const NONE: $name = $name { id: 0, generation: 0 };

            /// Handle for a device id with generation 0
            #[inline]
            pub const fn new(id: u32) -> Self {
                Self { id, generation: 0 }
            }

            /// Handle for a device id tagged with a generation.
            ///
            /// Id 0 always yields [`Self::NONE`]; the null object has no generations.
            #[inline]
            pub const fn with_generation(id: u32, generation: u32) -> Self {
                if id == 0 {
                    Self::NONE
                } else {
                    Self { id, generation }
                }
            }

            /// Raw device id, as passed to the driver
            #[inline]
            pub const fn id(self) -> u32 {
                self.id
            }

            #[inline]
            pub const fn generation(self) -> u32 {
                self.generation
            }

            /// True if this is the null handle
            #[inline]
            pub const fn is_none(self) -> bool {
                self.id == 0
            }

            /// True if both handles name the same device id, whatever their generation
            #[inline]
            pub const fn same_id(self, other: Self) -> bool {
                self.id == other.id
            }
        }

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self::new(id)
            }
        }
    };
}

define_handle!(
    /// 2D, cube-map or buffer texture
    TextureHandle
);
define_handle!(
    /// Sampler object
    SamplerHandle
);
define_handle!(
    /// Buffer object (vertex or uniform data)
    BufferHandle
);
define_handle!(
    /// Framebuffer object
    FramebufferHandle
);
define_handle!(
    /// Vertex array object
    VertexArrayHandle
);
define_handle!(
    /// Linked shader program
    ProgramHandle
);
define_handle!(
    /// Separable program pipeline
    PipelineHandle
);
define_handle!(
    /// Renderbuffer object (tracked in the descriptor, never applied)
    RenderbufferHandle
);
