//! Device enumerants
//!
//! Typed versions of the driver enums the cache emits. Discriminants are the
//! GL enumerant values so a GL-backed [`Device`](crate::Device) can pass
//! them through with [`raw`](CullFace::raw).

macro_rules! device_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident = $value:expr),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u32)]
        pub enum $name {
            $($(#[$vmeta])* $variant = $value),+
        }

        impl $name {
            /// Raw driver enumerant
            #[inline]
            pub const fn raw(self) -> u32 {
                self as u32
            }

            /// Parse a raw driver enumerant
            pub fn from_raw(value: u32) -> Option<Self> {
                match value {
                    $(v if v == $value => Some($name::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

device_enum! {
    /// Which faces are discarded when culling is enabled
    pub enum CullFace {
        Front = 0x0404,
        Back = 0x0405,
        FrontAndBack = 0x0408,
    }
}

device_enum! {
    /// Winding that marks a triangle as front-facing
    pub enum FrontFace {
        Cw = 0x0900,
        Ccw = 0x0901,
    }
}

device_enum! {
    /// Depth and stencil comparison function
    pub enum CompareFunc {
        Never = 0x0200,
        Less = 0x0201,
        Equal = 0x0202,
        LessEqual = 0x0203,
        Greater = 0x0204,
        NotEqual = 0x0205,
        GreaterEqual = 0x0206,
        Always = 0x0207,
    }
}

device_enum! {
    /// Stencil buffer update action
    pub enum StencilOp {
        Zero = 0,
        Keep = 0x1E00,
        Replace = 0x1E01,
        Incr = 0x1E02,
        Decr = 0x1E03,
        Invert = 0x150A,
        IncrWrap = 0x8507,
        DecrWrap = 0x8508,
    }
}

device_enum! {
    pub enum BlendEquation {
        Add = 0x8006,
        Min = 0x8007,
        Max = 0x8008,
        Subtract = 0x800A,
        ReverseSubtract = 0x800B,
    }
}

device_enum! {
    pub enum BlendFactor {
        Zero = 0,
        One = 1,
        SrcColor = 0x0300,
        OneMinusSrcColor = 0x0301,
        SrcAlpha = 0x0302,
        OneMinusSrcAlpha = 0x0303,
        DstAlpha = 0x0304,
        OneMinusDstAlpha = 0x0305,
        DstColor = 0x0306,
        OneMinusDstColor = 0x0307,
        SrcAlphaSaturate = 0x0308,
        ConstantColor = 0x8001,
        OneMinusConstantColor = 0x8002,
        ConstantAlpha = 0x8003,
        OneMinusConstantAlpha = 0x8004,
    }
}

device_enum! {
    /// Fixed-function framebuffer logic operation.
    ///
    /// Unavailable on GLES; see [`DeviceCaps::logic_op`](crate::DeviceCaps::logic_op).
    pub enum LogicOp {
        Clear = 0x1500,
        And = 0x1501,
        AndReverse = 0x1502,
        Copy = 0x1503,
        AndInverted = 0x1504,
        Noop = 0x1505,
        Xor = 0x1506,
        Or = 0x1507,
        Nor = 0x1508,
        Equiv = 0x1509,
        Invert = 0x150A,
        OrReverse = 0x150B,
        CopyInverted = 0x150C,
        OrInverted = 0x150D,
        Nand = 0x150E,
        Set = 0x150F,
    }
}

device_enum! {
    pub enum TextureTarget {
        Texture2D = 0x0DE1,
        CubeMap = 0x8513,
        Buffer = 0x8C2A,
    }
}

device_enum! {
    pub enum FramebufferTarget {
        Read = 0x8CA8,
        Draw = 0x8CA9,
    }
}

device_enum! {
    pub enum BufferTarget {
        Array = 0x8892,
        Uniform = 0x8A11,
    }
}

device_enum! {
    /// Access mode of an image unit binding
    pub enum ImageAccess {
        ReadOnly = 0x88B8,
        ReadWrite = 0x88BA,
    }
}

device_enum! {
    /// Texel format of an image unit binding
    pub enum ImageFormat {
        R32Ui = 0x8236,
    }
}

/// Toggleable device capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    CullFace,
    DepthTest,
    StencilTest,
    Blend,
    ColorLogicOp,
    ScissorTest,
    /// User clip plane `n`
    ClipDistance(u32),
}

impl Capability {
    const CLIP_DISTANCE0: u32 = 0x3000;

    /// Raw driver enumerant
    pub const fn raw(self) -> u32 {
        match self {
            Capability::CullFace => 0x0B44,
            Capability::DepthTest => 0x0B71,
            Capability::StencilTest => 0x0B90,
            Capability::Blend => 0x0BE2,
            Capability::ColorLogicOp => 0x0BF2,
            Capability::ScissorTest => 0x0C11,
            Capability::ClipDistance(n) => Self::CLIP_DISTANCE0 + n,
        }
    }
}
