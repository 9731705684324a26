//! Fixed table from logical texture/image units to device units.
//!
//! The reconcilers and binding helpers look units up here and never
//! mutate the table. Defaults follow the renderer's shader layout.

use serde::{Deserialize, Serialize};

use crate::descriptor::{NUM_SHADOW_IMAGES, NUM_TEXTURE_UNITS, ShadowImageSlot};

/// Device texture unit (`TEXTURE0 + n`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextureUnitId(pub u32);

impl TextureUnitId {
    const TEXTURE0: u32 = 0x84C0;

    /// Zero-based unit number, as taken by sampler binds
    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }

    /// Active-texture enumerant
    #[inline]
    pub const fn raw(self) -> u32 {
        Self::TEXTURE0 + self.0
    }
}

/// Device image unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageUnitId(pub u32);

/// Lookup from logical units to device units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitTable {
    /// 2D texture units, by logical index
    #[serde(default = "default_texture_units")]
    pub texture_units: [TextureUnitId; NUM_TEXTURE_UNITS],
    #[serde(default = "default_texture_cube")]
    pub texture_cube: TextureUnitId,
    #[serde(default = "default_lut_lf")]
    pub texture_buffer_lut_lf: TextureUnitId,
    #[serde(default = "default_lut_rg")]
    pub texture_buffer_lut_rg: TextureUnitId,
    #[serde(default = "default_lut_rgba")]
    pub texture_buffer_lut_rgba: TextureUnitId,
    /// Image units in [`ShadowImageSlot::ALL`] order
    #[serde(default = "default_shadow_images")]
    pub shadow_images: [ImageUnitId; NUM_SHADOW_IMAGES],
}

fn default_texture_units() -> [TextureUnitId; NUM_TEXTURE_UNITS] {
    [TextureUnitId(0), TextureUnitId(1), TextureUnitId(2)]
}
fn default_lut_lf() -> TextureUnitId {
    TextureUnitId(3)
}
fn default_lut_rg() -> TextureUnitId {
    TextureUnitId(4)
}
fn default_lut_rgba() -> TextureUnitId {
    TextureUnitId(5)
}
fn default_texture_cube() -> TextureUnitId {
    TextureUnitId(6)
}
fn default_shadow_images() -> [ImageUnitId; NUM_SHADOW_IMAGES] {
    [
        ImageUnitId(0),
        ImageUnitId(1),
        ImageUnitId(2),
        ImageUnitId(3),
        ImageUnitId(4),
        ImageUnitId(5),
        ImageUnitId(6),
    ]
}

impl Default for UnitTable {
    fn default() -> Self {
        Self {
            texture_units: default_texture_units(),
            texture_cube: default_texture_cube(),
            texture_buffer_lut_lf: default_lut_lf(),
            texture_buffer_lut_rg: default_lut_rg(),
            texture_buffer_lut_rgba: default_lut_rgba(),
            shadow_images: default_shadow_images(),
        }
    }
}

impl UnitTable {
    /// Device unit for a logical 2D texture unit
    #[inline]
    pub fn texture(&self, index: usize) -> Option<TextureUnitId> {
        self.texture_units.get(index).copied()
    }

    #[inline]
    pub fn shadow_image(&self, slot: ShadowImageSlot) -> ImageUnitId {
        self.shadow_images[slot.index()]
    }

    /// All texture units with their logical names, for validation and diagnostics
    pub fn named_texture_units(&self) -> Vec<(String, TextureUnitId)> {
        let mut named: Vec<(String, TextureUnitId)> = self
            .texture_units
            .iter()
            .enumerate()
            .map(|(i, unit)| (format!("texture_units[{i}]"), *unit))
            .collect();
        named.push(("texture_cube".to_string(), self.texture_cube));
        named.push(("texture_buffer_lut_lf".to_string(), self.texture_buffer_lut_lf));
        named.push(("texture_buffer_lut_rg".to_string(), self.texture_buffer_lut_rg));
        named.push(("texture_buffer_lut_rgba".to_string(), self.texture_buffer_lut_rgba));
        named
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let table = UnitTable::default();
        assert_eq!(table.texture(0), Some(TextureUnitId(0)));
        assert_eq!(table.texture(2), Some(TextureUnitId(2)));
        assert_eq!(table.texture(3), None);
        assert_eq!(table.texture_buffer_lut_lf, TextureUnitId(3));
        assert_eq!(table.texture_buffer_lut_rg, TextureUnitId(4));
        assert_eq!(table.texture_buffer_lut_rgba, TextureUnitId(5));
        assert_eq!(table.texture_cube, TextureUnitId(6));
        assert_eq!(table.shadow_image(ShadowImageSlot::Buffer), ImageUnitId(0));
        assert_eq!(table.shadow_image(ShadowImageSlot::NegativeZ), ImageUnitId(6));
    }

    #[test]
    fn test_texture_unit_enum() {
        assert_eq!(TextureUnitId(0).raw(), 0x84C0);
        assert_eq!(TextureUnitId(6).raw(), 0x84C6);
        assert_eq!(TextureUnitId(6).index(), 6);
    }

    #[test]
    fn test_named_units_cover_every_texture_slot() {
        let named = UnitTable::default().named_texture_units();
        assert_eq!(named.len(), NUM_TEXTURE_UNITS + 4);
        assert_eq!(named[0].0, "texture_units[0]");
        assert_eq!(named[3], ("texture_cube".to_string(), TextureUnitId(6)));
    }
}
