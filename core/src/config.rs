//! Cache configuration (device capabilities and unit layout)
//!
//! Loaded from TOML. Every field has a default, so an empty document is a
//! valid desktop-GL configuration:
//!
//! ```toml
//! [device]
//! allow_shadow = true
//! logic_op = false
//! max_clip_distances = 0
//!
//! [units]
//! texture_cube = 7
//! ```

use std::path::{Path, PathBuf};

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::descriptor::{NUM_CLIP_DISTANCES, ShadowImageSlot};
use crate::units::UnitTable;

/// Errors raised while loading, saving or validating a [`CacheConfig`]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Two logical units map to the same device unit
    #[error("{first} and {second} both map to device unit {unit}")]
    UnitCollision {
        first: String,
        second: String,
        unit: u32,
    },
}

/// Optional device features that gate parts of the reconcile plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceCaps {
    /// Shadow image bindings are reconciled and scrubbed (default: false)
    #[serde(default)]
    pub allow_shadow: bool,
    /// Fixed-function logic op exists; false on GLES (default: true)
    #[serde(default = "default_true")]
    pub logic_op: bool,
    /// Clip planes exposed by the device (default: 8)
    #[serde(default = "default_max_clip_distances")]
    pub max_clip_distances: u32,
}

fn default_true() -> bool {
    true
}
fn default_max_clip_distances() -> u32 {
    8
}

impl Default for DeviceCaps {
    fn default() -> Self {
        Self::desktop()
    }
}

impl DeviceCaps {
    /// Desktop GL: logic op and clip distances available, shadow images off
    pub const fn desktop() -> Self {
        Self {
            allow_shadow: false,
            logic_op: true,
            max_clip_distances: 8,
        }
    }

    /// GLES without clip-distance extension
    pub const fn gles() -> Self {
        Self {
            allow_shadow: false,
            logic_op: false,
            max_clip_distances: 0,
        }
    }

    /// Same caps with shadow images switched on or off
    pub const fn with_shadow(mut self, allow_shadow: bool) -> Self {
        self.allow_shadow = allow_shadow;
        self
    }

    /// True when every tracked clip-distance flag maps to a device plane
    #[inline]
    pub fn clip_distances(&self) -> bool {
        self.max_clip_distances as usize >= NUM_CLIP_DISTANCES
    }
}

/// State cache configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CacheConfig {
    #[serde(default)]
    pub device: DeviceCaps,
    #[serde(default)]
    pub units: UnitTable,
}

impl CacheConfig {
    /// Default unit layout with the given capabilities
    pub fn with_caps(device: DeviceCaps) -> Self {
        Self {
            device,
            units: UnitTable::default(),
        }
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: CacheConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, does not parse, or maps
    /// two logical units onto the same device unit.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Write the configuration as TOML, creating parent directories
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let io_err = |source: std::io::Error| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(io_err)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(io_err)
    }

    /// Check that the unit table never aliases two logical units.
    ///
    /// Aliased units would let one binding silently clobber another while
    /// the shadow still records both.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut used: HashMap<u32, String> = HashMap::new();
        for (name, unit) in self.units.named_texture_units() {
            if let Some(first) = used.insert(unit.0, name.clone()) {
                return Err(ConfigError::UnitCollision {
                    first,
                    second: name,
                    unit: unit.0,
                });
            }
        }

        let mut images: HashMap<u32, ShadowImageSlot> = HashMap::new();
        for slot in ShadowImageSlot::ALL {
            let unit = self.units.shadow_image(slot);
            if let Some(first) = images.insert(unit.0, slot) {
                return Err(ConfigError::UnitCollision {
                    first: format!("shadow image {first:?}"),
                    second: format!("shadow image {slot:?}"),
                    unit: unit.0,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::TextureUnitId;

    #[test]
    fn test_config_default() {
        let config = CacheConfig::default();
        assert!(!config.device.allow_shadow);
        assert!(config.device.logic_op);
        assert_eq!(config.device.max_clip_distances, 8);
        assert!(config.device.clip_distances());
        assert_eq!(config.units, UnitTable::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_deserialize_empty() {
        let config = CacheConfig::from_toml_str("").unwrap();
        assert_eq!(config, CacheConfig::default());
    }

    #[test]
    fn test_config_deserialize_partial_device() {
        let toml_str = r#"
[device]
allow_shadow = true
"#;
        let config = CacheConfig::from_toml_str(toml_str).unwrap();
        assert!(config.device.allow_shadow);
        assert!(config.device.logic_op); // default
        assert_eq!(config.device.max_clip_distances, 8); // default
    }

    #[test]
    fn test_config_deserialize_units() {
        let toml_str = r#"
[units]
texture_units = [4, 5, 6]
texture_cube = 0
"#;
        let err = CacheConfig::from_toml_str(toml_str).unwrap_err();
        // LUT RG keeps its default unit 4, which now collides with texture_units[0]
        assert!(matches!(err, ConfigError::UnitCollision { unit: 4, .. }));

        let toml_str = r#"
[units]
texture_units = [10, 11, 12]
texture_cube = 13
"#;
        let config = CacheConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.units.texture(1), Some(TextureUnitId(11)));
        assert_eq!(config.units.texture_cube, TextureUnitId(13));
        assert_eq!(config.units.texture_buffer_lut_lf, TextureUnitId(3));
    }

    #[test]
    fn test_config_invalid_toml() {
        let err = CacheConfig::from_toml_str("[device\nallow_shadow = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_shadow_image_collision() {
        let mut config = CacheConfig::default();
        config.units.shadow_images[3] = config.units.shadow_images[0];
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::UnitCollision { unit: 0, .. }));
        assert!(err.to_string().contains("PositiveY"));
    }

    #[test]
    fn test_gles_caps() {
        let caps = DeviceCaps::gles();
        assert!(!caps.logic_op);
        assert!(!caps.clip_distances());
        assert!(caps.with_shadow(true).allow_shadow);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("glstate.toml");

        let config = CacheConfig::with_caps(DeviceCaps::gles().with_shadow(true));
        config.save(&path).unwrap();

        let loaded = CacheConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let err = CacheConfig::load(&path).unwrap_err();
        match err {
            ConfigError::Io { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other}"),
        }
    }
}
