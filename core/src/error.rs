//! Runtime errors raised by the state cache

/// Misuse the cache can detect without touching the device.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    /// Logical texture unit index past the tracked units
    #[error("texture unit {index} out of range (only {count} units tracked)")]
    TextureUnitOutOfRange { index: usize, count: usize },
}
