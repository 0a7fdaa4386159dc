//! Error types for model construction and palette lookup.
//!
//! Construction errors are programmer errors: every dimension fed to the
//! builders is a compile-time constant, so a [`BuildError`] aborts assembly.
//! Palette misses are user-triggered and the [`Viewer`](crate::Viewer) turns
//! them into a logged no-op.

/// Errors raised while building profiles, solids or the assembled model.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BuildError {
    /// A dimension, radius or segment count is out of range.
    #[error("invalid geometry parameters: {reason}")]
    InvalidGeometryParams { reason: String },

    /// A part with this name is already registered.
    #[error("duplicate part name: '{0}'")]
    DuplicateName(String),
}

impl BuildError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        BuildError::InvalidGeometryParams {
            reason: reason.into(),
        }
    }
}

/// Errors raised when resolving a color preset.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaletteError {
    #[error("unknown palette: '{0}'")]
    UnknownPalette(String),
}

/// Checks that `value` is finite and strictly positive.
pub(crate) fn require_positive(what: &str, value: f32) -> Result<(), BuildError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(BuildError::invalid(format!(
            "{what} must be positive and finite, got {value}"
        )))
    }
}

/// Checks that `value` is finite and not negative.
pub(crate) fn require_non_negative(what: &str, value: f32) -> Result<(), BuildError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(BuildError::invalid(format!(
            "{what} must be non-negative and finite, got {value}"
        )))
    }
}
