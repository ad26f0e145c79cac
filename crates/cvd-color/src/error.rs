//! Error types for color operations.
//!
//! The simulation itself is total over valid input; the only failure it
//! defines is an unrecognized transform selector. Buffer and capture errors
//! from `cvd-core` are carried through unchanged.

use thiserror::Error;

/// Color operation error.
#[derive(Debug, Error)]
pub enum ColorError {
    /// Transform selector is not one of the supported names.
    ///
    /// Carries the offending value verbatim.
    #[error("unsupported transform provided: {0}")]
    UnsupportedTransform(String),

    /// Pixel buffer or capture error.
    #[error(transparent)]
    Image(#[from] cvd_core::Error),
}

impl ColorError {
    /// Returns `true` if this error rejects a transform selector.
    #[inline]
    pub fn is_unsupported_transform(&self) -> bool {
        matches!(self, Self::UnsupportedTransform(_))
    }
}

/// Result type for color operations.
pub type ColorResult<T> = Result<T, ColorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_transform_message() {
        let err = ColorError::UnsupportedTransform("xyz".into());
        assert_eq!(err.to_string(), "unsupported transform provided: xyz");
        assert!(err.is_unsupported_transform());
    }

    #[test]
    fn test_core_error_is_transparent() {
        let err: ColorError = cvd_core::Error::capture("no display").into();
        assert_eq!(err.to_string(), "capture failed: no display");
        assert!(!err.is_unsupported_transform());
    }
}
