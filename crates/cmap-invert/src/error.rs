//! Unified error type for the cmap-invert public API.
//!
//! Colors that do not match any sampled colormap entry are *not* errors:
//! they are reported through the mask of a [`MaskedField`](crate::MaskedField).
//! [`InvertError`] covers genuine misuse only.

use thiserror::Error;

/// Errors raised by colormap resolution, normalization and inversion.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvertError {
    /// No colormap is registered under this name.
    #[error("colormap not found: {name}")]
    NotFound { name: String },

    /// The resolved value does not behave like a color function.
    #[error("invalid color function `{name}`: {reason}")]
    InvalidColorFunction { name: String, reason: String },

    /// The data to rescale has no spread (all values identical).
    #[error("cannot rescale data with zero range")]
    DegenerateRange,

    /// Invalid construction parameters or input shape.
    #[error("precondition violated: {0}")]
    Precondition(String),
}

impl InvertError {
    pub(crate) fn invalid(name: &str, reason: impl Into<String>) -> Self {
        InvertError::InvalidColorFunction {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let error = InvertError::NotFound {
            name: "jett".to_string(),
        };
        assert_eq!(error.to_string(), "colormap not found: jett");
    }

    #[test]
    fn test_invalid_color_function_message() {
        let error = InvertError::invalid("flat", "expected 3 or 4 channels, got 2");
        assert_eq!(
            error.to_string(),
            "invalid color function `flat`: expected 3 or 4 channels, got 2"
        );
    }

    #[test]
    fn test_degenerate_range_message() {
        assert_eq!(
            InvertError::DegenerateRange.to_string(),
            "cannot rescale data with zero range"
        );
    }

    #[test]
    fn test_precondition_message() {
        let error = InvertError::Precondition("xtol must be positive".to_string());
        assert_eq!(error.to_string(), "precondition violated: xtol must be positive");
    }
}
