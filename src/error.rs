
use cmap_invert::InvertError;
use thiserror::Error;

/// Errors reading or writing image files.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("PNG decode error: {0}")]
    PngDecode(String),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Unsupported PNG layout: {0}")]
    UnsupportedLayout(String),

    #[error("Unsupported dimensions: {width}x{height}")]
    UnsupportedDimensions { width: usize, height: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors parsing a hex color string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseColorError {
    #[error("invalid hex color length (expected 3 or 6 characters)")]
    InvalidLength,

    #[error("invalid hex digit: {0:?}")]
    InvalidDigit(char),
}

/// Errors in the configuration file or its colormap catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Config parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid color `{value}` in colormap `{name}`: {source}")]
    InvalidColor {
        name: String,
        value: String,
        source: ParseColorError,
    },

    #[error("Invalid colormap `{name}`: {reason}")]
    InvalidEntry { name: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CatalogError {
    /// Attach the catalog entry name to a colormap construction error.
    pub(crate) fn entry(name: &str, e: InvertError) -> Self {
        let reason = match e {
            InvertError::InvalidColorFunction { reason, .. } => reason,
            other => other.to_string(),
        };
        CatalogError::InvalidEntry {
            name: name.to_string(),
            reason,
        }
    }
}

/// Errors from a recolor job.
#[derive(Debug, Error)]
pub enum RecolorError {
    #[error("Colormap error: {0}")]
    Invert(#[from] InvertError),

    #[error("Image error: {0}")]
    Codec(#[from] CodecError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codec_error_unsupported_layout() {
        let error = CodecError::UnsupportedLayout("Grayscale 2-bit".to_string());
        assert_eq!(error.to_string(), "Unsupported PNG layout: Grayscale 2-bit");
    }

    #[test]
    fn test_codec_error_unsupported_dimensions() {
        let error = CodecError::UnsupportedDimensions {
            width: 0,
            height: 12,
        };
        assert_eq!(error.to_string(), "Unsupported dimensions: 0x12");
    }

    #[test]
    fn test_parse_color_error_length() {
        assert_eq!(
            ParseColorError::InvalidLength.to_string(),
            "invalid hex color length (expected 3 or 6 characters)"
        );
    }

    #[test]
    fn test_catalog_error_invalid_color() {
        let error = CatalogError::InvalidColor {
            name: "sunset".to_string(),
            value: "#12".to_string(),
            source: ParseColorError::InvalidLength,
        };
        assert_eq!(
            error.to_string(),
            "Invalid color `#12` in colormap `sunset`: invalid hex color length (expected 3 or 6 characters)"
        );
    }

    #[test]
    fn test_catalog_error_entry() {
        let error = CatalogError::entry(
            "bwr",
            InvertError::InvalidColorFunction {
                name: "bwr".to_string(),
                reason: "red channel must start at x=0 and end at x=1".to_string(),
            },
        );
        assert_eq!(
            error.to_string(),
            "Invalid colormap `bwr`: red channel must start at x=0 and end at x=1"
        );
    }

    #[test]
    fn test_recolor_error_from_invert_error() {
        let error: RecolorError = InvertError::DegenerateRange.into();
        match error {
            RecolorError::Invert(InvertError::DegenerateRange) => {}
            _ => panic!("Expected Invert variant"),
        }
        assert_eq!(
            RecolorError::from(InvertError::DegenerateRange).to_string(),
            "Colormap error: cannot rescale data with zero range"
        );
    }

    #[test]
    fn test_recolor_error_from_codec_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.png");
        let error: RecolorError = CodecError::from(io).into();
        assert_eq!(error.to_string(), "Image error: IO error: missing.png");
    }
}
