//! Selected-file validation.
//!
//! The conversion endpoint accepts raster images only, so a pick is
//! validated before any bytes are read. Validation looks at the file
//! name's extension and matches it against the accepted formats,
//! case-insensitively.

use std::fmt;

/// `accept` attribute value for the file picker, matching
/// [`ImageFormat::ALL`].
pub const ACCEPT_ATTRIBUTE: &str = ".jpg,.jpeg,.png,.bmp,.webp";

/// Image formats the conversion endpoint accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Bmp,
    WebP,
}

impl ImageFormat {
    /// All accepted formats.
    pub const ALL: [Self; 4] = [Self::Jpeg, Self::Png, Self::Bmp, Self::WebP];

    /// File extensions (without the dot) that map to this format.
    #[must_use]
    pub const fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Jpeg => &["jpg", "jpeg"],
            Self::Png => &["png"],
            Self::Bmp => &["bmp"],
            Self::WebP => &["webp"],
        }
    }

    /// Declared media type, used for the preview data URL and the
    /// multipart part sent to the endpoint.
    #[must_use]
    pub const fn media_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Bmp => "image/bmp",
            Self::WebP => "image/webp",
        }
    }

    /// Display label for the format.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Jpeg => "JPEG",
            Self::Png => "PNG",
            Self::Bmp => "BMP",
            Self::WebP => "WebP",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a picked file fails validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The file name's extension is not an accepted image type.
    #[error("unsupported file type: {name}")]
    UnsupportedType {
        /// Name of the rejected file, as reported by the picker.
        name: String,
    },
}

/// Validate a file name against the accepted image formats.
///
/// Only the extension is examined; the bytes have not been read yet when
/// this runs. Matching is case-insensitive, so `Photo.JPG` is accepted.
///
/// # Errors
///
/// Returns [`ValidationError::UnsupportedType`] when the name has no
/// extension or the extension is not in the accepted set.
pub fn validate(name: &str) -> Result<ImageFormat, ValidationError> {
    name.rsplit_once('.')
        .and_then(|(_, ext)| {
            ImageFormat::ALL
                .into_iter()
                .find(|format| format.extensions().iter().any(|a| a.eq_ignore_ascii_case(ext)))
        })
        .ok_or_else(|| ValidationError::UnsupportedType {
            name: name.to_owned(),
        })
}
