//! Preview encoding for the selected image.
//!
//! The browser can display the picked image without a server round trip by
//! embedding its bytes in a `data:` URL. Encoding is pure string work, so
//! it lives here rather than in the I/O crate and is testable natively.

use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::validate::ImageFormat;

/// A displayable rendition of the selected image.
///
/// Wraps a `data:<media-type>;base64,...` URL suitable for an `<img>`
/// `src`. Unlike an object URL, a data URL holds no browser resource, so
/// dropping or replacing a preview needs no revocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewImage {
    data_url: String,
}

impl PreviewImage {
    /// Encode `bytes` as a data URL declaring `format`'s media type.
    #[must_use]
    pub fn new(bytes: &[u8], format: ImageFormat) -> Self {
        let mut data_url = format!("data:{};base64,", format.media_type());
        STANDARD.encode_string(bytes, &mut data_url);
        Self { data_url }
    }

    /// The full `data:` URL.
    #[must_use]
    pub fn data_url(&self) -> &str {
        &self.data_url
    }
}
