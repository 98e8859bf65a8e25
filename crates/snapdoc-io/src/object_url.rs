//! Revocable object URLs over in-memory bytes.
//!
//! The converted document is displayed in an `<iframe>` straight from
//! memory, which needs a Blob object URL. Object URLs are manually
//! managed browser resources (`URL.revokeObjectURL`), so they are
//! wrapped in a handle whose `Drop` revokes them. The workflow holds at
//! most one handle and drops it on every path that discards the result,
//! which keeps stale documents from pinning their Blobs.

use wasm_bindgen::JsValue;
use web_sys::BlobPropertyBag;

/// Errors that can occur when creating an object URL.
#[derive(Debug, thiserror::Error)]
pub enum ObjectUrlError {
    /// A browser API call returned an error.
    #[error("browser API error: {0}")]
    JsError(String),
}

impl From<JsValue> for ObjectUrlError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// An object URL that revokes itself when dropped.
#[derive(Debug)]
pub struct ObjectUrl {
    url: String,
}

impl ObjectUrl {
    /// Create a `Blob` of `media_type` from `bytes` and generate an
    /// object URL for it.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectUrlError::JsError`] if Blob or URL creation fails.
    pub fn from_bytes(bytes: &[u8], media_type: &str) -> Result<Self, ObjectUrlError> {
        let uint8_array = js_sys::Uint8Array::from(bytes);
        let parts = js_sys::Array::new();
        parts.push(&uint8_array);

        let opts = BlobPropertyBag::new();
        opts.set_type(media_type);
        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &opts)?;

        let url = web_sys::Url::create_object_url_with_blob(&blob)?;
        Ok(Self { url })
    }

    /// The `blob:` URL.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        // Best-effort: the URL may already be gone at page teardown.
        let _ = web_sys::Url::revoke_object_url(&self.url);
    }
}
