//! Remote conversion client.
//!
//! Packages the selected image as a multipart form and POSTs it to the
//! conversion endpoint via the browser fetch API, returning the binary
//! document from a successful response.  All functions require a
//! browser environment (`wasm32-unknown-unknown` target).

use snapdoc_workflow::SelectedFile;
use tracing::{debug, warn};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::BlobPropertyBag;

/// Multipart field name the endpoint expects the image under.
const UPLOAD_FIELD: &str = "image";

/// Errors that can occur during a conversion request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    /// The endpoint answered with a non-success status.
    #[error("conversion service answered {status} {status_text}")]
    Status {
        /// HTTP status code of the response.
        status: u16,
        /// Reason phrase reported by the browser, possibly empty.
        status_text: String,
    },

    /// The request never produced a response (connection refused, DNS,
    /// CORS rejection).
    #[error("network error: {0}")]
    Network(String),

    /// A browser API call failed while building or reading the exchange.
    #[error("browser API error: {0}")]
    JsError(String),
}

impl From<JsValue> for ConvertError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// POST `file` to `endpoint` as a multipart form and return the
/// document bytes from the response body.
///
/// The file's bytes are wrapped in a `Blob` carrying the declared media
/// type and appended as the `image` field with the original filename.
/// The browser assembles the multipart body and its boundary header
/// from the `FormData`, so no `Content-Type` is set by hand.
///
/// At most one call should be in flight at a time; the workflow's
/// `Converting` state enforces that upstream.
///
/// # Errors
///
/// Returns [`ConvertError::Network`] if the fetch promise rejects,
/// [`ConvertError::Status`] if the endpoint answers outside the 2xx
/// range, and [`ConvertError::JsError`] if a browser API call fails.
#[allow(clippy::future_not_send)] // WASM is single-threaded; Response is !Send
pub async fn convert(endpoint: &str, file: &SelectedFile) -> Result<Vec<u8>, ConvertError> {
    let window =
        web_sys::window().ok_or_else(|| ConvertError::JsError("no global window".into()))?;

    // Wrap the image bytes in a Blob carrying the declared media type.
    let uint8_array = js_sys::Uint8Array::from(file.bytes.as_slice());
    let parts = js_sys::Array::new();
    parts.push(&uint8_array);

    let opts = BlobPropertyBag::new();
    opts.set_type(file.format.media_type());
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &opts)?;

    let form = web_sys::FormData::new()?;
    form.append_with_blob_and_filename(UPLOAD_FIELD, &blob, &file.name)?;

    let init = web_sys::RequestInit::new();
    init.set_method("POST");
    init.set_body(&form);

    debug!(
        endpoint,
        file = %file.name,
        bytes = file.bytes.len(),
        "sending conversion request"
    );

    let response: web_sys::Response =
        JsFuture::from(window.fetch_with_str_and_init(endpoint, &init))
            .await
            .map_err(|value| ConvertError::Network(js_error_message(&value)))?
            .dyn_into()
            .map_err(|_| ConvertError::JsError("fetch did not yield a Response".into()))?;

    if !response.ok() {
        warn!(
            status = response.status(),
            "conversion service answered with an error status"
        );
        return Err(ConvertError::Status {
            status: response.status(),
            status_text: response.status_text(),
        });
    }

    let buffer = JsFuture::from(response.array_buffer()?).await?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    debug!(bytes = bytes.len(), "conversion response received");
    Ok(bytes)
}

/// Render a rejected fetch promise's value as a readable message.
///
/// Fetch rejects with a `TypeError` whose `message` is the useful part;
/// fall back to the debug rendering for anything else.
fn js_error_message(value: &JsValue) -> String {
    value
        .dyn_ref::<js_sys::Error>()
        .map_or_else(|| format!("{value:?}"), |error| String::from(error.message()))
}
