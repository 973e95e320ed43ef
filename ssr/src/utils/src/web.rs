//! Browser-only helpers. On the server these are inert so shared components
//! can call them unconditionally.

/// Wraps `bytes` in a Blob and returns a `blob:` URL for it. The caller owns
/// the URL and must hand it back to [`revoke_object_url`].
#[cfg(feature = "hydrate")]
pub fn object_url_for(bytes: &[u8], mime: &str) -> Result<String, String> {
    use wasm_bindgen::JsValue;
    use web_sys::{Blob, BlobPropertyBag, Url};

    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::of1(&array.buffer());
    let options = BlobPropertyBag::new();
    options.set_type(mime);
    let blob = Blob::new_with_u8_array_sequence_and_options(&JsValue::from(parts), &options)
        .map_err(|e| format!("Failed to create video blob: {e:?}"))?;
    Url::create_object_url_with_blob(&blob)
        .map_err(|e| format!("Failed to create video URL: {e:?}"))
}

#[cfg(not(feature = "hydrate"))]
pub fn object_url_for(_bytes: &[u8], _mime: &str) -> Result<String, String> {
    Err("Object URLs are only available in the browser".into())
}

pub fn revoke_object_url(url: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Err(e) = web_sys::Url::revoke_object_url(url) {
            log::warn!("failed to revoke object url {url}: {e:?}");
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = url;
    }
}
