//! Object URL によるプレビュー

use image_search_common::{Error, PreviewBackend, Result, SelectedImage};
use web_sys::{File, Url};

use crate::api::js_error_message;

/// `URL.createObjectURL` / `URL.revokeObjectURL`
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectUrlPreviews;

impl PreviewBackend for ObjectUrlPreviews {
    type Payload = File;

    fn acquire(&self, image: &SelectedImage<File>) -> Result<String> {
        Url::create_object_url_with_blob(&image.payload)
            .map_err(|e| Error::Preview(js_error_message(&e)))
    }

    fn release(&self, url: &str) {
        if let Err(e) = Url::revoke_object_url(url) {
            log::warn!("revokeObjectURL failed for {}: {}", url, js_error_message(&e));
        }
    }
}
