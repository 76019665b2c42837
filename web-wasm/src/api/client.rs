//! fetch + FormData による検索・アップロード
//!
//! - search: `POST {base}/search` (file, radius, k)
//! - upload: `POST {base}/upload` (file)

use image_search_common::transport::{describe_http_failure, FIELD_FILE};
use image_search_common::{
    ClientConfig, Error, ImageSearchTransport, Result, SearchRequest, SearchResponse,
    UploadRequest, UploadResponse,
};
use serde::de::DeserializeOwned;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, Request, RequestInit, RequestMode, Response};

use super::js_error_message;

/// ブラウザの fetch で検索サーバに送信する
#[derive(Debug, Clone, PartialEq)]
pub struct FetchTransport {
    search_url: String,
    upload_url: String,
}

impl FetchTransport {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            search_url: config.search_url(),
            upload_url: config.upload_url(),
        }
    }
}

impl ImageSearchTransport for FetchTransport {
    type Payload = File;

    async fn search(&self, request: SearchRequest<File>) -> Result<SearchResponse> {
        let form = file_form(&request.image.payload, &request.image.file_name)?;
        for (name, value) in request.form_fields() {
            form.append_with_str(name, &value).map_err(request_failed)?;
        }
        post_form(&self.search_url, &form).await
    }

    async fn upload(&self, request: UploadRequest<File>) -> Result<UploadResponse> {
        let form = file_form(&request.image.payload, &request.image.file_name)?;
        post_form(&self.upload_url, &form).await
    }
}

fn request_failed(value: JsValue) -> Error {
    Error::RequestFailed(js_error_message(&value))
}

fn file_form(file: &File, file_name: &str) -> Result<FormData> {
    let form = FormData::new().map_err(request_failed)?;
    form.append_with_blob_and_filename(FIELD_FILE, file, file_name)
        .map_err(request_failed)?;
    Ok(form)
}

/// multipart/form-data で POST し、JSONレスポンスを受け取る
async fn post_form<T: DeserializeOwned>(url: &str, form: &FormData) -> Result<T> {
    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(form);

    // Content-Type はブラウザが boundary 付きで設定する
    let request = Request::new_with_str_and_init(url, &opts).map_err(request_failed)?;

    let window = web_sys::window()
        .ok_or_else(|| Error::RequestFailed("window is not available".to_string()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(request_failed)?;
    let resp: Response = resp_value.dyn_into().map_err(request_failed)?;

    if !resp.ok() {
        let body = match resp.text() {
            Ok(promise) => JsFuture::from(promise)
                .await
                .ok()
                .and_then(|v| v.as_string())
                .unwrap_or_default(),
            Err(_) => String::new(),
        };
        let message = describe_http_failure(resp.status(), &resp.status_text(), &body);
        log::warn!("POST {} failed: {}", url, message);
        return Err(Error::RequestFailed(message));
    }

    let json = JsFuture::from(resp.json().map_err(request_failed)?)
        .await
        .map_err(request_failed)?;
    serde_wasm_bindgen::from_value(json).map_err(|e| Error::RequestFailed(e.to_string()))
}
