//! 検索サービスとの通信境界
//!
//! - `POST /search`: multipart（file, radius, k）
//! - `POST /upload`: multipart（file）
//!
//! 実際の送信はプラットフォーム側（ブラウザでは fetch）が実装する。

use serde::Deserialize;

use crate::error::Result;
use crate::intake::SelectedImage;
use crate::types::{SearchParameters, SearchResponse, UploadResponse};

pub const FIELD_FILE: &str = "file";
pub const FIELD_RADIUS: &str = "radius";
pub const FIELD_K: &str = "k";

/// 検索リクエスト
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest<P> {
    pub image: SelectedImage<P>,
    pub params: SearchParameters,
}

impl<P> SearchRequest<P> {
    /// 画像以外のフォーム項目（文字列化済み）
    pub fn form_fields(&self) -> [(&'static str, String); 2] {
        [
            (FIELD_RADIUS, self.params.radius.to_string()),
            (FIELD_K, self.params.k.to_string()),
        ]
    }
}

/// アップロードリクエスト（画像のみ）
#[derive(Debug, Clone, PartialEq)]
pub struct UploadRequest<P> {
    pub image: SelectedImage<P>,
}

/// 検索サービスへの送信手段
///
/// 失敗（通信エラー・2xx以外）はすべて `Error::RequestFailed` で返す。
#[allow(async_fn_in_trait)]
pub trait ImageSearchTransport {
    type Payload;

    async fn search(&self, request: SearchRequest<Self::Payload>) -> Result<SearchResponse>;

    async fn upload(&self, request: UploadRequest<Self::Payload>) -> Result<UploadResponse>;
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

/// 2xx以外のレスポンスをエラーメッセージにする
///
/// FastAPI形式の `{"detail": ...}` があれば付け加える。
pub fn describe_http_failure(status: u16, status_text: &str, body: &str) -> String {
    let mut message = format!("HTTP {}", status);
    if !status_text.is_empty() {
        message.push(' ');
        message.push_str(status_text);
    }

    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail)
        .map(|d| match d {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        });

    if let Some(detail) = detail.filter(|d| !d.is_empty()) {
        message.push_str(": ");
        message.push_str(&detail);
    }
    message
}
