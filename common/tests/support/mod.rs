//! テスト用のフェイク（プレビュー計数・送信記録・応答ゲート）

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use futures::channel::oneshot;
use image_search_common::{
    ClipboardItem, Error, ImageSearchTransport, PreviewBackend, Result, SearchRequest,
    SearchResponse, SearchResult, SelectedImage, UploadRequest, UploadResponse,
};

/// 発行中のプレビュー数を数える
#[derive(Default)]
pub struct PreviewLedger {
    pub issued: Cell<usize>,
    pub live: RefCell<Vec<String>>,
    pub max_live: Cell<usize>,
    pub bad_releases: Cell<usize>,
    /// true の間は acquire が失敗する
    pub failing: Cell<bool>,
}

impl PreviewLedger {
    pub fn live_count(&self) -> usize {
        self.live.borrow().len()
    }
}

#[derive(Clone, Default)]
pub struct CountingPreviews {
    pub ledger: Rc<PreviewLedger>,
}

impl PreviewBackend for CountingPreviews {
    type Payload = Vec<u8>;

    fn acquire(&self, image: &SelectedImage<Vec<u8>>) -> Result<String> {
        if self.ledger.failing.get() {
            return Err(Error::Preview(format!("cannot preview {}", image.file_name)));
        }
        let n = self.ledger.issued.get() + 1;
        self.ledger.issued.set(n);
        let url = format!("blob:test/{}/{}", n, image.file_name);
        let mut live = self.ledger.live.borrow_mut();
        live.push(url.clone());
        self.ledger.max_live.set(self.ledger.max_live.get().max(live.len()));
        Ok(url)
    }

    fn release(&self, url: &str) {
        let mut live = self.ledger.live.borrow_mut();
        match live.iter().position(|u| u == url) {
            Some(i) => {
                live.remove(i);
            }
            None => self.ledger.bad_releases.set(self.ledger.bad_releases.get() + 1),
        }
    }
}

/// 送信内容を記録し、用意した応答を順に返す
#[derive(Default)]
pub struct FakeTransport {
    pub search_replies: RefCell<VecDeque<Result<SearchResponse>>>,
    pub upload_replies: RefCell<VecDeque<Result<UploadResponse>>>,
    pub searches: RefCell<Vec<SearchRequest<Vec<u8>>>>,
    pub uploads: RefCell<Vec<UploadRequest<Vec<u8>>>>,
}

impl FakeTransport {
    pub fn replying(reply: Result<SearchResponse>) -> Self {
        let transport = Self::default();
        transport.search_replies.borrow_mut().push_back(reply);
        transport
    }

    pub fn replying_upload(reply: Result<UploadResponse>) -> Self {
        let transport = Self::default();
        transport.upload_replies.borrow_mut().push_back(reply);
        transport
    }
}

impl ImageSearchTransport for FakeTransport {
    type Payload = Vec<u8>;

    async fn search(&self, request: SearchRequest<Vec<u8>>) -> Result<SearchResponse> {
        self.searches.borrow_mut().push(request);
        let reply = self.search_replies.borrow_mut().pop_front();
        reply.unwrap_or_else(|| Err(Error::RequestFailed("no reply queued".into())))
    }

    async fn upload(&self, request: UploadRequest<Vec<u8>>) -> Result<UploadResponse> {
        self.uploads.borrow_mut().push(request);
        let reply = self.upload_replies.borrow_mut().pop_front();
        reply.unwrap_or_else(|| Err(Error::RequestFailed("no reply queued".into())))
    }
}

/// テスト側が応答のタイミングを決める
#[derive(Default)]
pub struct GatedTransport {
    pub search_gates: RefCell<VecDeque<oneshot::Receiver<Result<SearchResponse>>>>,
    pub upload_gates: RefCell<VecDeque<oneshot::Receiver<Result<UploadResponse>>>>,
}

impl GatedTransport {
    pub fn search_gate(&self) -> oneshot::Sender<Result<SearchResponse>> {
        let (tx, rx) = oneshot::channel();
        self.search_gates.borrow_mut().push_back(rx);
        tx
    }

    pub fn upload_gate(&self) -> oneshot::Sender<Result<UploadResponse>> {
        let (tx, rx) = oneshot::channel();
        self.upload_gates.borrow_mut().push_back(rx);
        tx
    }
}

impl ImageSearchTransport for GatedTransport {
    type Payload = Vec<u8>;

    async fn search(&self, _request: SearchRequest<Vec<u8>>) -> Result<SearchResponse> {
        let gate = self.search_gates.borrow_mut().pop_front();
        match gate {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(Error::RequestFailed("gate dropped".into()))),
            None => Err(Error::RequestFailed("no gate".into())),
        }
    }

    async fn upload(&self, _request: UploadRequest<Vec<u8>>) -> Result<UploadResponse> {
        let gate = self.upload_gates.borrow_mut().pop_front();
        match gate {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(Error::RequestFailed("gate dropped".into()))),
            None => Err(Error::RequestFailed("no gate".into())),
        }
    }
}

/// 貼り付けイベントの1アイテム
pub struct PastedItem {
    pub media_type: &'static str,
    pub bytes: Option<Vec<u8>>,
}

impl PastedItem {
    pub fn text(value: &str) -> Self {
        Self {
            media_type: "text/plain",
            bytes: Some(value.as_bytes().to_vec()),
        }
    }

    pub fn image(media_type: &'static str, bytes: &[u8]) -> Self {
        Self {
            media_type,
            bytes: Some(bytes.to_vec()),
        }
    }
}

impl ClipboardItem for PastedItem {
    type Payload = Vec<u8>;

    fn media_type(&self) -> String {
        self.media_type.to_string()
    }

    fn to_image(&self) -> Option<SelectedImage<Vec<u8>>> {
        self.bytes
            .clone()
            .map(|bytes| SelectedImage::new("image.png", self.media_type, bytes))
    }
}

pub const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

pub fn png(name: &str) -> SelectedImage<Vec<u8>> {
    SelectedImage::new(name, "image/png", PNG_BYTES.to_vec())
}

pub fn result(path: &str, distance: f64) -> SearchResult {
    SearchResult {
        path: path.to_string(),
        url: format!("http://localhost:8000/sitios/{}", path),
        distance,
    }
}

pub fn response(results: Vec<SearchResult>) -> SearchResponse {
    SearchResponse {
        query: Some("query.png".into()),
        results,
    }
}
