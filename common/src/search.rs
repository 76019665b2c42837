//! 検索フロー
//!
//! 画像の選択 → プレビュー → `POST /search` → 結果ストアへの反映までを扱う。
//! 送信中も状態は同期的に変更できるため、応答は番号で照合し最新のものだけ反映する。

use std::cell::RefCell;

use log::{info, warn};

use crate::error::{Error, Result};
use crate::intake::{ClipboardItem, ImageSlot, PasteOutcome, SelectedImage};
use crate::preview::PreviewBackend;
use crate::sequence::{Completion, RequestCounter, RequestSeq};
use crate::status::{self, RequestStatus};
use crate::store::ResultStore;
use crate::transport::{ImageSearchTransport, SearchRequest};
use crate::types::{SearchParameters, SearchResponse};

/// 送信待ちの検索
pub struct SearchTicket<P> {
    pub seq: RequestSeq,
    pub request: SearchRequest<P>,
}

/// 画面表示用のスナップショット
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchView {
    pub status: RequestStatus,
    pub file_name: Option<String>,
    pub preview_url: Option<String>,
    pub preview_open: bool,
    pub radius: f64,
    pub k: u32,
    pub in_flight: bool,
}

pub struct SearchFlow<B: PreviewBackend> {
    store: ResultStore,
    slot: ImageSlot<B>,
    status: RequestStatus,
    params: SearchParameters,
    defaults: SearchParameters,
    preview_open: bool,
    requests: RequestCounter,
}

impl<B> SearchFlow<B>
where
    B: PreviewBackend,
    B::Payload: Clone,
{
    pub fn new(store: ResultStore, backend: B, defaults: SearchParameters) -> Self {
        Self {
            store,
            slot: ImageSlot::new(backend),
            status: RequestStatus::Idle,
            params: defaults,
            defaults,
            preview_open: false,
            requests: RequestCounter::default(),
        }
    }

    /// ファイル選択。画像でなければ選択もプレビューも消してメッセージを出す
    pub fn select_file(&mut self, candidate: Option<SelectedImage<B::Payload>>) -> bool {
        self.preview_open = false;
        match self.slot.accept(candidate) {
            Ok(()) => {
                self.status = self.settled_status();
                true
            }
            Err(e) => {
                self.status = RequestStatus::Failed(e.to_string());
                false
            }
        }
    }

    /// クリップボード貼り付け。画像がなければ状態は変えない
    pub fn paste<I>(&mut self, items: I) -> PasteOutcome
    where
        I: IntoIterator,
        I::Item: ClipboardItem<Payload = B::Payload>,
    {
        let outcome = self.slot.paste(items);
        if outcome == PasteOutcome::Accepted {
            self.status = self.settled_status();
            self.preview_open = false;
        }
        outcome
    }

    pub fn set_radius(&mut self, radius: f64) -> bool {
        match SearchParameters::validate_radius(radius) {
            Ok(()) => {
                self.params.radius = radius;
                true
            }
            Err(e) => {
                self.status = RequestStatus::Failed(e.to_string());
                false
            }
        }
    }

    pub fn set_k(&mut self, k: u32) -> bool {
        match SearchParameters::validate_k(k) {
            Ok(()) => {
                self.params.k = k;
                true
            }
            Err(e) => {
                self.status = RequestStatus::Failed(e.to_string());
                false
            }
        }
    }

    /// 入力欄の文字列で radius を更新する
    pub fn set_radius_text(&mut self, text: &str) -> bool {
        match SearchParameters::parse_radius(text) {
            Ok(radius) => self.set_radius(radius),
            Err(e) => {
                self.status = RequestStatus::Failed(e.to_string());
                false
            }
        }
    }

    pub fn set_k_text(&mut self, text: &str) -> bool {
        match SearchParameters::parse_k(text) {
            Ok(k) => self.set_k(k),
            Err(e) => {
                self.status = RequestStatus::Failed(e.to_string());
                false
            }
        }
    }

    /// 検索を開始する。画像未選択なら送信せず `NoImageSelected`
    pub fn begin_search(&mut self) -> Result<SearchTicket<B::Payload>> {
        let Some(image) = self.slot.image().cloned() else {
            self.status = RequestStatus::Failed(Error::NoImageSelected.to_string());
            return Err(Error::NoImageSelected);
        };

        let seq = self.requests.issue();
        self.status = RequestStatus::InFlight;
        info!(
            "search #{} for {} (radius={}, k={})",
            seq.value(),
            image.file_name,
            self.params.radius,
            self.params.k
        );

        Ok(SearchTicket {
            seq,
            request: SearchRequest {
                image,
                params: self.params,
            },
        })
    }

    /// 応答を反映する。最新のリクエストでなければ何も変えない
    ///
    /// 失敗時は結果ストアを触らない（前回の結果は残る）。
    pub fn complete_search(&mut self, seq: RequestSeq, outcome: Result<SearchResponse>) -> Completion {
        if !self.requests.settle(&seq) {
            warn!("discarding stale search response #{}", seq.value());
            return Completion::Stale;
        }

        match outcome {
            Ok(response) => {
                let count = response.results.len();
                self.store.set_results(response.results);
                self.status = RequestStatus::Succeeded(status::search_succeeded(count));
                info!("search #{} returned {} match(es)", seq.value(), count);
            }
            Err(e) => {
                warn!("search #{} failed: {}", seq.value(), e);
                self.status = RequestStatus::Failed(status::search_failed(&e.to_string()));
            }
        }
        Completion::Applied
    }

    /// 画像・プレビュー・ステータス・パラメータを初期化し、空の結果を配信する
    pub fn clear(&mut self) {
        self.slot.clear();
        self.status = RequestStatus::Idle;
        self.params = self.defaults;
        self.preview_open = false;
        self.requests.invalidate();
        self.store.clear_results();
    }

    /// クエリ画像の拡大表示（プレビューがある時だけ）
    pub fn open_preview(&mut self) {
        if self.slot.preview_url().is_some() {
            self.preview_open = true;
        }
    }

    pub fn close_preview(&mut self) {
        self.preview_open = false;
    }

    /// フロー破棄時の後始末（送信中の応答も無効化する）
    pub fn teardown(&mut self) {
        self.slot.clear();
        self.preview_open = false;
        self.requests.invalidate();
    }

    pub fn status(&self) -> &RequestStatus {
        &self.status
    }

    pub fn params(&self) -> SearchParameters {
        self.params
    }

    pub fn image(&self) -> Option<&SelectedImage<B::Payload>> {
        self.slot.image()
    }

    pub fn preview_url(&self) -> Option<&str> {
        self.slot.preview_url()
    }

    /// 選び直し後の状態。応答待ちのリクエストがあれば送信中のまま
    fn settled_status(&self) -> RequestStatus {
        if self.requests.is_pending() {
            RequestStatus::InFlight
        } else {
            RequestStatus::Idle
        }
    }

    pub fn snapshot(&self) -> SearchView {
        SearchView {
            status: self.status.clone(),
            file_name: self.slot.file_name().map(str::to_string),
            preview_url: self.slot.preview_url().map(str::to_string),
            preview_open: self.preview_open,
            radius: self.params.radius,
            k: self.params.k,
            in_flight: self.requests.is_pending(),
        }
    }
}

/// 検索を1回実行する
///
/// 送信中は `flow` を借用しないので、その間も他の操作ができる。
/// `Err` は送信しなかった場合のみ（ステータスは設定済み）。
pub async fn search<B, T>(flow: &RefCell<SearchFlow<B>>, transport: &T) -> Result<Completion>
where
    B: PreviewBackend,
    B::Payload: Clone,
    T: ImageSearchTransport<Payload = B::Payload>,
{
    let SearchTicket { seq, request } = flow.borrow_mut().begin_search()?;
    let outcome = transport.search(request).await;
    Ok(flow.borrow_mut().complete_search(seq, outcome))
}
