//! アップロードフロー
//!
//! 検索と同じ取り込み・プレビューの仕組みで `POST /upload` に画像だけを送る。
//! 結果ストアには触れない。

use std::cell::RefCell;

use log::{info, warn};

use crate::error::{Error, Result};
use crate::intake::{ClipboardItem, ImageSlot, PasteOutcome, SelectedImage};
use crate::preview::PreviewBackend;
use crate::sequence::{Completion, RequestCounter, RequestSeq};
use crate::status::{self, RequestStatus};
use crate::transport::{ImageSearchTransport, UploadRequest};
use crate::types::UploadResponse;

/// 送信待ちのアップロード
pub struct UploadTicket<P> {
    pub seq: RequestSeq,
    pub request: UploadRequest<P>,
    /// 送信時点の選択番号（成功時、選び直されていなければ選択を消す）
    pub selection: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadView {
    pub status: RequestStatus,
    pub file_name: Option<String>,
    pub preview_url: Option<String>,
    pub in_flight: bool,
}

pub struct UploadFlow<B: PreviewBackend> {
    slot: ImageSlot<B>,
    status: RequestStatus,
    requests: RequestCounter,
}

impl<B> UploadFlow<B>
where
    B: PreviewBackend,
    B::Payload: Clone,
{
    pub fn new(backend: B) -> Self {
        Self {
            slot: ImageSlot::new(backend),
            status: RequestStatus::Idle,
            requests: RequestCounter::default(),
        }
    }

    pub fn select_file(&mut self, candidate: Option<SelectedImage<B::Payload>>) -> bool {
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

    pub fn paste<I>(&mut self, items: I) -> PasteOutcome
    where
        I: IntoIterator,
        I::Item: ClipboardItem<Payload = B::Payload>,
    {
        let outcome = self.slot.paste(items);
        if outcome == PasteOutcome::Accepted {
            self.status = self.settled_status();
        }
        outcome
    }

    pub fn begin_upload(&mut self) -> Result<UploadTicket<B::Payload>> {
        let Some(image) = self.slot.image().cloned() else {
            self.status = RequestStatus::Failed(Error::NoImageSelected.to_string());
            return Err(Error::NoImageSelected);
        };

        let seq = self.requests.issue();
        self.status = RequestStatus::InFlight;
        info!("upload #{} for {}", seq.value(), image.file_name);

        Ok(UploadTicket {
            seq,
            request: UploadRequest { image },
            selection: self.slot.selection(),
        })
    }

    /// 成功したら選択とプレビューを手放す。失敗時は再送できるよう残す
    pub fn complete_upload(
        &mut self,
        seq: RequestSeq,
        selection: u64,
        outcome: Result<UploadResponse>,
    ) -> Completion {
        if !self.requests.settle(&seq) {
            warn!("discarding stale upload response #{}", seq.value());
            return Completion::Stale;
        }

        match outcome {
            Ok(response) => {
                if self.slot.selection() == selection {
                    self.slot.clear();
                }
                info!("upload #{} stored as {}", seq.value(), response.filename);
                self.status = RequestStatus::Succeeded(status::upload_succeeded(&response.filename));
            }
            Err(e) => {
                warn!("upload #{} failed: {}", seq.value(), e);
                self.status = RequestStatus::Failed(status::upload_failed(&e.to_string()));
            }
        }
        Completion::Applied
    }

    pub fn clear(&mut self) {
        self.slot.clear();
        self.status = RequestStatus::Idle;
        self.requests.invalidate();
    }

    pub fn teardown(&mut self) {
        self.slot.clear();
        self.requests.invalidate();
    }

    pub fn status(&self) -> &RequestStatus {
        &self.status
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

    pub fn snapshot(&self) -> UploadView {
        UploadView {
            status: self.status.clone(),
            file_name: self.slot.file_name().map(str::to_string),
            preview_url: self.slot.preview_url().map(str::to_string),
            in_flight: self.requests.is_pending(),
        }
    }
}

/// アップロードを1回実行する
pub async fn upload<B, T>(flow: &RefCell<UploadFlow<B>>, transport: &T) -> Result<Completion>
where
    B: PreviewBackend,
    B::Payload: Clone,
    T: ImageSearchTransport<Payload = B::Payload>,
{
    let UploadTicket {
        seq,
        request,
        selection,
    } = flow.borrow_mut().begin_upload()?;
    let outcome = transport.upload(request).await;
    Ok(flow.borrow_mut().complete_upload(seq, selection, outcome))
}
