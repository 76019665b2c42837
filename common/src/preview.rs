//! プレビューリソース管理
//!
//! ブラウザの Object URL のように、明示的に解放しないとリークするハンドルを扱う。
//! 1フロー内で生きているハンドルは常に高々1つ。

use crate::error::Result;
use crate::intake::SelectedImage;

/// プレビューハンドルの生成・解放を行うバックエンド
pub trait PreviewBackend {
    type Payload;

    /// 画像を表示可能なURLにする
    fn acquire(&self, image: &SelectedImage<Self::Payload>) -> Result<String>;

    /// `acquire` で得たURLを解放する
    fn release(&self, url: &str);
}

/// 発行済みのプレビューハンドル
///
/// 複製できない。解放は所有している `PreviewSlot` だけが行う。
#[derive(Debug, PartialEq, Eq)]
pub struct PreviewHandle {
    url: String,
}

impl PreviewHandle {
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// フロー1つ分のプレビューハンドル置き場
///
/// 置き換え・クリア・Drop のいずれでも、前のハンドルは必ず解放される。
pub struct PreviewSlot<B: PreviewBackend> {
    backend: B,
    current: Option<PreviewHandle>,
}

impl<B: PreviewBackend> PreviewSlot<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            current: None,
        }
    }

    /// 新しいハンドルを発行する（先に既存のハンドルを解放）
    pub fn issue(&mut self, image: &SelectedImage<B::Payload>) -> Result<&PreviewHandle> {
        self.release_if_present();
        let url = self.backend.acquire(image)?;
        Ok(self.current.insert(PreviewHandle { url }))
    }

    /// 指定URLが現在のハンドルなら解放する。既に解放済みなら何もしない
    pub fn release(&mut self, url: &str) -> bool {
        match &self.current {
            Some(handle) if handle.url == url => {
                self.release_if_present();
                true
            }
            _ => false,
        }
    }

    pub fn release_if_present(&mut self) {
        if let Some(handle) = self.current.take() {
            self.backend.release(&handle.url);
        }
    }

    pub fn current(&self) -> Option<&PreviewHandle> {
        self.current.as_ref()
    }

    pub fn url(&self) -> Option<&str> {
        self.current.as_ref().map(PreviewHandle::url)
    }

    pub fn is_live(&self) -> bool {
        self.current.is_some()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: PreviewBackend> Drop for PreviewSlot<B> {
    fn drop(&mut self) {
        self.release_if_present();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[derive(Default)]
    struct Ledger {
        issued: Cell<usize>,
        live: RefCell<Vec<String>>,
        released: RefCell<Vec<String>>,
        fail: Cell<bool>,
    }

    #[derive(Clone, Default)]
    struct FakeBackend(Rc<Ledger>);

    impl PreviewBackend for FakeBackend {
        type Payload = Vec<u8>;

        fn acquire(&self, image: &SelectedImage<Vec<u8>>) -> Result<String> {
            if self.0.fail.get() {
                return Err(Error::RequestFailed("createObjectURL failed".into()));
            }
            let n = self.0.issued.get() + 1;
            self.0.issued.set(n);
            let url = format!("blob:{}#{}", image.file_name, n);
            self.0.live.borrow_mut().push(url.clone());
            Ok(url)
        }

        fn release(&self, url: &str) {
            let mut live = self.0.live.borrow_mut();
            let before = live.len();
            live.retain(|u| u != url);
            assert_eq!(before, live.len() + 1, "解放済みURLの二重解放: {}", url);
            self.0.released.borrow_mut().push(url.to_string());
        }
    }

    fn image(name: &str) -> SelectedImage<Vec<u8>> {
        SelectedImage::new(name, "image/png", vec![1, 2, 3])
    }

    #[test]
    fn test_issue_releases_previous() {
        let backend = FakeBackend::default();
        let ledger = backend.0.clone();
        let mut slot = PreviewSlot::new(backend);

        slot.issue(&image("a.png")).expect("発行失敗");
        slot.issue(&image("b.png")).expect("発行失敗");
        slot.issue(&image("c.png")).expect("発行失敗");

        assert_eq!(ledger.live.borrow().len(), 1);
        assert_eq!(ledger.released.borrow().len(), 2);
        assert_eq!(slot.url(), Some("blob:c.png#3"));
    }

    #[test]
    fn test_release_is_idempotent() {
        let backend = FakeBackend::default();
        let ledger = backend.0.clone();
        let mut slot = PreviewSlot::new(backend);

        let url = slot.issue(&image("a.png")).expect("発行失敗").url().to_string();
        assert!(slot.release(&url));
        assert!(!slot.release(&url));
        slot.release_if_present();

        assert!(!slot.is_live());
        assert_eq!(ledger.released.borrow().len(), 1);
    }

    #[test]
    fn test_release_of_unknown_url_is_noop() {
        let backend = FakeBackend::default();
        let ledger = backend.0.clone();
        let mut slot = PreviewSlot::new(backend);

        slot.issue(&image("a.png")).expect("発行失敗");
        assert!(!slot.release("blob:other"));
        assert!(slot.is_live());
        assert!(ledger.released.borrow().is_empty());
    }

    #[test]
    fn test_drop_releases_live_handle() {
        let backend = FakeBackend::default();
        let ledger = backend.0.clone();
        {
            let mut slot = PreviewSlot::new(backend);
            slot.issue(&image("a.png")).expect("発行失敗");
        }
        assert!(ledger.live.borrow().is_empty());
        assert_eq!(ledger.released.borrow().as_slice(), ["blob:a.png#1"]);
    }

    #[test]
    fn test_failed_acquire_leaves_slot_empty() {
        let backend = FakeBackend::default();
        let ledger = backend.0.clone();
        let mut slot = PreviewSlot::new(backend);

        slot.issue(&image("a.png")).expect("発行失敗");
        ledger.fail.set(true);
        assert!(slot.issue(&image("b.png")).is_err());

        // 失敗しても前のハンドルは解放されている
        assert!(!slot.is_live());
        assert!(ledger.live.borrow().is_empty());
    }
}
