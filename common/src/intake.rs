//! 画像の取り込み（ファイル選択 / クリップボード貼り付け）

use log::{debug, warn};

use crate::error::{Error, Result};
use crate::preview::{PreviewBackend, PreviewSlot};

/// 選択中の画像
///
/// `payload` はプラットフォーム側の実体（ブラウザでは `File`、テストでは `Vec<u8>`）。
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedImage<P> {
    pub file_name: String,
    pub media_type: String,
    pub payload: P,
}

impl<P> SelectedImage<P> {
    pub fn new(file_name: impl Into<String>, media_type: impl Into<String>, payload: P) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: media_type.into(),
            payload,
        }
    }
}

pub fn is_image_media_type(media_type: &str) -> bool {
    media_type.starts_with("image/")
}

/// ファイル選択の結果を検証する（未選択・画像以外は `InvalidSelection`）
pub fn accept_picked<P>(candidate: Option<SelectedImage<P>>) -> Result<SelectedImage<P>> {
    match candidate {
        Some(image) if is_image_media_type(&image.media_type) => Ok(image),
        _ => Err(Error::InvalidSelection),
    }
}

/// 貼り付けイベント内の1アイテム
pub trait ClipboardItem {
    type Payload;

    fn media_type(&self) -> String;

    /// ファイルとして取り出す（取り出せなければ None）
    fn to_image(&self) -> Option<SelectedImage<Self::Payload>>;
}

/// 先頭から走査し、最初に取り出せた画像アイテムを返す
pub fn scan_clipboard<I>(items: I) -> Option<SelectedImage<<I::Item as ClipboardItem>::Payload>>
where
    I: IntoIterator,
    I::Item: ClipboardItem,
{
    items
        .into_iter()
        .filter(|item| is_image_media_type(&item.media_type()))
        .find_map(|item| item.to_image())
}

/// 貼り付けを横取りしたかどうか
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasteOutcome {
    /// 画像を取り込んだ。既定の貼り付け動作は抑止する
    Accepted,
    /// 画像がなかった。イベントには触れない
    NotIntercepted,
}

impl PasteOutcome {
    pub fn should_prevent_default(self) -> bool {
        matches!(self, PasteOutcome::Accepted)
    }
}

/// 選択中の画像とそのプレビューをまとめて持つ
pub struct ImageSlot<B: PreviewBackend> {
    image: Option<SelectedImage<B::Payload>>,
    preview: PreviewSlot<B>,
    selection: u64,
}

impl<B: PreviewBackend> ImageSlot<B> {
    pub fn new(backend: B) -> Self {
        Self {
            image: None,
            preview: PreviewSlot::new(backend),
            selection: 0,
        }
    }

    /// ファイル選択の結果を取り込む。拒否した場合は画像もプレビューも消える
    pub fn accept(&mut self, candidate: Option<SelectedImage<B::Payload>>) -> Result<()> {
        match accept_picked(candidate) {
            Ok(image) => {
                self.replace(image);
                Ok(())
            }
            Err(e) => {
                self.clear();
                Err(e)
            }
        }
    }

    pub fn paste<I>(&mut self, items: I) -> PasteOutcome
    where
        I: IntoIterator,
        I::Item: ClipboardItem<Payload = B::Payload>,
    {
        match scan_clipboard(items) {
            Some(image) => {
                self.replace(image);
                PasteOutcome::Accepted
            }
            None => PasteOutcome::NotIntercepted,
        }
    }

    pub fn clear(&mut self) {
        self.image = None;
        self.preview.release_if_present();
    }

    pub fn image(&self) -> Option<&SelectedImage<B::Payload>> {
        self.image.as_ref()
    }

    pub fn file_name(&self) -> Option<&str> {
        self.image.as_ref().map(|image| image.file_name.as_str())
    }

    pub fn preview_url(&self) -> Option<&str> {
        self.preview.url()
    }

    pub fn preview(&self) -> &PreviewSlot<B> {
        &self.preview
    }

    /// 画像を選び直すたびに増える番号
    pub fn selection(&self) -> u64 {
        self.selection
    }

    fn replace(&mut self, image: SelectedImage<B::Payload>) {
        debug!("image selected: {} ({})", image.file_name, image.media_type);
        if let Err(e) = self.preview.issue(&image) {
            warn!("preview unavailable for {}: {}", image.file_name, e);
        }
        self.image = Some(image);
        self.selection += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Item(&'static str, Option<&'static [u8]>);

    impl ClipboardItem for Item {
        type Payload = Vec<u8>;

        fn media_type(&self) -> String {
            self.0.to_string()
        }

        fn to_image(&self) -> Option<SelectedImage<Vec<u8>>> {
            self.1
                .map(|bytes| SelectedImage::new("image.png", self.0, bytes.to_vec()))
        }
    }

    #[test]
    fn test_is_image_media_type() {
        assert!(is_image_media_type("image/png"));
        assert!(is_image_media_type("image/svg+xml"));
        assert!(!is_image_media_type("text/plain"));
        assert!(!is_image_media_type("Image/png"));
        assert!(!is_image_media_type(""));
    }

    #[test]
    fn test_accept_picked_rejects_missing_file() {
        let result = accept_picked::<Vec<u8>>(None);
        assert!(matches!(result, Err(Error::InvalidSelection)));
    }

    #[test]
    fn test_accept_picked_rejects_non_image() {
        let candidate = SelectedImage::new("notes.txt", "text/plain", vec![0u8]);
        assert!(matches!(accept_picked(Some(candidate)), Err(Error::InvalidSelection)));
    }

    #[test]
    fn test_scan_clipboard_takes_first_image() {
        let items = vec![
            Item("text/plain", Some(b"hello")),
            Item("image/png", Some(&[1, 2])),
            Item("image/jpeg", Some(&[3, 4])),
        ];
        let image = scan_clipboard(items).expect("画像が見つからない");
        assert_eq!(image.media_type, "image/png");
        assert_eq!(image.payload, vec![1, 2]);
    }

    #[test]
    fn test_scan_clipboard_skips_unreadable_image_item() {
        let items = vec![Item("image/png", None), Item("image/gif", Some(&[9]))];
        let image = scan_clipboard(items).expect("画像が見つからない");
        assert_eq!(image.media_type, "image/gif");
    }

    #[test]
    fn test_scan_clipboard_without_image() {
        let items = vec![Item("text/plain", Some(b"x")), Item("text/html", Some(b"<b>"))];
        assert!(scan_clipboard(items).is_none());
    }

    #[test]
    fn test_paste_outcome_prevent_default() {
        assert!(PasteOutcome::Accepted.should_prevent_default());
        assert!(!PasteOutcome::NotIntercepted.should_prevent_default());
    }
}
