//! ブラウザイベントから画像を取り出す

use image_search_common::{ClipboardItem, SelectedImage};
use wasm_bindgen::JsCast;
use web_sys::{ClipboardEvent, DataTransferItem, Event, File, HtmlInputElement};

/// 貼り付けイベントの1アイテム
pub struct PastedItem(DataTransferItem);

impl ClipboardItem for PastedItem {
    type Payload = File;

    fn media_type(&self) -> String {
        self.0.type_()
    }

    fn to_image(&self) -> Option<SelectedImage<File>> {
        let file = self.0.get_as_file().ok().flatten()?;
        Some(SelectedImage::new(file.name(), self.0.type_(), file))
    }
}

/// 貼り付けイベントのアイテムを順番どおりに並べる
pub fn pasted_items(event: &ClipboardEvent) -> Vec<PastedItem> {
    let Some(items) = event.clipboard_data().map(|data| data.items()) else {
        return Vec::new();
    };
    (0..items.length())
        .filter_map(|i| items.get(i))
        .map(PastedItem)
        .collect()
}

/// `<input type="file">` の change イベントから先頭のファイルを取り出す
pub fn picked_file(event: &Event) -> Option<SelectedImage<File>> {
    let input: HtmlInputElement = event.target()?.dyn_into().ok()?;
    let file = input.files()?.get(0)?;
    Some(SelectedImage::new(file.name(), file.type_(), file))
}
