//! メインアプリケーションコンポーネント
//!
//! 結果ストアはここで1つだけ作り、検索パネルと結果一覧に渡す。

use image_search_common::ResultStore;
use leptos::prelude::*;

use crate::components::{
    header::Header, search_panel::SearchPanel, search_results::SearchResults,
    upload_panel::UploadPanel,
};
use crate::config::load_config;

#[component]
pub fn App() -> impl IntoView {
    let config = load_config();
    log::info!("search API: {}", config.api_base_url);

    let store = StoredValue::new_local(ResultStore::new());

    view! {
        <div class="container">
            <Header api_base_url=config.api_base_url.clone() />

            <UploadPanel config=config.clone() />

            <SearchPanel store=store config=config />

            <SearchResults store=store />
        </div>
    }
}
