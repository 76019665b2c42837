//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header(api_base_url: String) -> impl IntoView {
    view! {
        <header class="header">
            <h1>"類似画像検索"</h1>
            <span class="header-endpoint" title="検索サーバ">{api_base_url}</span>
        </header>
    }
}
