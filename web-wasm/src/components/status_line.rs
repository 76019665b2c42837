//! 状態表示

use image_search_common::RequestStatus;
use leptos::prelude::*;

#[component]
pub fn StatusLine(#[prop(into)] status: Signal<RequestStatus>) -> impl IntoView {
    view! {
        <p
            class=move || format!("status status-{}", status.with(|s| s.as_str()))
            role="status"
        >
            {move || status.with(|s| s.message().to_string())}
        </p>
    }
}
