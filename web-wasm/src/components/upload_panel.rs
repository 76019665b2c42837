//! アップロードパネル
//!
//! 検索対象の画像をサーバに登録する。結果一覧には触れない。

use image_search_common::{ClientConfig, ImageSearchTransport, UploadFlow};
use leptos::{ev, html, prelude::*, task::spawn_local};
use wasm_bindgen::JsCast;
use web_sys::ClipboardEvent;

use crate::api::client::FetchTransport;
use crate::components::status_line::StatusLine;
use crate::intake::{pasted_items, picked_file};
use crate::preview::ObjectUrlPreviews;

#[component]
pub fn UploadPanel(config: ClientConfig) -> impl IntoView {
    let flow = StoredValue::new_local(UploadFlow::new(ObjectUrlPreviews));
    let transport = FetchTransport::new(&config);
    let view_state = RwSignal::new(flow.with_value(|f| f.snapshot()));
    let file_input = NodeRef::<html::Input>::new();

    let sync = move || {
        if let Some(snapshot) = flow.try_with_value(|f| f.snapshot()) {
            // 送信後に選択が外れたら input も空にする
            if snapshot.file_name.is_none() {
                if let Some(input) = file_input.get_untracked() {
                    input.set_value("");
                }
            }
            view_state.try_set(snapshot);
        }
    };

    on_cleanup(move || {
        flow.try_update_value(|f| f.teardown());
    });

    let on_file_change = move |ev: ev::Event| {
        flow.update_value(|f| {
            f.select_file(picked_file(&ev));
        });
        sync();
    };

    // ウィンドウ全体の貼り付けは検索パネルが受けるので、ここは枠内のみ
    let on_paste = move |ev: ev::Event| {
        let outcome = flow.try_update_value(|f| f.paste(pasted_items(ev.unchecked_ref::<ClipboardEvent>())));
        if outcome.is_some_and(|o| o.should_prevent_default()) {
            ev.prevent_default();
            ev.stop_propagation();
            sync();
        }
    };

    let on_upload = move |_: ev::MouseEvent| {
        let ticket = flow.try_update_value(|f| f.begin_upload());
        sync();
        let Some(Ok(ticket)) = ticket else {
            return;
        };

        let transport = transport.clone();
        spawn_local(async move {
            let outcome = transport.upload(ticket.request).await;
            flow.try_update_value(|f| f.complete_upload(ticket.seq, ticket.selection, outcome));
            sync();
        });
    };

    let on_clear = move |_: ev::MouseEvent| {
        flow.update_value(|f| f.clear());
        sync();
    };

    let in_flight = move || view_state.with(|v| v.in_flight);

    view! {
        <section class="card upload-panel" tabindex="0" on:paste=on_paste>
            <h2>"画像を登録"</h2>

            <input
                type="file"
                accept="image/*"
                node_ref=file_input
                on:change=on_file_change
            />

            {move || {
                view_state.with(|v| v.preview_url.clone()).map(|url| {
                    let alt = view_state.with(|v| v.file_name.clone()).unwrap_or_default();
                    view! { <img class="upload-preview" src=url alt=alt /> }
                })
            }}

            <div class="actions">
                <button class="btn btn-primary" on:click=on_upload disabled=in_flight>
                    {move || if in_flight() { "アップロード中..." } else { "アップロード" }}
                </button>
                <button class="btn" on:click=on_clear>"クリア"</button>
            </div>

            <StatusLine status=Signal::derive(move || view_state.with(|v| v.status.clone())) />
        </section>
    }
}
