//! 検索パネル
//!
//! ファイル選択またはウィンドウへの貼り付けで検索画像を決め、
//! 半径と件数を添えて検索する。結果は ResultStore に流れる。

use image_search_common::{ClientConfig, ImageSearchTransport, ResultStore, SearchFlow};
use leptos::{ev, html, prelude::*, task::spawn_local};
use wasm_bindgen::JsCast;
use web_sys::ClipboardEvent;

use crate::api::client::FetchTransport;
use crate::components::{image_modal::ImageModal, status_line::StatusLine};
use crate::intake::{pasted_items, picked_file};
use crate::preview::ObjectUrlPreviews;

#[component]
pub fn SearchPanel(
    store: StoredValue<ResultStore, LocalStorage>,
    config: ClientConfig,
) -> impl IntoView {
    let defaults = config.default_parameters().unwrap_or_default();
    let flow = StoredValue::new_local(SearchFlow::new(
        store.get_value(),
        ObjectUrlPreviews,
        defaults,
    ));
    let transport = FetchTransport::new(&config);
    let view_state = RwSignal::new(flow.with_value(|f| f.snapshot()));
    let file_input = NodeRef::<html::Input>::new();

    // フロー変更後に表示用スナップショットを更新
    let sync = move || {
        if let Some(snapshot) = flow.try_with_value(|f| f.snapshot()) {
            view_state.try_set(snapshot);
        }
    };

    let reset_file_input = move || {
        if let Some(input) = file_input.get_untracked() {
            input.set_value("");
        }
    };

    let on_file_change = move |ev: ev::Event| {
        flow.update_value(|f| {
            f.select_file(picked_file(&ev));
        });
        sync();
    };

    // 画像の貼り付けはページ全体で受け付ける
    let paste_listener = window_event_listener(ev::paste, move |ev| {
        // アップロード枠で処理済み
        if ev.default_prevented() {
            return;
        }
        let outcome = flow.try_update_value(|f| f.paste(pasted_items(ev.unchecked_ref::<ClipboardEvent>())));
        if outcome.is_some_and(|o| o.should_prevent_default()) {
            ev.prevent_default();
            reset_file_input();
            sync();
        }
    });

    on_cleanup(move || {
        paste_listener.remove();
        flow.try_update_value(|f| f.teardown());
    });

    let on_radius_change = move |ev: ev::Event| {
        let text = event_target_value(&ev);
        flow.update_value(|f| {
            f.set_radius_text(&text);
        });
        sync();
    };

    let on_k_change = move |ev: ev::Event| {
        let text = event_target_value(&ev);
        flow.update_value(|f| {
            f.set_k_text(&text);
        });
        sync();
    };

    let on_search = move |_: ev::MouseEvent| {
        let ticket = flow.try_update_value(|f| f.begin_search());
        sync();
        let Some(Ok(ticket)) = ticket else {
            return;
        };

        let transport = transport.clone();
        spawn_local(async move {
            let outcome = transport.search(ticket.request).await;
            flow.try_update_value(|f| f.complete_search(ticket.seq, outcome));
            sync();
        });
    };

    let on_clear = move |_: ev::MouseEvent| {
        flow.update_value(|f| f.clear());
        reset_file_input();
        sync();
    };

    let open_preview = move |_: ev::MouseEvent| {
        flow.update_value(|f| f.open_preview());
        sync();
    };

    let close_preview = move |_: ()| {
        flow.try_update_value(|f| f.close_preview());
        sync();
    };

    let in_flight = move || view_state.with(|v| v.in_flight);

    view! {
        <section class="card search-panel">
            <h2>"類似画像を検索"</h2>
            <p class="text-muted">"画像を選択するか、Ctrl+V で貼り付けてください"</p>

            <input
                type="file"
                accept="image/*"
                node_ref=file_input
                on:change=on_file_change
            />

            {move || {
                view_state
                    .with(|v| v.preview_url.clone())
                    .map(|url| {
                        let alt = view_state.with(|v| v.file_name.clone()).unwrap_or_default();
                        view! {
                            <img
                                class="query-preview"
                                src=url
                                alt=alt
                                title="クリックで拡大"
                                on:click=open_preview
                            />
                        }
                    })
            }}

            <div class="search-params">
                <label>
                    "半径"
                    <input
                        type="number"
                        min="0"
                        step="0.1"
                        prop:value=move || view_state.with(|v| v.radius.to_string())
                        on:change=on_radius_change
                    />
                </label>
                <label>
                    "件数"
                    <input
                        type="number"
                        min="1"
                        step="1"
                        prop:value=move || view_state.with(|v| v.k.to_string())
                        on:change=on_k_change
                    />
                </label>
            </div>

            <div class="actions">
                <button class="btn btn-primary" on:click=on_search disabled=in_flight>
                    {move || if in_flight() { "検索中..." } else { "検索" }}
                </button>
                <button class="btn" on:click=on_clear>"クリア"</button>
            </div>

            <StatusLine status=Signal::derive(move || view_state.with(|v| v.status.clone())) />

            {move || {
                let (open, url, name) = view_state
                    .with(|v| (v.preview_open, v.preview_url.clone(), v.file_name.clone()));
                match (open, url) {
                    (true, Some(url)) => Some(view! {
                        <ImageModal
                            src=url
                            caption=name.unwrap_or_default()
                            on_close=close_preview
                        />
                    }),
                    _ => None,
                }
            }}
        </section>
    }
}
