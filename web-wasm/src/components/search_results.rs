//! 検索結果一覧
//!
//! ResultStore を購読し、距離の近い順に並んだ結果をそのまま表示する。
//! クリックで拡大表示。

use image_search_common::{file_name, ResultPresenter, ResultStore};
use leptos::prelude::*;

use crate::components::image_modal::ImageModal;

#[component]
pub fn SearchResults(store: StoredValue<ResultStore, LocalStorage>) -> impl IntoView {
    let presenter = RwSignal::new(ResultPresenter::new());

    // 購読時に最新の結果が即座に届く
    let subscription = store.with_value(|s| {
        s.subscribe(move |results| {
            presenter.try_update(|p| p.show(results));
        })
    });

    on_cleanup(move || {
        store.try_with_value(|s| s.unsubscribe(subscription));
    });

    let close = move |_: ()| {
        presenter.update(|p| p.close());
    };

    view! {
        <section class="card search-results">
            <h2>"検索結果"</h2>

            <Show
                when=move || presenter.with(|p| !p.is_empty())
                fallback=|| view! { <p class="text-muted">"表示する結果はありません"</p> }
            >
                <div class="result-grid">
                    <For
                        each=move || presenter.with(|p| p.entries())
                        key=|entry| (entry.path.clone(), entry.distance.to_bits())
                        children=move |entry| {
                            let path = entry.path.clone();
                            view! {
                                <figure
                                    class="result-card"
                                    on:click=move |_| presenter.update(|p| {
                                        p.open_path(&path);
                                    })
                                >
                                    <img src=entry.url alt=entry.label.clone() loading="lazy" />
                                    <figcaption>
                                        <span class="result-label">{entry.label}</span>
                                        <span class="result-distance">
                                            {format!("距離: {:.4}", entry.distance)}
                                        </span>
                                    </figcaption>
                                </figure>
                            }
                        }
                    />
                </div>
            </Show>

            {move || {
                presenter
                    .with(|p| {
                        p.inspected().map(|r| {
                            (r.url.clone(), format!("{} (距離: {:.4})", file_name(&r.path), r.distance))
                        })
                    })
                    .map(|(src, caption)| view! {
                        <ImageModal src=src caption=caption on_close=close />
                    })
            }}
        </section>
    }
}
