//! 画像の拡大表示

use leptos::{ev, prelude::*};

/// 背景クリックまたは閉じるボタンで `on_close` を呼ぶ
#[component]
pub fn ImageModal<F>(src: String, caption: String, on_close: F) -> impl IntoView
where
    F: Fn(()) + 'static + Clone + Send,
{
    let close_on_backdrop = on_close.clone();

    view! {
        <div class="modal-backdrop" on:click=move |_| close_on_backdrop(())>
            <figure class="modal" on:click=|ev: ev::MouseEvent| ev.stop_propagation()>
                <img class="modal-image" src=src alt=caption.clone() />
                <figcaption>{caption}</figcaption>
                <button class="btn modal-close" on:click=move |_| on_close(())>
                    "閉じる"
                </button>
            </figure>
        </div>
    }
}
