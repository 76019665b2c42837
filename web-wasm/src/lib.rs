//! Image Search Web App (Leptos + WASM)

mod api;
mod app;
mod components;
mod config;
mod intake;
mod preview;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        web_sys::console::warn_1(&"console_log already initialized".into());
    }
    log::debug!("image-search-wasm started");
    leptos::mount::mount_to_body(app::App);
}
