//! 接続先の設定
//!
//! 優先順位: `<meta name="image-search-config">` のJSON → ビルド時の
//! `IMAGE_SEARCH_API_BASE` → デフォルト

use image_search_common::ClientConfig;

const CONFIG_META_NAME: &str = "image-search-config";

pub fn load_config() -> ClientConfig {
    let meta = meta_content(CONFIG_META_NAME);
    resolve_config(meta.as_deref(), option_env!("IMAGE_SEARCH_API_BASE"))
}

pub fn resolve_config(meta_json: Option<&str>, compiled_base: Option<&str>) -> ClientConfig {
    if let Some(json) = meta_json {
        match ClientConfig::from_json(json) {
            Ok(config) => return config,
            Err(e) => log::warn!("ignoring {} meta tag: {}", CONFIG_META_NAME, e),
        }
    }

    match compiled_base.filter(|base| !base.trim().is_empty()) {
        Some(base) => ClientConfig::default().with_base_url(base),
        None => ClientConfig::default(),
    }
}

fn meta_content(name: &str) -> Option<String> {
    let document = web_sys::window()?.document()?;
    let selector = format!("meta[name=\"{}\"]", name);
    let element = document.query_selector(&selector).ok()??;
    element.get_attribute("content")
}
