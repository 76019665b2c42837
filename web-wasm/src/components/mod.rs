//! UIコンポーネント

pub mod header;
pub mod image_modal;
pub mod search_panel;
pub mod search_results;
pub mod status_line;
pub mod upload_panel;
