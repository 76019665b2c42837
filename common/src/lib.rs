//! Image Search Common Library
//!
//! 類似画像検索クライアントの中核。ブラウザAPIには依存しない。
//!
//! - intake / preview: 画像の取り込みとプレビューハンドルの寿命管理
//! - search / upload: リクエストの送信と応答の反映
//! - store / presenter: 検索結果の共有と表示状態

pub mod config;
pub mod error;
pub mod intake;
pub mod presenter;
pub mod preview;
pub mod search;
pub mod sequence;
pub mod status;
pub mod store;
pub mod transport;
pub mod types;
pub mod upload;

pub use config::ClientConfig;
pub use error::{Error, Result};
pub use intake::{ClipboardItem, ImageSlot, PasteOutcome, SelectedImage};
pub use presenter::{file_name, ResultEntry, ResultPresenter};
pub use preview::{PreviewBackend, PreviewHandle, PreviewSlot};
pub use search::{search, SearchFlow, SearchTicket, SearchView};
pub use sequence::{Completion, RequestCounter, RequestSeq};
pub use status::RequestStatus;
pub use store::{ResultStore, SubscriptionId};
pub use transport::{ImageSearchTransport, SearchRequest, UploadRequest};
pub use types::{ResultSet, SearchParameters, SearchResponse, SearchResult, UploadResponse};
pub use upload::{upload, UploadFlow, UploadTicket, UploadView};
