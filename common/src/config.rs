//! クライアント設定（検索サーバの接続先と検索パラメータの初期値）

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::SearchParameters;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const SEARCH_PATH: &str = "/search";
pub const UPLOAD_PATH: &str = "/upload";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub default_radius: f64,
    pub default_k: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            default_radius: 1.0,
            default_k: 10,
        }
    }
}

impl ClientConfig {
    /// JSON文字列から読み込む（未指定のキーはデフォルト値）
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ClientConfig = serde_json::from_str(json)?;
        if config.api_base_url.trim().is_empty() {
            return Err(Error::Config("api_base_url が空です".into()));
        }
        config.default_parameters()?;
        Ok(config)
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn search_url(&self) -> String {
        self.endpoint(SEARCH_PATH)
    }

    pub fn upload_url(&self) -> String {
        self.endpoint(UPLOAD_PATH)
    }

    pub fn default_parameters(&self) -> Result<SearchParameters> {
        SearchParameters::new(self.default_radius, self.default_k)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url.trim_end_matches('/'), path)
    }
}
