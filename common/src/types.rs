//! 検索APIの型定義
//!
//! - SearchParameters: 検索ごとにユーザーが指定する数値パラメータ
//! - SearchResult: 類似画像1件（距離が小さいほど類似）
//! - SearchResponse / UploadResponse: サーバーのJSONレスポンス

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// 検索パラメータ
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchParameters {
    /// 距離の上限（0以上）
    pub radius: f64,
    /// 返却件数の上限（1以上）
    pub k: u32,
}

impl SearchParameters {
    pub fn new(radius: f64, k: u32) -> Result<Self> {
        Self::validate_radius(radius)?;
        Self::validate_k(k)?;
        Ok(Self { radius, k })
    }

    pub fn validate_radius(radius: f64) -> Result<()> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(Error::InvalidParameter(format!(
                "radius は0以上の数値である必要があります: {}",
                radius
            )));
        }
        Ok(())
    }

    /// 入力欄の文字列から radius を読む
    pub fn parse_radius(text: &str) -> Result<f64> {
        let radius: f64 = text.trim().parse().map_err(|_| {
            Error::InvalidParameter(format!("radius が数値ではありません: {:?}", text))
        })?;
        Self::validate_radius(radius)?;
        Ok(radius)
    }

    /// 入力欄の文字列から k を読む
    pub fn parse_k(text: &str) -> Result<u32> {
        let k: u32 = text.trim().parse().map_err(|_| {
            Error::InvalidParameter(format!("k が正の整数ではありません: {:?}", text))
        })?;
        Self::validate_k(k)?;
        Ok(k)
    }

    pub fn validate_k(k: u32) -> Result<()> {
        if k < 1 {
            return Err(Error::InvalidParameter("k は1以上である必要があります".into()));
        }
        Ok(())
    }
}

impl Default for SearchParameters {
    fn default() -> Self {
        Self { radius: 1.0, k: 10 }
    }
}

/// 類似画像1件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// レスポンス内で一意なパス（参照バックエンドは `id` で返す）
    #[serde(alias = "id")]
    pub path: String,
    pub url: String,
    pub distance: f64,
}

/// 直近の検索結果（サーバーの並び順をそのまま保持する）
pub type ResultSet = Vec<SearchResult>;

/// `POST /search` のレスポンス
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub results: ResultSet,
}

impl SearchResponse {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// `POST /upload` のレスポンス
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub id: Option<String>,
    pub filename: String,
}

impl UploadResponse {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
