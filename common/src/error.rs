//! エラー型定義

use thiserror::Error;

/// 共通エラー型
///
/// どのエラーもフロー境界の外へは投げず、ステータス文字列へ変換して表示する。
#[derive(Error, Debug)]
pub enum Error {
    #[error("有効な画像を選択してください")]
    InvalidSelection,

    #[error("ファイルが選択されていません")]
    NoImageSelected,

    #[error("{0}")]
    RequestFailed(String),

    #[error("検索パラメータが不正です: {0}")]
    InvalidParameter(String),

    #[error("プレビューを作成できません: {0}")]
    Preview(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
