//! リクエストステータスと表示メッセージ

/// フロー（検索/アップロード）ごとのリクエスト状態
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestStatus {
    #[default]
    Idle,
    InFlight,
    Succeeded(String),
    Failed(String),
}

impl RequestStatus {
    /// 画面に出すステータス文字列（Idle/InFlightは空）
    pub fn message(&self) -> &str {
        match self {
            RequestStatus::Idle | RequestStatus::InFlight => "",
            RequestStatus::Succeeded(message) | RequestStatus::Failed(message) => message,
        }
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self, RequestStatus::InFlight)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RequestStatus::Failed(_))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Idle => "idle",
            RequestStatus::InFlight => "in-flight",
            RequestStatus::Succeeded(_) => "succeeded",
            RequestStatus::Failed(_) => "failed",
        }
    }
}

pub fn search_succeeded(count: usize) -> String {
    if count > 0 {
        format!("{}件の類似画像が見つかりました", count)
    } else {
        "類似画像は見つかりませんでした".to_string()
    }
}

pub fn search_failed(reason: &str) -> String {
    format!("検索エラー: {}", reason)
}

pub fn upload_succeeded(filename: &str) -> String {
    format!("画像をアップロードしました: {}", filename)
}

pub fn upload_failed(reason: &str) -> String {
    format!("アップロードエラー: {}", reason)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_idle_is_empty() {
        assert_eq!(RequestStatus::Idle.message(), "");
        assert_eq!(RequestStatus::InFlight.message(), "");
    }

    #[test]
    fn test_message_carries_text() {
        let status = RequestStatus::Failed("検索エラー: timeout".into());
        assert_eq!(status.message(), "検索エラー: timeout");
        assert!(status.is_failed());
        assert!(!status.is_in_flight());
    }

    #[test]
    fn test_search_succeeded_counts() {
        assert_eq!(search_succeeded(3), "3件の類似画像が見つかりました");
        assert_eq!(search_succeeded(0), "類似画像は見つかりませんでした");
    }

    #[test]
    fn test_as_str() {
        assert_eq!(RequestStatus::InFlight.as_str(), "in-flight");
        assert_eq!(RequestStatus::Succeeded(String::new()).as_str(), "succeeded");
    }
}
