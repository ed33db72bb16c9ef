/// 変換リクエストの終端結果
///
/// 送信は必ず以下の3形のいずれかで終わる。通知方法はプレゼンテーション層が決める。
use crate::config::APP_CONFIG;
use crate::error_severity::ErrorSeverity;
use serde::Serialize;
use std::path::PathBuf;

/// `success: true` を受け取ったときの確認メッセージ
pub const ACKNOWLEDGED_MESSAGE: &str = "Conversion successful!";

/// 非2xxでJSONに `error` が無い場合
pub const DEFAULT_SERVER_ERROR: &str = "Conversion failed!";

/// 2xxで `success` が偽かつ `error` が無い場合
pub const DEFAULT_APPLICATION_ERROR: &str = "Unknown error";

/// 2xxでバイナリ本文が空だった場合
pub const EMPTY_FILE_REASON: &str = "empty file received";

/// 失敗の分類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// レスポンスが返らなかった（接続失敗、送信ファイルの読み込み失敗等）
    Transport,
    /// 非2xxのステータス
    Server,
    /// 2xxだが本文が失敗を宣言している
    Application,
    /// 2xxだがバイナリ本文が空
    EmptyPayload,
    /// 受信したファイルを保存できなかった
    Delivery,
}

impl FailureKind {
    pub fn severity(self) -> ErrorSeverity {
        match self {
            Self::Application => ErrorSeverity::UserError,
            Self::Transport | Self::Server | Self::EmptyPayload | Self::Delivery => {
                ErrorSeverity::SystemError
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    Acknowledged {
        message: String,
    },
    Failed {
        kind: FailureKind,
        reason: String,
    },
    DeliveredFile {
        bytes: Vec<u8>,
        suggested_name: String,
        saved_to: PathBuf,
    },
}

impl ConversionOutcome {
    pub fn failed(kind: FailureKind, reason: impl Into<String>) -> Self {
        Self::Failed {
            kind,
            reason: reason.into(),
        }
    }

    pub fn acknowledged() -> Self {
        Self::Acknowledged {
            message: ACKNOWLEDGED_MESSAGE.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failed { .. })
    }

    /// ログ・進捗表示用の短いラベル
    pub fn label(&self) -> &'static str {
        match self {
            Self::Acknowledged { .. } => "acknowledged",
            Self::Failed { .. } => "failed",
            Self::DeliveredFile { .. } => "delivered_file",
        }
    }
}

/// 受信ファイルの保存名を生成する
///
/// `converted_excel_<ミリ秒タイムスタンプ>.xlsx`
pub fn delivered_file_name(timestamp_millis: i64) -> String {
    format!(
        "{}{}.{}",
        APP_CONFIG.download.file_prefix, timestamp_millis, APP_CONFIG.download.file_extension
    )
}

/// 現在時刻から保存名を生成する
pub fn delivered_file_name_now() -> String {
    delivered_file_name(chrono::Utc::now().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivered_file_name_format() {
        assert_eq!(
            delivered_file_name(1_733_066_445_123),
            "converted_excel_1733066445123.xlsx"
        );
    }

    #[test]
    fn test_delivered_file_name_now_shape() {
        let name = delivered_file_name_now();
        let digits = name
            .strip_prefix("converted_excel_")
            .and_then(|rest| rest.strip_suffix(".xlsx"))
            .expect("unexpected file name shape");
        assert!(!digits.is_empty());
        assert!(digits.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_failure_severity() {
        assert_eq!(FailureKind::Application.severity(), ErrorSeverity::UserError);
        assert_eq!(FailureKind::Transport.severity(), ErrorSeverity::SystemError);
        assert_eq!(FailureKind::EmptyPayload.severity(), ErrorSeverity::SystemError);
    }

    #[test]
    fn test_outcome_helpers() {
        let failed = ConversionOutcome::failed(FailureKind::Server, "Bad Gateway");
        assert!(!failed.is_success());
        assert_eq!(failed.label(), "failed");
        assert_eq!(ConversionOutcome::acknowledged().label(), "acknowledged");
    }
}
