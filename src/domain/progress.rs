/// ドメイン層: 変換進捗イベント定義
///
/// 送信処理の各段階をイベントとして表現します。
/// プレゼンテーション層はこれらを受け取り、人間向けの進捗表示や
/// 機械向けのJSON行出力に使用します。
use chrono::{DateTime, Utc};
use serde::Serialize;

/// 送信処理の各段階を表すイベント
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum ConversionPhase {
    /// multipartリクエスト送信開始
    Submitting { file_count: usize, total_bytes: u64 },

    /// レスポンスヘッダー受信
    ResponseReceived {
        status: u16,
        content_type: Option<String>,
    },

    /// 受信したスプレッドシートを保存中
    SavingFile { file_name: String, size_bytes: u64 },

    /// 送信完了（結果の種類）
    Completed { outcome: String },
}

/// 変換進捗情報
#[derive(Debug, Clone, Serialize)]
pub struct ConversionProgress {
    pub phase: ConversionPhase,
    #[serde(skip)]
    pub timestamp: DateTime<Utc>,
}

impl ConversionProgress {
    pub fn new(phase: ConversionPhase) -> Self {
        Self {
            phase,
            timestamp: Utc::now(),
        }
    }
}
