/// コマンド実行結果を表す型
///
/// 各コマンドはこの型を返し、プレゼンテーション層で
/// 人間向けと機械向けの出力フォーマットを決定する。
use crate::config::BackendSource;
use crate::domain::outcome::{ConversionOutcome, FailureKind};
use crate::domain::selection::SelectionReport;
use serde::Serialize;
use std::path::PathBuf;

/// コマンド実行結果の統一型
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum CommandResult {
    Convert(ConvertResult),
    Config(ConfigResult),
}

/// 変換コマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct ConvertResult {
    /// 送信先URL
    pub convert_url: String,
    /// 選択されたファイルと除外されたファイル
    pub selection: SelectionReport,
    /// 終端結果
    pub outcome: OutcomeReport,
}

/// 出力用の終端結果（バイト列そのものは含めない）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum OutcomeReport {
    Acknowledged {
        message: String,
    },
    Failed {
        kind: FailureKind,
        reason: String,
    },
    DeliveredFile {
        file_name: String,
        saved_to: PathBuf,
        size_bytes: u64,
    },
}

impl From<&ConversionOutcome> for OutcomeReport {
    fn from(outcome: &ConversionOutcome) -> Self {
        match outcome {
            ConversionOutcome::Acknowledged { message } => Self::Acknowledged {
                message: message.clone(),
            },
            ConversionOutcome::Failed { kind, reason } => Self::Failed {
                kind: *kind,
                reason: reason.clone(),
            },
            ConversionOutcome::DeliveredFile {
                bytes,
                suggested_name,
                saved_to,
            } => Self::DeliveredFile {
                file_name: suggested_name.clone(),
                saved_to: saved_to.clone(),
                size_bytes: bytes.len() as u64,
            },
        }
    }
}

/// 設定表示コマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct ConfigResult {
    pub backend_url: String,
    pub backend_source: BackendSource,
    pub output_dir: PathBuf,
    pub config_path: PathBuf,
    /// 値は表示しない（セッショントークンを含み得るため）
    pub cookie_count: usize,
}

impl CommandResult {
    /// 終了コード（変換失敗時は失敗種別の深刻度に従う）
    pub fn exit_code(&self) -> i32 {
        match self {
            CommandResult::Convert(ConvertResult {
                outcome: OutcomeReport::Failed { kind, .. },
                ..
            }) => kind.severity().exit_code(),
            _ => 0,
        }
    }

    /// 成功メッセージを取得（人間向け出力用）
    pub fn success_message(&self) -> String {
        match self {
            CommandResult::Convert(r) => match &r.outcome {
                OutcomeReport::Acknowledged { message } => message.clone(),
                OutcomeReport::DeliveredFile { .. } => "File downloaded successfully!".to_string(),
                OutcomeReport::Failed { .. } => String::new(),
            },
            CommandResult::Config(_) => String::new(),
        }
    }
}
