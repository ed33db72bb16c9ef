/// ドメイン層のエラー定義
///
/// ファイル選択と送信の前提条件違反を構造化して定義。
/// 外部クレートのエラーは含まない。サーバー側の失敗は `ConversionOutcome::Failed` として返る。
use crate::error_severity::ErrorSeverity;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// ファイルが見つからない
    #[error("file not found: {path}")]
    FileNotFound { path: String },

    /// ディレクトリが指定された（ファイルが期待される場所）
    #[error("'{path}' is a directory, not a file")]
    NotAFile { path: String },

    /// 変換対象のPDFが選択されていない
    #[error("nothing to convert: no PDF files are selected")]
    NothingToConvert,

    /// 別の送信が処理中
    #[error("a conversion request is already in flight")]
    SubmissionInProgress,
}

impl DomainError {
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    pub fn not_a_file(path: impl Into<String>) -> Self {
        Self::NotAFile { path: path.into() }
    }

    /// エラーの深刻度を返す
    pub fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::UserError
    }

    /// ユーザー向けのヒントメッセージを返す
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::FileNotFound { .. } => {
                Some("Please check the file path and ensure the file exists.")
            }
            Self::NotAFile { .. } => Some("Please specify a file, not a directory."),
            Self::NothingToConvert => {
                Some("Please select at least one PDF file to convert! Only .pdf files are accepted.")
            }
            Self::SubmissionInProgress => Some("Wait for the current conversion to finish."),
        }
    }
}
