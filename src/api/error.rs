use std::io;
use std::path::PathBuf;
/// インフラ層のエラー定義
///
/// 変換サービスとの通信、送信ファイルの読み込み、受信ファイルの保存で
/// 発生するエラーを構造化して定義。#[source] で原因連鎖を保持する。
///
/// ワークフロー内ではこれらは `ConversionOutcome::Failed` の理由文字列になるため、
/// Display に原因の説明を含める。
use crate::error_severity::ErrorSeverity;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InfraError {
    /// ネットワークエラー（レスポンスが得られなかった）
    #[error("network error: {message}")]
    Network { message: String },

    /// リクエストを組み立てられなかった
    #[error("invalid request: {message}")]
    InvalidRequest { message: String },

    /// 送信対象ファイルの読み込み失敗
    #[error("failed to read '{}': {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 受信ファイルの保存失敗
    #[error("failed to save '{}': {source}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl InfraError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    pub fn file_read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    pub fn file_write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FileWrite {
            path: path.into(),
            source,
        }
    }

    /// エラーの深刻度を返す
    pub fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::SystemError
    }
}
