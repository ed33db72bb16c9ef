//! プレゼンテーション層が使用するエラー深刻度
//!
//! 終了コードと `--machine` 出力の `severity` フィールドの決定に使用される。
//! 内側層（domain, api, config）はこのモジュールに依存してよいが、
//! このモジュールは他のモジュールに依存しない。

use serde::Serialize;
use std::fmt;

/// エラーの深刻度と対応する終了コード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorSeverity {
    /// ユーザーが直せるエラー（PDFが選択されていない、サーバーが内容を拒否した等）
    ///
    /// **Exit Code: 1**
    UserError,

    /// 設定エラー（バックエンドURLが不正、設定ファイルが破損している等）
    ///
    /// **Exit Code: 2**
    ConfigError,

    /// システムエラー（接続失敗、サーバーエラー、保存失敗等）
    ///
    /// **Exit Code: 3**
    SystemError,
}

impl ErrorSeverity {
    /// 対応する Unix 終了コードを返す
    pub fn exit_code(self) -> i32 {
        match self {
            Self::UserError => 1,
            Self::ConfigError => 2,
            Self::SystemError => 3,
        }
    }
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UserError => write!(f, "user error"),
            Self::ConfigError => write!(f, "configuration error"),
            Self::SystemError => write!(f, "system error"),
        }
    }
}
