/// アプリケーション設定モジュール
///
/// コンパイル時定数として埋め込まれる静的設定を管理します。
/// これらの設定は実行時には変更できません。
/// 実行時に変更可能な値（バックエンドURL等）は `UserConfig` と環境変数で上書きします。

/// アプリケーション全体の設定
#[derive(Debug, Clone, Copy)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub upload: UploadConfig,
    pub download: DownloadConfig,
    pub logging: LoggingConfig,
}

/// 変換サービス関連の設定
#[derive(Debug, Clone, Copy)]
pub struct ApiConfig {
    /// 何も指定されなかった場合のバックエンドURL
    pub default_backend_url: &'static str,

    /// バックエンドURLを上書きする環境変数名
    pub backend_url_env: &'static str,

    /// 変換エンドポイントのパス
    pub convert_path: &'static str,
}

/// アップロード関連の設定
#[derive(Debug, Clone, Copy)]
pub struct UploadConfig {
    /// multipartのフィールド名（全ファイル共通）
    pub field_name: &'static str,

    /// 選択を許可するメディアタイプ
    pub accepted_media_type: &'static str,
}

/// ダウンロード（変換結果の保存）関連の設定
#[derive(Debug, Clone, Copy)]
pub struct DownloadConfig {
    /// 保存ファイル名の接頭辞
    pub file_prefix: &'static str,

    /// 保存ファイルの拡張子
    pub file_extension: &'static str,
}

/// ロギング関連の設定
#[derive(Debug, Clone, Copy)]
pub struct LoggingConfig {
    /// RUST_LOG が未設定の場合のフィルタ
    pub default_level: &'static str,
}

/// グローバル設定定数
pub const APP_CONFIG: AppConfig = AppConfig {
    api: ApiConfig {
        default_backend_url: "http://localhost:3000",
        backend_url_env: "EXCELIFY_BACKEND_URL",
        convert_path: "/convert",
    },
    upload: UploadConfig {
        field_name: "pdfs",
        accepted_media_type: "application/pdf",
    },
    download: DownloadConfig {
        file_prefix: "converted_excel_",
        file_extension: "xlsx",
    },
    logging: LoggingConfig {
        default_level: "warn",
    },
};

/// 1MBあたりのバイト数（表示用）
pub const BYTES_PER_MB: f64 = 1_048_576.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_constants() {
        assert_eq!(APP_CONFIG.api.default_backend_url, "http://localhost:3000");
        assert_eq!(APP_CONFIG.api.convert_path, "/convert");
        assert_eq!(APP_CONFIG.upload.field_name, "pdfs");
        assert_eq!(APP_CONFIG.upload.accepted_media_type, "application/pdf");
    }
}
