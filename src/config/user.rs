/// ユーザー設定モジュール
///
/// 実行時にユーザーディレクトリから読み込まれる動的設定を管理します。
/// Windows: C:\Users\<User>\AppData\Roaming\excelify\config.toml
/// macOS:   /Users/<User>/Library/Application Support/excelify/config.toml
/// Linux:   /home/<user>/.config/excelify/config.toml
///
/// 初回起動時にテンプレートから自動的にconfig.tomlを作成します。
use crate::config::backend::parse_backend_url;
use crate::config::error::ConfigError;
use crate::config::permissions::set_config_file_permissions;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// ユーザー設定
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UserConfig {
    /// 変換サービスのベースURL（環境変数・CLIフラグが優先）
    #[serde(default)]
    pub backend_url: Option<String>,

    /// 変換結果の保存先ディレクトリ（未指定時はカレントディレクトリ）
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// リクエストに付与するCookie（"name=value" 形式）
    #[serde(default)]
    pub cookies: Vec<String>,
}

impl UserConfig {
    /// ユーザー設定ファイルのパスを取得
    ///
    /// # Errors
    /// 設定ディレクトリが取得できない場合に ConfigError::DirectoryNotFound を返します。
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .ok_or_else(|| ConfigError::directory_not_found("Failed to get user config directory"))
            .map(|config_dir| config_dir.join("excelify").join("config.toml"))
    }

    /// ユーザー設定を読み込む
    ///
    /// 設定ファイルが存在しない場合はテンプレートから作成します。
    /// 読み込み後、自動的に検証を実行します（Fail Fast）。
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// 指定パスからユーザー設定を読み込む
    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            Self::create_default_config(config_path)?;
        }

        let content = fs::read_to_string(config_path).map_err(|e| {
            ConfigError::file_system(
                format!("Failed to read config file: {}", config_path.display()),
                e,
            )
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            ConfigError::parse_error(
                format!("Failed to parse config file ({})", config_path.display()),
                e,
            )
        })?;

        config.validate()?;

        Ok(config)
    }

    /// テンプレートから設定ファイルを作成
    fn create_default_config(config_path: &Path) -> Result<(), ConfigError> {
        Self::ensure_parent_dir(config_path)?;

        fs::write(config_path, Self::default_toml_content()).map_err(|e| {
            ConfigError::file_system(
                format!("Failed to create default config file: {}", config_path.display()),
                e,
            )
        })?;

        // 所有者のみ読み書き可能にする
        set_config_file_permissions(config_path)?;

        tracing::debug!(path = %config_path.display(), "created default user config");
        Ok(())
    }

    /// テンプレートTOML
    ///
    /// すべての項目はコメントアウトされており、デフォルト値と同じ意味になる。
    fn default_toml_content() -> &'static str {
        r#"# excelify - User Configuration
#
# Base URL of the conversion service.
# EXCELIFY_BACKEND_URL and --backend-url take precedence over this value.
# backend_url = "http://localhost:3000"

# Directory where converted spreadsheets are saved (default: current directory)
# output_dir = "/home/me/Downloads"

# Cookies sent with every conversion request, in "name=value" form
cookies = []
"#
    }

    fn ensure_parent_dir(config_path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ConfigError::file_system(
                    format!("Failed to create config directory: {}", parent.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }

    /// ユーザー設定を検証
    ///
    /// # 検証内容
    /// - backend_url: http/https の絶対URLであること
    /// - cookies: 各要素が "name=value" 形式で、nameが空でないこと
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(url) = &self.backend_url {
            parse_backend_url(url)?;
        }

        for cookie in &self.cookies {
            Self::validate_cookie(cookie)?;
        }

        Ok(())
    }

    fn validate_cookie(cookie: &str) -> Result<(), ConfigError> {
        match cookie.split_once('=') {
            Some((name, _)) if !name.trim().is_empty() => Ok(()),
            _ => Err(ConfigError::validation_error(format!(
                "Invalid cookie '{}'. Expected the form name=value",
                cookie
            ))),
        }
    }

    /// 保存先ディレクトリ（未設定時はカレントディレクトリ）
    pub fn output_dir_or_default(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let path = UserConfig::config_path().expect("Failed to get config path");
        assert!(path.to_string_lossy().contains("excelify"));
        assert!(path.to_string_lossy().ends_with("config.toml"));
    }

    #[test]
    fn test_load_creates_default_if_not_exists() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let config = UserConfig::load_from(&config_path).expect("default config should load");

        assert!(config_path.exists(), "Config file should be created");
        assert_eq!(config, UserConfig::default());

        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("EXCELIFY_BACKEND_URL"));
    }

    #[test]
    fn test_load_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(
            &config_path,
            r#"backend_url = "https://convert.example.com"
output_dir = "/tmp/sheets"
cookies = ["session=abc123"]
"#,
        )
        .unwrap();

        let loaded = UserConfig::load_from(&config_path).expect("Failed to load config");
        assert_eq!(
            loaded,
            UserConfig {
                backend_url: Some("https://convert.example.com".to_string()),
                output_dir: Some(PathBuf::from("/tmp/sheets")),
                cookies: vec!["session=abc123".to_string()],
            }
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_default_config_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        UserConfig::load_from(&config_path).unwrap();

        let mode = fs::metadata(&config_path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_validate_rejects_non_http_url() {
        let config = UserConfig {
            backend_url: Some("ftp://files.example.com".to_string()),
            ..Default::default()
        };

        match config.validate() {
            Err(ConfigError::ValidationError { message }) => assert!(message.contains("ftp")),
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_malformed_cookie() {
        let config = UserConfig {
            cookies: vec!["=value".to_string()],
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError { .. })
        ));

        let config = UserConfig {
            cookies: vec!["novalue".to_string()],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "backend_url = [").unwrap();

        assert!(matches!(
            UserConfig::load_from(&config_path),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn test_output_dir_default() {
        assert_eq!(UserConfig::default().output_dir_or_default(), PathBuf::from("."));
    }
}
