/// バックエンドURLの解決
///
/// 優先順位: `--backend-url` フラグ > 環境変数 > ユーザー設定 > 既定値
use crate::config::APP_CONFIG;
use crate::config::error::ConfigError;
use crate::config::user::UserConfig;
use reqwest::Url;
use serde::Serialize;

/// URLの取得元
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendSource {
    Flag,
    Environment,
    UserConfig,
    Default,
}

/// 解決済みのバックエンドURL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendUrl {
    base: String,
    source: BackendSource,
}

impl BackendUrl {
    /// 環境変数を読み取って解決する
    pub fn resolve(flag: Option<&str>, user_config: &UserConfig) -> Result<Self, ConfigError> {
        let env_value = std::env::var(APP_CONFIG.api.backend_url_env).ok();
        Self::resolve_with(flag, env_value.as_deref(), user_config)
    }

    /// 各入力を明示的に受け取って解決する
    ///
    /// 空文字列の環境変数は未設定として扱う。
    pub fn resolve_with(
        flag: Option<&str>,
        env_value: Option<&str>,
        user_config: &UserConfig,
    ) -> Result<Self, ConfigError> {
        let env_value = env_value.filter(|v| !v.trim().is_empty());

        let (raw, source) = if let Some(url) = flag {
            (url, BackendSource::Flag)
        } else if let Some(url) = env_value {
            (url, BackendSource::Environment)
        } else if let Some(url) = user_config.backend_url.as_deref() {
            (url, BackendSource::UserConfig)
        } else {
            (APP_CONFIG.api.default_backend_url, BackendSource::Default)
        };

        parse_backend_url(raw)?;

        Ok(Self {
            base: raw.trim().trim_end_matches('/').to_string(),
            source,
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn source(&self) -> BackendSource {
        self.source
    }

    /// 変換エンドポイントの完全なURL
    pub fn convert_url(&self) -> String {
        format!("{}{}", self.base, APP_CONFIG.api.convert_path)
    }
}

/// http/https の絶対URLであることを検証する
pub fn parse_backend_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|e| {
        ConfigError::validation_error(format!("Invalid backend URL '{}': {}", raw, e))
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::validation_error(format!(
            "Unsupported backend URL scheme '{}' in '{}'. Use http or https",
            other, raw
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_config_with(url: &str) -> UserConfig {
        UserConfig {
            backend_url: Some(url.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_when_nothing_set() {
        let resolved = BackendUrl::resolve_with(None, None, &UserConfig::default()).unwrap();
        assert_eq!(resolved.base(), "http://localhost:3000");
        assert_eq!(resolved.source(), BackendSource::Default);
        assert_eq!(resolved.convert_url(), "http://localhost:3000/convert");
    }

    #[test]
    fn test_precedence_order() {
        let user = user_config_with("http://user.example.com");

        let r = BackendUrl::resolve_with(
            Some("http://flag.example.com"),
            Some("http://env.example.com"),
            &user,
        )
        .unwrap();
        assert_eq!(r.source(), BackendSource::Flag);

        let r = BackendUrl::resolve_with(None, Some("http://env.example.com"), &user).unwrap();
        assert_eq!(r.source(), BackendSource::Environment);
        assert_eq!(r.base(), "http://env.example.com");

        let r = BackendUrl::resolve_with(None, None, &user).unwrap();
        assert_eq!(r.source(), BackendSource::UserConfig);
    }

    #[test]
    fn test_empty_env_is_ignored() {
        let r = BackendUrl::resolve_with(None, Some("  "), &UserConfig::default()).unwrap();
        assert_eq!(r.source(), BackendSource::Default);
    }

    #[test]
    fn test_trailing_slash_removed() {
        let r = BackendUrl::resolve_with(Some("https://api.example.com/"), None, &UserConfig::default())
            .unwrap();
        assert_eq!(r.convert_url(), "https://api.example.com/convert");
    }

    #[test]
    fn test_invalid_flag_is_rejected() {
        let result = BackendUrl::resolve_with(Some("not a url"), None, &UserConfig::default());
        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }
}
