/// 設定表示コマンド
///
/// 実際に使われるバックエンドURLとその取得元、保存先ディレクトリを表示します。
use crate::commands::result::{CommandResult, ConfigResult};
use crate::config::{BackendUrl, UserConfig};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// 設定表示コマンドを実行
pub async fn execute(backend_flag: Option<&str>) -> Result<CommandResult> {
    let config_path = UserConfig::config_path().context("Failed to locate configuration file")?;
    let user_config = UserConfig::load_from(&config_path)
        .context("Failed to load user configuration. Please check your config.toml file.")?;

    describe(backend_flag, &user_config, config_path)
}

fn describe(
    backend_flag: Option<&str>,
    user_config: &UserConfig,
    config_path: PathBuf,
) -> Result<CommandResult> {
    let backend = BackendUrl::resolve(backend_flag, user_config)
        .context("Failed to resolve the conversion service URL")?;

    Ok(CommandResult::Config(ConfigResult {
        backend_url: backend.base().to_string(),
        backend_source: backend.source(),
        output_dir: user_config.output_dir_or_default(),
        config_path,
        cookie_count: user_config.cookies.len(),
    }))
}
