use crate::api::client::ApiClient;
use crate::commands::result::{CommandResult, ConvertResult, OutcomeReport};
use crate::config::{BackendUrl, UserConfig};
use crate::delivery::FileDownloadSink;
use crate::domain::selection::FileHandle;
use crate::domain::workflow::UploadWorkflow;
use crate::presentation::input;
use crate::presentation::progress::{BusyIndicator, emit_progress};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// 変換コマンドのオプション
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    pub files: Vec<String>,
    pub from_stdin: bool,
    pub output_dir: Option<PathBuf>,
    pub backend_url: Option<String>,
    pub show_progress: bool,
    pub machine_output: bool,
}

/// 変換コマンドを実行する
///
/// 指定されたファイルからPDFだけを選択し、変換サービスへ送信する。
///
/// # エラー
/// アプリケーション層として anyhow::Result を返し、設定・ドメイン・インフラ層の
/// エラーを集約する。サーバー側の失敗はエラーではなく `OutcomeReport::Failed` として返る。
pub async fn execute(options: ConvertOptions) -> Result<CommandResult> {
    let user_config = UserConfig::load()
        .context("Failed to load user configuration. Please check your config.toml file.")?;

    execute_with_config(options, &user_config).await
}

pub async fn execute_with_config(
    options: ConvertOptions,
    user_config: &UserConfig,
) -> Result<CommandResult> {
    let backend = BackendUrl::resolve(options.backend_url.as_deref(), user_config)
        .context("Failed to resolve the conversion service URL")?;

    let mut paths = options.files;
    if options.from_stdin {
        paths.extend(input::read_file_list_from_stdin()?);
    }

    let candidates = paths
        .iter()
        .map(|path| FileHandle::inspect(path))
        .collect::<Result<Vec<_>, _>>()
        .context("File selection failed")?;

    let client =
        ApiClient::new(&backend, &user_config.cookies).context("Failed to create API client")?;
    let convert_url = client.convert_url().to_string();

    let output_dir = options
        .output_dir
        .unwrap_or_else(|| user_config.output_dir_or_default());
    let sink = FileDownloadSink::new(output_dir);

    let mut workflow = UploadWorkflow::new(client, sink);
    let selection = workflow.select_files(candidates);

    let machine_output = options.machine_output;
    let show_progress = options.show_progress;
    let busy = if machine_output || workflow.selection().is_empty() {
        None
    } else {
        Some(BusyIndicator::start())
    };

    let outcome = workflow
        .submit_with_progress(|progress| {
            if show_progress {
                emit_progress(&progress, machine_output, busy.as_ref());
            }
        })
        .await
        .context("Conversion was not submitted")?;
    drop(busy);

    Ok(CommandResult::Convert(ConvertResult {
        convert_url,
        selection,
        outcome: OutcomeReport::from(&outcome),
    }))
}
