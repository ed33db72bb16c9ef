mod api;
mod cli;
mod commands;
mod config;
mod delivery;
mod domain;
mod error_severity;
mod presentation;

use api::error::InfraError;
use clap::Parser;
use config::APP_CONFIG;
use config::error::ConfigError;
use domain::error::DomainError;
use presentation::output;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();
    init_logging(cli.verbose);

    let machine_output = cli.machine;

    match cli::dispatch(cli).await {
        Ok(result) => {
            if let Err(e) = output::output_result(&result, machine_output) {
                handle_error(e, machine_output);
            }
            let exit_code = result.exit_code();
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Err(e) => handle_error(e, machine_output),
    }
}

/// ログ出力を初期化する（stderr）
///
/// `--verbose` は RUST_LOG より優先される。
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("excelify=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(APP_CONFIG.logging.default_level))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// エラーハンドリングとユーザーへの表示
///
/// anyhow::Error から元のエラー型を downcast して、
/// エラーの種類に応じた exit code とヒントを決定する。
fn handle_error(error: anyhow::Error, machine_output: bool) -> ! {
    let exit_code = determine_exit_code(&error);
    let hint = get_error_hint(&error);

    output::output_error(&error, exit_code, hint.as_deref(), machine_output);

    std::process::exit(exit_code);
}

/// エラーチェーンから適切な終了コードを決定
fn determine_exit_code(error: &anyhow::Error) -> i32 {
    for cause in error.chain() {
        if let Some(domain_err) = cause.downcast_ref::<DomainError>() {
            return domain_err.severity().exit_code();
        }

        if let Some(infra_err) = cause.downcast_ref::<InfraError>() {
            return infra_err.severity().exit_code();
        }

        if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
            return config_err.severity().exit_code();
        }
    }

    1
}

/// エラーに対するユーザー向けヒントを取得
fn get_error_hint(error: &anyhow::Error) -> Option<String> {
    for cause in error.chain() {
        if let Some(domain_err) = cause.downcast_ref::<DomainError>()
            && let Some(hint) = domain_err.hint()
        {
            return Some(hint.to_string());
        }

        if let Some(config_err) = cause.downcast_ref::<ConfigError>()
            && let Some(hint) = config_err.hint()
        {
            return Some(hint.to_string());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_exit_code_for_wrapped_domain_error() {
        let error = Err::<(), _>(DomainError::NothingToConvert)
            .context("Conversion was not submitted")
            .context("Convert command failed")
            .unwrap_err();

        assert_eq!(determine_exit_code(&error), 1);
        assert!(get_error_hint(&error).unwrap().contains("PDF"));
    }

    #[test]
    fn test_exit_code_for_config_error() {
        let error = Err::<(), _>(ConfigError::validation_error("bad url"))
            .context("Failed to resolve the conversion service URL")
            .unwrap_err();

        assert_eq!(determine_exit_code(&error), 2);
        assert!(get_error_hint(&error).is_some());
    }

    #[test]
    fn test_exit_code_for_infra_error() {
        let error = Err::<(), _>(InfraError::network("refused"))
            .context("Failed to create API client")
            .unwrap_err();

        assert_eq!(determine_exit_code(&error), 3);
        assert!(get_error_hint(&error).is_none());
    }

    #[test]
    fn test_exit_code_for_unknown_error() {
        let error = anyhow::anyhow!("something else");
        assert_eq!(determine_exit_code(&error), 1);
    }
}
