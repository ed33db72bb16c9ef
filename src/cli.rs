use crate::commands::{self, CommandResult, convert::ConvertOptions};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Convert PDF tables into Excel spreadsheets using a conversion service
#[derive(Debug, Parser)]
#[command(name = "excelify", version, about)]
pub struct Cli {
    /// Output machine-readable JSON to stdout (for scripting)
    #[arg(long, global = true)]
    pub machine: bool,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Base URL of the conversion service (overrides EXCELIFY_BACKEND_URL and config.toml)
    #[arg(long, global = true, value_name = "URL")]
    pub backend_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Upload PDF files and download the converted spreadsheet
    Convert {
        /// Files to convert (non-PDF files are skipped)
        #[arg(value_name = "FILE")]
        files: Vec<String>,

        /// Also read file paths from standard input, one per line
        #[arg(long)]
        stdin: bool,

        /// Directory to save the spreadsheet in
        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Show progress for each phase of the request
        #[arg(long)]
        progress: bool,
    },

    /// Show the effective configuration
    Config,
}

/// 解析済みのCLI引数を適切なコマンドにディスパッチする
pub async fn dispatch(cli: Cli) -> Result<CommandResult> {
    match cli.command {
        Command::Convert {
            files,
            stdin,
            output_dir,
            progress,
        } => {
            let options = ConvertOptions {
                files,
                from_stdin: stdin,
                output_dir,
                backend_url: cli.backend_url,
                show_progress: progress,
                machine_output: cli.machine,
            };
            commands::convert::execute(options)
                .await
                .context("Convert command failed")
        }
        Command::Config => commands::config::execute(cli.backend_url.as_deref())
            .await
            .context("Config command failed"),
    }
}
