/// プレゼンテーション層: 変換進捗の表示
///
/// ドメイン層の`ConversionProgress`を表示用の`DisplayProgress`に変換し、
/// 送信中はスピナー（ビジー表示）を stderr に出す。
use crate::config::BYTES_PER_MB;
use crate::domain::progress::{ConversionPhase, ConversionProgress};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// 進捗表示のカテゴリ
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressCategory {
    Upload,
    Response,
    Download,
    Completed,
}

impl ProgressCategory {
    /// 進捗行の先頭に付ける記号
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Upload => "↑",
            Self::Response => "←",
            Self::Download => "↓",
            Self::Completed => "•",
        }
    }
}

/// プレゼンテーション層用の進捗情報
#[derive(Debug, Clone)]
pub struct DisplayProgress {
    pub message: String,
    pub category: ProgressCategory,
}

impl DisplayProgress {
    pub fn new(message: String, category: ProgressCategory) -> Self {
        Self { message, category }
    }

    /// 表示用の1行（カテゴリ記号 + メッセージ）
    pub fn line(&self) -> String {
        format!("{} {}", self.category.symbol(), self.message)
    }
}

impl From<&ConversionProgress> for DisplayProgress {
    fn from(progress: &ConversionProgress) -> Self {
        match &progress.phase {
            ConversionPhase::Submitting {
                file_count,
                total_bytes,
            } => DisplayProgress::new(
                format!(
                    "Uploading {} PDF file(s) ({:.2} MB)...",
                    file_count,
                    *total_bytes as f64 / BYTES_PER_MB
                ),
                ProgressCategory::Upload,
            ),
            ConversionPhase::ResponseReceived {
                status,
                content_type,
            } => DisplayProgress::new(
                format!(
                    "Response received: HTTP {} ({})",
                    status,
                    content_type.as_deref().unwrap_or("no content type")
                ),
                ProgressCategory::Response,
            ),
            ConversionPhase::SavingFile {
                file_name,
                size_bytes,
            } => DisplayProgress::new(
                format!("Saving {} ({} bytes)", file_name, size_bytes),
                ProgressCategory::Download,
            ),
            ConversionPhase::Completed { outcome } => DisplayProgress::new(
                format!("Finished: {}", outcome),
                ProgressCategory::Completed,
            ),
        }
    }
}

/// 送信中のビジー表示
///
/// stderrが端末でない場合、indicatifは何も描画しない。
pub struct BusyIndicator {
    bar: ProgressBar,
}

impl BusyIndicator {
    pub fn start() -> Self {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);
        bar.set_style(style);
        bar.set_message("Converting PDFs... Please wait");
        bar.enable_steady_tick(Duration::from_millis(80));
        Self { bar }
    }

    pub fn println(&self, line: &str) {
        self.bar.println(line);
    }
}

impl Drop for BusyIndicator {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

/// 進捗イベントを出力する
///
/// * `machine_output = true`: JSON行を stdout に出力
/// * それ以外: スピナーがあればその上に、無ければ stderr に出力
pub fn emit_progress(progress: &ConversionProgress, machine_output: bool, busy: Option<&BusyIndicator>) {
    if machine_output {
        let line = serde_json::json!({
            "progress": &progress.phase,
            "timestamp": progress.timestamp.to_rfc3339(),
        });
        println!("{}", line);
        return;
    }

    let line = DisplayProgress::from(progress).line();
    match busy {
        Some(indicator) => indicator.println(&line),
        None => eprintln!("{}", line),
    }
}
