/// プレゼンテーション層: コマンド結果の出力
///
/// コマンド実行結果をユーザー向け（stderr）または機械向け（stdout のJSON）で出力する。
/// 変換結果の通知（成功・失敗・ダウンロード完了）もここで行う。
use crate::commands::result::{CommandResult, ConvertResult, OutcomeReport};
use anyhow::Result;

/// コマンド結果を適切な形式で出力する
pub fn output_result(result: &CommandResult, machine_output: bool) -> Result<()> {
    if machine_output {
        println!("{}", serde_json::to_string(&machine_json(result))?);
    } else {
        output_human_readable(result);
    }

    Ok(())
}

/// 人間向けの詳細メッセージを出力（stderr）
fn output_human_readable(result: &CommandResult) {
    match result {
        CommandResult::Convert(r) => output_convert(result, r),
        CommandResult::Config(r) => {
            eprintln!("Backend URL:   {} (from {:?})", r.backend_url, r.backend_source);
            eprintln!("Output dir:    {}", r.output_dir.display());
            eprintln!("Config file:   {}", r.config_path.display());
            eprintln!("Cookies:       {} configured", r.cookie_count);
        }
    }
}

fn output_convert(result: &CommandResult, r: &ConvertResult) {
    if !r.selection.dropped.is_empty() {
        eprintln!("Skipped non-PDF file(s): {}", r.selection.dropped.join(", "));
    }

    match &r.outcome {
        OutcomeReport::Acknowledged { .. } => {
            eprintln!("✓ {}", result.success_message());
        }
        OutcomeReport::DeliveredFile {
            file_name,
            saved_to,
            size_bytes,
        } => {
            eprintln!("✓ {}", result.success_message());
            eprintln!("  Name:  {}", file_name);
            eprintln!("  Saved: {}", saved_to.display());
            eprintln!("  Size:  {} bytes", size_bytes);
        }
        OutcomeReport::Failed { reason, .. } => {
            eprintln!("✗ Conversion failed: {}", reason);
            eprintln!("  Your selection was kept; run the same command again to retry.");
        }
    }
}

/// 機械可読JSONを構築
fn machine_json(result: &CommandResult) -> serde_json::Value {
    match result {
        CommandResult::Convert(r) => {
            let success = !matches!(r.outcome, OutcomeReport::Failed { .. });
            serde_json::json!({
                "success": success,
                "command": "convert",
                "convert_url": r.convert_url,
                "selected_files": r.selection.selected,
                "dropped_files": r.selection.dropped,
                "result": r.outcome,
            })
        }
        CommandResult::Config(r) => serde_json::json!({
            "success": true,
            "command": "config",
            "backend_url": r.backend_url,
            "backend_source": r.backend_source,
            "output_dir": r.output_dir,
            "config_path": r.config_path,
            "cookie_count": r.cookie_count,
        }),
    }
}

/// エラーを出力する
///
/// * 通常: エラーメッセージ、原因チェーン、ヒントを stderr に出力
/// * `--machine`: exit_code と hint を含むJSONオブジェクトを stdout に出力
pub fn output_error(error: &anyhow::Error, exit_code: i32, hint: Option<&str>, machine_output: bool) {
    if machine_output {
        let causes: Vec<String> = error.chain().skip(1).map(|c| c.to_string()).collect();
        let json = serde_json::json!({
            "success": false,
            "error": error.to_string(),
            "causes": causes,
            "exit_code": exit_code,
            "hint": hint,
        });
        println!("{}", json);
        return;
    }

    eprintln!("Error: {}", error);

    let chain: Vec<_> = error.chain().skip(1).collect();
    if !chain.is_empty() {
        eprintln!("\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            eprintln!("  {}: {}", i + 1, cause);
        }
    }

    if let Some(hint) = hint {
        eprintln!("\nHint: {}", hint);
    }
}
