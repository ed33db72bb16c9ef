/// プレゼンテーション層: ユーザー入力処理
///
/// `convert --stdin` で標準入力から渡されるファイルパス一覧を読み取ります。
use anyhow::{Context, Result};
use std::io::{self, BufRead};

/// 標準入力からファイルパスを1行1件で読み取る
pub fn read_file_list_from_stdin() -> Result<Vec<String>> {
    let stdin = io::stdin();
    read_file_list(stdin.lock())
}

/// 任意のリーダーからファイルパスを読み取る
///
/// 前後の空白を除去し、空行は無視する。
pub fn read_file_list<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut paths = Vec::new();

    for line in reader.lines() {
        let line = line.context("Failed to read file list from stdin")?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            paths.push(trimmed.to_string());
        }
    }

    Ok(paths)
}
