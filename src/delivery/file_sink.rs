/// ディレクトリへの保存
///
/// 一時ファイルに書き込んでから提案名へ永続化する。途中で失敗した場合、
/// 一時ファイルは `NamedTempFile` のDropで削除され、中途半端なファイルは残らない。
use crate::api::error::InfraError;
use crate::domain::workflow::DownloadSink;
use async_trait::async_trait;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

pub struct FileDownloadSink {
    dir: PathBuf,
}

impl FileDownloadSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn write_file(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf, InfraError> {
        std::fs::create_dir_all(dir).map_err(|e| InfraError::file_write(dir, e))?;

        let target = dir.join(file_name);
        let mut temp = NamedTempFile::new_in(dir).map_err(|e| InfraError::file_write(dir, e))?;

        temp.write_all(bytes)
            .and_then(|_| temp.as_file().sync_all())
            .map_err(|e| InfraError::file_write(temp.path(), e))?;

        temp.persist(&target)
            .map_err(|e| InfraError::file_write(&target, e.error))?;

        Ok(target)
    }
}

#[async_trait]
impl DownloadSink for FileDownloadSink {
    type Error = InfraError;

    async fn deliver(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, InfraError> {
        let dir = self.dir.clone();
        let file_name = file_name.to_string();
        let bytes = bytes.to_vec();

        let saved = tokio::task::spawn_blocking(move || Self::write_file(&dir, &file_name, &bytes))
            .await
            .map_err(|e| InfraError::file_write(&self.dir, std::io::Error::other(e)))??;

        debug!(path = %saved.display(), "saved converted spreadsheet");
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<_> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[tokio::test]
    async fn test_deliver_writes_named_file() {
        let temp_dir = TempDir::new().unwrap();
        let sink = FileDownloadSink::new(temp_dir.path());

        let saved = sink
            .deliver("converted_excel_1.xlsx", b"PK\x03\x04")
            .await
            .unwrap();

        assert_eq!(saved, temp_dir.path().join("converted_excel_1.xlsx"));
        assert_eq!(std::fs::read(&saved).unwrap(), b"PK\x03\x04");
        assert_eq!(entries(temp_dir.path()), vec!["converted_excel_1.xlsx"]);
    }

    #[tokio::test]
    async fn test_deliver_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("sheets").join("2024");
        let sink = FileDownloadSink::new(&nested);

        let saved = sink.deliver("out.xlsx", b"data").await.unwrap();
        assert!(saved.starts_with(&nested));
    }

    #[tokio::test]
    async fn test_failed_persist_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        // 保存先と同名のディレクトリがあると永続化に失敗する
        std::fs::create_dir(temp_dir.path().join("taken.xlsx")).unwrap();
        std::fs::write(temp_dir.path().join("taken.xlsx").join("keep"), b"x").unwrap();
        let sink = FileDownloadSink::new(temp_dir.path());

        let result = sink.deliver("taken.xlsx", b"data").await;

        assert!(matches!(result, Err(InfraError::FileWrite { .. })));
        assert_eq!(entries(temp_dir.path()), vec!["taken.xlsx"]);
    }
}
