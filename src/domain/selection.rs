/// ドメインサービス: 変換対象ファイルの選択
///
/// ファイルピッカーの振る舞いを再現する。パスを検査して `FileHandle` に変換し、
/// PDFのメディアタイプを持つものだけを `SelectedFileSet` に残す。
use crate::config::APP_CONFIG;
use crate::domain::error::DomainError;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// 拡張子からメディアタイプを推定する
///
/// ブラウザのファイルピッカーと同様に拡張子のみを見る（大文字小文字は区別しない）。
pub fn media_type_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_ascii_lowercase());

    match extension.as_deref() {
        Some("pdf") => "application/pdf",
        Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        Some("csv") => "text/csv",
        Some("txt") => "text/plain",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}

/// ユーザーが選んだファイル1件
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileHandle {
    pub path: PathBuf,
    pub name: String,
    pub media_type: String,
    pub size_bytes: u64,
}

impl FileHandle {
    /// パスを検査してハンドルを作成する
    ///
    /// メディアタイプは拡張子だけで決まる。PDF以外は選択時に黙って除外されるので、
    /// ファイルシステムには触れずにサイズ0のハンドルを返す。
    ///
    /// # エラー（PDFのみ）
    /// - ファイルが存在しない
    /// - ディレクトリが指定された
    pub fn inspect(file_path: &str) -> Result<Self, DomainError> {
        let path = Path::new(file_path);
        let media_type = media_type_for_path(path);

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_path.to_string());

        let mut handle = Self {
            path: path.to_path_buf(),
            name,
            media_type: media_type.to_string(),
            size_bytes: 0,
        };

        if !handle.is_pdf() {
            return Ok(handle);
        }

        let metadata =
            std::fs::metadata(path).map_err(|_| DomainError::file_not_found(file_path))?;

        if metadata.is_dir() {
            return Err(DomainError::not_a_file(file_path));
        }

        handle.size_bytes = metadata.len();
        Ok(handle)
    }

    pub fn is_pdf(&self) -> bool {
        self.media_type == APP_CONFIG.upload.accepted_media_type
    }
}

/// 選択の結果（残したファイル名と除外したファイル名）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectionReport {
    pub selected: Vec<String>,
    pub dropped: Vec<String>,
}

/// 送信対象のファイル集合
///
/// 選択のたびに丸ごと置き換えられ、変換成功時にクリアされる。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedFileSet {
    files: Vec<FileHandle>,
}

impl SelectedFileSet {
    /// PDF以外を黙って除外して集合を作る
    pub fn from_candidates(candidates: Vec<FileHandle>) -> (Self, SelectionReport) {
        let mut report = SelectionReport::default();
        let mut files = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            if candidate.is_pdf() {
                report.selected.push(candidate.name.clone());
                files.push(candidate);
            } else {
                tracing::debug!(
                    file = %candidate.name,
                    media_type = %candidate.media_type,
                    "dropping non-PDF selection"
                );
                report.dropped.push(candidate.name);
            }
        }

        (Self { files }, report)
    }

    pub fn files(&self) -> &[FileHandle] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.size_bytes).sum()
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }
}

#[cfg(test)]
pub(crate) fn handle(name: &str, media_type: &str) -> FileHandle {
    FileHandle {
        path: PathBuf::from(name),
        name: name.to_string(),
        media_type: media_type.to_string(),
        size_bytes: 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_media_type_for_path() {
        assert_eq!(media_type_for_path(Path::new("scan.pdf")), "application/pdf");
        assert_eq!(media_type_for_path(Path::new("SCAN.PDF")), "application/pdf");
        assert_eq!(media_type_for_path(Path::new("notes.txt")), "text/plain");
        assert_eq!(
            media_type_for_path(Path::new("no_extension")),
            "application/octet-stream"
        );
    }

    #[test]
    fn test_only_pdfs_are_retained() {
        let candidates = vec![
            handle("a.pdf", "application/pdf"),
            handle("b.png", "image/png"),
            handle("c.pdf", "application/pdf"),
            handle("d.pdf", "application/x-pdf"),
        ];

        let (set, report) = SelectedFileSet::from_candidates(candidates);

        assert_eq!(set.len(), 2);
        assert!(set.files().iter().all(|f| f.media_type == "application/pdf"));
        assert_eq!(report.selected, vec!["a.pdf", "c.pdf"]);
        assert_eq!(report.dropped, vec!["b.png", "d.pdf"]);
    }

    #[test]
    fn test_selection_preserves_order() {
        let (set, _) = SelectedFileSet::from_candidates(vec![
            handle("z.pdf", "application/pdf"),
            handle("a.pdf", "application/pdf"),
        ]);
        let names: Vec<_> = set.files().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["z.pdf", "a.pdf"]);
        assert_eq!(set.total_bytes(), 8);
    }

    #[test]
    fn test_inspect_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("invoice.pdf");
        std::fs::write(&path, b"%PDF-1.7").unwrap();

        let handle = FileHandle::inspect(path.to_str().unwrap()).unwrap();
        assert_eq!(handle.name, "invoice.pdf");
        assert_eq!(handle.size_bytes, 8);
        assert!(handle.is_pdf());
    }

    #[test]
    fn test_inspect_missing_and_directory() {
        let temp_dir = TempDir::new().unwrap();

        let missing = temp_dir.path().join("missing.pdf");
        assert!(matches!(
            FileHandle::inspect(missing.to_str().unwrap()),
            Err(DomainError::FileNotFound { .. })
        ));

        let folder = temp_dir.path().join("folder.pdf");
        std::fs::create_dir(&folder).unwrap();
        assert!(matches!(
            FileHandle::inspect(folder.to_str().unwrap()),
            Err(DomainError::NotAFile { .. })
        ));
    }

    #[test]
    fn test_inspect_non_pdf_skips_filesystem_checks() {
        let temp_dir = TempDir::new().unwrap();

        let missing = temp_dir.path().join("notes.txt");
        let handle = FileHandle::inspect(missing.to_str().unwrap()).unwrap();
        assert_eq!(handle.name, "notes.txt");
        assert!(!handle.is_pdf());

        let directory = FileHandle::inspect(temp_dir.path().to_str().unwrap()).unwrap();
        assert_eq!(directory.media_type, "application/octet-stream");
        assert!(!directory.is_pdf());
    }
}
