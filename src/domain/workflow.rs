/// ドメインサービス: アップロードワークフロー
///
/// 選択済みPDFを変換サービスへ送信し、レスポンスを分類して
/// 3種類の終端結果（確認・失敗・ファイル受信）のいずれかを返す。
///
/// HTTP通信とファイル保存はトレイト越しに行い、このモジュールは
/// reqwest やファイルシステムに直接依存しない。
use crate::domain::error::DomainError;
use crate::domain::outcome::{
    ConversionOutcome, DEFAULT_APPLICATION_ERROR, DEFAULT_SERVER_ERROR, EMPTY_FILE_REASON,
    FailureKind, delivered_file_name_now,
};
use crate::domain::progress::{ConversionPhase, ConversionProgress};
use crate::domain::selection::{FileHandle, SelectedFileSet, SelectionReport};
use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

/// 変換サービスからのHTTPレスポンス
///
/// 本文は分類に必要な場合だけ読まれる。非2xxかつ非JSONでは `None`、
/// 非2xxのJSONで本文の読み取りに失敗した場合も `None` になる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub status_text: String,
    pub content_type: Option<String>,
    pub body: Option<Vec<u8>>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// 分類に本文が必要か（非2xxかつ非JSONでは不要）
    pub fn needs_body(&self) -> bool {
        self.is_success() || self.is_json()
    }

    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.contains("application/json"))
    }
}

/// 変換リクエストの送信手段
#[async_trait]
pub trait ConversionTransport: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// ファイルをmultipartで送信し、レスポンス全体を返す
    ///
    /// レスポンスが得られなかった場合のみ `Err` を返す（非2xxは `Ok`）。
    async fn send(&self, files: &[FileHandle]) -> Result<RawResponse, Self::Error>;
}

/// 受信したスプレッドシートをユーザーに渡す手段
#[async_trait]
pub trait DownloadSink: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// 保存したファイルのパスを返す
    async fn deliver(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, Self::Error>;
}

/// レスポンス分類の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// これ以上の処理なしで結果が確定した
    Resolved(ConversionOutcome),
    /// 保存が必要な非空のバイナリ本文
    Binary(Vec<u8>),
}

/// ステータス→Content-Typeの順でレスポンスを分類する
pub fn classify_response(response: RawResponse) -> Classification {
    if !response.is_success() {
        return Classification::Resolved(classify_server_error(&response));
    }

    let is_json = response.is_json();
    let body = response.body.unwrap_or_default();

    if is_json {
        return Classification::Resolved(classify_json_body(&body));
    }

    if body.is_empty() {
        return Classification::Resolved(ConversionOutcome::failed(
            FailureKind::EmptyPayload,
            EMPTY_FILE_REASON,
        ));
    }

    Classification::Binary(body)
}

fn classify_server_error(response: &RawResponse) -> ConversionOutcome {
    let parsed = if response.is_json() {
        response
            .body
            .as_deref()
            .and_then(|body| serde_json::from_slice::<Value>(body).ok())
    } else {
        None
    };

    let reason = match parsed {
        Some(body) => truthy_error(&body).unwrap_or_else(|| DEFAULT_SERVER_ERROR.to_string()),
        None if response.status_text.trim().is_empty() => format!("HTTP {}", response.status),
        None => response.status_text.clone(),
    };

    ConversionOutcome::failed(FailureKind::Server, reason)
}

fn classify_json_body(body: &[u8]) -> ConversionOutcome {
    let data: Value = match serde_json::from_slice(body) {
        Ok(data) => data,
        Err(e) => {
            return ConversionOutcome::failed(
                FailureKind::Application,
                format!("invalid JSON response: {}", e),
            );
        }
    };

    let success = data.get("success").is_some_and(is_truthy);
    if success {
        ConversionOutcome::acknowledged()
    } else {
        let reason = truthy_error(&data).unwrap_or_else(|| DEFAULT_APPLICATION_ERROR.to_string());
        ConversionOutcome::failed(FailureKind::Application, reason)
    }
}

/// `error` フィールドが真値ならその文字列表現を返す
fn truthy_error(body: &Value) -> Option<String> {
    body.get("error").filter(|v| is_truthy(v)).map(|v| match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}

/// JavaScript の真偽判定
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// ワークフローの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState<'a> {
    Idle,
    Submitting,
    Done(&'a ConversionOutcome),
}

/// 送信中フラグの取得
///
/// Dropで必ず解放されるため、パニックやFutureの破棄でもフラグが残らない。
struct InFlight<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

pub struct UploadWorkflow<T, S> {
    transport: T,
    sink: S,
    selection: SelectedFileSet,
    last_outcome: Option<ConversionOutcome>,
    busy: AtomicBool,
}

impl<T, S> UploadWorkflow<T, S>
where
    T: ConversionTransport,
    S: DownloadSink,
{
    pub fn new(transport: T, sink: S) -> Self {
        Self {
            transport,
            sink,
            selection: SelectedFileSet::default(),
            last_outcome: None,
            busy: AtomicBool::new(false),
        }
    }

    /// 選択を丸ごと置き換える（PDF以外は黙って除外）
    ///
    /// 前回の結果は破棄され、状態は `Idle` に戻る。
    pub fn select_files(&mut self, candidates: Vec<FileHandle>) -> SelectionReport {
        let (selection, report) = SelectedFileSet::from_candidates(candidates);
        debug!(
            selected = report.selected.len(),
            dropped = report.dropped.len(),
            "replaced file selection"
        );
        self.selection = selection;
        self.last_outcome = None;
        report
    }

    pub fn selection(&self) -> &SelectedFileSet {
        &self.selection
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn state(&self) -> WorkflowState<'_> {
        if self.is_busy() {
            return WorkflowState::Submitting;
        }
        match &self.last_outcome {
            Some(outcome) => WorkflowState::Done(outcome),
            None => WorkflowState::Idle,
        }
    }

    pub async fn submit(&mut self) -> Result<ConversionOutcome, DomainError> {
        self.submit_with_progress(|_| {}).await
    }

    /// 選択済みファイルを送信し、終端結果を返す
    ///
    /// # エラー
    /// 前提条件を満たさない場合のみ `Err` を返し、リクエストは発行しない。
    /// - 選択が空: `NothingToConvert`
    /// - 送信中: `SubmissionInProgress`
    ///
    /// サーバー・通信・保存の失敗はすべて `Ok(ConversionOutcome::Failed)` になる。
    pub async fn submit_with_progress<F>(
        &mut self,
        mut on_progress: F,
    ) -> Result<ConversionOutcome, DomainError>
    where
        F: FnMut(ConversionProgress) + Send,
    {
        if self.state() == WorkflowState::Submitting {
            return Err(DomainError::SubmissionInProgress);
        }
        if self.selection.is_empty() {
            return Err(DomainError::NothingToConvert);
        }

        let _in_flight = InFlight::acquire(&self.busy).ok_or(DomainError::SubmissionInProgress)?;

        on_progress(ConversionProgress::new(ConversionPhase::Submitting {
            file_count: self.selection.len(),
            total_bytes: self.selection.total_bytes(),
        }));
        info!(files = self.selection.len(), "submitting conversion request");

        let outcome = match self.transport.send(self.selection.files()).await {
            Err(e) => {
                warn!(error = %e, "conversion request did not complete");
                ConversionOutcome::failed(FailureKind::Transport, e.to_string())
            }
            Ok(response) => {
                debug!(
                    status = response.status,
                    content_type = ?response.content_type,
                    body_len = response.body.as_ref().map_or(0, Vec::len),
                    "received conversion response"
                );
                on_progress(ConversionProgress::new(ConversionPhase::ResponseReceived {
                    status: response.status,
                    content_type: response.content_type.clone(),
                }));

                match classify_response(response) {
                    Classification::Resolved(outcome) => outcome,
                    Classification::Binary(bytes) => {
                        let file_name = delivered_file_name_now();
                        on_progress(ConversionProgress::new(ConversionPhase::SavingFile {
                            file_name: file_name.clone(),
                            size_bytes: bytes.len() as u64,
                        }));

                        match self.sink.deliver(&file_name, &bytes).await {
                            Ok(saved_to) => ConversionOutcome::DeliveredFile {
                                bytes,
                                suggested_name: file_name,
                                saved_to,
                            },
                            Err(e) => {
                                warn!(error = %e, file = %file_name, "failed to save converted file");
                                ConversionOutcome::failed(FailureKind::Delivery, e.to_string())
                            }
                        }
                    }
                }
            }
        };

        if outcome.is_success() {
            self.selection.clear();
        }

        info!(outcome = outcome.label(), "conversion finished");
        on_progress(ConversionProgress::new(ConversionPhase::Completed {
            outcome: outcome.label().to_string(),
        }));

        self.last_outcome = Some(outcome.clone());
        Ok(outcome)
    }
}
