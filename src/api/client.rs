/// HTTPクライアント
///
/// 変換サービスとの通信を担当するHTTPクライアント。
/// Cookieジャーを持ち、リクエストには常に資格情報（Cookie）が付与される。
/// タイムアウトは設定せず、トランスポート自身の失敗通知に任せる。
use crate::api::error::InfraError;
use crate::config::{APP_CONFIG, BackendUrl};
use crate::domain::selection::FileHandle;
use crate::domain::workflow::{ConversionTransport, RawResponse};
use async_trait::async_trait;
use hyper::ext::ReasonPhrase;
use reqwest::cookie::Jar;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, Url};
use std::sync::Arc;
use tracing::debug;

/// APIクライアントの結果型
type ApiResult<T> = Result<T, InfraError>;

/// 変換サービスのAPIクライアント
pub struct ApiClient {
    client: Client,
    convert_url: String,
}

impl ApiClient {
    /// 新しいAPIクライアントを作成
    ///
    /// # Arguments
    /// * `backend` - 解決済みのバックエンドURL
    /// * `cookies` - ジャーに登録するCookie（"name=value" 形式）
    pub fn new(backend: &BackendUrl, cookies: &[String]) -> ApiResult<Self> {
        let base = Url::parse(backend.base()).map_err(|e| {
            InfraError::invalid_request(format!("Invalid backend URL '{}': {}", backend.base(), e))
        })?;

        let jar = Arc::new(Jar::default());
        for cookie in cookies {
            jar.add_cookie_str(cookie, &base);
        }

        let client = Client::builder()
            .cookie_provider(jar)
            .build()
            .map_err(|e| InfraError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            convert_url: backend.convert_url(),
        })
    }

    pub fn convert_url(&self) -> &str {
        &self.convert_url
    }

    /// multipart本文を構築（1ファイル1パート、フィールド名は共通）
    async fn build_form(files: &[FileHandle]) -> ApiResult<Form> {
        let mut form = Form::new();

        for file in files {
            let content = tokio::fs::read(&file.path)
                .await
                .map_err(|e| InfraError::file_read(&file.path, e))?;

            let part = Part::bytes(content)
                .file_name(file.name.clone())
                .mime_str(&file.media_type)
                .map_err(|e| {
                    InfraError::invalid_request(format!(
                        "Invalid media type '{}' for {}: {}",
                        file.media_type, file.name, e
                    ))
                })?;

            form = form.part(APP_CONFIG.upload.field_name, part);
        }

        Ok(form)
    }

    /// multipart POSTを送信する
    async fn post_multipart(&self, form: Form) -> ApiResult<Response> {
        self.client
            .post(&self.convert_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    InfraError::network(format!(
                        "Connection failed for POST {}: {}",
                        self.convert_url, e
                    ))
                } else {
                    InfraError::network(format!("Request failed for POST {}: {}", self.convert_url, e))
                }
            })
    }

    /// ステータス・Content-Type・本文を読み取る
    ///
    /// 非2xxでも `Ok` を返す。分類はワークフロー側で行う。
    /// 非2xxかつ非JSONの本文は読まない。非2xxのJSON本文が読めなかった場合は
    /// 本文なしとして返し、ステータス文言で分類させる。
    async fn read_response(response: Response) -> ApiResult<RawResponse> {
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let mut raw = RawResponse {
            status: response.status().as_u16(),
            status_text: Self::status_text(&response),
            content_type,
            body: None,
        };

        if !raw.needs_body() {
            debug!(status = raw.status, "skipping body of non-JSON error response");
            return Ok(raw);
        }

        match response.bytes().await {
            Ok(body) => raw.body = Some(body.to_vec()),
            Err(e) if !raw.is_success() => {
                debug!(status = raw.status, error = %e, "failed to read error response body");
            }
            Err(e) => {
                return Err(InfraError::network(format!(
                    "Failed to read response body: {}",
                    e
                )));
            }
        }

        Ok(raw)
    }

    /// サーバーが送ったステータス文言
    ///
    /// hyperは標準と異なる文言だけを `ReasonPhrase` として保持する。
    /// 無ければ標準の文言を使う。
    fn status_text(response: &Response) -> String {
        response
            .extensions()
            .get::<ReasonPhrase>()
            .map(|reason| String::from_utf8_lossy(reason.as_bytes()).into_owned())
            .or_else(|| response.status().canonical_reason().map(str::to_string))
            .unwrap_or_default()
    }
}

#[async_trait]
impl ConversionTransport for ApiClient {
    type Error = InfraError;

    async fn send(&self, files: &[FileHandle]) -> Result<RawResponse, InfraError> {
        let form = Self::build_form(files).await?;
        debug!(url = %self.convert_url, parts = files.len(), "posting multipart form");

        let response = self.post_multipart(form).await?;
        Self::read_response(response).await
    }
}
