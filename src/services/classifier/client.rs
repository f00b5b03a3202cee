use crate::config::ClassifierConfig;
use crate::error::AppError;
use crate::models::classify_types::ClassificationResult;
use reqwest::multipart::{Form, Part};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// One upload, ready to go on the wire.
#[derive(Debug, Clone)]
pub struct ClassifyRequest {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
    pub use_binary_filter: bool,
}

#[derive(Clone)]
pub struct ClassifierClient {
    http: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl ClassifierClient {
    pub fn new(config: &ClassifierConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: config.classify_url(),
            timeout: config.timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Sends the upload and waits for the classification.
    ///
    /// A timer cancels the request token once the deadline passes; the
    /// in-flight exchange is dropped (and with it the connection) and the
    /// call resolves to [`AppError::Timeout`].
    pub async fn classify(&self, request: ClassifyRequest) -> Result<ClassificationResult, AppError> {
        let token = CancellationToken::new();
        let timer = {
            let token = token.clone();
            let timeout = self.timeout;
            tokio::spawn(async move {
                tokio::time::sleep(timeout).await;
                token.cancel();
            })
        };

        let outcome = tokio::select! {
            _ = token.cancelled() => {
                tracing::warn!(timeout_ms = self.timeout.as_millis() as u64, "classification request aborted");
                Err(AppError::Timeout)
            }
            result = self.exchange(request) => result,
        };

        timer.abort();
        outcome
    }

    async fn exchange(&self, request: ClassifyRequest) -> Result<ClassificationResult, AppError> {
        let part = Part::bytes(request.bytes)
            .file_name(request.file_name)
            .mime_str(&request.mime_type)?;
        let form = Form::new().part("file", part);

        let response = self
            .http
            .post(&self.url)
            .query(&[("use_binary_for_filter", request.use_binary_filter)])
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            let message = error_message(&body)
                .unwrap_or_else(|| format!("HTTP error! Status: {}", status.as_u16()));
            return Err(AppError::Backend {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await?;
        let result: ClassificationResult = serde_json::from_slice(&body)?;
        Ok(result)
    }
}

/// First non-empty of `detail` and `error`. FastAPI validation errors put a
/// list under `detail`; those are rendered as JSON text.
fn error_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    ["detail", "error"].iter().find_map(|key| match value.get(*key)? {
        serde_json::Value::Null => None,
        serde_json::Value::Bool(false) => None,
        serde_json::Value::String(s) if s.is_empty() => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    })
}
