//! JSON-over-HTTP provider client.
//!
//! Text translation and usage live here; the other capabilities are split
//! into submodules that share the same transport.

mod document;
mod glossary;
mod languages;

#[cfg(test)]
mod test_server;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use super::{TextTranslator, TranslationResult, UsageReporter};
use crate::error::RemoteError;
use crate::translation::{AUTO_DETECT, TranslationOptions};
use crate::usage::{Usage, UsageDetail};

/// Status code some providers use for an exhausted character quota.
const QUOTA_EXCEEDED_STATUS: u16 = 456;

/// Delay added per retry attempt.
const RETRY_BACKOFF: Duration = Duration::from_millis(500);

/// Transport settings for [`HttpGateway`].
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    /// Scheme put before the key in the `Authorization` header.
    pub auth_scheme: String,
    pub timeout: Duration,
    /// Extra attempts after a transient failure.
    pub retries: u32,
}

#[derive(Debug, Serialize)]
struct TranslateBody<'a> {
    text: &'a [String],
    target_lang: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    source_lang: Option<&'a str>,
    #[serde(flatten)]
    options: &'a TranslationOptions,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    translations: Vec<WireTranslation>,
}

#[derive(Debug, Deserialize)]
struct WireTranslation {
    text: String,
    detected_source_lang: Option<String>,
    billed_characters: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct UsageResponse {
    character_count: u64,
    character_limit: u64,
    document_count: Option<u64>,
    document_limit: Option<u64>,
    team_document_count: Option<u64>,
    team_document_limit: Option<u64>,
}

/// JSON-over-HTTP provider client shared by every capability trait.
pub struct HttpGateway {
    client: Client,
    config: GatewayConfig,
}

impl HttpGateway {
    pub fn new(config: GatewayConfig) -> Result<Self, RemoteError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RemoteError::InvalidRequest(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.config.endpoint.trim_end_matches('/'))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.api_key {
            Some(api_key) => request.header(
                "Authorization",
                format!("{} {api_key}", self.config.auth_scheme),
            ),
            None => request,
        }
    }

    async fn send_with_retry<F>(&self, build: F) -> Result<Response, RemoteError>
    where
        F: Fn() -> RequestBuilder + Send + Sync,
    {
        let mut attempt = 0;
        loop {
            match send_once(self.authorize(build())).await {
                Err(err) if err.is_retryable() && attempt < self.config.retries => {
                    attempt += 1;
                    warn!(attempt, error = %err, "retrying translation API request");
                    tokio::time::sleep(RETRY_BACKOFF * attempt).await;
                }
                other => return other,
            }
        }
    }

    async fn fetch_json<T, F>(&self, build: F) -> Result<T, RemoteError>
    where
        T: DeserializeOwned,
        F: Fn() -> RequestBuilder + Send + Sync,
    {
        self.send_with_retry(build)
            .await?
            .json::<T>()
            .await
            .map_err(|e| unexpected_body(&e))
    }
}

async fn send_once(request: RequestBuilder) -> Result<Response, RemoteError> {
    let response = request.send().await.map_err(classify_transport)?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(classify_status(status, &body));
    }

    Ok(response)
}

fn unexpected_body(err: &reqwest::Error) -> RemoteError {
    RemoteError::InvalidRequest(format!("Unexpected response body: {err}"))
}

/// Maps a non-success HTTP status to the remote error taxonomy.
fn classify_status(status: StatusCode, body: &str) -> RemoteError {
    let message = if body.is_empty() {
        format!("status {status}")
    } else {
        format!("status {status}: {body}")
    };

    match status.as_u16() {
        401 | 403 => RemoteError::Auth(message),
        QUOTA_EXCEEDED_STATUS => RemoteError::QuotaExceeded(message),
        429 => RemoteError::Transient(message),
        code if code >= 500 => RemoteError::Transient(message),
        _ => RemoteError::InvalidRequest(message),
    }
}

fn classify_transport(err: reqwest::Error) -> RemoteError {
    if err.is_builder() || err.is_decode() {
        RemoteError::InvalidRequest(err.to_string())
    } else {
        RemoteError::Transient(err.to_string())
    }
}

fn into_results(response: TranslateResponse, source_lang: &str) -> Vec<TranslationResult> {
    response
        .translations
        .into_iter()
        .map(|t| TranslationResult {
            translated_text: t.text,
            detected_source_lang: t
                .detected_source_lang
                .unwrap_or_else(|| source_lang.to_string()),
            billed_units: t.billed_characters.unwrap_or(0),
        })
        .collect()
}

fn pair(count: Option<u64>, limit: Option<u64>) -> Option<UsageDetail> {
    match (count, limit) {
        (Some(count), Some(limit)) => Some(UsageDetail::new(count, limit)),
        _ => None,
    }
}

#[async_trait]
impl TextTranslator for HttpGateway {
    async fn translate(
        &self,
        texts: &[String],
        source_lang: &str,
        target_lang: &str,
        options: &TranslationOptions,
    ) -> Result<Vec<TranslationResult>, RemoteError> {
        let url = self.url("translate");
        let body = TranslateBody {
            text: texts,
            target_lang,
            source_lang: (source_lang != AUTO_DETECT).then_some(source_lang),
            options,
        };

        debug!(texts = texts.len(), source_lang, target_lang, "calling translation API");

        let response: TranslateResponse = self
            .fetch_json(|| self.client.post(&url).json(&body))
            .await?;

        Ok(into_results(response, source_lang))
    }
}

#[async_trait]
impl UsageReporter for HttpGateway {
    async fn usage(&self) -> Result<Usage, RemoteError> {
        let url = self.url("usage");
        let response: UsageResponse = self.fetch_json(|| self.client.get(&url)).await?;

        Ok(Usage {
            character: UsageDetail::new(response.character_count, response.character_limit),
            document: pair(response.document_count, response.document_limit),
            team_document: pair(response.team_document_count, response.team_document_limit),
        })
    }
}
