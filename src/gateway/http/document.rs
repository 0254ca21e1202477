use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::HttpGateway;
use crate::document::{DocumentHandle, DocumentStatus, DocumentUpload};
use crate::error::RemoteError;
use crate::gateway::DocumentTranslator;

#[derive(Debug, Serialize)]
struct KeyBody<'a> {
    document_key: &'a str,
}

fn upload_form(upload: &DocumentUpload) -> Form {
    let file = Part::bytes(upload.contents.clone()).file_name(upload.file_name.clone());
    let mut form = Form::new()
        .part("file", file)
        .text("target_lang", upload.target_lang.clone());

    if let Some(source_lang) = &upload.source_lang {
        form = form.text("source_lang", source_lang.clone());
    }
    if upload.minify {
        form = form.text("enable_document_minification", "1");
    }
    for (name, value) in upload.options.iter() {
        form = form.text(name.clone(), form_value(value));
    }
    form
}

fn form_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) => "0".to_string(),
        other => other.to_string(),
    }
}

#[async_trait]
impl DocumentTranslator for HttpGateway {
    async fn upload_document(&self, upload: &DocumentUpload) -> Result<DocumentHandle, RemoteError> {
        let url = self.url("document");
        debug!(
            file = %upload.file_name,
            bytes = upload.contents.len(),
            target_lang = %upload.target_lang,
            "uploading document"
        );
        self.fetch_json(|| self.client.post(&url).multipart(upload_form(upload)))
            .await
    }

    async fn document_status(&self, handle: &DocumentHandle) -> Result<DocumentStatus, RemoteError> {
        let url = self.url(&format!("document/{}", handle.document_id));
        let body = KeyBody {
            document_key: &handle.document_key,
        };
        self.fetch_json(|| self.client.post(&url).json(&body)).await
    }

    async fn download_document(&self, handle: &DocumentHandle) -> Result<Vec<u8>, RemoteError> {
        let url = self.url(&format!("document/{}/result", handle.document_id));
        let body = KeyBody {
            document_key: &handle.document_key,
        };
        let bytes = self
            .send_with_retry(|| self.client.post(&url).json(&body))
            .await?
            .bytes()
            .await
            .map_err(|e| super::unexpected_body(&e))?;
        Ok(bytes.to_vec())
    }
}
