use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::HttpGateway;
use crate::error::RemoteError;
use crate::gateway::GlossaryManager;
use crate::glossary::{GlossaryEntries, GlossaryInfo, GlossaryLanguagePair, NewGlossary};

const TSV_MEDIA_TYPE: &str = "text/tab-separated-values";

#[derive(Debug, Serialize)]
struct CreateBody<'a> {
    name: &'a str,
    source_lang: &'a str,
    target_lang: &'a str,
    entries: String,
    entries_format: &'static str,
}

#[derive(Debug, Deserialize)]
struct GlossaryList {
    glossaries: Vec<GlossaryInfo>,
}

#[derive(Debug, Deserialize)]
struct LanguagePairList {
    supported_languages: Vec<GlossaryLanguagePair>,
}

#[async_trait]
impl GlossaryManager for HttpGateway {
    async fn create_glossary(&self, glossary: &NewGlossary) -> Result<GlossaryInfo, RemoteError> {
        let url = self.url("glossaries");
        let body = CreateBody {
            name: &glossary.name,
            source_lang: &glossary.source_lang,
            target_lang: &glossary.target_lang,
            entries: glossary.entries.to_tsv(),
            entries_format: "tsv",
        };

        debug!(name = %glossary.name, entries = glossary.entries.len(), "creating glossary");
        self.fetch_json(|| self.client.post(&url).json(&body)).await
    }

    async fn list_glossaries(&self) -> Result<Vec<GlossaryInfo>, RemoteError> {
        let url = self.url("glossaries");
        let list: GlossaryList = self.fetch_json(|| self.client.get(&url)).await?;
        Ok(list.glossaries)
    }

    async fn glossary(&self, glossary_id: &str) -> Result<GlossaryInfo, RemoteError> {
        let url = self.url(&format!("glossaries/{glossary_id}"));
        self.fetch_json(|| self.client.get(&url)).await
    }

    async fn glossary_entries(&self, glossary_id: &str) -> Result<GlossaryEntries, RemoteError> {
        let url = self.url(&format!("glossaries/{glossary_id}/entries"));
        let tsv = self
            .send_with_retry(|| self.client.get(&url).header("Accept", TSV_MEDIA_TYPE))
            .await?
            .text()
            .await
            .map_err(|e| super::unexpected_body(&e))?;

        GlossaryEntries::from_tsv(&tsv)
            .map_err(|e| RemoteError::InvalidRequest(format!("Unexpected glossary entries: {e}")))
    }

    async fn delete_glossary(&self, glossary_id: &str) -> Result<(), RemoteError> {
        let url = self.url(&format!("glossaries/{glossary_id}"));
        self.send_with_retry(|| self.client.delete(&url)).await?;
        debug!(glossary_id, "glossary deleted");
        Ok(())
    }

    async fn glossary_language_pairs(&self) -> Result<Vec<GlossaryLanguagePair>, RemoteError> {
        let url = self.url("glossary-language-pairs");
        let list: LanguagePairList = self.fetch_json(|| self.client.get(&url)).await?;
        Ok(list.supported_languages)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::super::test_server::{serve, test_config};
    use super::*;
    use serde_json::json;

    fn glossary_json(id: &str) -> serde_json::Value {
        json!({
            "glossary_id": id,
            "name": "Product terms",
            "ready": true,
            "source_lang": "en",
            "target_lang": "de",
            "creation_time": "2024-05-01T10:00:00.000Z",
            "entry_count": 2
        })
    }

    #[tokio::test]
    async fn test_create_sends_tsv_entries() {
        let (endpoint, server) = serve(vec![(201, glossary_json("g1").to_string())]).await;
        let gateway = HttpGateway::new(test_config(endpoint)).unwrap();

        let entries = GlossaryEntries::from_tsv("cache\tZwischenspeicher\nkey\tSchlüssel").unwrap();
        let glossary = NewGlossary::new("Product terms", "en", "de", entries).unwrap();
        let info = gateway.create_glossary(&glossary).await.unwrap();

        assert_eq!(info.glossary_id, "g1");
        assert!(info.ready);
        assert_eq!(info.entry_count, 2);

        let requests = server.await.unwrap();
        assert!(requests[0].starts_with("POST /glossaries"));
        assert!(requests[0].contains(r#""entries_format":"tsv""#));
        assert!(requests[0].contains(r#""entries":"cache\tZwischenspeicher\nkey\tSchlüssel""#));
    }

    #[tokio::test]
    async fn test_list_and_get() {
        let (endpoint, server) = serve(vec![
            (200, json!({"glossaries": [glossary_json("g1"), glossary_json("g2")]}).to_string()),
            (200, glossary_json("g2").to_string()),
        ])
        .await;
        let gateway = HttpGateway::new(test_config(endpoint)).unwrap();

        let all = gateway.list_glossaries().await.unwrap();
        assert_eq!(all.len(), 2);
        let one = gateway.glossary("g2").await.unwrap();
        assert_eq!(one.glossary_id, "g2");

        let requests = server.await.unwrap();
        assert!(requests[0].starts_with("GET /glossaries "));
        assert!(requests[1].starts_with("GET /glossaries/g2 "));
    }

    #[tokio::test]
    async fn test_entries_are_requested_as_tsv() {
        let (endpoint, server) = serve(vec![(200, "cache\tZwischenspeicher\nkey\tSchlüssel".to_string())]).await;
        let gateway = HttpGateway::new(test_config(endpoint)).unwrap();

        let entries = gateway.glossary_entries("g1").await.unwrap();
        assert_eq!(entries.get("key"), Some("Schlüssel"));

        let requests = server.await.unwrap();
        assert!(requests[0].starts_with("GET /glossaries/g1/entries"));
        assert!(requests[0].to_ascii_lowercase().contains("accept: text/tab-separated-values"));
    }

    #[tokio::test]
    async fn test_delete_and_missing_glossary() {
        let (endpoint, server) = serve(vec![
            (204, String::new()),
            (404, "Glossary not found".to_string()),
        ])
        .await;
        let gateway = HttpGateway::new(test_config(endpoint)).unwrap();

        gateway.delete_glossary("g1").await.unwrap();
        let err = gateway.delete_glossary("g1").await.unwrap_err();
        assert!(matches!(err, RemoteError::InvalidRequest(msg) if msg.contains("not found")));

        let requests = server.await.unwrap();
        assert!(requests[0].starts_with("DELETE /glossaries/g1"));
    }

    #[tokio::test]
    async fn test_language_pairs() {
        let (endpoint, _server) = serve(vec![(
            200,
            json!({"supported_languages": [
                {"source_lang": "en", "target_lang": "de"},
                {"source_lang": "de", "target_lang": "en"}
            ]})
            .to_string(),
        )])
        .await;
        let gateway = HttpGateway::new(test_config(endpoint)).unwrap();

        let pairs = gateway.glossary_language_pairs().await.unwrap();
        assert_eq!(
            pairs[0],
            GlossaryLanguagePair {
                source_lang: "en".into(),
                target_lang: "de".into()
            }
        );
    }
}
