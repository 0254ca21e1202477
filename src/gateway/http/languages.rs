use async_trait::async_trait;

use super::HttpGateway;
use crate::error::RemoteError;
use crate::gateway::{LanguageCatalog, LanguageKind, RemoteLanguage};

#[async_trait]
impl LanguageCatalog for HttpGateway {
    async fn languages(&self, kind: LanguageKind) -> Result<Vec<RemoteLanguage>, RemoteError> {
        let url = self.url(&format!("languages?type={}", kind.as_str()));
        self.fetch_json(|| self.client.get(&url)).await
    }
}
