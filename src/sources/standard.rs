use reqwest::Client;

use super::{ExportType, ImportType, SourceAdapter, download_document, read_document, write_document};
use crate::settings::Settings;
use crate::signatures::SignaturesError;

/// Network, literal and filesystem sources as used by the command line tool.
#[derive(Debug, Clone)]
pub struct StandardSources {
    client: Client,
    user_agent: String,
}

impl StandardSources {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            user_agent: user_agent.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.user_agent())
    }
}

#[async_trait::async_trait]
impl SourceAdapter for StandardSources {
    async fn fetch(&self, kind: ImportType, locator: &str) -> Result<String, SignaturesError> {
        match kind {
            ImportType::Url => download_document(&self.client, locator, &self.user_agent).await,
            ImportType::String => Ok(locator.to_string()),
            ImportType::File => read_document(locator),
        }
    }

    async fn store(
        &self,
        kind: ExportType,
        target: Option<&str>,
        data: &str,
    ) -> Result<Option<String>, SignaturesError> {
        match kind {
            ExportType::String => Ok(Some(data.to_string())),
            ExportType::File => {
                let path = target
                    .filter(|t| !t.trim().is_empty())
                    .ok_or_else(|| SignaturesError::destination_unavailable("<none>", "no target path given"))?;
                write_document(path, data)?;
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::StandardSources;
    use crate::signatures::SignaturesError;
    use crate::sources::{ExportType, ImportType, SourceAdapter};

    #[tokio::test]
    async fn string_source_is_returned_verbatim() {
        let sources = StandardSources::new("test");
        let raw = sources.fetch(ImportType::String, "{\"a\": {}}").await.expect("fetch");
        assert_eq!(raw, "{\"a\": {}}");
    }

    #[tokio::test]
    async fn file_store_round_trips_through_fetch() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("sigs.json");
        let path = path.to_str().expect("utf-8 path");
        let sources = StandardSources::new("test");

        let out = sources.store(ExportType::File, Some(path), "{}").await.expect("store");
        assert!(out.is_none());
        assert_eq!(sources.fetch(ImportType::File, path).await.expect("fetch"), "{}");
    }

    #[tokio::test]
    async fn file_store_needs_a_target() {
        let sources = StandardSources::new("test");
        let err = sources.store(ExportType::File, None, "{}").await.unwrap_err();
        assert!(matches!(err, SignaturesError::DestinationUnavailable { .. }));
    }
}
