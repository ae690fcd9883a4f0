mod file;
mod http;
mod standard;

use std::{fmt, str::FromStr};

use crate::signatures::{SignaturesError, UnknownName};

pub use file::{read_document, write_document};
pub use http::download_document;
pub use standard::StandardSources;

/// Where an imported document comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportType {
    /// The locator is a URL fetched over HTTP(S).
    Url,
    /// The locator is the document text itself.
    String,
    /// The locator is a filesystem path.
    File,
}

impl ImportType {
    pub const ALL: [ImportType; 3] = [ImportType::Url, ImportType::String, ImportType::File];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImportType::Url => "URL",
            ImportType::String => "String",
            ImportType::File => "File",
        }
    }
}

impl fmt::Display for ImportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImportType {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownName(s.to_string()))
    }
}

/// Where an exported document goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportType {
    /// Hand the text back to the caller.
    String,
    /// Write the text to a path.
    File,
}

impl ExportType {
    pub const ALL: [ExportType; 2] = [ExportType::String, ExportType::File];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportType::String => "String",
            ExportType::File => "File",
        }
    }
}

impl fmt::Display for ExportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportType {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownName(s.to_string()))
    }
}

/// Resolves import locators into raw text and delivers exported text.
#[async_trait::async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Fails with [`SignaturesError::SourceUnavailable`].
    async fn fetch(&self, kind: ImportType, locator: &str) -> Result<String, SignaturesError>;

    /// Returns the data for [`ExportType::String`]. Fails with
    /// [`SignaturesError::DestinationUnavailable`].
    async fn store(
        &self,
        kind: ExportType,
        target: Option<&str>,
        data: &str,
    ) -> Result<Option<String>, SignaturesError>;
}
