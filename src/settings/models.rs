use serde::{Deserialize, Serialize};

pub(crate) const DEFAULT_USER_AGENT: &str = "cobbler-signatures-rust/0.1";

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_pretty_export() -> bool {
    true
}

/// Tool settings; serde is confined to this module tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_user_agent")]
    pub(crate) user_agent: String,
    #[serde(default = "default_pretty_export")]
    pub(crate) pretty_export: bool,
    #[serde(default)]
    pub(crate) sources: Vec<KnownSource>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            pretty_export: default_pretty_export(),
            sources: Vec::new(),
        }
    }
}

impl Settings {
    /// Parse settings without touching the process-wide instance.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn pretty_export(&self) -> bool {
        self.pretty_export
    }

    pub fn sources(&self) -> &[KnownSource] {
        &self.sources
    }

    pub fn source_by_name(&self, name: &str) -> Option<&KnownSource> {
        self.sources.iter().find(|s| s.name() == name)
    }
}

/// A published signatures document offered in the URL import menu.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnownSource {
    pub(crate) name: String,
    pub(crate) url: String,
    #[serde(default)]
    pub(crate) description: Option<String>,
}

impl KnownSource {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}
