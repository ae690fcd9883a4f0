mod models;

use std::{
    fs,
    path::{Path, PathBuf},
    sync::OnceLock,
};

pub use models::{KnownSource, Settings}; // Re-export the model types to callers.

/// Environment variable holding the path of an alternative settings file.
pub const SETTINGS_PATH_ENV: &str = "COBBLER_SIGNATURES_SETTINGS";

/// Process-wide settings, loaded once at startup.
static LOADED: OnceLock<Settings> = OnceLock::new();

/// Parse settings text; `origin` names where it came from in errors.
fn parse_settings(json: &str, origin: &str) -> Result<Settings, SettingsError> {
    Settings::from_json_str(json).map_err(|source| SettingsError::Invalid {
        origin: origin.to_string(),
        source,
    })
}

/// Read and parse a settings file without installing it.
pub fn read_settings_file(path: impl AsRef<Path>) -> Result<Settings, SettingsError> {
    let path = path.as_ref();
    let data = fs::read_to_string(path).map_err(|source| SettingsError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    parse_settings(&data, &path.display().to_string())
}

/// Load the settings file at `path`.
pub fn init_from_file(path: impl AsRef<Path>) -> Result<&'static Settings, SettingsError> {
    init_with(read_settings_file(path)?)
}

/// Load settings given inline as JSON.
pub fn init_from_json_str(json: &str) -> Result<&'static Settings, SettingsError> {
    init_with(parse_settings(json, "inline JSON")?)
}

/// Load the settings file whose path is held by the env var `var`.
pub fn init_from_env(var: &str) -> Result<&'static Settings, SettingsError> {
    let path = std::env::var_os(var).ok_or_else(|| SettingsError::PathVarUnset(var.to_string()))?;
    init_from_file(PathBuf::from(path))
}

/// Install an already built value (e.g. [`Settings::default`]).
pub fn init_with(settings: Settings) -> Result<&'static Settings, SettingsError> {
    LOADED.set(settings).map_err(|_| SettingsError::AlreadyLoaded)?;
    get()
}

pub fn get() -> Result<&'static Settings, SettingsError> {
    LOADED.get().ok_or(SettingsError::NotLoaded)
}

/// Find a configured upstream document by name.
pub fn source_by_name(name: &str) -> Result<Option<&'static KnownSource>, SettingsError> {
    Ok(get()?.source_by_name(name))
}

#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("settings were read before being loaded")]
    NotLoaded,
    #[error("settings can only be loaded once per process")]
    AlreadyLoaded,
    #[error("{0} is not set; it should name a settings file")]
    PathVarUnset(String),
    #[error("cannot read settings file {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("settings from {origin} are invalid: {source}")]
    Invalid {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::models::DEFAULT_USER_AGENT;
    use super::{Settings, SettingsError, parse_settings, read_settings_file};

    #[test]
    fn empty_object_uses_defaults() {
        let settings = Settings::from_json_str("{}").expect("parse");
        assert_eq!(settings.user_agent(), DEFAULT_USER_AGENT);
        assert!(settings.pretty_export());
        assert!(settings.sources().is_empty());
    }

    #[test]
    fn sources_are_found_by_name() {
        let settings = Settings::from_json_str(
            r#"{
                "pretty_export": false,
                "sources": [
                    {"name": "upstream", "url": "https://example.org/distro_signatures.json"}
                ]
            }"#,
        )
        .expect("parse");

        assert!(!settings.pretty_export());
        let source = settings.source_by_name("upstream").expect("configured");
        assert_eq!(source.url(), "https://example.org/distro_signatures.json");
        assert_eq!(source.description(), None);
        assert!(settings.source_by_name("mirror").is_none());
    }

    #[test]
    fn invalid_settings_name_their_origin() {
        let err = parse_settings(r#"{"pretty_export": "yes"}"#, "test.json").unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { ref origin, .. } if origin == "test.json"));
        assert!(err.to_string().starts_with("settings from test.json are invalid"));
    }

    #[test]
    fn unreadable_file_names_its_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing-settings.json");
        let err = read_settings_file(&path).unwrap_err();
        match &err {
            SettingsError::Unreadable { path: reported, .. } => assert_eq!(reported, &path),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("missing-settings.json"));
    }

    #[test]
    fn shipped_settings_parse() {
        let shipped = include_str!("../../resources/settings.json");
        let settings = Settings::from_json_str(shipped).expect("shipped settings");
        assert!(!settings.sources().is_empty());
    }
}
