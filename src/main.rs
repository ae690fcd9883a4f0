mod cli;
mod helpers;

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use cli::Session;
use cobbler_signatures::StandardSources;
use cobbler_signatures::settings::{self, SETTINGS_PATH_ENV, Settings};

fn construct_settings_file_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("resources")
        .join("settings.json")
}

/// Env var first, then the bundled file, then built-in defaults.
fn load_settings() -> Result<&'static Settings> {
    if std::env::var_os(SETTINGS_PATH_ENV).is_some() {
        return settings::init_from_env(SETTINGS_PATH_ENV)
            .with_context(|| format!("load settings named by {SETTINGS_PATH_ENV}"));
    }

    let path = construct_settings_file_path();
    if path.exists() {
        return settings::init_from_file(&path).with_context(|| format!("load settings from {}", path.display()));
    }

    tracing::debug!("no settings file found, using defaults");
    Ok(settings::init_with(Settings::default())?)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they stay out of exported documents.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let settings = load_settings()?;
    tracing::info!(sources = settings.sources().len(), "settings loaded");

    let sources = StandardSources::from_settings(settings);
    let mut session = Session::new(&sources, settings);
    session.run().await
}
