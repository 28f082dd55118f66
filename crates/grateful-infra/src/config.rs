//! Runtime configuration loader.
//!
//! Reads `config.toml` from the data directory (`~/.grateful/` by default),
//! then applies the environment overrides for the storage location and the
//! transport token. Everything is read once at start-up.

use std::path::{Path, PathBuf};

use grateful_types::config::GratefulConfig;
use grateful_types::error::ConfigError;
use secrecy::SecretString;

/// Overrides the data directory.
pub const DATA_DIR_ENV: &str = "GRATEFUL_DATA_DIR";
/// Transport credential.
pub const BOT_TOKEN_ENV: &str = "GRATEFUL_BOT_TOKEN";
/// Overrides the storage location from `config.toml`.
pub const STORAGE_PATH_ENV: &str = "GRATEFUL_STORAGE_PATH";

const DEFAULT_DB_FILE: &str = "grateful.db";

/// Everything the binary needs to start, resolved from file and environment.
#[derive(Debug)]
pub struct RuntimeConfig {
    pub data_dir: PathBuf,
    pub settings: GratefulConfig,
    /// SQLite database file backing the document store.
    pub storage_path: PathBuf,
    /// Credential for the chat transport. Never logged.
    pub transport_token: Option<SecretString>,
}

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `GRATEFUL_DATA_DIR` environment variable
/// 2. `~/.grateful`
/// 3. `./.grateful`
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".grateful");
    }

    PathBuf::from(".grateful")
}

/// Load `{data_dir}/config.toml`.
///
/// A missing file yields the defaults; an unreadable or malformed file logs a
/// warning and also yields the defaults.
pub async fn load_config(data_dir: &Path) -> GratefulConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return GratefulConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return GratefulConfig::default();
        }
    };

    match toml::from_str::<GratefulConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            GratefulConfig::default()
        }
    }
}

/// Load the full runtime configuration for `data_dir`, reading the
/// `GRATEFUL_STORAGE_PATH` and `GRATEFUL_BOT_TOKEN` environment variables.
pub async fn load_runtime_config(data_dir: PathBuf) -> Result<RuntimeConfig, ConfigError> {
    let settings = load_config(&data_dir).await;
    build_runtime_config(
        data_dir,
        settings,
        std::env::var(STORAGE_PATH_ENV).ok(),
        std::env::var(BOT_TOKEN_ENV).ok(),
    )
}

/// Combine file settings with environment values.
///
/// Storage location priority: environment, then `storage.path`, then
/// `{data_dir}/grateful.db`. Relative paths are taken relative to the data
/// directory. A blank token counts as absent.
pub fn build_runtime_config(
    data_dir: PathBuf,
    settings: GratefulConfig,
    storage_env: Option<String>,
    token_env: Option<String>,
) -> Result<RuntimeConfig, ConfigError> {
    let reminders = &settings.reminders;
    if reminders.enabled && !reminders.is_valid_time() {
        return Err(ConfigError::Invalid(format!(
            "reminders time {:02}:{:02} is not a valid time of day",
            reminders.hour_utc, reminders.minute
        )));
    }

    let storage_path = match storage_env {
        Some(raw) if raw.trim().is_empty() => {
            return Err(ConfigError::Invalid(format!("{STORAGE_PATH_ENV} is set but empty")));
        }
        Some(raw) => PathBuf::from(raw.trim()),
        None => settings
            .storage
            .path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE)),
    };
    let storage_path = if storage_path.is_absolute() {
        storage_path
    } else {
        data_dir.join(storage_path)
    };

    let transport_token = token_env
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .map(SecretString::from);

    Ok(RuntimeConfig {
        data_dir,
        settings,
        storage_path,
        transport_token,
    })
}

/// Create the data directory and the storage file's parent directory.
pub async fn prepare_dirs(config: &RuntimeConfig) -> Result<(), ConfigError> {
    let mut targets = vec![config.data_dir.as_path()];
    if let Some(parent) = config.storage_path.parent() {
        targets.push(parent);
    }

    for dir in targets {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| ConfigError::Io {
                path: dir.display().to_string(),
                reason: e.to_string(),
            })?;
    }
    Ok(())
}
