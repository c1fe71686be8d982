//! CLI command implementations for `slashgate`.
//!
//! - [`exec`] -- Dispatch one command through the relay.
//! - [`list`] -- Show configured triggers.

pub mod exec;
pub mod list;

use std::path::{Path, PathBuf};

use tracing::{debug, info};

/// Environment variable naming the configuration file.
pub const CONFIG_ENV_VAR: &str = "SLASHGATE_CONFIG";

/// Locate the configuration file.
///
/// Discovery order:
/// 1. `config_override` (the `--config` flag)
/// 2. the `SLASHGATE_CONFIG` env var
/// 3. `~/.slashgate/config.json`, if it exists
pub fn discover_config_path(config_override: Option<&Path>) -> Option<PathBuf> {
    discover_from(
        config_override,
        std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from),
        dirs::home_dir(),
    )
}

fn discover_from(
    config_override: Option<&Path>,
    env_path: Option<PathBuf>,
    home_dir: Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(path) = config_override {
        return Some(path.to_path_buf());
    }
    if let Some(path) = env_path {
        return Some(path);
    }
    let path = home_dir?.join(".slashgate").join("config.json");
    path.exists().then_some(path)
}

/// Load the raw plugin configuration blob.
///
/// Returns an empty object when no file is found by discovery. An explicit
/// path that does not exist is an error.
pub fn load_config(config_override: Option<&Path>) -> anyhow::Result<serde_json::Value> {
    let Some(path) = discover_config_path(config_override) else {
        debug!("no config file found, using empty configuration");
        return Ok(serde_json::Value::Object(serde_json::Map::new()));
    };
    read_config(&path)
}

fn read_config(path: &Path) -> anyhow::Result<serde_json::Value> {
    if !path.exists() {
        anyhow::bail!("config file not found: {}", path.display());
    }
    info!(path = %path.display(), "loading config");
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read config {}: {e}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("failed to parse config {}: {e}", path.display()))?;
    Ok(value)
}
