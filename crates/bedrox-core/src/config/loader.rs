//! Config loader — reads `~/.bedrox/config.json` and merges env vars.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file at `~/.bedrox/config.json`
//! 3. Environment variables `BEDROX_<SECTION>__<FIELD>` (override JSON)

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::schema::{BedrockConfig, Config};

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    crate::utils::get_data_path().join("config.json")
}

/// Load configuration from the given path (or the default path) + env vars.
///
/// Falls back to `Config::default()` if the file doesn't exist or can't be parsed.
pub fn load_config(path: Option<&Path>) -> Config {
    let config_path = path
        .map(PathBuf::from)
        .unwrap_or_else(get_config_path);

    load_config_from_path(&config_path)
}

/// Load config from a specific file path.
fn load_config_from_path(path: &Path) -> Config {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return apply_env_overrides(Config::default());
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return apply_env_overrides(Config::default());
        }
    };

    let mut config: Config = match serde_json::from_str(&content) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to parse config JSON: {}", e);
            return apply_env_overrides(Config::default());
        }
    };

    if config.bedrock.timeout_secs == 0 {
        let default = BedrockConfig::default().timeout_secs;
        warn!("Ignoring bedrock.timeoutSecs = 0 in {}, using {}s", path.display(), default);
        config.bedrock.timeout_secs = default;
    }

    apply_env_overrides(config)
}

/// Save configuration to disk (pretty-printed JSON with camelCase keys).
pub fn save_config(config: &Config, path: Option<&Path>) -> std::io::Result<()> {
    let config_path = path
        .map(PathBuf::from)
        .unwrap_or_else(get_config_path);

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(config).map_err(std::io::Error::other)?;

    std::fs::write(&config_path, json)?;
    debug!("Config saved to {}", config_path.display());
    Ok(())
}

/// Apply environment variable overrides on top of a loaded config.
///
/// Env var format: `BEDROX_<SECTION>__<FIELD>` (double underscore as delimiter).
///
/// Supported overrides:
/// - `BEDROX_SERVER__HOST` → `server.host`
/// - `BEDROX_SERVER__PORT` → `server.port`
/// - `BEDROX_SERVER__STATIC_DIR` → `server.static_dir`
/// - `BEDROX_BEDROCK__REGION` → `bedrock.region`
/// - `BEDROX_BEDROCK__ENDPOINT` → `bedrock.endpoint`
/// - `BEDROX_BEDROCK__CREDENTIAL_ENV` → `bedrock.credential_env`
/// - `BEDROX_BEDROCK__TIMEOUT_SECS` → `bedrock.timeout_secs`
fn apply_env_overrides(mut config: Config) -> Config {
    // Server
    if let Ok(val) = std::env::var("BEDROX_SERVER__HOST") {
        config.server.host = val;
    }
    if let Ok(val) = std::env::var("BEDROX_SERVER__PORT") {
        if let Ok(p) = val.parse::<u16>() {
            config.server.port = p;
        }
    }
    if let Ok(val) = std::env::var("BEDROX_SERVER__STATIC_DIR") {
        config.server.static_dir = val;
    }

    // Bedrock
    if let Ok(val) = std::env::var("BEDROX_BEDROCK__REGION") {
        config.bedrock.region = val;
    }
    if let Ok(val) = std::env::var("BEDROX_BEDROCK__ENDPOINT") {
        config.bedrock.endpoint = Some(val);
    }
    if let Ok(val) = std::env::var("BEDROX_BEDROCK__CREDENTIAL_ENV") {
        if !val.is_empty() {
            config.bedrock.credential_env = val;
        }
    }
    if let Ok(val) = std::env::var("BEDROX_BEDROCK__TIMEOUT_SECS") {
        match val.parse::<u64>() {
            Ok(secs) if secs > 0 => config.bedrock.timeout_secs = secs,
            _ => warn!("Ignoring invalid BEDROX_BEDROCK__TIMEOUT_SECS={}", val),
        }
    }

    config
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
