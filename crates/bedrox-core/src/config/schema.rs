//! Configuration schema.
//!
//! Hierarchy: `Config` → `ServerConfig`, `BedrockConfig`.
//!
//! JSON on disk uses **camelCase** keys; Rust uses snake_case.

use serde::{Deserialize, Serialize};

/// Default environment variable holding the Bedrock bearer token.
pub const DEFAULT_CREDENTIAL_ENV: &str = "AWS_BEARER_TOKEN_BEDROCK";

// ─────────────────────────────────────────────
// Root Config
// ─────────────────────────────────────────────

/// Root configuration — loaded from `~/.bedrox/config.json` + env vars.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub server: ServerConfig,
    pub bedrock: BedrockConfig,
}

// ─────────────────────────────────────────────
// Server
// ─────────────────────────────────────────────

/// HTTP listener settings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding `index.html` for `GET /`.
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5001,
            static_dir: "static".to_string(),
        }
    }
}

impl ServerConfig {
    /// `host:port` string for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// ─────────────────────────────────────────────
// Bedrock
// ─────────────────────────────────────────────

/// Remote inference service settings. None of these are request input.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct BedrockConfig {
    /// AWS region used to build the default runtime endpoint.
    pub region: String,
    /// Full endpoint override (e.g. a VPC endpoint or a local mock).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Name of the environment variable holding the bearer token.
    pub credential_env: String,
    /// Transport timeout for one Converse call.
    pub timeout_secs: u64,
}

impl Default for BedrockConfig {
    fn default() -> Self {
        Self {
            region: "us-east-1".to_string(),
            endpoint: None,
            credential_env: DEFAULT_CREDENTIAL_ENV.to_string(),
            timeout_secs: 120,
        }
    }
}

impl BedrockConfig {
    /// Base URL of the Bedrock runtime: the override if set, else the regional endpoint.
    pub fn endpoint_url(&self) -> String {
        match self.endpoint.as_deref().filter(|e| !e.trim().is_empty()) {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => format!("https://bedrock-runtime.{}.amazonaws.com", self.region),
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
