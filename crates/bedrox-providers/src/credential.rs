//! Bearer credential resolution.
//!
//! The credential is resolved on every invocation, never cached, so a changed
//! environment is picked up without restarting the gateway.

use bedrox_core::config::schema::DEFAULT_CREDENTIAL_ENV;
use bedrox_core::InvokeError;

/// Opaque bearer token for Bedrock. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for the `Authorization` header only.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Credential").field(&"<redacted>").finish()
    }
}

/// Source of the bearer credential.
pub trait CredentialResolver: Send + Sync {
    /// Produce the credential, or a configuration error if it is unavailable.
    fn resolve(&self) -> Result<Credential, InvokeError>;

    /// Human-readable description of where the credential comes from.
    fn source(&self) -> String;
}

// ─────────────────────────────────────────────
// Environment
// ─────────────────────────────────────────────

/// Reads the credential from a named environment variable on each call.
#[derive(Clone, Debug)]
pub struct EnvCredentialResolver {
    var: String,
}

impl EnvCredentialResolver {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }

    pub fn var(&self) -> &str {
        &self.var
    }
}

impl Default for EnvCredentialResolver {
    fn default() -> Self {
        Self::new(DEFAULT_CREDENTIAL_ENV)
    }
}

impl CredentialResolver for EnvCredentialResolver {
    fn resolve(&self) -> Result<Credential, InvokeError> {
        match std::env::var(&self.var) {
            Ok(token) if !token.trim().is_empty() => Ok(Credential::new(token.trim())),
            _ => Err(InvokeError::missing_credential(&self.var)),
        }
    }

    fn source(&self) -> String {
        format!("env:{}", self.var)
    }
}

// ─────────────────────────────────────────────
// Static
// ─────────────────────────────────────────────

/// A fixed credential injected at construction.
#[derive(Clone, Debug)]
pub struct StaticCredentialResolver {
    credential: Credential,
}

impl StaticCredentialResolver {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            credential: Credential::new(token),
        }
    }
}

impl CredentialResolver for StaticCredentialResolver {
    fn resolve(&self) -> Result<Credential, InvokeError> {
        if self.credential.expose().trim().is_empty() {
            return Err(InvokeError::Configuration(
                "missing credential: configured token is empty".to_string(),
            ));
        }
        Ok(self.credential.clone())
    }

    fn source(&self) -> String {
        "static".to_string()
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
