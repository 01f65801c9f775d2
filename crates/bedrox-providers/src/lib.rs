//! Provider layer for Bedrox.
//!
//! # Architecture
//!
//! - [`credential::CredentialResolver`] — where the bearer token comes from
//! - [`traits::ConverseApi`] — the one remote call the gateway depends on
//! - [`bedrock::BedrockClient`] — HTTP implementation against Bedrock Runtime
//! - [`gateway::InferenceGateway`] — validation, request shaping, and result extraction

pub mod bedrock;
pub mod credential;
pub mod gateway;
pub mod traits;

// Re-export main types for convenience
pub use bedrock::BedrockClient;
pub use credential::{Credential, CredentialResolver, EnvCredentialResolver, StaticCredentialResolver};
pub use gateway::InferenceGateway;
pub use traits::ConverseApi;
