//! Bedrox core — data model, model catalog, error taxonomy, and configuration.
//!
//! Shared by the provider layer (`bedrox-providers`), the HTTP surface
//! (`bedrox-server`) and the CLI.

pub mod catalog;
pub mod config;
pub mod error;
pub mod types;
pub mod utils;

pub use catalog::{find_model, ModelDescriptor, MODELS};
pub use error::InvokeError;
pub use types::{InferenceConfig, InvocationOutput, InvocationRequest, InvocationResult, TokenUsage};
