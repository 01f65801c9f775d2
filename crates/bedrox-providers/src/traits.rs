//! The remote inference seam.
//!
//! `InferenceGateway` only knows this trait; `BedrockClient` is the production
//! implementation and tests substitute scripted fakes.

use async_trait::async_trait;
use bedrox_core::types::{ConverseRequest, ConverseResponse};
use bedrox_core::InvokeError;

use crate::credential::Credential;

/// A unified "converse" RPC: one request, one response, no streaming.
#[async_trait]
pub trait ConverseApi: Send + Sync {
    /// Perform exactly one Converse call.
    ///
    /// Structured service failures come back as `InvokeError::Remote`;
    /// transport and decoding failures as `InvokeError::Unexpected`.
    async fn converse(
        &self,
        credential: &Credential,
        request: &ConverseRequest,
    ) -> Result<ConverseResponse, InvokeError>;

    /// Display name for logging.
    fn display_name(&self) -> &str;
}
