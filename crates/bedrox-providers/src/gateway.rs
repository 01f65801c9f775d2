//! Inference gateway — the translation layer between the invoke endpoint and
//! the Converse API.
//!
//! One invocation is: validate, resolve the credential, build a single-turn
//! request with the fixed inference config, make exactly one remote call, and
//! extract the first text block plus usage counters.

use std::sync::Arc;

use tracing::{debug, error, warn};

use bedrox_core::types::{ConverseRequest, InvocationOutput, InvocationResult, TokenUsage};
use bedrox_core::InvokeError;

use crate::credential::CredentialResolver;
use crate::traits::ConverseApi;

/// Stateless gateway shared across requests.
#[derive(Clone)]
pub struct InferenceGateway {
    api: Arc<dyn ConverseApi>,
    credentials: Arc<dyn CredentialResolver>,
}

impl std::fmt::Debug for InferenceGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceGateway")
            .field("api", &self.api.display_name())
            .field("credentials", &self.credentials.source())
            .finish()
    }
}

impl InferenceGateway {
    pub fn new(api: Arc<dyn ConverseApi>, credentials: Arc<dyn CredentialResolver>) -> Self {
        Self { api, credentials }
    }

    /// Whether a credential can be resolved right now.
    pub fn credential_available(&self) -> bool {
        self.credentials.resolve().is_ok()
    }

    /// Invoke and normalize into the client-facing result shape.
    pub async fn invoke(&self, model_id: &str, prompt: &str) -> InvocationResult {
        match self.try_invoke(model_id, prompt).await {
            Ok(output) => output.into(),
            Err(e) => InvocationResult::from(&e),
        }
    }

    /// Invoke, keeping the typed error for callers that map status codes.
    pub async fn try_invoke(
        &self,
        model_id: &str,
        prompt: &str,
    ) -> Result<InvocationOutput, InvokeError> {
        let result = self.invoke_inner(model_id, prompt).await;

        match &result {
            Err(e) if e.is_server_fault() => {
                error!(model = %model_id, error = ?e, "Error invoking model");
            }
            Err(InvokeError::Remote { code, message }) => {
                warn!(model = %model_id, code = %code, message = %message, "Bedrock rejected the call");
            }
            _ => {}
        }

        result
    }

    async fn invoke_inner(
        &self,
        model_id: &str,
        prompt: &str,
    ) -> Result<InvocationOutput, InvokeError> {
        if model_id.is_empty() || prompt.is_empty() {
            return Err(InvokeError::Validation);
        }

        let credential = self.credentials.resolve()?;
        let request = ConverseRequest::single_turn(model_id, prompt);

        let response = self.api.converse(&credential, &request).await?;

        let text = response
            .first_text()
            .ok_or_else(|| {
                InvokeError::Unexpected("response contained no text content".to_string())
            })?
            .to_string();
        let usage = TokenUsage::from(response.usage);

        debug!(
            model = %model_id,
            input_tokens = usage.input_tokens,
            output_tokens = usage.output_tokens,
            "Invocation complete"
        );

        Ok(InvocationOutput {
            response: text,
            model_id: model_id.to_string(),
            usage,
        })
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
