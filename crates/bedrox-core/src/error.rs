//! Invocation error taxonomy and its client-facing normalization.

use thiserror::Error;

use crate::types::InvocationResult;

/// Message returned verbatim when `model_id` or `prompt` is missing.
pub const VALIDATION_MESSAGE: &str = "model_id and prompt are required";

/// Everything that can go wrong between the invoke endpoint and Bedrock.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvokeError {
    /// Missing or empty `model_id` / `prompt`. No remote call is attempted.
    #[error("model_id and prompt are required")]
    Validation,

    /// Local configuration problem, e.g. the bearer credential is not set.
    #[error("{0}")]
    Configuration(String),

    /// Bedrock answered with a structured error.
    #[error("AWS Bedrock Error ({code}): {message}")]
    Remote { code: String, message: String },

    /// Transport failures, undecodable responses, and anything else.
    #[error("{0}")]
    Unexpected(String),
}

impl InvokeError {
    pub fn missing_credential(env_var: &str) -> Self {
        InvokeError::Configuration(format!(
            "missing credential: {env_var} environment variable is not set"
        ))
    }

    pub fn remote(code: impl Into<String>, message: impl Into<String>) -> Self {
        InvokeError::Remote {
            code: code.into(),
            message: message.into(),
        }
    }

    /// HTTP status the error maps to.
    pub fn status_code(&self) -> u16 {
        match self {
            InvokeError::Validation => 400,
            _ => 500,
        }
    }

    /// Message shown to the client.
    ///
    /// Remote errors keep Bedrock's code and message; local failures get a
    /// `Server error:` prefix.
    pub fn client_message(&self) -> String {
        match self {
            InvokeError::Validation => VALIDATION_MESSAGE.to_string(),
            InvokeError::Remote { .. } => self.to_string(),
            InvokeError::Configuration(desc) | InvokeError::Unexpected(desc) => {
                format!("Server error: {desc}")
            }
        }
    }

    /// Whether the failure should be logged with full detail for operators.
    pub fn is_server_fault(&self) -> bool {
        matches!(
            self,
            InvokeError::Configuration(_) | InvokeError::Unexpected(_)
        )
    }
}

impl From<&InvokeError> for InvocationResult {
    fn from(err: &InvokeError) -> Self {
        InvocationResult::failure(err.client_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_400() {
        let err = InvokeError::Validation;
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.client_message(), "model_id and prompt are required");
    }

    #[test]
    fn test_throttling_message() {
        let err = InvokeError::remote("ThrottlingException", "Rate exceeded");
        assert_eq!(err.status_code(), 500);
        assert_eq!(
            err.client_message(),
            "AWS Bedrock Error (ThrottlingException): Rate exceeded"
        );
        assert!(!err.is_server_fault());
    }

    #[test]
    fn test_missing_credential_is_server_error() {
        let err = InvokeError::missing_credential("AWS_BEARER_TOKEN_BEDROCK");
        assert_eq!(err.status_code(), 500);
        let msg = err.client_message();
        assert!(msg.starts_with("Server error: "));
        assert!(msg.contains("AWS_BEARER_TOKEN_BEDROCK"));
        assert!(err.is_server_fault());
    }

    #[test]
    fn test_into_failure_result() {
        let err = InvokeError::remote("AccessDeniedException", "denied");
        let result = InvocationResult::from(&err);
        assert_eq!(
            result,
            InvocationResult::failure("AWS Bedrock Error (AccessDeniedException): denied")
        );
        assert!(!result.is_success());
    }

    #[test]
    fn test_unexpected_prefix() {
        let err = InvokeError::Unexpected("connection refused".into());
        assert_eq!(err.client_message(), "Server error: connection refused");
    }
}
