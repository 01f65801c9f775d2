//! Core types for Bedrox.
//!
//! Two families live here:
//! - the client-facing data model (`InvocationRequest`, `InvocationResult`, …)
//!   exchanged with the HTTP surface in snake_case JSON;
//! - the Bedrock `Converse` wire types (`ConverseRequest`, `ConverseResponse`, …)
//!   exchanged with the remote service in camelCase JSON.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

// ─────────────────────────────────────────────
// Client-facing data model
// ─────────────────────────────────────────────

/// Body of `POST /api/invoke`.
///
/// Both fields are optional at the serde level so that a missing field becomes
/// a validation failure instead of a deserialization error.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct InvocationRequest {
    #[serde(default)]
    pub model_id: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
}

impl InvocationRequest {
    pub fn new(model_id: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model_id: Some(model_id.into()),
            prompt: Some(prompt.into()),
        }
    }
}

/// Fixed generation parameters attached to every Converse call.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InferenceConfig {
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
    /// Nucleus-sampling threshold.
    pub top_p: f32,
}

impl InferenceConfig {
    /// The only configuration used by the gateway.
    pub const FIXED: InferenceConfig = InferenceConfig {
        max_tokens: 2048,
        temperature: 0.7,
        top_p: 0.9,
    };
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self::FIXED
    }
}

/// Token counters reported back to the client. Always present, 0 when unknown.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub total_tokens: u64,
}

impl From<Option<ConverseUsage>> for TokenUsage {
    fn from(usage: Option<ConverseUsage>) -> Self {
        let usage = usage.unwrap_or_default();
        TokenUsage {
            input_tokens: usage.input_tokens.unwrap_or(0),
            output_tokens: usage.output_tokens.unwrap_or(0),
            total_tokens: usage.total_tokens.unwrap_or(0),
        }
    }
}

/// The typed outcome of a successful invocation.
#[derive(Clone, Debug, PartialEq)]
pub struct InvocationOutput {
    pub response: String,
    pub model_id: String,
    pub usage: TokenUsage,
}

/// Uniform result returned to the client.
///
/// Serialized as `{success: true, response, model_id, usage}` or
/// `{success: false, error}`; the enum makes the two shapes exclusive.
#[derive(Clone, Debug, PartialEq)]
pub enum InvocationResult {
    Success(InvocationOutput),
    Failure { error: String },
}

impl InvocationResult {
    pub fn failure(error: impl Into<String>) -> Self {
        InvocationResult::Failure {
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, InvocationResult::Success(_))
    }
}

impl From<InvocationOutput> for InvocationResult {
    fn from(output: InvocationOutput) -> Self {
        InvocationResult::Success(output)
    }
}

impl Serialize for InvocationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            InvocationResult::Success(output) => {
                let mut s = serializer.serialize_struct("InvocationResult", 4)?;
                s.serialize_field("success", &true)?;
                s.serialize_field("response", &output.response)?;
                s.serialize_field("model_id", &output.model_id)?;
                s.serialize_field("usage", &output.usage)?;
                s.end()
            }
            InvocationResult::Failure { error } => {
                let mut s = serializer.serialize_struct("InvocationResult", 2)?;
                s.serialize_field("success", &false)?;
                s.serialize_field("error", error)?;
                s.end()
            }
        }
    }
}

// ─────────────────────────────────────────────
// Bedrock Converse wire format
// ─────────────────────────────────────────────

/// Conversation role on the Converse wire.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConverseRole {
    User,
    Assistant,
}

/// One content block. Only text blocks are produced; other block kinds in a
/// response (reasoning, tool use) deserialize with `text: None`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ContentBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ConverseMessage {
    pub role: ConverseRole,
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

impl ConverseMessage {
    /// A user turn with a single text block.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ConverseRole::User,
            content: vec![ContentBlock::text(text)],
        }
    }
}

/// Request body for `POST /model/{modelId}/converse`.
///
/// The model id travels in the URL path, so it is skipped in the body.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConverseRequest {
    #[serde(skip)]
    pub model_id: String,
    pub messages: Vec<ConverseMessage>,
    pub inference_config: InferenceConfig,
}

impl ConverseRequest {
    /// Build a single-turn request: one user message, no system prompt.
    pub fn single_turn(model_id: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            messages: vec![ConverseMessage::user(prompt)],
            inference_config: InferenceConfig::FIXED,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConverseUsage {
    pub input_tokens: Option<u64>,
    pub output_tokens: Option<u64>,
    pub total_tokens: Option<u64>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct ConverseOutput {
    pub message: Option<ConverseMessage>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConverseMetrics {
    pub latency_ms: Option<u64>,
}

/// Response envelope of a successful Converse call.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConverseResponse {
    #[serde(default)]
    pub output: ConverseOutput,
    pub usage: Option<ConverseUsage>,
    pub stop_reason: Option<String>,
    pub metrics: Option<ConverseMetrics>,
}

impl ConverseResponse {
    /// Text of the first content block of the returned message, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.output
            .message
            .as_ref()?
            .content
            .first()?
            .text
            .as_deref()
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fixed_inference_config_wire_shape() {
        let value = serde_json::to_value(InferenceConfig::FIXED).unwrap();
        assert_eq!(value["maxTokens"], 2048);
        assert!((value["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
        assert!((value["topP"].as_f64().unwrap() - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_single_turn_request_body() {
        let req = ConverseRequest::single_turn("amazon.titan-text-lite-v1", "Hello");
        let value = serde_json::to_value(&req).unwrap();

        assert!(value.get("modelId").is_none());
        assert_eq!(
            value["messages"],
            json!([{ "role": "user", "content": [{ "text": "Hello" }] }])
        );
        assert_eq!(value["inferenceConfig"]["maxTokens"], 2048);
    }

    #[test]
    fn test_success_serializes_without_error() {
        let result = InvocationResult::Success(InvocationOutput {
            response: "hi".into(),
            model_id: "m".into(),
            usage: TokenUsage {
                input_tokens: 1,
                output_tokens: 2,
                total_tokens: 3,
            },
        });
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            json!({
                "success": true,
                "response": "hi",
                "model_id": "m",
                "usage": { "input_tokens": 1, "output_tokens": 2, "total_tokens": 3 }
            })
        );
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_failure_serializes_without_response() {
        let value = serde_json::to_value(InvocationResult::failure("boom")).unwrap();
        assert_eq!(value, json!({ "success": false, "error": "boom" }));
        assert!(value.get("response").is_none());
        assert!(value.get("usage").is_none());
    }

    #[test]
    fn test_usage_defaults_missing_counters() {
        let usage: ConverseUsage = serde_json::from_value(json!({ "inputTokens": 7 })).unwrap();
        let usage = TokenUsage::from(Some(usage));
        assert_eq!(usage.input_tokens, 7);
        assert_eq!(usage.output_tokens, 0);
        assert_eq!(usage.total_tokens, 0);

        assert_eq!(TokenUsage::from(None), TokenUsage::default());
    }

    #[test]
    fn test_parse_converse_response() {
        let resp: ConverseResponse = serde_json::from_value(json!({
            "output": {
                "message": {
                    "role": "assistant",
                    "content": [{ "text": "Paris." }, { "text": "ignored" }]
                }
            },
            "stopReason": "end_turn",
            "usage": { "inputTokens": 12, "outputTokens": 3, "totalTokens": 15 },
            "metrics": { "latencyMs": 321 }
        }))
        .unwrap();

        assert_eq!(resp.first_text(), Some("Paris."));
        assert_eq!(resp.stop_reason.as_deref(), Some("end_turn"));
        assert_eq!(resp.metrics.and_then(|m| m.latency_ms), Some(321));
    }

    #[test]
    fn test_first_text_non_text_block() {
        let resp: ConverseResponse = serde_json::from_value(json!({
            "output": {
                "message": {
                    "role": "assistant",
                    "content": [{ "reasoningContent": { "reasoningText": { "text": "hmm" } } }]
                }
            }
        }))
        .unwrap();
        assert_eq!(resp.first_text(), None);
    }

    #[test]
    fn test_first_text_empty_envelope() {
        let resp: ConverseResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(resp.first_text(), None);
        assert!(resp.usage.is_none());
    }

    #[test]
    fn test_request_missing_fields_deserialize() {
        let req: InvocationRequest = serde_json::from_value(json!({ "prompt": "hi" })).unwrap();
        assert!(req.model_id.is_none());
        assert_eq!(req.prompt.as_deref(), Some("hi"));

        let req: InvocationRequest =
            serde_json::from_value(json!({ "model_id": null, "prompt": null })).unwrap();
        assert_eq!(req, InvocationRequest::default());
    }
}
