//! HTTP client for the Bedrock Runtime `Converse` API.
//!
//! Talks directly to `POST {endpoint}/model/{modelId}/converse` with bearer
//! authentication. The body and response envelope are identical for every model
//! family, so there is no per-provider logic here.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use tracing::{debug, error};

use bedrox_core::config::BedrockConfig;
use bedrox_core::types::{ConverseRequest, ConverseResponse};
use bedrox_core::InvokeError;

use crate::credential::Credential;
use crate::traits::ConverseApi;

/// Header carrying the service error code on failed calls.
const ERROR_TYPE_HEADER: &str = "x-amzn-errortype";

// ─────────────────────────────────────────────
// BedrockClient
// ─────────────────────────────────────────────

/// Bedrock Runtime client over `reqwest`.
pub struct BedrockClient {
    /// HTTP client (shared, connection-pooled).
    client: reqwest::Client,
    /// Runtime base URL (e.g. `"https://bedrock-runtime.us-east-1.amazonaws.com"`).
    endpoint: String,
}

impl std::fmt::Debug for BedrockClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BedrockClient")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl BedrockClient {
    /// Create a client from the Bedrock section of the config.
    pub fn new(config: &BedrockConfig) -> Result<Self, InvokeError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                InvokeError::Configuration(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(BedrockClient {
            client,
            endpoint: config.endpoint_url(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Build the Converse URL for a model. The id is percent-encoded because
    /// Bedrock identifiers routinely contain `:`.
    fn converse_url(&self, model_id: &str) -> String {
        format!(
            "{}/model/{}/converse",
            self.endpoint.trim_end_matches('/'),
            urlencoding::encode(model_id)
        )
    }
}

#[async_trait]
impl ConverseApi for BedrockClient {
    async fn converse(
        &self,
        credential: &Credential,
        request: &ConverseRequest,
    ) -> Result<ConverseResponse, InvokeError> {
        let url = self.converse_url(&request.model_id);

        debug!(
            model = %request.model_id,
            messages = request.messages.len(),
            max_tokens = request.inference_config.max_tokens,
            "Calling Bedrock Converse"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(credential.expose())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!(model = %request.model_id, error = ?e, "HTTP request failed");
                InvokeError::Unexpected(describe_transport_error(e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let headers = response.headers().clone();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            let err = parse_error_response(status, &headers, &body);
            error!(
                model = %request.model_id,
                status = %status,
                body = %body,
                "Bedrock API error"
            );
            return Err(err);
        }

        let parsed = response.json::<ConverseResponse>().await.map_err(|e| {
            error!(model = %request.model_id, error = ?e, "Failed to parse Converse response");
            InvokeError::Unexpected(format!("invalid Converse response: {}", e.without_url()))
        })?;

        debug!(
            model = %request.model_id,
            stop_reason = parsed.stop_reason.as_deref().unwrap_or("?"),
            latency_ms = parsed.metrics.as_ref().and_then(|m| m.latency_ms).unwrap_or(0),
            "Converse response received"
        );

        Ok(parsed)
    }

    fn display_name(&self) -> &str {
        "Amazon Bedrock"
    }
}

/// Client-safe description of a transport failure. The endpoint URL and the
/// source chain stay in the logs.
fn describe_transport_error(e: reqwest::Error) -> String {
    if e.is_timeout() {
        "request to Bedrock timed out".to_string()
    } else if e.is_connect() {
        "could not connect to Bedrock".to_string()
    } else {
        format!("request to Bedrock failed: {}", e.without_url())
    }
}

// ─────────────────────────────────────────────
// Error envelope
// ─────────────────────────────────────────────

/// Turn a non-2xx Bedrock response into `InvokeError::Remote`.
///
/// The code comes from the `x-amzn-ErrorType` header, then the body's `__type`,
/// then the status number. The message comes from `message` / `Message`, else
/// the status reason; non-JSON bodies (proxy error pages) are never echoed.
pub fn parse_error_response(status: StatusCode, headers: &HeaderMap, body: &str) -> InvokeError {
    let json = serde_json::from_str::<serde_json::Value>(body).ok();

    let code = headers
        .get(ERROR_TYPE_HEADER)
        .and_then(|v| v.to_str().ok())
        .or_else(|| {
            json.as_ref()
                .and_then(|j| j.get("__type"))
                .and_then(|v| v.as_str())
        })
        .map(normalize_error_code)
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| status.as_u16().to_string());

    let message = json
        .as_ref()
        .and_then(|j| {
            j.get("message")
                .or_else(|| j.get("Message"))
                .and_then(|v| v.as_str())
        })
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        });

    InvokeError::Remote { code, message }
}

/// `ThrottlingException:http://internal.amazon.com/...` → `ThrottlingException`,
/// `com.amazon.coral.service#AccessDeniedException` → `AccessDeniedException`.
fn normalize_error_code(raw: &str) -> String {
    let code = raw.split(':').next().unwrap_or(raw);
    let code = code.rsplit('#').next().unwrap_or(code);
    code.trim().to_string()
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;
    use wiremock::matchers::{body_json, body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn make_client(endpoint: &str) -> BedrockClient {
        let config = BedrockConfig {
            endpoint: Some(endpoint.to_string()),
            timeout_secs: 5,
            ..Default::default()
        };
        BedrockClient::new(&config).unwrap()
    }

    // ── Unit tests ──

    #[test]
    fn test_converse_url_encodes_model_id() {
        let client = make_client("https://bedrock-runtime.us-east-1.amazonaws.com/");
        assert_eq!(
            client.converse_url("anthropic.claude-3-haiku-20240307-v1:0"),
            "https://bedrock-runtime.us-east-1.amazonaws.com/model/anthropic.claude-3-haiku-20240307-v1%3A0/converse"
        );
    }

    #[test]
    fn test_default_endpoint_from_region() {
        let config = BedrockConfig {
            region: "us-west-2".into(),
            ..Default::default()
        };
        let client = BedrockClient::new(&config).unwrap();
        assert_eq!(client.endpoint(), "https://bedrock-runtime.us-west-2.amazonaws.com");
    }

    #[test]
    fn test_normalize_error_code() {
        assert_eq!(
            normalize_error_code("ThrottlingException:http://internal.amazon.com/coral/com.amazon.bedrock/"),
            "ThrottlingException"
        );
        assert_eq!(
            normalize_error_code("com.amazon.coral.service#AccessDeniedException"),
            "AccessDeniedException"
        );
        assert_eq!(normalize_error_code("ValidationException"), "ValidationException");
    }

    #[test]
    fn test_parse_error_header_wins() {
        let mut headers = HeaderMap::new();
        headers.insert(
            ERROR_TYPE_HEADER,
            HeaderValue::from_static("ThrottlingException:http://internal.amazon.com/coral/"),
        );
        let err = parse_error_response(
            StatusCode::TOO_MANY_REQUESTS,
            &headers,
            r#"{"message":"Rate exceeded"}"#,
        );
        assert_eq!(err, InvokeError::remote("ThrottlingException", "Rate exceeded"));
    }

    #[test]
    fn test_parse_error_body_type() {
        let err = parse_error_response(
            StatusCode::FORBIDDEN,
            &HeaderMap::new(),
            r#"{"__type":"com.amazon.coral.service#AccessDeniedException","Message":"Not authorized"}"#,
        );
        assert_eq!(err, InvokeError::remote("AccessDeniedException", "Not authorized"));
    }

    #[test]
    fn test_parse_error_no_code_uses_status() {
        let err = parse_error_response(StatusCode::BAD_GATEWAY, &HeaderMap::new(), "upstream down");
        assert_eq!(err, InvokeError::remote("502", "Bad Gateway"));
    }

    #[test]
    fn test_parse_error_html_body_not_echoed() {
        let page = format!("<html><body>{}</body></html>", "x".repeat(2000));
        let err = parse_error_response(StatusCode::BAD_GATEWAY, &HeaderMap::new(), &page);
        assert_eq!(err, InvokeError::remote("502", "Bad Gateway"));
        assert!(!err.client_message().contains("<html>"));
    }

    #[test]
    fn test_parse_error_empty_body_uses_reason() {
        let err = parse_error_response(StatusCode::SERVICE_UNAVAILABLE, &HeaderMap::new(), "");
        assert_eq!(err, InvokeError::remote("503", "Service Unavailable"));
    }

    // ── Integration tests with mock server ──

    fn success_body() -> serde_json::Value {
        serde_json::json!({
            "output": {
                "message": {
                    "role": "assistant",
                    "content": [{ "text": "Hello from Bedrock." }]
                }
            },
            "stopReason": "end_turn",
            "usage": { "inputTokens": 9, "outputTokens": 4, "totalTokens": 13 },
            "metrics": { "latencyMs": 120 }
        })
    }

    #[tokio::test]
    async fn test_converse_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/model/amazon.titan-text-lite-v1/converse"))
            .and(header("Authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = make_client(&mock_server.uri());
        let request = ConverseRequest::single_turn("amazon.titan-text-lite-v1", "Hi");
        let resp = client
            .converse(&Credential::new("test-token"), &request)
            .await
            .unwrap();

        assert_eq!(resp.first_text(), Some("Hello from Bedrock."));
        assert_eq!(resp.usage.unwrap().total_tokens, Some(13));
    }

    #[tokio::test]
    async fn test_converse_sends_correct_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/model/deepseek.r1-v1%3A0/converse"))
            .and(body_json(serde_json::json!({
                "messages": [{ "role": "user", "content": [{ "text": "What is 2+2?" }] }],
                "inferenceConfig": { "maxTokens": 2048, "temperature": 0.7, "topP": 0.9 }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
            .mount(&mock_server)
            .await;

        let client = make_client(&mock_server.uri());
        let request = ConverseRequest::single_turn("deepseek.r1-v1:0", "What is 2+2?");
        let resp = client.converse(&Credential::new("k"), &request).await;

        // If the path or body matcher fails, wiremock returns 404 → Remote error
        assert!(resp.is_ok(), "unexpected error: {:?}", resp.err());
    }

    #[tokio::test]
    async fn test_converse_throttling_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(body_partial_json(serde_json::json!({
                "inferenceConfig": { "maxTokens": 2048 }
            })))
            .respond_with(
                ResponseTemplate::new(429)
                    .insert_header(
                        "x-amzn-ErrorType",
                        "ThrottlingException:http://internal.amazon.com/coral/com.amazon.bedrock/",
                    )
                    .set_body_json(serde_json::json!({ "message": "Rate exceeded" })),
            )
            .mount(&mock_server)
            .await;

        let client = make_client(&mock_server.uri());
        let request = ConverseRequest::single_turn("amazon.titan-text-lite-v1", "Hi");
        let err = client
            .converse(&Credential::new("k"), &request)
            .await
            .unwrap_err();

        assert_eq!(
            err.client_message(),
            "AWS Bedrock Error (ThrottlingException): Rate exceeded"
        );
    }

    #[tokio::test]
    async fn test_converse_invalid_json_is_unexpected() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let client = make_client(&mock_server.uri());
        let request = ConverseRequest::single_turn("amazon.titan-text-lite-v1", "Hi");
        let err = client
            .converse(&Credential::new("k"), &request)
            .await
            .unwrap_err();

        assert!(matches!(err, InvokeError::Unexpected(_)));
    }

    #[tokio::test]
    async fn test_converse_network_error() {
        // Point to a port that's not listening
        let client = make_client("http://127.0.0.1:1");
        let request = ConverseRequest::single_turn("amazon.titan-text-lite-v1", "Hi");
        let err = client
            .converse(&Credential::new("k"), &request)
            .await
            .unwrap_err();

        assert!(matches!(err, InvokeError::Unexpected(_)));
        let message = err.client_message();
        assert_eq!(message, "Server error: could not connect to Bedrock");
        assert!(!message.contains("127.0.0.1"));
    }

    #[tokio::test]
    async fn test_converse_timeout_hides_endpoint() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(success_body())
                    .set_delay(std::time::Duration::from_secs(3)),
            )
            .mount(&mock_server)
            .await;

        let config = BedrockConfig {
            endpoint: Some(mock_server.uri()),
            timeout_secs: 1,
            ..Default::default()
        };
        let client = BedrockClient::new(&config).unwrap();
        let request = ConverseRequest::single_turn("amazon.titan-text-lite-v1", "Hi");
        let err = client
            .converse(&Credential::new("k"), &request)
            .await
            .unwrap_err();

        let message = err.client_message();
        assert_eq!(message, "Server error: request to Bedrock timed out");
        assert!(!message.contains(&mock_server.uri()));
    }
}
