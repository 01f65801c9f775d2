//! Model catalog — static descriptors for the Bedrock models offered to clients.
//!
//! Identifiers are opaque provider-qualified strings passed to Bedrock verbatim;
//! `provider` is a display label only and never drives request construction.

use serde::Serialize;

/// Static description of one selectable model.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct ModelDescriptor {
    /// Bedrock model or inference-profile identifier.
    pub id: &'static str,
    /// Human-readable label.
    pub name: &'static str,
    /// Vendor label shown next to the name.
    pub provider: &'static str,
}

// ─────────────────────────────────────────────
// All models (in display order)
// ─────────────────────────────────────────────

/// Every model exposed by `GET /api/models`, in display order.
pub static MODELS: &[ModelDescriptor] = &[
    // Anthropic (cross-region inference profiles first)
    ModelDescriptor {
        id: "us.anthropic.claude-3-5-sonnet-20241022-v2:0",
        name: "Claude 3.5 Sonnet v2",
        provider: "Anthropic",
    },
    ModelDescriptor {
        id: "us.anthropic.claude-3-5-haiku-20241022-v1:0",
        name: "Claude 3.5 Haiku",
        provider: "Anthropic",
    },
    ModelDescriptor {
        id: "anthropic.claude-3-sonnet-20240229-v1:0",
        name: "Claude 3 Sonnet",
        provider: "Anthropic",
    },
    ModelDescriptor {
        id: "anthropic.claude-3-haiku-20240307-v1:0",
        name: "Claude 3 Haiku",
        provider: "Anthropic",
    },
    // Amazon
    ModelDescriptor {
        id: "amazon.titan-text-express-v1",
        name: "Titan Text Express",
        provider: "Amazon",
    },
    ModelDescriptor {
        id: "amazon.titan-text-lite-v1",
        name: "Titan Text Lite",
        provider: "Amazon",
    },
    // Meta
    ModelDescriptor {
        id: "meta.llama3-1-70b-instruct-v1:0",
        name: "Llama 3.1 70B Instruct",
        provider: "Meta",
    },
    ModelDescriptor {
        id: "meta.llama3-1-8b-instruct-v1:0",
        name: "Llama 3.1 8B Instruct",
        provider: "Meta",
    },
    // Mistral
    ModelDescriptor {
        id: "mistral.mistral-large-2402-v1:0",
        name: "Mistral Large",
        provider: "Mistral AI",
    },
    ModelDescriptor {
        id: "mistral.mistral-7b-instruct-v0:2",
        name: "Mistral 7B Instruct",
        provider: "Mistral AI",
    },
    // OpenAI open-weight
    ModelDescriptor {
        id: "openai.gpt-oss-120b-1:0",
        name: "GPT-OSS 120B",
        provider: "OpenAI",
    },
    ModelDescriptor {
        id: "openai.gpt-oss-20b-1:0",
        name: "GPT-OSS 20B",
        provider: "OpenAI",
    },
    // DeepSeek
    ModelDescriptor {
        id: "deepseek.r1-v1:0",
        name: "DeepSeek R1",
        provider: "DeepSeek",
    },
    ModelDescriptor {
        id: "deepseek.v3-v1:0",
        name: "DeepSeek V3.1",
        provider: "DeepSeek",
    },
];

/// Look up a catalog entry by its exact identifier.
///
/// The gateway does not require a catalog hit; unknown ids are forwarded and
/// Bedrock decides whether they are valid.
pub fn find_model(id: &str) -> Option<&'static ModelDescriptor> {
    MODELS.iter().find(|m| m.id == id)
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
