//! Wire types for the OpenAI-Chat-Completions-compatible surface.
//!
//! Responses are decoded through explicit serde structs rather than probing
//! loosely-typed values at each call site; anything that does not fit these
//! shapes becomes a `ClientError::Format`.

use serde::{Deserialize, Serialize};

// ============================================================================
// Chat completion request
// ============================================================================

/// Role in a chat message (OpenAI terminology)
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Serialize, Debug, Clone)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// Request body for `POST {base}/chat/completions`.
#[derive(Serialize, Debug)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub stream: bool,
}

// ============================================================================
// Chat completion response (non-streaming)
// ============================================================================

#[derive(Deserialize, Debug)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Deserialize, Debug)]
pub struct ChatChoice {
    pub message: AssistantMessage,
}

/// Assistant output. Reasoning-capable models (e.g. Doubao thinking
/// variants) may leave `content` null and put the text in
/// `reasoning_content` instead.
#[derive(Deserialize, Debug)]
pub struct AssistantMessage {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub reasoning_content: Option<String>,
}

// ============================================================================
// Chat completion response (streaming SSE frames)
// ============================================================================

/// One `data: {json}` frame of a streamed completion.
#[derive(Deserialize, Debug)]
pub struct StreamFrame {
    #[serde(default)]
    pub choices: Vec<StreamChoice>,
}

#[derive(Deserialize, Debug)]
pub struct StreamChoice {
    #[serde(default)]
    pub delta: Delta,
}

#[derive(Deserialize, Debug, Default)]
pub struct Delta {
    #[serde(default)]
    pub content: Option<String>,
}

// ============================================================================
// Image generation
// ============================================================================

/// Request body for `POST {base}/images/generations` (Ark-style).
#[derive(Serialize, Debug)]
pub struct ImageRequest {
    pub model: String,
    pub prompt: String,
    /// `"enabled"` or `"disabled"`.
    pub sequential_image_generation: &'static str,
    /// Always `"url"`; the caller receives a link, never image bytes.
    pub response_format: &'static str,
    pub size: String,
    pub stream: bool,
    pub watermark: bool,
}

#[derive(Deserialize, Debug)]
pub struct ImageResponse {
    #[serde(default)]
    pub data: Vec<ImageDatum>,
}

#[derive(Deserialize, Debug)]
pub struct ImageDatum {
    #[serde(default)]
    pub url: Option<String>,
}
