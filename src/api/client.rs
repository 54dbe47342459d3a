//! Completion client for OpenAI-Chat-Completions-compatible providers.
//!
//! Three operations against the configured endpoint: non-streaming text
//! completion, streaming text completion (SSE), and image generation. The
//! client owns the single [`ClientConfig`] and writes it back to its
//! [`ConfigStore`] after every mutation. Requests take `&self`; callers are
//! expected to serialize overlapping requests themselves.

use log::{debug, info, warn};
use tokio::sync::mpsc::Sender;

use crate::config::{ClientConfig, ConfigPatch, ConfigStore};

use super::catalog;
use super::error::{ClientError, api_error};
use super::sse::{SseLineBuffer, delta_content};
use super::types::{
    ChatMessage, ChatRequest, ChatResponse, ImageRequest, ImageResponse, Role,
};

/// Instruction used when the caller does not supply one. The text to polish
/// is appended below it.
const DEFAULT_INSTRUCTION: &str = "Polish the following Markdown text. Keep the \
    original formatting and structure; only improve the wording, correct \
    mistakes, and make it read more professionally:";

/// Default model for image generation (Ark Seedream).
const DEFAULT_IMAGE_MODEL: &str = "doubao-seedream-4-5-251128";
const DEFAULT_IMAGE_SIZE: &str = "2K";

/// Options for [`CompletionClient::generate_image`]. `Default` gives the
/// standard single-image request: Seedream model, 2K, watermarked.
#[derive(Debug, Clone)]
pub struct ImageOptions {
    /// Model override; `None` uses the default image model.
    pub model: Option<String>,
    /// Output size, e.g. `"2K"` or `"1024x1024"`.
    pub size: Option<String>,
    /// Whether the provider may generate a sequence of related images.
    pub sequential: bool,
    pub watermark: bool,
}

impl Default for ImageOptions {
    fn default() -> Self {
        ImageOptions {
            model: None,
            size: None,
            sequential: false,
            watermark: true,
        }
    }
}

/// A configured client for one OpenAI-compatible provider.
pub struct CompletionClient {
    config: ClientConfig,
    store: Box<dyn ConfigStore>,
    http: reqwest::Client,
}

impl CompletionClient {
    /// Creates a client from the persisted config, falling back to defaults
    /// when the store has nothing usable.
    pub fn new(store: Box<dyn ConfigStore>) -> Self {
        let config = store.load().unwrap_or_default();
        Self::with_config(config, store)
    }

    /// Creates a client with an explicit starting config. Nothing is
    /// persisted until the first [`configure`](Self::configure).
    pub fn with_config(config: ClientConfig, store: Box<dyn ConfigStore>) -> Self {
        CompletionClient {
            config,
            store,
            http: reqwest::Client::new(),
        }
    }

    /// Merges the patch into the current config and persists the result.
    /// No validation happens here; [`is_valid`](Self::is_valid) is checked
    /// lazily when a request is made.
    pub fn configure(&mut self, patch: ConfigPatch) {
        self.config.apply(patch);
        self.store.save(&self.config);
    }

    /// Switches to a catalog provider, adopting its default base URL and
    /// first model. The `custom` entry has empty defaults, so switching to
    /// it keeps the current URL and model for the user to edit.
    pub fn switch_provider(&mut self, id: &str) {
        let descriptor = catalog::provider(id);
        info!("Switching provider to {}", descriptor.id);
        self.config.provider_id = descriptor.id.to_string();
        if !descriptor.base_url.is_empty() {
            self.config.base_url = descriptor.base_url.to_string();
        }
        if let Some(first) = descriptor.models.first() {
            self.config.model = first.to_string();
        }
        self.store.save(&self.config);
    }

    /// Returns a copy of the current config; mutating it does not affect
    /// the client.
    pub fn config(&self) -> ClientConfig {
        self.config.clone()
    }

    pub fn is_valid(&self) -> bool {
        self.config.is_valid()
    }

    /// Validates the config and returns the URL for `route`, with any
    /// trailing slash on the base URL trimmed.
    fn endpoint(&self, route: &str) -> Result<String, ClientError> {
        if !self.is_valid() {
            return Err(ClientError::Config(
                "API key is not configured".to_string(),
            ));
        }
        let base = self.config.base_url.trim().trim_end_matches('/');
        if base.is_empty() {
            return Err(ClientError::Config(
                "API base URL is not configured".to_string(),
            ));
        }
        Ok(format!("{base}/{route}"))
    }

    /// Builds the chat request body: configured system prompt, then either
    /// the caller's instruction verbatim or the default polishing
    /// instruction with the text appended.
    fn chat_request(&self, text: &str, instruction: Option<&str>, stream: bool) -> ChatRequest {
        let user_content = match instruction {
            Some(i) if !i.trim().is_empty() => i.to_string(),
            _ => format!("{DEFAULT_INSTRUCTION}\n\n{text}"),
        };
        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: Role::System,
                    content: self.config.system_prompt.clone(),
                },
                ChatMessage {
                    role: Role::User,
                    content: user_content,
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            stream,
        }
    }

    /// POSTs a JSON body with bearer auth and maps non-2xx responses to
    /// [`ClientError::Api`], extracting the server's message when possible.
    async fn post<T: serde::Serialize>(
        &self,
        url: &str,
        body: &T,
    ) -> Result<reqwest::Response, ClientError> {
        debug!("POST {url}");
        let response = self
            .http
            .post(url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(body)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        debug!("Response status: {}", response.status());
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response.text().await.unwrap_or_default();
            warn!("API error: {status} - {err_body}");
            return Err(api_error(status, &err_body));
        }
        Ok(response)
    }

    /// Sends one non-streaming chat completion and returns the assistant's
    /// text verbatim. Falls back to `reasoning_content` when `content` is
    /// null or blank, for providers that put the output there.
    pub async fn complete(
        &self,
        text: &str,
        instruction: Option<&str>,
    ) -> Result<String, ClientError> {
        let url = self.endpoint("chat/completions")?;
        let request = self.chat_request(text, instruction, false);
        info!(
            "Chat completion request: model={}, streaming=false",
            request.model
        );

        let response = self.post(&url, &request).await?;
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| ClientError::Format(format!("chat response: {e}")))?;

        let message = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ClientError::Format("response contained no choices".to_string()))?
            .message;

        match message.content {
            Some(content) if !content.trim().is_empty() => Ok(content),
            _ => message.reasoning_content.ok_or_else(|| {
                ClientError::Format("no content in assistant message".to_string())
            }),
        }
    }

    /// Sends one streaming chat completion, delivering each delta through
    /// `sender` in arrival order. Returns only after the transport reports
    /// end-of-stream.
    ///
    /// Dropping the receiver is the cancellation token: the in-flight read
    /// is abandoned and the call fails with [`ClientError::Cancelled`].
    /// Malformed individual frames are logged and skipped, never fatal.
    pub async fn complete_stream(
        &self,
        text: &str,
        instruction: Option<&str>,
        sender: Sender<String>,
    ) -> Result<(), ClientError> {
        let url = self.endpoint("chat/completions")?;
        let request = self.chat_request(text, instruction, true);
        info!(
            "Chat completion request: model={}, streaming=true",
            request.model
        );

        let mut response = self.post(&url, &request).await?;

        let mut buffer = SseLineBuffer::new();
        let mut chunk_count = 0usize;
        let mut total_content_len = 0usize;

        loop {
            // A dropped receiver must abort the stream even while a read is
            // pending against a stalled server, so the read races the
            // channel-closed future.
            let chunk = tokio::select! {
                _ = sender.closed() => {
                    warn!("Chunk receiver dropped mid-stream, aborting");
                    return Err(ClientError::Cancelled);
                }
                chunk = response.chunk() => {
                    chunk.map_err(|e| ClientError::Transport(e.to_string()))?
                }
            };
            let Some(bytes) = chunk else {
                break;
            };
            debug!("Raw chunk received: {} bytes", bytes.len());

            for line in buffer.push(&bytes) {
                if let Some(content) = delta_content(&line) {
                    chunk_count += 1;
                    total_content_len += content.len();
                    if sender.send(content).await.is_err() {
                        warn!("Chunk delivery failed: receiver dropped");
                        return Err(ClientError::Cancelled);
                    }
                }
            }
        }

        // Anything left in the buffer has no newline and therefore cannot
        // be a complete frame.
        info!("Stream ended: {chunk_count} chunks, {total_content_len} content bytes");
        Ok(())
    }

    /// Requests one generated image and returns its URL. The image is never
    /// downloaded or re-hosted.
    pub async fn generate_image(
        &self,
        prompt: &str,
        options: &ImageOptions,
    ) -> Result<String, ClientError> {
        let url = self.endpoint("images/generations")?;
        let request = ImageRequest {
            model: options
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string()),
            prompt: prompt.to_string(),
            sequential_image_generation: if options.sequential {
                "enabled"
            } else {
                "disabled"
            },
            response_format: "url",
            size: options
                .size
                .clone()
                .unwrap_or_else(|| DEFAULT_IMAGE_SIZE.to_string()),
            stream: false,
            watermark: options.watermark,
        };
        info!("Image generation request: model={}", request.model);

        let response = self.post(&url, &request).await?;
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        let parsed: ImageResponse = serde_json::from_str(&body)
            .map_err(|e| ClientError::Format(format!("image response: {e}")))?;

        parsed
            .data
            .into_iter()
            .next()
            .and_then(|d| d.url)
            .ok_or_else(|| ClientError::Format("response carried no image URL".to_string()))
    }
}
