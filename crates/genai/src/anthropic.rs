//! Anthropic Messages API client (text generation).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use storynest_core::ports::{GenAiError, ReferenceImage, TextGenerator};

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";

/// Model used for all story generation.
pub const MODEL: &str = "claude-sonnet-4-20250514";

/// Output token budget for one story.
pub const MAX_TOKENS: u32 = 2048;

/// Sampling temperature; stories should vary between calls.
pub const TEMPERATURE: f32 = 1.0;

/// Client for single-shot story completions.
#[derive(Clone)]
pub struct AnthropicClient {
    client: reqwest::Client,
    api_key: String,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: Vec<ContentPart<'a>>,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum ContentPart<'a> {
    Image { source: ImageSource<'a> },
    Text { text: &'a str },
}

#[derive(Serialize)]
struct ImageSource<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    media_type: &'a str,
    data: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ResponseBlock>,
}

#[derive(Deserialize)]
struct ResponseBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

impl AnthropicClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
        }
    }

    fn build_request<'a>(
        prompt: &'a str,
        reference_image: Option<&'a ReferenceImage>,
    ) -> MessagesRequest<'a> {
        // When a reference image is attached it precedes the prompt text so
        // the instructions can refer to "the attached image".
        let mut content = Vec::with_capacity(2);
        if let Some(image) = reference_image {
            content.push(ContentPart::Image {
                source: ImageSource {
                    kind: "base64",
                    media_type: &image.media_type,
                    data: &image.data_base64,
                },
            });
        }
        content.push(ContentPart::Text { text: prompt });

        MessagesRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            messages: vec![Message {
                role: "user",
                content,
            }],
        }
    }

    /// Pull the first text block out of a Messages API response.
    fn response_text(response: MessagesResponse) -> Result<String, GenAiError> {
        response
            .content
            .into_iter()
            .find(|block| block.kind == "text")
            .map(|block| block.text)
            .ok_or_else(|| {
                GenAiError::UnexpectedResponse("no text block in model response".into())
            })
    }
}

#[async_trait]
impl TextGenerator for AnthropicClient {
    async fn generate(
        &self,
        prompt: &str,
        reference_image: Option<&ReferenceImage>,
    ) -> Result<String, GenAiError> {
        let request = Self::build_request(prompt, reference_image);

        let response = self
            .client
            .post(MESSAGES_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| GenAiError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Text generation request failed");
            return Err(GenAiError::Upstream {
                status: status.as_u16(),
                message: truncate(&body, 500),
            });
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| GenAiError::UnexpectedResponse(e.to_string()))?;

        Self::response_text(parsed)
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        let mut end = max;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        s[..end].to_string()
    }
}
