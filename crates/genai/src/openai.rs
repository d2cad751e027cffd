//! OpenAI Images API client (illustration generation).
//!
//! One call produces one square image; the API answers with a temporary
//! URL whose bytes are fetched immediately, since the URL expires long
//! before the story is read again.

use async_trait::async_trait;
use bytes::Bytes;
use serde::Deserialize;
use serde_json::json;

use storynest_core::ports::{GenAiError, ImageGenerator};

const GENERATIONS_URL: &str = "https://api.openai.com/v1/images/generations";

/// Model used for all illustration generation.
pub const MODEL: &str = "dall-e-3";

/// Fixed output resolution (square).
pub const IMAGE_SIZE: &str = "1024x1024";

/// Error code OpenAI uses for content-policy refusals.
const CONTENT_POLICY_CODE: &str = "content_policy_violation";

/// Client for single-image generations.
#[derive(Clone)]
pub struct OpenAiImageClient {
    client: reqwest::Client,
    api_key: String,
}

#[derive(Deserialize)]
struct GenerationsResponse {
    data: Vec<GeneratedImage>,
}

#[derive(Deserialize)]
struct GeneratedImage {
    url: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: String,
}

impl OpenAiImageClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
        }
    }

    /// Map a non-2xx body to the right error, distinguishing the
    /// content-policy refusal so callers can surface it as a warning.
    fn classify_error(status: u16, body: &str) -> GenAiError {
        if let Ok(parsed) = serde_json::from_str::<ErrorResponse>(body) {
            if parsed.error.code.as_deref() == Some(CONTENT_POLICY_CODE) {
                return GenAiError::ContentPolicy(parsed.error.message);
            }
            return GenAiError::Upstream {
                status,
                message: parsed.error.message,
            };
        }
        GenAiError::Upstream {
            status,
            message: body.chars().take(500).collect(),
        }
    }
}

#[async_trait]
impl ImageGenerator for OpenAiImageClient {
    async fn generate(&self, prompt: &str) -> Result<Bytes, GenAiError> {
        let response = self
            .client
            .post(GENERATIONS_URL)
            .bearer_auth(&self.api_key)
            .json(&json!({
                "model": MODEL,
                "prompt": prompt,
                "n": 1,
                "size": IMAGE_SIZE,
                "quality": "standard",
            }))
            .send()
            .await
            .map_err(|e| GenAiError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::classify_error(status.as_u16(), &body));
        }

        let parsed: GenerationsResponse = response
            .json()
            .await
            .map_err(|e| GenAiError::UnexpectedResponse(e.to_string()))?;

        let image_url = parsed
            .data
            .into_iter()
            .next()
            .map(|image| image.url)
            .ok_or_else(|| GenAiError::UnexpectedResponse("no image in response".into()))?;

        // The returned URL is short-lived; fetch the bytes now.
        let image = self
            .client
            .get(&image_url)
            .send()
            .await
            .map_err(|e| GenAiError::Transport(e.to_string()))?;

        if !image.status().is_success() {
            return Err(GenAiError::Upstream {
                status: image.status().as_u16(),
                message: format!("image fetch failed for {image_url}"),
            });
        }

        image
            .bytes()
            .await
            .map_err(|e| GenAiError::Transport(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn content_policy_rejection_is_distinguished() {
        let body = r#"{"error": {"code": "content_policy_violation",
            "message": "Your request was rejected by the safety system."}}"#;
        assert_matches!(
            OpenAiImageClient::classify_error(400, body),
            GenAiError::ContentPolicy(msg) if msg.contains("safety system")
        );
    }

    #[test]
    fn other_api_errors_are_upstream() {
        let body = r#"{"error": {"code": "rate_limit_exceeded", "message": "slow down"}}"#;
        assert_matches!(
            OpenAiImageClient::classify_error(429, body),
            GenAiError::Upstream { status: 429, message } if message == "slow down"
        );
    }

    #[test]
    fn unparseable_error_body_is_upstream() {
        assert_matches!(
            OpenAiImageClient::classify_error(502, "<html>bad gateway</html>"),
            GenAiError::Upstream { status: 502, .. }
        );
    }

    #[test]
    fn generations_response_parses_first_url() {
        let parsed: GenerationsResponse = serde_json::from_str(
            r#"{"created": 1720000000, "data": [{"url": "https://img.example/tmp.png",
                "revised_prompt": "A cat"}]}"#,
        )
        .unwrap();
        assert_eq!(parsed.data[0].url, "https://img.example/tmp.png");
    }
}
