use serde::Serialize;
use reqwest::Client;
use tracing::warn;

use crate::config::Config;
use crate::error::{AppError, Result};

pub const PROMPT: &str = "What is in this image?";
pub const MAX_TOKENS: u32 = 300;

pub const UNSUPPORTED_FORMAT: &str = "Not a supported image format";
pub const DESCRIPTION_UNAVAILABLE: &str = "Description unavailable";

const UNSUPPORTED_EXTENSIONS: &[&str] = &[".svg", ".ico", ".bmp", ".tiff"];

#[derive(Serialize)]
struct ImageUrl<'a> {
    url: &'a str,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageUrl<'a> },
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: Vec<ContentPart<'a>>,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

/// Whether the vision model can be pointed at `url`. Vector/icon formats and
/// inline `data:` URIs are rejected.
pub fn is_supported_image(url: &str) -> bool {
    let lower = url.trim().to_ascii_lowercase();
    if lower.starts_with("data:") {
        return false;
    }
    !UNSUPPORTED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

#[derive(Clone)]
pub struct VisionClient {
    http: Client,
    api_key: Option<String>,
    endpoint: String,
    model: String,
}

impl VisionClient {
    pub fn new(http: Client, config: &Config) -> Self {
        Self {
            http,
            api_key: config.openai_api_key.clone(),
            endpoint: config.openai_api_url.clone(),
            model: config.vision_model.clone(),
        }
    }

    /// Describes the image at `url`. Never fails: unsupported formats and
    /// remote failures come back as [`UNSUPPORTED_FORMAT`] and
    /// [`DESCRIPTION_UNAVAILABLE`] respectively.
    pub async fn describe(&self, url: &str) -> String {
        if !is_supported_image(url) {
            return UNSUPPORTED_FORMAT.to_string();
        }

        match self.request_description(url).await {
            Ok(description) => description,
            Err(e) => {
                warn!("describing {} failed: {}", url, e);
                DESCRIPTION_UNAVAILABLE.to_string()
            }
        }
    }

    async fn request_description(&self, url: &str) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::Vision("OPENAI_API_KEY is not set".to_string()))?;

        let body = ChatRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            messages: vec![Message {
                role: "user",
                content: vec![
                    ContentPart::Text { text: PROMPT },
                    ContentPart::ImageUrl { image_url: ImageUrl { url } },
                ],
            }],
        };

        let res = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Vision(e.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            let text = res.text().await.unwrap_or_default();
            return Err(AppError::Vision(format!("{}: {}", status, text)));
        }

        let json: serde_json::Value = res
            .json()
            .await
            .map_err(|e| AppError::Vision(e.to_string()))?;
        let reply = json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| AppError::Vision("Invalid response format from vision model".to_string()))?
            .trim()
            .to_string();

        if reply.is_empty() {
            return Err(AppError::Vision("Empty reply from vision model".to_string()));
        }
        Ok(reply)
    }
}
