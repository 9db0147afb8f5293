//! Client for the hosted scrape service that renders a page and hands back its raw HTML.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AppError, Result};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScrapeRequest<'a> {
    url: &'a str,
    formats: [&'static str; 1],
    only_main_content: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    full_page: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct ScrapeData {
    #[serde(rename = "rawHtml", default)]
    raw_html: Option<String>,
}

/// The service has answered with both of these shapes over time.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ScrapeResponse {
    Enveloped {
        #[allow(dead_code)]
        success: bool,
        data: ScrapeData,
    },
    Flat {
        #[serde(rename = "rawHtml", default)]
        raw_html: Option<String>,
    },
}

impl ScrapeResponse {
    fn into_raw_html(self) -> String {
        match self {
            ScrapeResponse::Enveloped { data, .. } => data.raw_html,
            ScrapeResponse::Flat { raw_html } => raw_html,
        }
        .unwrap_or_default()
    }
}

/// Pulls the raw HTML out of a scrape response body. Unknown shapes and
/// missing fields yield an empty document; only non-JSON bodies are errors.
fn decode_raw_html(body: &str) -> Result<String> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| AppError::ScrapeRequest(format!("Invalid JSON from scrape service: {}", e)))?;

    Ok(serde_json::from_value::<ScrapeResponse>(value)
        .map(ScrapeResponse::into_raw_html)
        .unwrap_or_default())
}

#[derive(Clone)]
pub struct ScrapeClient {
    http: Client,
    api_key: Option<String>,
    endpoint: String,
    full_page: bool,
}

impl ScrapeClient {
    pub fn new(http: Client, config: &Config) -> Self {
        Self {
            http,
            api_key: config.firecrawl_api_key.clone(),
            endpoint: config.firecrawl_api_url.clone(),
            full_page: config.full_page_render,
        }
    }

    /// Fetches the rendered HTML for `url`. An absent or empty HTML field is
    /// returned as an empty string.
    pub async fn fetch_raw_html(&self, url: &str) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::Configuration("FIRECRAWL_API_KEY is not set".to_string()))?;

        let body = ScrapeRequest {
            url,
            formats: ["rawHtml"],
            only_main_content: true,
            full_page: self.full_page.then_some(true),
        };

        let res = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = res.status();
        let text = res.text().await?;

        if !status.is_success() {
            warn!(%status, "scrape service rejected request for {}", url);
            return Err(AppError::ScrapeService {
                status: status.as_u16(),
                body: text,
            });
        }

        let html = decode_raw_html(&text)?;
        debug!(bytes = html.len(), "received raw HTML for {}", url);
        Ok(html)
    }
}
