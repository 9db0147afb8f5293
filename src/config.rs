use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use crate::error::{AppError, Result};

pub const DEFAULT_FIRECRAWL_API_URL: &str = "https://api.firecrawl.dev/v1/scrape";
pub const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_VISION_MODEL: &str = "gpt-4o";

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub firecrawl_api_key: Option<String>,
    pub firecrawl_api_url: String,
    pub full_page_render: bool,
    pub openai_api_key: Option<String>,
    pub openai_api_url: String,
    pub vision_model: String,
    pub describe_images: bool,
    pub enable_cors: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            firecrawl_api_key: None,
            firecrawl_api_url: DEFAULT_FIRECRAWL_API_URL.to_string(),
            full_page_render: false,
            openai_api_key: None,
            openai_api_url: DEFAULT_OPENAI_API_URL.to_string(),
            vision_model: DEFAULT_VISION_MODEL.to_string(),
            describe_images: true,
            enable_cors: true,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        let defaults = Config::default();

        // Missing API keys are reported when a request needs them, not here
        let firecrawl_api_key = optional_var("FIRECRAWL_API_KEY");
        let openai_api_key = optional_var("OPENAI_API_KEY");

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
        let port = port.parse::<u16>().map_err(|e| AppError::Configuration(format!("Invalid port: {}", e)))?;
        let ip = IpAddr::from_str(&host).map_err(|e| AppError::Configuration(format!("Invalid host address: {}", e)))?;

        Ok(Config {
            server_addr: SocketAddr::new(ip, port),
            firecrawl_api_key,
            firecrawl_api_url: optional_var("FIRECRAWL_API_URL").unwrap_or(defaults.firecrawl_api_url),
            full_page_render: bool_var("FIRECRAWL_FULL_PAGE", defaults.full_page_render)?,
            openai_api_key,
            openai_api_url: optional_var("OPENAI_API_URL").unwrap_or(defaults.openai_api_url),
            vision_model: optional_var("VISION_MODEL").unwrap_or(defaults.vision_model),
            describe_images: bool_var("DESCRIBE_IMAGES", defaults.describe_images)?,
            enable_cors: bool_var("ENABLE_CORS", defaults.enable_cors)?,
        })
    }
}

/// Reads a variable, treating blank values the same as unset ones.
fn optional_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn bool_var(name: &str, default: bool) -> Result<bool> {
    match optional_var(name) {
        Some(raw) => parse_bool(&raw)
            .ok_or_else(|| AppError::Configuration(format!("Invalid boolean for {}: {}", name, raw))),
        None => Ok(default),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
