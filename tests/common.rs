use page_image_extractor::{api::routes::create_router, config::Config, AppState};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use wiremock::MockServer;

pub const SCRAPE_PATH: &str = "/v1/scrape";
pub const VISION_PATH: &str = "/v1/chat/completions";

/// Config pointing both outbound services at `upstream`.
pub fn test_config(upstream: &MockServer, describe_images: bool) -> Config {
    Config {
        firecrawl_api_key: Some("scrape-key".to_string()),
        firecrawl_api_url: format!("{}{}", upstream.uri(), SCRAPE_PATH),
        openai_api_key: Some("vision-key".to_string()),
        openai_api_url: format!("{}{}", upstream.uri(), VISION_PATH),
        describe_images,
        enable_cors: false,
        ..Config::default()
    }
}

/// Serves the router on an ephemeral port and returns its base URL.
pub async fn spawn_app(config: Config) -> String {
    let state = AppState::new(config).expect("state should build");
    let app = create_router(state);
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server");
    });
    format!("http://{}", addr)
}

pub async fn get_images(base: &str, target: Option<&str>) -> (u16, Value) {
    match target {
        Some(target) => get_images_with(base, &[("url", target)]).await,
        None => get_images_with(base, &[]).await,
    }
}

pub async fn get_images_with(base: &str, params: &[(&str, &str)]) -> (u16, Value) {
    let res = reqwest::Client::new()
        .get(format!("{}/images", base))
        .query(params)
        .send()
        .await
        .expect("request");
    let status = res.status().as_u16();
    let body = res.json::<Value>().await.expect("json body");
    (status, body)
}

pub fn chat_completion(text: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": text},
            "finish_reason": "stop"
        }]
    })
}
