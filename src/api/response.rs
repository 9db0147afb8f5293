use serde::Serialize;
use axum::Json;
use axum::http::StatusCode;
use chrono::Utc;

use crate::api::models::ImageAnnotation;

/// Body of a successful `/images` call. Which variant is produced depends on
/// whether image descriptions are enabled.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ImagesResponse {
    Urls { images: Vec<String> },
    Described { images: Vec<ImageAnnotation> },
}

impl ImagesResponse {
    pub fn len(&self) -> usize {
        match self {
            ImagesResponse::Urls { images } => images.len(),
            ImagesResponse::Described { images } => images.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
}

pub fn success<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

pub fn health() -> (StatusCode, Json<HealthResponse>) {
    success(HealthResponse {
        status: "ok",
        timestamp: Utc::now().to_rfc3339(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_list_serializes_as_plain_strings() {
        let body = ImagesResponse::Urls { images: vec!["a.png".into()] };
        assert_eq!(serde_json::to_value(&body).unwrap(), serde_json::json!({"images": ["a.png"]}));
    }

    #[test]
    fn annotations_serialize_as_objects() {
        let body = ImagesResponse::Described {
            images: vec![ImageAnnotation { url: "a.png".into(), description: "A cat".into() }],
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"images": [{"url": "a.png", "description": "A cat"}]})
        );
    }
}
