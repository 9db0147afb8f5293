use serde::{Deserialize, Serialize};

#[derive(Debug, Default)]
pub struct ImagesQuery {
    pub url: Option<String>,
}

impl ImagesQuery {
    /// Builds the query from decoded `key=value` pairs. A repeated `url` keeps its first value.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let url = pairs
            .into_iter()
            .find(|(key, _)| key == "url")
            .map(|(_, value)| value);
        ImagesQuery { url }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAnnotation {
    pub url: String,
    pub description: String,
}
