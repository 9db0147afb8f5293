//! Image URL discovery over raw HTML.
//!
//! Four independent signals are scanned and unioned:
//! `<img src|data-src>`, `<source srcset>`, inline `style="...url(...)"`
//! and `<meta property="og:image">`. URLs are kept exactly as written in the
//! markup; nothing is resolved against the page URL.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

static IMG_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("img").expect("Failed to parse img selector")
});

static SOURCE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("source[srcset]").expect("Failed to parse source selector")
});

static STYLE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("[style]").expect("Failed to parse style selector")
});

static OG_IMAGE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"meta[property="og:image"]"#).expect("Failed to parse og:image selector")
});

static CSS_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"url\((.*?)\)").expect("Failed to compile url() pattern")
});

/// Deduplicated image URLs in first-discovered order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImageUrls {
    ordered: Vec<String>,
    seen: HashSet<String>,
}

impl ImageUrls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `url` unless it is empty or already present. Returns whether it was added.
    pub fn insert(&mut self, url: &str) -> bool {
        if url.is_empty() || self.seen.contains(url) {
            return false;
        }
        self.seen.insert(url.to_string());
        self.ordered.push(url.to_string());
        true
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.ordered
    }
}

impl IntoIterator for ImageUrls {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.ordered.into_iter()
    }
}

/// Collects every image URL discoverable in `html`. Never fails; malformed or
/// empty input yields an empty set.
pub fn extract_image_urls(html: &str) -> ImageUrls {
    let mut urls = ImageUrls::new();
    if html.trim().is_empty() {
        return urls;
    }

    let document = Html::parse_document(html);

    for img in document.select(&IMG_SELECTOR) {
        let el = img.value();
        let src = el
            .attr("src")
            .filter(|s| !s.is_empty())
            .or_else(|| el.attr("data-src"));
        if let Some(src) = src {
            urls.insert(src);
        }
    }

    for source in document.select(&SOURCE_SELECTOR) {
        if let Some(srcset) = source.value().attr("srcset") {
            for url in srcset_urls(srcset) {
                urls.insert(url);
            }
        }
    }

    for styled in document.select(&STYLE_SELECTOR) {
        if let Some(style) = styled.value().attr("style") {
            for url in style_urls(style) {
                urls.insert(url);
            }
        }
    }

    for meta in document.select(&OG_IMAGE_SELECTOR) {
        if let Some(content) = meta.value().attr("content") {
            urls.insert(content);
        }
    }

    urls
}

/// Splits a `srcset` value into its URL parts, dropping width/density descriptors.
fn srcset_urls(srcset: &str) -> impl Iterator<Item = &str> {
    srcset
        .split(',')
        .filter_map(|candidate| candidate.split_whitespace().next())
}

/// Every `url(...)` reference in an inline style, with surrounding quotes removed.
fn style_urls(style: &str) -> impl Iterator<Item = &str> {
    CSS_URL_RE
        .captures_iter(style)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim_matches(|c: char| c == '\'' || c == '"'))
}
