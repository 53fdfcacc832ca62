use async_trait::async_trait;
use ns_core::{Error, Result, Translator};
use reqwest::Client;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use super::split_chunks;

const DEFAULT_BASE_URL: &str = "https://translate.googleapis.com";
/// Keeps each GET request comfortably under URL length limits.
const MAX_CHUNK_CHARS: usize = 1500;

pub struct GoogleTranslator {
    client: Arc<Client>,
    base_url: String,
}

impl GoogleTranslator {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_default();
        Self {
            client: Arc::new(client),
            base_url: base_url.into(),
        }
    }

    async fn translate_chunk(&self, chunk: &str, target: &str) -> Result<String> {
        let body: Value = self
            .client
            .get(format!("{}/translate_a/single", self.base_url))
            .query(&[("client", "gtx"), ("sl", "auto"), ("tl", target), ("dt", "t"), ("q", chunk)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        parse_translation(&body)
    }
}

impl Default for GoogleTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GoogleTranslator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleTranslator")
            .field("client", &"<reqwest::Client>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// The response is a nested array; the first element lists
/// `[translated, original, ...]` segments.
fn parse_translation(body: &Value) -> Result<String> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| Error::Translation("unexpected response shape".to_string()))?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if translated.trim().is_empty() {
        return Err(Error::Translation("empty translation".to_string()));
    }
    Ok(translated)
}

#[async_trait]
impl Translator for GoogleTranslator {
    fn name(&self) -> &str {
        "GoogleTranslate"
    }

    async fn translate(&self, text: &str, target: &str) -> Result<String> {
        let mut parts = Vec::new();
        for chunk in split_chunks(text, MAX_CHUNK_CHARS) {
            parts.push(self.translate_chunk(&chunk, target).await?);
        }
        Ok(parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_translation_joins_segments() {
        let body = json!([[["नमस्ते। ", "Hello. ", null], ["दुनिया", "World", null]], null, "en"]);
        assert_eq!(parse_translation(&body).unwrap(), "नमस्ते। दुनिया");
    }

    #[test]
    fn test_parse_translation_rejects_bad_shape() {
        assert!(parse_translation(&json!({"error": "quota"})).is_err());
        assert!(parse_translation(&json!([[]])).is_err());
    }
}
