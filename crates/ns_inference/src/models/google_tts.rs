use async_trait::async_trait;
use ns_core::{Error, Result, SpeechSynthesizer};
use reqwest::Client;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use super::split_chunks;

const DEFAULT_BASE_URL: &str = "https://translate.google.com";
/// Longest text the endpoint accepts per request.
const MAX_CHUNK_CHARS: usize = 100;
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36";

/// Google Translate speech endpoint. Every chunk comes back as a complete MP3
/// stream; concatenated frames play back as a single file.
pub struct GoogleTts {
    client: Arc<Client>,
    base_url: String,
}

impl GoogleTts {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_default();
        Self {
            client: Arc::new(client),
            base_url: base_url.into(),
        }
    }
}

impl Default for GoogleTts {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GoogleTts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleTts")
            .field("client", &"<reqwest::Client>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleTts {
    fn name(&self) -> &str {
        "GoogleTTS"
    }

    async fn synthesize(&self, text: &str, lang: &str) -> Result<Vec<u8>> {
        let chunks = split_chunks(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(Error::EmptyInput("Text"));
        }

        let total = chunks.len().to_string();
        let mut audio = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            let idx = idx.to_string();
            let textlen = chunk.chars().count().to_string();
            let bytes = self
                .client
                .get(format!("{}/translate_tts", self.base_url))
                .query(&[
                    ("ie", "UTF-8"),
                    ("q", chunk.as_str()),
                    ("tl", lang),
                    ("total", total.as_str()),
                    ("idx", idx.as_str()),
                    ("textlen", textlen.as_str()),
                    ("client", "tw-ob"),
                ])
                .send()
                .await?
                .error_for_status()?
                .bytes()
                .await?;
            if bytes.is_empty() {
                return Err(Error::Speech(format!("empty audio for chunk {}", idx)));
            }
            debug!("🔊 Chunk {}/{} synthesized ({} bytes)", idx, total, bytes.len());
            audio.extend_from_slice(&bytes);
        }
        Ok(audio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_text_is_rejected_before_any_request() {
        let tts = GoogleTts::with_base_url("http://127.0.0.1:9");
        let err = tts.synthesize("   ", "hi").await.unwrap_err();
        assert!(matches!(err, Error::EmptyInput(_)));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_an_error() {
        let tts = GoogleTts::with_base_url("http://127.0.0.1:9");
        assert!(tts.synthesize("hello", "hi").await.is_err());
    }
}
