use async_trait::async_trait;
use ns_core::{Error, Result};
use reqwest::Client;
use serde_json::Value;
use std::fmt;
use super::{articles_of, NewsProvider};

const DEFAULT_BASE_URL: &str = "https://newsapi.org";

pub struct NewsApiProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl NewsApiProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl fmt::Debug for NewsApiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsApiProvider")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// `{"status": "ok", "articles": [...]}` on success,
/// `{"status": "error", "message": ...}` otherwise.
fn parse_response(body: Value, limit: usize) -> Result<Vec<Value>> {
    match body.get("status").and_then(Value::as_str) {
        Some("ok") => Ok(articles_of(body, limit)),
        _ => {
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unexpected response")
                .to_string();
            Err(Error::Provider(format!("newsapi: {}", message)))
        }
    }
}

#[async_trait]
impl NewsProvider for NewsApiProvider {
    fn name(&self) -> &str {
        "newsapi"
    }

    async fn fetch_raw(&self, company: &str, limit: usize) -> Result<Vec<Value>> {
        let page_size = limit.clamp(1, 100).to_string();
        let body: Value = self
            .client
            .get(format!("{}/v2/everything", self.base_url))
            .header("X-Api-Key", self.api_key.as_str())
            .query(&[
                ("q", company),
                ("language", "en"),
                ("sortBy", "publishedAt"),
                ("pageSize", page_size.as_str()),
            ])
            .send()
            .await?
            .json()
            .await?;
        parse_response(body, limit)
    }
}
