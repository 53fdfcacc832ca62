use async_trait::async_trait;
use ns_core::{Error, Result};
use reqwest::Client;
use serde_json::Value;
use std::fmt;
use super::{articles_of, NewsProvider};

const DEFAULT_BASE_URL: &str = "https://gnews.io";

pub struct GNewsProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GNewsProvider {
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

impl fmt::Debug for GNewsProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GNewsProvider")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Errors come back as `{"errors": [...]}` or `{"errors": {...}}`.
fn parse_response(body: Value, limit: usize) -> Result<Vec<Value>> {
    if let Some(errors) = body.get("errors") {
        return Err(Error::Provider(format!("gnews: {}", errors)));
    }
    if !body.get("articles").map_or(false, Value::is_array) {
        return Err(Error::Provider("gnews: response has no articles".to_string()));
    }
    Ok(articles_of(body, limit))
}

#[async_trait]
impl NewsProvider for GNewsProvider {
    fn name(&self) -> &str {
        "gnews"
    }

    async fn fetch_raw(&self, company: &str, limit: usize) -> Result<Vec<Value>> {
        let max = limit.clamp(1, 100).to_string();
        let body: Value = self
            .client
            .get(format!("{}/api/v4/search", self.base_url))
            .query(&[
                ("q", company),
                ("lang", "en"),
                ("max", max.as_str()),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await?
            .json()
            .await?;
        parse_response(body, limit)
    }
}
