use async_trait::async_trait;
use ns_core::Result;
use serde_json::Value;

pub mod fixture;
pub mod gnews;
pub mod newsapi;

pub use fixture::FixtureProvider;
pub use gnews::GNewsProvider;
pub use newsapi::NewsApiProvider;

#[async_trait]
pub trait NewsProvider: Send + Sync {
    /// Short identifier used in logs and as the fallback article source
    fn name(&self) -> &str;

    /// Raw records about the company, at most `limit` of them
    async fn fetch_raw(&self, company: &str, limit: usize) -> Result<Vec<Value>>;
}

/// Pulls the `articles` array out of a provider response body.
pub(crate) fn articles_of(mut body: Value, limit: usize) -> Vec<Value> {
    match body.get_mut("articles").map(Value::take) {
        Some(Value::Array(articles)) => articles.into_iter().take(limit).collect(),
        _ => Vec::new(),
    }
}
