use futures::future::join_all;
use ns_core::logging::Logger;
use ns_core::{
    Article, AudioStorage, Config, Error, NewsReport, Result, SentimentModel, SpeechSynthesizer,
};
use ns_inference::{
    compare, create_synthesizer, create_translator, ArticleTagger, LexiconSentiment,
    NarrationBuilder, TopicTable, TopicTagger,
};
use ns_storage::{artifact_name, FileAudioStorage};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use crate::normalize::normalize_record;
use crate::providers::{FixtureProvider, GNewsProvider, NewsApiProvider, NewsProvider};

pub struct NewsManager {
    providers: Vec<Arc<dyn NewsProvider>>,
    topics: TopicTable,
    tagger: ArticleTagger,
    narration: NarrationBuilder,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    storage: Arc<dyn AudioStorage>,
    provider_timeout: Duration,
    max_articles: usize,
}

impl NewsManager {
    pub fn new(
        topics: TopicTable,
        narration: NarrationBuilder,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        storage: Arc<dyn AudioStorage>,
    ) -> Self {
        let tagger = ArticleTagger::new(Arc::new(LexiconSentiment::new()), TopicTagger::new(&topics));
        let defaults = Config::default();
        Self {
            providers: Vec::new(),
            topics,
            tagger,
            narration,
            synthesizer,
            storage,
            provider_timeout: defaults.provider_timeout,
            max_articles: defaults.max_articles,
        }
    }

    /// Wires providers, models and storage from startup configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;

        let topics = match &config.topics_file {
            Some(path) => TopicTable::from_file(path)?,
            None => TopicTable::default(),
        };
        let narration =
            NarrationBuilder::new(config.narration, config.language.clone(), create_translator(config));
        let storage = Arc::new(FileAudioStorage::new(config.audio_dir.clone()));

        let mut manager = Self::new(topics, narration, create_synthesizer(config), storage)
            .with_provider_timeout(config.provider_timeout)
            .with_max_articles(config.max_articles);

        if let Some(key) = &config.newsapi_key {
            manager.add_provider(Arc::new(NewsApiProvider::new(key.clone())));
        }
        if let Some(key) = &config.gnews_key {
            manager.add_provider(Arc::new(GNewsProvider::new(key.clone())));
        }
        if let Some(path) = &config.fixture_file {
            manager.add_provider(Arc::new(FixtureProvider::from_file(path)?));
        }
        if manager.providers.is_empty() {
            warn!("⚠️ No news providers configured; every analysis will report no articles");
        }

        Ok(manager)
    }

    pub fn with_provider_timeout(mut self, timeout: Duration) -> Self {
        self.provider_timeout = timeout;
        self
    }

    pub fn with_max_articles(mut self, max_articles: usize) -> Self {
        self.max_articles = max_articles;
        self
    }

    pub fn with_sentiment_model(mut self, model: Arc<dyn SentimentModel>) -> Self {
        self.tagger = ArticleTagger::new(model, TopicTagger::new(&self.topics));
        self
    }

    pub fn add_provider(&mut self, provider: Arc<dyn NewsProvider>) {
        self.providers.push(provider);
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub fn topics(&self) -> &TopicTable {
        &self.topics
    }

    /// Queries every provider concurrently. A provider that fails or times out
    /// contributes nothing; only an empty combined batch is an error.
    pub async fn fetch_articles(&self, company: &str) -> Result<Vec<Article>> {
        let batches = join_all(
            self.providers
                .iter()
                .map(|provider| self.fetch_from(provider.as_ref(), company)),
        )
        .await;

        let mut seen = HashSet::new();
        let articles: Vec<Article> = batches
            .into_iter()
            .flatten()
            .filter(|article| seen.insert(article.title.to_lowercase()))
            .map(|article| self.tagger.tag(article))
            .collect();

        if articles.is_empty() {
            return Err(Error::NoArticles);
        }
        info!("✨ {} articles retained for {}", articles.len(), company);
        Ok(articles)
    }

    async fn fetch_from(&self, provider: &dyn NewsProvider, company: &str) -> Vec<Article> {
        let log = Logger::new().with_prefix(provider.name()).with_prefix(company);
        let fetch = provider.fetch_raw(company, self.max_articles);

        match tokio::time::timeout(self.provider_timeout, fetch).await {
            Ok(Ok(records)) => {
                let articles: Vec<Article> = records
                    .iter()
                    .filter_map(|record| normalize_record(record, provider.name()))
                    .take(self.max_articles)
                    .collect();
                log.debug(&format!("skipped {} records", records.len().saturating_sub(articles.len())));
                log.info(&format!("📰 {} articles", articles.len()));
                articles
            }
            Ok(Err(e)) => {
                log.warn(&format!("⚠️ provider failed: {}", e));
                Vec::new()
            }
            Err(_) => {
                log.warn(&format!("⏱️ provider timed out after {:?}", self.provider_timeout));
                Vec::new()
            }
        }
    }

    /// Full pipeline: fetch, tag, compare, narrate and render speech.
    /// A speech failure leaves `audio_file` empty instead of failing.
    pub async fn analyze(&self, company: &str) -> Result<NewsReport> {
        let company = company.trim();
        if company.is_empty() {
            return Err(Error::EmptyInput("Company"));
        }
        info!("🦗 Analyzing news coverage for {}", company);

        let articles = self.fetch_articles(company).await?;
        let comparative = compare(&articles);
        let final_sentiment = comparative.verdict;

        let narration = self.narration.narrate(company, &articles, &comparative).await;
        let audio_file = match self.render_speech(&narration, Some(company)).await {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("⚠️ Speech synthesis failed: {}", e);
                None
            }
        };

        Ok(NewsReport {
            company: company.to_string(),
            articles,
            comparative,
            final_sentiment,
            audio_file,
        })
    }

    /// Renders caller-supplied text as-is and returns the artifact path.
    pub async fn synthesize(&self, text: &str) -> Result<String> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::EmptyInput("Text"));
        }
        self.render_speech(text, None).await
    }

    /// Reads back an artifact previously written by [`Self::synthesize`] or [`Self::analyze`].
    pub async fn load_audio(&self, name: &str) -> Result<Vec<u8>> {
        self.storage.load(name).await
    }

    async fn render_speech(&self, text: &str, label: Option<&str>) -> Result<String> {
        let audio = self
            .synthesizer
            .synthesize(text, self.narration.language())
            .await?;
        let path = self.storage.store(&artifact_name(label, &audio), &audio).await?;
        info!("🔊 Audio saved to {} (via {})", path, self.synthesizer.name());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ns_core::{NarrationStyle, Sentiment, Verdict};
    use ns_inference::comparison::NO_COMMON_TOPICS;
    use ns_inference::models::{EchoTranslator, SilentSynthesizer};
    use ns_storage::MemoryAudioStorage;
    use serde_json::{json, Value};

    struct FailingProvider;

    #[async_trait]
    impl NewsProvider for FailingProvider {
        fn name(&self) -> &str {
            "failing"
        }

        async fn fetch_raw(&self, _company: &str, _limit: usize) -> Result<Vec<Value>> {
            Err(Error::Provider("HTTP 500".to_string()))
        }
    }

    struct SlowProvider;

    #[async_trait]
    impl NewsProvider for SlowProvider {
        fn name(&self) -> &str {
            "slow"
        }

        async fn fetch_raw(&self, _company: &str, _limit: usize) -> Result<Vec<Value>> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(vec![json!({"title": "Late", "description": "Too late."})])
        }
    }

    struct BrokenSynthesizer;

    #[async_trait]
    impl SpeechSynthesizer for BrokenSynthesizer {
        fn name(&self) -> &str {
            "broken"
        }

        async fn synthesize(&self, _text: &str, _lang: &str) -> Result<Vec<u8>> {
            Err(Error::Speech("engine unavailable".to_string()))
        }
    }

    fn acme_records() -> Vec<Value> {
        vec![
            json!({
                "source": {"name": "Daily Wire"},
                "title": "Acme unveils breakthrough battery",
                "description": "Acme reports strong growth and record profit."
            }),
            json!({
                "source": {"name": "Courier"},
                "title": "Acme faces antitrust lawsuit",
                "description": "Regulators warn of fraud risks as losses mount."
            }),
            json!({"title": "[Removed]", "description": "[Removed]"}),
        ]
    }

    fn manager_with(synthesizer: Arc<dyn SpeechSynthesizer>) -> NewsManager {
        let narration = NarrationBuilder::new(NarrationStyle::Summaries, "hi", Arc::new(EchoTranslator));
        NewsManager::new(
            TopicTable::default(),
            narration,
            synthesizer,
            Arc::new(MemoryAudioStorage::new()),
        )
        .with_provider_timeout(Duration::from_millis(200))
    }

    #[tokio::test]
    async fn test_acme_end_to_end() {
        let mut manager = manager_with(Arc::new(SilentSynthesizer));
        manager.add_provider(Arc::new(FixtureProvider::new("fixture", acme_records())));
        manager.add_provider(Arc::new(FailingProvider));

        let report = manager.analyze("Acme").await.unwrap();
        assert_eq!(report.company, "Acme");
        assert_eq!(report.articles.len(), 2);
        assert_eq!(report.articles[0].sentiment, Sentiment::Positive);
        assert_eq!(report.articles[1].sentiment, Sentiment::Negative);

        let distribution = report.comparative.distribution;
        assert_eq!((distribution.positive, distribution.negative, distribution.neutral), (1, 1, 0));

        assert_eq!(report.comparative.coverage_differences.len(), 1);
        assert!(report.comparative.coverage_differences[0]
            .impact
            .contains("The first article is positive while the second is negative"));
        assert_eq!(report.comparative.topic_overlap.common, vec![NO_COMMON_TOPICS]);
        assert_eq!(report.final_sentiment, Verdict::MostlyNegative);

        let audio = report.audio_file.unwrap();
        assert!(audio.starts_with("memory://acme_"));
    }

    #[tokio::test]
    async fn test_no_articles_is_an_error() {
        let mut manager = manager_with(Arc::new(SilentSynthesizer));
        manager.add_provider(Arc::new(FailingProvider));
        manager.add_provider(Arc::new(FixtureProvider::new(
            "empty",
            vec![json!({"title": "[removed]", "description": "gone"})],
        )));
        assert!(matches!(manager.analyze("Acme").await, Err(Error::NoArticles)));

        let bare = manager_with(Arc::new(SilentSynthesizer));
        assert!(matches!(bare.analyze("Acme").await, Err(Error::NoArticles)));
    }

    #[tokio::test]
    async fn test_timed_out_provider_is_skipped() {
        let mut manager = manager_with(Arc::new(SilentSynthesizer));
        manager.add_provider(Arc::new(SlowProvider));
        manager.add_provider(Arc::new(FixtureProvider::new("fixture", acme_records())));

        let articles = manager.fetch_articles("Acme").await.unwrap();
        assert_eq!(articles.len(), 2);
        assert!(articles.iter().all(|a| a.title != "Late"));
    }

    #[tokio::test]
    async fn test_duplicate_titles_across_providers_kept_once() {
        let mut manager = manager_with(Arc::new(SilentSynthesizer));
        manager.add_provider(Arc::new(FixtureProvider::new("a", acme_records())));
        manager.add_provider(Arc::new(FixtureProvider::new("b", acme_records())));

        let articles = manager.fetch_articles("Acme").await.unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].source.as_deref(), Some("Daily Wire"));
    }

    #[tokio::test]
    async fn test_max_articles_per_provider() {
        let mut manager = manager_with(Arc::new(SilentSynthesizer)).with_max_articles(1);
        manager.add_provider(Arc::new(FixtureProvider::new("fixture", acme_records())));
        assert_eq!(manager.fetch_articles("Acme").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_speech_failure_leaves_audio_empty() {
        let mut manager = manager_with(Arc::new(BrokenSynthesizer));
        manager.add_provider(Arc::new(FixtureProvider::new("fixture", acme_records())));

        let report = manager.analyze("Acme").await.unwrap();
        assert!(report.audio_file.is_none());
        assert!(manager.synthesize("hello").await.is_err());
    }

    #[tokio::test]
    async fn test_empty_inputs_rejected() {
        let manager = manager_with(Arc::new(SilentSynthesizer));
        assert!(matches!(manager.synthesize("  ").await, Err(Error::EmptyInput("Text"))));
        assert!(matches!(manager.analyze("").await, Err(Error::EmptyInput("Company"))));
    }

    #[tokio::test]
    async fn test_synthesize_is_content_addressed() {
        let manager = manager_with(Arc::new(SilentSynthesizer));
        let a = manager.synthesize("first").await.unwrap();
        let b = manager.synthesize("second").await.unwrap();
        assert_ne!(a, b);
        assert_eq!(a, manager.synthesize("first").await.unwrap());
        assert!(a.starts_with("memory://output_"));

        let name = a.trim_start_matches("memory://");
        assert_eq!(manager.load_audio(name).await.unwrap(), b"ID3 offline:hi:first");
        assert!(matches!(manager.load_audio("missing.mp3").await, Err(Error::NotFound(_))));
    }

    #[test]
    fn test_from_config_registers_keyed_providers() {
        let config = Config {
            newsapi_key: Some("key".to_string()),
            offline: true,
            ..Config::default()
        };
        let manager = NewsManager::from_config(&config).unwrap();
        assert_eq!(manager.provider_names(), vec!["newsapi"]);

        let bad = Config {
            max_articles: 0,
            ..Config::default()
        };
        assert!(NewsManager::from_config(&bad).is_err());
    }
}
