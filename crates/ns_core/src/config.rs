use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum NarrationStyle {
    /// Every retained summary, in article order
    #[default]
    Summaries,
    /// Templated paragraph with the distribution, verdict and headlines
    Report,
}

#[derive(Clone)]
pub struct Config {
    pub newsapi_key: Option<String>,
    pub gnews_key: Option<String>,
    pub audio_dir: PathBuf,
    pub language: String,
    pub narration: NarrationStyle,
    pub provider_timeout: Duration,
    pub max_articles: usize,
    pub topics_file: Option<PathBuf>,
    /// JSON array of raw provider records served as an extra provider
    pub fixture_file: Option<PathBuf>,
    pub offline: bool,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.language.trim().is_empty() {
            return Err(Error::Config("language must not be empty".to_string()));
        }
        if self.provider_timeout.is_zero() {
            return Err(Error::Config("provider timeout must be positive".to_string()));
        }
        if self.max_articles == 0 {
            return Err(Error::Config("max articles must be positive".to_string()));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            newsapi_key: None,
            gnews_key: None,
            audio_dir: PathBuf::from("data"),
            language: "hi".to_string(),
            narration: NarrationStyle::default(),
            provider_timeout: Duration::from_secs(10),
            max_articles: 10,
            topics_file: None,
            fixture_file: None,
            offline: false,
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("newsapi_key", &self.newsapi_key.as_deref().map(|_| "<redacted>"))
            .field("gnews_key", &self.gnews_key.as_deref().map(|_| "<redacted>"))
            .field("audio_dir", &self.audio_dir)
            .field("language", &self.language)
            .field("narration", &self.narration)
            .field("provider_timeout", &self.provider_timeout)
            .field("max_articles", &self.max_articles)
            .field("topics_file", &self.topics_file)
            .field("fixture_file", &self.fixture_file)
            .field("offline", &self.offline)
            .finish()
    }
}
