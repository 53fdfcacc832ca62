pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod storage;
pub mod types;

pub use config::{Config, NarrationStyle};
pub use error::{Error, Result};
pub use models::{SentimentModel, SpeechSynthesizer, Translator};
pub use storage::AudioStorage;
pub use types::{
    Article, ComparativeResult, CoverageDifference, NewsReport, Sentiment,
    SentimentDistribution, TopicOverlap, UniqueTopics, Verdict,
};
