use async_trait::async_trait;
use crate::types::Sentiment;
use crate::Result;

/// Compound score at or above which text counts as positive.
pub const POSITIVE_THRESHOLD: f32 = 0.05;
/// Compound score at or below which text counts as negative.
pub const NEGATIVE_THRESHOLD: f32 = -0.05;

pub trait SentimentModel: Send + Sync {
    fn name(&self) -> &str;

    /// Compound polarity of the text in `[-1, 1]`
    fn score(&self, text: &str) -> f32;

    /// Buckets the compound score into one of the three labels
    fn classify(&self, text: &str) -> Sentiment {
        let score = self.score(text);
        if score >= POSITIVE_THRESHOLD {
            Sentiment::Positive
        } else if score <= NEGATIVE_THRESHOLD {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }
}

#[async_trait]
pub trait Translator: Send + Sync {
    fn name(&self) -> &str;

    /// Translate text into the target language (ISO 639-1 code)
    async fn translate(&self, text: &str, target: &str) -> Result<String>;
}

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    fn name(&self) -> &str;

    /// Render text as MP3 audio spoken in the given language
    async fn synthesize(&self, text: &str, lang: &str) -> Result<Vec<u8>>;
}
