use ns_core::{Article, SentimentModel};
use std::fmt;
use std::sync::Arc;

pub mod comparison;
pub mod models;
pub mod narration;
pub mod sentiment;
pub mod topics;

pub use comparison::compare;
pub use models::{create_synthesizer, create_translator};
pub use narration::NarrationBuilder;
pub use sentiment::LexiconSentiment;
pub use topics::{TopicRule, TopicTable, TopicTagger};

/// Assigns sentiment (from the summary) and topics (from title and summary).
pub struct ArticleTagger {
    sentiment: Arc<dyn SentimentModel>,
    topics: TopicTagger,
}

impl fmt::Debug for ArticleTagger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArticleTagger")
            .field("sentiment", &self.sentiment.name())
            .field("topics", &self.topics)
            .finish()
    }
}

impl ArticleTagger {
    pub fn new(sentiment: Arc<dyn SentimentModel>, topics: TopicTagger) -> Self {
        Self { sentiment, topics }
    }

    pub fn tag(&self, mut article: Article) -> Article {
        article.sentiment = self.sentiment.classify(&article.summary);
        article.topics = self.topics.tag(&format!("{} {}", article.title, article.summary));
        article
    }
}

impl Default for ArticleTagger {
    fn default() -> Self {
        Self::new(Arc::new(LexiconSentiment::new()), TopicTagger::default())
    }
}

pub mod prelude {
    pub use super::{compare, ArticleTagger, NarrationBuilder, TopicTable, TopicTagger};
    pub use ns_core::{Article, Error, Result};
}

#[cfg(test)]
mod tests {
    use super::*;
    use ns_core::Sentiment;

    #[test]
    fn test_tagger_fills_sentiment_and_topics() {
        let tagger = ArticleTagger::default();
        let article = tagger.tag(Article::new(
            "Acme battery plant",
            "Acme posts record profit on strong battery demand",
        ));
        assert_eq!(article.sentiment, Sentiment::Positive);
        assert_eq!(article.topics, vec!["Finance", "Electric Vehicles"]);
    }
}
