use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Title used by providers for articles that were taken down.
pub const REMOVED_SENTINEL: &str = "[removed]";

/// Topic assigned when no keyword of the taxonomy matches.
pub const FALLBACK_TOPIC: &str = "General News";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "Positive"),
            Sentiment::Negative => write!(f, "Negative"),
            Sentiment::Neutral => write!(f, "Neutral"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Summary")]
    pub summary: String,
    #[serde(rename = "Source", default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(rename = "URL", default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "Published", default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(rename = "Sentiment")]
    pub sentiment: Sentiment,
    #[serde(rename = "Topics")]
    pub topics: Vec<String>,
}

impl Article {
    /// Untagged article; sentiment and topics are filled in by the taggers.
    pub fn new(title: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            summary: summary.into(),
            source: None,
            url: None,
            published_at: None,
            sentiment: Sentiment::Neutral,
            topics: Vec::new(),
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Trims and collapses whitespace in the text fields and applies the
    /// rejection rule. Calling it on an already-normalized article returns the
    /// article unchanged.
    pub fn normalized(mut self) -> Option<Self> {
        self.title = collapse_whitespace(&self.title);
        self.summary = collapse_whitespace(&self.summary);
        self.source = self
            .source
            .map(|s| collapse_whitespace(&s))
            .filter(|s| !s.is_empty());

        if is_acceptable(&self.title, &self.summary) {
            Some(self)
        } else {
            None
        }
    }
}

/// Rejection rule shared by every ingestion path.
pub fn is_acceptable(title: &str, summary: &str) -> bool {
    let title = title.trim();
    !title.is_empty()
        && !summary.trim().is_empty()
        && !title.eq_ignore_ascii_case(REMOVED_SENTINEL)
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentDistribution {
    #[serde(rename = "Positive")]
    pub positive: usize,
    #[serde(rename = "Negative")]
    pub negative: usize,
    #[serde(rename = "Neutral")]
    pub neutral: usize,
}

impl SentimentDistribution {
    pub fn record(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Negative => self.negative += 1,
            Sentiment::Neutral => self.neutral += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }
}

impl FromIterator<Sentiment> for SentimentDistribution {
    fn from_iter<I: IntoIterator<Item = Sentiment>>(iter: I) -> Self {
        let mut distribution = Self::default();
        for sentiment in iter {
            distribution.record(sentiment);
        }
        distribution
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageDifference {
    #[serde(rename = "Comparison")]
    pub comparison: String,
    #[serde(rename = "Impact")]
    pub impact: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicOverlap {
    #[serde(rename = "Common Topics")]
    pub common: Vec<String>,
    #[serde(rename = "Unique Topics in Article 1")]
    pub unique_to_first: Vec<String>,
    #[serde(rename = "Unique Topics in Article 2")]
    pub unique_to_second: Vec<String>,
}

/// Topics carried by exactly one article of a batch, keyed by 1-based
/// article position and serialized as `{"Article N": [...]}` in position order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UniqueTopics(BTreeMap<usize, Vec<String>>);

impl UniqueTopics {
    pub fn insert(&mut self, article: usize, topics: Vec<String>) {
        self.0.insert(article, topics);
    }

    pub fn get(&self, article: usize) -> Option<&[String]> {
        self.0.get(&article).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &[String])> {
        self.0.iter().map(|(n, topics)| (*n, topics.as_slice()))
    }
}

fn article_key(article: usize) -> String {
    format!("Article {}", article)
}

impl Serialize for UniqueTopics {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(n, topics)| (article_key(*n), topics)))
    }
}

impl<'de> Deserialize<'de> for UniqueTopics {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = BTreeMap::<String, Vec<String>>::deserialize(deserializer)?;
        let mut unique = Self::default();
        for (key, topics) in raw {
            let article = key
                .strip_prefix("Article ")
                .and_then(|n| n.parse().ok())
                .ok_or_else(|| D::Error::custom(format!("invalid article key: {}", key)))?;
            unique.insert(article, topics);
        }
        Ok(unique)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "Mostly Positive")]
    MostlyPositive,
    #[serde(rename = "Mostly Negative")]
    MostlyNegative,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::MostlyPositive => write!(f, "Mostly Positive"),
            Verdict::MostlyNegative => write!(f, "Mostly Negative"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparativeResult {
    #[serde(rename = "Sentiment Distribution")]
    pub distribution: SentimentDistribution,
    #[serde(rename = "Coverage Differences")]
    pub coverage_differences: Vec<CoverageDifference>,
    #[serde(rename = "Topic Overlap")]
    pub topic_overlap: TopicOverlap,
    #[serde(rename = "Unique Topics")]
    pub unique_topics: UniqueTopics,
    #[serde(rename = "Verdict")]
    pub verdict: Verdict,
}

/// Payload returned for a company analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsReport {
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "Articles")]
    pub articles: Vec<Article>,
    #[serde(rename = "Comparative Sentiment Score")]
    pub comparative: ComparativeResult,
    #[serde(rename = "Final Sentiment Analysis")]
    pub final_sentiment: Verdict,
    #[serde(rename = "Audio")]
    pub audio_file: Option<String>,
}
