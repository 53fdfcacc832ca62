use ns_core::types::FALLBACK_TOPIC;
use ns_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicRule {
    pub name: String,
    pub keywords: Vec<String>,
}

impl TopicRule {
    pub fn new(name: &str, keywords: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Ordered topic taxonomy. Order decides the order of tags on an article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicTable {
    rules: Vec<TopicRule>,
}

impl TopicTable {
    pub fn new(rules: Vec<TopicRule>) -> Result<Self> {
        for rule in &rules {
            if rule.name.trim().is_empty() {
                return Err(Error::Config("topic name must not be empty".to_string()));
            }
            if rule.keywords.iter().all(|k| k.trim().is_empty()) {
                return Err(Error::Config(format!("topic {:?} has no keywords", rule.name)));
            }
        }
        Ok(Self { rules })
    }

    /// Reads a JSON array of `{"name": ..., "keywords": [...]}` objects.
    pub fn from_json(json: &str) -> Result<Self> {
        let rules: Vec<TopicRule> = serde_json::from_str(json)?;
        Self::new(rules)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn rules(&self) -> &[TopicRule] {
        &self.rules
    }
}

impl Default for TopicTable {
    fn default() -> Self {
        Self {
            rules: vec![
                TopicRule::new(
                    "Technology",
                    &["technology", "software", "artificial intelligence", "semiconductor", "chip"],
                ),
                TopicRule::new(
                    "Finance",
                    &["earnings", "revenue", "profit", "quarterly", "investment", "funding"],
                ),
                TopicRule::new(
                    "Stock Market",
                    &["stock", "shares", "investors", "nasdaq", "market cap", "wall street"],
                ),
                TopicRule::new(
                    "Regulation",
                    &["regulation", "regulator", "lawsuit", "compliance", "investigation", "antitrust"],
                ),
                TopicRule::new(
                    "Electric Vehicles",
                    &["electric vehicle", "battery", "charging", "autopilot", "self-driving"],
                ),
            ],
        }
    }
}

/// Case-insensitive substring tagger over a [`TopicTable`].
#[derive(Debug, Clone)]
pub struct TopicTagger {
    rules: Vec<(String, Vec<String>)>,
}

impl TopicTagger {
    pub fn new(table: &TopicTable) -> Self {
        let rules = table
            .rules()
            .iter()
            .map(|rule| {
                let keywords = rule
                    .keywords
                    .iter()
                    .map(|k| k.trim().to_lowercase())
                    .filter(|k| !k.is_empty())
                    .collect();
                (rule.name.trim().to_string(), keywords)
            })
            .collect();
        Self { rules }
    }

    /// Matching topic names in table order, never empty.
    pub fn tag(&self, text: &str) -> Vec<String> {
        let haystack = text.to_lowercase();
        let mut topics: Vec<String> = Vec::new();
        for (name, keywords) in &self.rules {
            if topics.contains(name) {
                continue;
            }
            if keywords.iter().any(|k| haystack.contains(k.as_str())) {
                topics.push(name.clone());
            }
        }
        if topics.is_empty() {
            topics.push(FALLBACK_TOPIC.to_string());
        }
        topics
    }
}

impl Default for TopicTagger {
    fn default() -> Self {
        Self::new(&TopicTable::default())
    }
}
