use async_trait::async_trait;
use ns_core::{Error, Result};
use serde_json::Value;
use std::path::Path;
use super::NewsProvider;

/// Serves a fixed set of raw records, whatever the company.
#[derive(Debug, Clone)]
pub struct FixtureProvider {
    name: String,
    records: Vec<Value>,
}

impl FixtureProvider {
    pub fn new(name: impl Into<String>, records: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }

    /// Loads a JSON array of records.
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        match serde_json::from_str::<Value>(&json)? {
            Value::Array(records) => Ok(Self::new("fixture", records)),
            _ => Err(Error::Config(format!(
                "{} must contain a JSON array of records",
                path.display()
            ))),
        }
    }
}

#[async_trait]
impl NewsProvider for FixtureProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_raw(&self, _company: &str, limit: usize) -> Result<Vec<Value>> {
        Ok(self.records.iter().take(limit).cloned().collect())
    }
}
