use ns_core::{Article, ComparativeResult, NarrationStyle, Translator};
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// Language every provider is queried in.
pub const SOURCE_LANGUAGE: &str = "en";

/// Spoken in place of the narration when translation fails.
pub const TRANSLATION_FALLBACK: &str = "Translation is currently unavailable.";

pub struct NarrationBuilder {
    style: NarrationStyle,
    language: String,
    translator: Arc<dyn Translator>,
}

impl fmt::Debug for NarrationBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NarrationBuilder")
            .field("style", &self.style)
            .field("language", &self.language)
            .field("translator", &self.translator.name())
            .finish()
    }
}

impl NarrationBuilder {
    pub fn new(style: NarrationStyle, language: impl Into<String>, translator: Arc<dyn Translator>) -> Self {
        Self {
            style,
            language: language.into(),
            translator,
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Untranslated narration text.
    pub fn build(&self, company: &str, articles: &[Article], result: &ComparativeResult) -> String {
        match self.style {
            NarrationStyle::Summaries => articles
                .iter()
                .map(|a| a.summary.as_str())
                .collect::<Vec<_>>()
                .join(" "),
            NarrationStyle::Report => report(company, articles, result),
        }
    }

    /// Narration in the configured language. Never fails: a translation error
    /// is logged and replaced by [`TRANSLATION_FALLBACK`].
    pub async fn narrate(&self, company: &str, articles: &[Article], result: &ComparativeResult) -> String {
        let text = self.build(company, articles, result);
        self.translate(&text).await
    }

    pub async fn translate(&self, text: &str) -> String {
        if self.language.eq_ignore_ascii_case(SOURCE_LANGUAGE) {
            return text.to_string();
        }
        match self.translator.translate(text, &self.language).await {
            Ok(translated) => translated,
            Err(e) => {
                warn!("⚠️ Translation via {} failed: {}", self.translator.name(), e);
                TRANSLATION_FALLBACK.to_string()
            }
        }
    }
}

fn report(company: &str, articles: &[Article], result: &ComparativeResult) -> String {
    let distribution = &result.distribution;
    let mut parts = vec![
        format!("{} news summary.", company),
        format!(
            "{} articles analyzed: {} positive, {} negative, {} neutral.",
            articles.len(),
            distribution.positive,
            distribution.negative,
            distribution.neutral
        ),
        format!("Overall coverage is {}.", result.verdict.to_string().to_lowercase()),
    ];
    for (i, article) in articles.iter().enumerate() {
        parts.push(format!("Article {}: {}.", i + 1, article.title.trim_end_matches('.')));
    }
    parts.join(" ")
}
