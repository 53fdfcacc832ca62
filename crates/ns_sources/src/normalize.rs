use chrono::{DateTime, Utc};
use ns_core::types::collapse_whitespace;
use ns_core::Article;
use scraper::{Html, Node};
use serde_json::Value;
use url::Url;

const TITLE_FIELDS: &[&str] = &["title", "headline", "name"];
const SUMMARY_FIELDS: &[&str] = &["description", "summary", "abstract", "snippet", "content"];
const SOURCE_FIELDS: &[&str] = &["source", "publisher"];
const URL_FIELDS: &[&str] = &["url", "link"];
const PUBLISHED_FIELDS: &[&str] = &["publishedAt", "published_at", "pubDate"];

/// Maps a raw provider record onto an [`Article`], or `None` when the record
/// lacks a usable title/summary or was removed upstream.
pub fn normalize_record(record: &Value, provider: &str) -> Option<Article> {
    if !record.is_object() {
        return None;
    }

    let title = first_text(record, TITLE_FIELDS)?;
    let summary = first_text(record, SUMMARY_FIELDS)?;
    let source = first_text(record, SOURCE_FIELDS).unwrap_or_else(|| provider.to_string());

    let mut article = Article::new(title, summary).with_source(source);
    article.url = first_raw(record, URL_FIELDS).and_then(parse_url);
    article.published_at = first_raw(record, PUBLISHED_FIELDS).and_then(parse_published);
    article.normalized()
}

/// First alias holding non-empty text. Objects are unwrapped through their
/// `name` or `main` field (`{"source": {"name": ...}}`, `{"headline": {"main": ...}}`).
fn first_text(record: &Value, fields: &[&str]) -> Option<String> {
    fields.iter().find_map(|field| {
        let value = record.get(*field)?;
        let raw = match value {
            Value::String(s) => s.as_str(),
            Value::Object(obj) => obj
                .get("name")
                .or_else(|| obj.get("main"))
                .and_then(Value::as_str)?,
            _ => return None,
        };
        let text = clean_text(raw);
        (!text.is_empty()).then_some(text)
    })
}

fn first_raw<'a>(record: &'a Value, fields: &[&str]) -> Option<&'a str> {
    fields
        .iter()
        .find_map(|field| record.get(*field).and_then(Value::as_str))
}

/// Block-level tags whose boundaries separate words.
const BLOCK_TAGS: &[&str] = &[
    "br", "p", "div", "li", "ul", "ol", "h1", "h2", "h3", "h4", "h5", "h6", "tr", "td",
];

/// Strips markup, decodes entities and collapses whitespace.
pub fn clean_text(raw: &str) -> String {
    if !raw.contains('<') && !raw.contains('&') {
        return collapse_whitespace(raw);
    }

    let fragment = Html::parse_fragment(raw);
    let mut text = String::with_capacity(raw.len());
    for node in fragment.root_element().descendants() {
        match node.value() {
            Node::Text(chunk) => text.push_str(chunk),
            Node::Element(element) if BLOCK_TAGS.contains(&element.name()) => text.push(' '),
            _ => {}
        }
    }
    collapse_whitespace(&text)
}

fn parse_url(raw: &str) -> Option<String> {
    let url = Url::parse(raw.trim()).ok()?;
    matches!(url.scheme(), "http" | "https").then(|| url.to_string())
}

fn parse_published(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
