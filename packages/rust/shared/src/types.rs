//! Core domain types for docrank content collections.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Group name used for documents without a category.
pub const UNCATEGORIZED: &str = "uncategorized";

// ---------------------------------------------------------------------------
// Heading
// ---------------------------------------------------------------------------

/// A heading found in a document's rendered content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Heading level, 1 through 6.
    pub depth: u8,
    /// Anchor slug (kebab-case of `text`).
    pub slug: String,
    /// Plain heading text.
    pub text: String,
}

// ---------------------------------------------------------------------------
// RawRecord
// ---------------------------------------------------------------------------

/// An un-normalized content record as supplied by a record source.
///
/// Every field is optional here; normalization decides which ones are
/// required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Stable identifier from the source (e.g. a file path).
    #[serde(default)]
    pub id: Option<String>,
    /// Raw slug or path segment.
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub draft: Option<bool>,
    /// Publication date from front matter.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Rendered or plain textual content.
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub headings: Vec<Heading>,
}

impl RawRecord {
    /// Create a record carrying only the two required fields.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            title: Some(title.into()),
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// A normalized, render-ready content record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Opaque identifier, unique within a collection.
    pub id: String,
    /// Kebab-case URL slug.
    pub slug: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Kebab-case grouping key; `None` means [`UNCATEGORIZED`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Kebab-case tags, in source order (duplicates preserved).
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub draft: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub headings: Vec<Heading>,
    /// Plain text used for word-overlap scoring only.
    #[serde(default, skip_serializing)]
    pub body_text: String,
}

impl Document {
    /// The category group this document is listed under.
    pub fn category_or_default(&self) -> &str {
        self.category.as_deref().unwrap_or(UNCATEGORIZED)
    }

    /// Build the document's permalink under a route prefix such as `/docs`.
    pub fn permalink(&self, route_prefix: &str) -> String {
        let prefix = route_prefix.trim_end_matches('/');
        format!("{prefix}/{}", self.slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(slug: &str, category: Option<&str>) -> Document {
        Document {
            id: format!("{slug}.md"),
            slug: slug.into(),
            title: "Title".into(),
            description: None,
            category: category.map(String::from),
            tags: vec![],
            draft: false,
            date: None,
            headings: vec![],
            body_text: String::new(),
        }
    }

    #[test]
    fn permalink_joins_with_single_slash() {
        let d = doc("installation", None);
        assert_eq!(d.permalink("/docs"), "/docs/installation");
        assert_eq!(d.permalink("/docs/"), "/docs/installation");
        assert_eq!(d.permalink("/"), "/installation");
    }

    #[test]
    fn missing_category_reads_as_uncategorized() {
        assert_eq!(doc("a", None).category_or_default(), UNCATEGORIZED);
        assert_eq!(doc("a", Some("batteries")).category_or_default(), "batteries");
    }

    #[test]
    fn raw_record_deserializes_with_missing_fields() {
        let raw: RawRecord =
            serde_json::from_str(r#"{"id": "intro.md", "title": "Intro", "date": "2024-03-01"}"#)
                .expect("deserialize");
        assert_eq!(raw.id.as_deref(), Some("intro.md"));
        assert_eq!(raw.date, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert!(raw.tags.is_none());
        assert!(raw.headings.is_empty());
    }

    #[test]
    fn body_text_is_not_serialized() {
        let mut d = doc("a", None);
        d.body_text = "secret body".into();
        let json = serde_json::to_string(&d).expect("serialize");
        assert!(!json.contains("secret body"));
    }
}
