//! Raw record → [`Document`] normalization.

use docrank_shared::{Document, DocrankError, RawRecord, Result};

use crate::slug::clean_slug;

/// Normalize a raw record into a [`Document`].
///
/// Only `id` and `title` are required; a missing or blank value for either
/// fails with [`DocrankError::MissingRequiredField`]. Slug, category, and
/// tags go through [`clean_slug`]; `draft` defaults to `false`.
pub fn normalize(raw: RawRecord) -> Result<Document> {
    let label = record_label(&raw);

    let id = required(raw.id, &label, "id")?;
    let title = required(raw.title, &label, "title")?;

    // A slug that cleans to nothing falls back to the id.
    let slug = raw
        .slug
        .as_deref()
        .map(clean_slug)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| clean_slug(&id));

    let category = raw
        .category
        .as_deref()
        .map(clean_slug)
        .filter(|c| !c.is_empty());

    let tags = raw
        .tags
        .unwrap_or_default()
        .iter()
        .map(|tag| clean_slug(tag))
        .collect();

    Ok(Document {
        id,
        slug,
        title,
        description: raw.description,
        category,
        tags,
        draft: raw.draft.unwrap_or(false),
        date: raw.date,
        headings: raw.headings,
        body_text: raw.body.unwrap_or_default(),
    })
}

fn required(value: Option<String>, label: &str, field: &'static str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(DocrankError::missing_field(label, field)),
    }
}

/// Best available name for a record in error messages.
fn record_label(raw: &RawRecord) -> String {
    raw.id
        .as_deref()
        .or(raw.slug.as_deref())
        .or(raw.title.as_deref())
        .unwrap_or("<unnamed>")
        .to_string()
}
