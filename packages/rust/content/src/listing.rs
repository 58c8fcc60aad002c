//! Listing helpers over an ordered document collection.
//!
//! All helpers borrow from the collection and preserve its order unless they
//! say otherwise.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use docrank_shared::{Document, DocrankError, Result};

use crate::slug::clean_slug;

/// Find a document by slug. The lookup slug is cleaned first, so
/// `"Getting Started"` finds `getting-started`.
pub fn find_by_slug<'a>(docs: &'a [Document], slug: &str) -> Option<&'a Document> {
    let wanted = clean_slug(slug);
    docs.iter().find(|d| d.slug == wanted)
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// One page of a paginated listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<'a> {
    /// 1-based page number.
    pub number: usize,
    pub total_pages: usize,
    pub items: &'a [Document],
}

impl Page<'_> {
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }
}

/// Split `docs` into pages of `page_size`. An empty collection has no pages.
pub fn paginate(docs: &[Document], page_size: usize) -> Result<Vec<Page<'_>>> {
    if page_size == 0 {
        return Err(DocrankError::validation("page size must be at least 1"));
    }

    let total_pages = docs.len().div_ceil(page_size);
    Ok(docs
        .chunks(page_size)
        .enumerate()
        .map(|(i, items)| Page {
            number: i + 1,
            total_pages,
            items,
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Neighbours
// ---------------------------------------------------------------------------

/// The documents listed immediately before and after a document.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Neighbours<'a> {
    pub previous: Option<&'a Document>,
    pub next: Option<&'a Document>,
}

/// Previous/next documents around `doc` (matched by id). A document that is
/// not in the collection has no neighbours.
pub fn neighbours<'a>(docs: &'a [Document], doc: &Document) -> Neighbours<'a> {
    let Some(index) = docs.iter().position(|d| d.id == doc.id) else {
        return Neighbours::default();
    };

    Neighbours {
        previous: index.checked_sub(1).and_then(|i| docs.get(i)),
        next: docs.get(index + 1),
    }
}

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

/// Number of documents carrying a tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// Count documents per tag, most used first (ties by tag name).
///
/// A document that repeats a tag is counted once for it.
pub fn tag_index(docs: &[Document]) -> Vec<TagCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for doc in docs {
        let distinct: HashSet<&str> = doc.tags.iter().map(String::as_str).collect();
        for tag in distinct {
            *counts.entry(tag).or_default() += 1;
        }
    }

    let mut index: Vec<TagCount> = counts
        .into_iter()
        .map(|(tag, count)| TagCount {
            tag: tag.to_string(),
            count,
        })
        .collect();
    // BTreeMap already yields tags in name order; the stable sort keeps it for ties.
    index.sort_by(|a, b| b.count.cmp(&a.count));
    index
}

/// Documents carrying `tag` (cleaned first), in listing order.
pub fn with_tag<'a>(docs: &'a [Document], tag: &str) -> Vec<&'a Document> {
    let wanted = clean_slug(tag);
    docs.iter().filter(|d| d.tags.contains(&wanted)).collect()
}

// ---------------------------------------------------------------------------
// Latest
// ---------------------------------------------------------------------------

/// Up to `n` dated documents, newest first. Undated documents are skipped;
/// documents sharing a date keep listing order.
pub fn latest(docs: &[Document], n: usize) -> Vec<&Document> {
    let mut dated: Vec<&Document> = docs.iter().filter(|d| d.date.is_some()).collect();
    dated.sort_by(|a, b| b.date.cmp(&a.date));
    dated.truncate(n);
    dated
}
