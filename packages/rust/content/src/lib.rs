//! Content loading for docrank: record sources, normalization, and the
//! category-ordered document catalog.
//!
//! This crate provides:
//! - [`RecordSource`] with [`MemorySource`] and [`FsSource`] (markdown + YAML front matter)
//! - [`normalize`] and [`clean_slug`]: raw record → [`Document`]
//! - [`Catalog`]: the memoized, draft-free, ordered collection
//! - [`listing`]: pagination, neighbours, tag index, latest
//!
//! [`Document`]: docrank_shared::Document

mod catalog;
mod frontmatter;
pub mod listing;
mod markdown;
mod normalize;
mod slug;
mod source;

pub use catalog::{Catalog, CategoryOrder, collect_documents};
pub use frontmatter::{FrontMatter, parse_front_matter};
pub use listing::{
    Neighbours, Page, TagCount, find_by_slug, latest, neighbours, paginate, tag_index, with_tag,
};
pub use markdown::{RenderedBody, render_body};
pub use normalize::normalize;
pub use slug::clean_slug;
pub use source::{FsSource, MemorySource, RecordSource};
