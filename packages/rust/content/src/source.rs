//! Record sources: where raw content records come from.
//!
//! The catalog only sees the [`RecordSource`] trait. [`MemorySource`] serves a
//! fixed list; [`FsSource`] reads a directory of markdown files.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};
use walkdir::WalkDir;

use docrank_shared::{DocrankError, RawRecord, Result};

use crate::frontmatter::parse_front_matter;
use crate::markdown::render_body;

/// File extensions treated as content.
const CONTENT_EXTENSIONS: [&str; 2] = ["md", "mdx"];

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// A collaborator that yields every raw record of a content collection.
///
/// Implementations either return the complete collection or an error; they
/// never return a partial list. Retrying is up to the implementation.
pub trait RecordSource: Send + Sync {
    /// Fetch all raw records.
    fn fetch_raw_records(&self) -> Result<Vec<RawRecord>>;

    /// Human-readable source name for tracing.
    fn name(&self) -> &str;
}

// ---------------------------------------------------------------------------
// MemorySource
// ---------------------------------------------------------------------------

/// A source backed by records already in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    records: Vec<RawRecord>,
}

impl MemorySource {
    pub fn new(records: Vec<RawRecord>) -> Self {
        Self { records }
    }
}

impl RecordSource for MemorySource {
    fn fetch_raw_records(&self) -> Result<Vec<RawRecord>> {
        Ok(self.records.clone())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

// ---------------------------------------------------------------------------
// FsSource
// ---------------------------------------------------------------------------

/// A source reading `.md`/`.mdx` files below a root directory.
///
/// Each file's id is its path relative to the root (with `/` separators), and
/// its default slug is that path without the extension. Front matter supplies
/// the remaining fields.
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read_record(&self, path: &Path) -> Result<RawRecord> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DocrankError::source_unavailable(format!("cannot read {}: {e}", path.display()))
        })?;

        let id = relative_id(&self.root, path);
        let (front, body) = parse_front_matter(&content).map_err(|e| match e {
            DocrankError::Parse { message } => DocrankError::parse(format!("{id}: {message}")),
            other => other,
        })?;
        let rendered = render_body(body);

        Ok(RawRecord {
            slug: front.slug.or_else(|| Some(strip_extension(&id).to_string())),
            id: Some(id),
            title: front.title,
            description: front.description,
            tags: front.tags,
            category: front.category,
            draft: front.draft,
            date: front.date,
            body: Some(rendered.text),
            headings: rendered.headings,
        })
    }
}

impl RecordSource for FsSource {
    #[instrument(skip(self), fields(root = %self.root.display()))]
    fn fetch_raw_records(&self) -> Result<Vec<RawRecord>> {
        if !self.root.is_dir() {
            return Err(DocrankError::source_unavailable(format!(
                "content directory {} does not exist",
                self.root.display()
            )));
        }

        let mut records = Vec::new();
        // Sorted walk keeps record order independent of the filesystem.
        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                DocrankError::source_unavailable(format!(
                    "cannot walk {}: {e}",
                    self.root.display()
                ))
            })?;

            if !entry.file_type().is_file() || !is_content_file(entry.path()) {
                continue;
            }

            records.push(self.read_record(entry.path())?);
        }

        debug!(count = records.len(), "read content files");
        Ok(records)
    }

    fn name(&self) -> &str {
        "filesystem"
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn is_content_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| CONTENT_EXTENSIONS.contains(&ext))
}

/// Path of `path` relative to `root`, always with `/` separators.
fn relative_id(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn strip_extension(id: &str) -> &str {
    match id.rsplit_once('.') {
        Some((stem, ext)) if CONTENT_EXTENSIONS.contains(&ext) => stem,
        _ => id,
    }
}
