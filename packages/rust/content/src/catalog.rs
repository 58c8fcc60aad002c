//! The ordered document collection and its snapshot cache.
//!
//! [`collect_documents`] does one full load: fetch, normalize, drop drafts,
//! sort. [`Catalog`] memoizes that result until it is invalidated.

use std::cmp::Ordering;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, instrument, warn};

use docrank_shared::{DEFAULT_CATEGORY_ORDER, Document, Result, UNCATEGORIZED};

use crate::normalize::normalize;
use crate::slug::clean_slug;
use crate::source::RecordSource;

// ---------------------------------------------------------------------------
// Category order
// ---------------------------------------------------------------------------

/// Fixed priority list of categories used as the primary listing key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOrder {
    categories: Vec<String>,
}

impl CategoryOrder {
    /// Build an order from category names; names are cleaned like slugs.
    pub fn new<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            categories: categories
                .into_iter()
                .map(|c| clean_slug(c.as_ref()))
                .collect(),
        }
    }

    /// Position of `category` in the list.
    ///
    /// Unset and unknown categories share the rank of `uncategorized`, or
    /// sort after every listed category when the list lacks it.
    pub fn rank(&self, category: Option<&str>) -> usize {
        let position = |name: &str| self.categories.iter().position(|c| c == name);
        category
            .and_then(position)
            .or_else(|| position(UNCATEGORIZED))
            .unwrap_or(self.categories.len())
    }

    /// Listing comparison: category rank first, then byte-wise title.
    pub fn compare(&self, a: &Document, b: &Document) -> Ordering {
        self.rank(a.category.as_deref())
            .cmp(&self.rank(b.category.as_deref()))
            .then_with(|| a.title.cmp(&b.title))
    }
}

impl Default for CategoryOrder {
    fn default() -> Self {
        Self::new(DEFAULT_CATEGORY_ORDER)
    }
}

// ---------------------------------------------------------------------------
// One-shot load
// ---------------------------------------------------------------------------

/// Fetch, normalize, and order every non-draft document of `source`.
///
/// The first record that fails normalization fails the whole call; no
/// partial collection is returned.
#[instrument(skip_all, fields(source = source.name()))]
pub fn collect_documents(source: &dyn RecordSource, order: &CategoryOrder) -> Result<Vec<Document>> {
    let raw = source.fetch_raw_records()?;
    let fetched = raw.len();

    let mut documents = Vec::with_capacity(fetched);
    for (index, record) in raw.into_iter().enumerate() {
        let doc = normalize(record).inspect_err(|e| {
            warn!(index, error = %e, "record failed normalization");
        })?;
        if !doc.draft {
            documents.push(doc);
        }
    }

    // Stable sort: equal keys keep source order.
    documents.sort_by(|a, b| order.compare(a, b));

    debug!(
        fetched,
        drafts = fetched - documents.len(),
        listed = documents.len(),
        "documents collected"
    );
    Ok(documents)
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Caller-owned cache of the ordered document collection.
///
/// The first [`load_all`](Self::load_all) populates the snapshot; later calls
/// hand out the same `Arc` until [`invalidate`](Self::invalidate). Concurrent
/// first callers block on one population instead of loading twice.
pub struct Catalog<S> {
    source: S,
    order: CategoryOrder,
    snapshot: Mutex<Option<Arc<[Document]>>>,
}

impl<S: RecordSource> Catalog<S> {
    pub fn new(source: S, order: CategoryOrder) -> Self {
        Self {
            source,
            order,
            snapshot: Mutex::new(None),
        }
    }

    /// The ordered, draft-free collection, loading it on first use.
    pub fn load_all(&self) -> Result<Arc<[Document]>> {
        let mut slot = self.slot();
        if let Some(docs) = slot.as_ref() {
            return Ok(Arc::clone(docs));
        }

        let docs: Arc<[Document]> = collect_documents(&self.source, &self.order)?.into();
        info!(
            source = self.source.name(),
            count = docs.len(),
            "catalog loaded"
        );
        *slot = Some(Arc::clone(&docs));
        Ok(docs)
    }

    /// Drop the cached snapshot; the next `load_all` recomputes it.
    pub fn invalidate(&self) {
        if self.slot().take().is_some() {
            debug!(source = self.source.name(), "catalog invalidated");
        }
    }

    /// Recompute the snapshot from scratch.
    pub fn reload(&self) -> Result<Arc<[Document]>> {
        self.invalidate();
        self.load_all()
    }

    pub fn is_loaded(&self) -> bool {
        self.slot().is_some()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn order(&self) -> &CategoryOrder {
        &self.order
    }

    fn slot(&self) -> MutexGuard<'_, Option<Arc<[Document]>>> {
        // The slot only ever holds a complete snapshot, so a poisoned lock is
        // still consistent.
        self.snapshot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

    use docrank_shared::{DocrankError, RawRecord};

    use crate::source::MemorySource;

    fn record(id: &str, title: &str, category: Option<&str>) -> RawRecord {
        RawRecord {
            category: category.map(String::from),
            ..RawRecord::new(id, title)
        }
    }

    /// Counts fetches so tests can observe memoization.
    struct CountingSource {
        inner: MemorySource,
        fetches: AtomicUsize,
    }

    impl CountingSource {
        fn new(records: Vec<RawRecord>) -> Self {
            Self {
                inner: MemorySource::new(records),
                fetches: AtomicUsize::new(0),
            }
        }

        fn fetches(&self) -> usize {
            self.fetches.load(AtomicOrdering::SeqCst)
        }
    }

    impl RecordSource for CountingSource {
        fn fetch_raw_records(&self) -> Result<Vec<RawRecord>> {
            self.fetches.fetch_add(1, AtomicOrdering::SeqCst);
            self.inner.fetch_raw_records()
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    struct DownSource;

    impl RecordSource for DownSource {
        fn fetch_raw_records(&self) -> Result<Vec<RawRecord>> {
            Err(DocrankError::source_unavailable("connection refused"))
        }

        fn name(&self) -> &str {
            "down"
        }
    }

    #[test]
    fn rank_follows_priority_list() {
        let order = CategoryOrder::default();
        assert_eq!(order.rank(Some("getting-started")), 0);
        assert_eq!(order.rank(Some("batteries")), 1);
        assert_eq!(order.rank(Some("development")), 2);
        assert_eq!(order.rank(None), 3);
        // Unknown categories sort alongside uncategorized, not after it.
        assert_eq!(order.rank(Some("misc")), 3);
    }

    #[test]
    fn rank_without_uncategorized_entry() {
        let order = CategoryOrder::new(["Guides", "Reference"]);
        assert_eq!(order.rank(Some("guides")), 0);
        assert_eq!(order.rank(Some("reference")), 1);
        assert_eq!(order.rank(None), 2);
        assert_eq!(order.rank(Some("other")), 2);
    }

    #[test]
    fn collect_sorts_by_category_then_title() {
        let source = MemorySource::new(vec![
            record("1", "Zeta", Some("development")),
            record("2", "Alpha", None),
            record("3", "Beta", Some("getting-started")),
            record("4", "Alpha", Some("development")),
            record("5", "Aardvark", Some("getting-started")),
            record("6", "Gamma", Some("custom-stuff")),
            record("7", "Beta", Some("uncategorized")),
        ]);

        let docs = collect_documents(&source, &CategoryOrder::default()).expect("collect");
        let ids: Vec<&str> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["5", "3", "4", "1", "2", "7", "6"]);
    }

    #[test]
    fn title_order_is_case_sensitive() {
        let source = MemorySource::new(vec![
            record("lower", "apple", None),
            record("upper", "Zebra", None),
        ]);
        let docs = collect_documents(&source, &CategoryOrder::default()).expect("collect");
        // Byte-wise: uppercase sorts before lowercase.
        assert_eq!(docs[0].id, "upper");
    }

    #[test]
    fn drafts_are_excluded() {
        let source = MemorySource::new(vec![
            record("published", "Published", None),
            RawRecord {
                draft: Some(true),
                ..record("draft", "Draft", None)
            },
        ]);
        let docs = collect_documents(&source, &CategoryOrder::default()).expect("collect");
        assert_eq!(docs.len(), 1);
        assert!(docs.iter().all(|d| !d.draft && d.id != "draft"));
    }

    #[test]
    fn one_bad_record_fails_the_whole_load() {
        let source = MemorySource::new(vec![
            record("ok", "Fine", None),
            RawRecord {
                id: Some("bad".into()),
                ..RawRecord::default()
            },
        ]);
        let err = collect_documents(&source, &CategoryOrder::default()).unwrap_err();
        assert!(matches!(err, DocrankError::MissingRequiredField { field: "title", .. }));
    }

    #[test]
    fn catalog_memoizes_until_invalidated() {
        let catalog = Catalog::new(
            CountingSource::new(vec![record("a", "A", None), record("b", "B", None)]),
            CategoryOrder::default(),
        );
        assert!(!catalog.is_loaded());

        let first = catalog.load_all().expect("load");
        let second = catalog.load_all().expect("load");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(catalog.source().fetches(), 1);
        assert!(catalog.is_loaded());

        catalog.invalidate();
        assert!(!catalog.is_loaded());
        let third = catalog.load_all().expect("load");
        assert!(!Arc::ptr_eq(&first, &third));
        assert_eq!(first, third);
        assert_eq!(catalog.source().fetches(), 2);

        catalog.reload().expect("reload");
        assert_eq!(catalog.source().fetches(), 3);
    }

    #[test]
    fn catalog_failure_leaves_cache_empty() {
        let catalog = Catalog::new(DownSource, CategoryOrder::default());
        let err = catalog.load_all().unwrap_err();
        assert!(matches!(err, DocrankError::SourceUnavailable { .. }));
        assert!(!catalog.is_loaded());
    }

    #[test]
    fn concurrent_first_calls_load_once() {
        let catalog = Arc::new(Catalog::new(
            CountingSource::new((0..50).map(|i| record(&i.to_string(), "T", None)).collect()),
            CategoryOrder::default(),
        ));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let catalog = Arc::clone(&catalog);
                std::thread::spawn(move || catalog.load_all().expect("load"))
            })
            .collect();
        let snapshots: Vec<Arc<[Document]>> = handles
            .into_iter()
            .map(|h| h.join().expect("thread"))
            .collect();

        assert_eq!(catalog.source().fetches(), 1);
        assert!(snapshots.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }
}
