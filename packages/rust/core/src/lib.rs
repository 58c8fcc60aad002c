//! Related-content ranking for docrank.
//!
//! Given a query document and an ordered collection, scores every other
//! document by shared words and tags and returns the best matches. Scoring is
//! pure: no I/O, no state.

pub mod related;
pub mod words;

pub use related::{QueryProfile, Scored, TAG_BOOST, rank, related};
pub use words::{MIN_WORD_CHARS, word_set};

#[cfg(test)]
mod tests {
    use super::*;
    use docrank_content::{Catalog, CategoryOrder, MemorySource, find_by_slug};
    use docrank_shared::{DEFAULT_RELATED_COUNT, RawRecord};

    fn record(id: &str, title: &str, tags: &[&str], body: &str) -> RawRecord {
        RawRecord {
            tags: Some(tags.iter().map(|t| t.to_string()).collect()),
            body: Some(body.into()),
            ..RawRecord::new(id, title)
        }
    }

    #[test]
    fn drafts_never_become_candidates() {
        let mut draft = record("draft.md", "Draft", &["db"], "postgres scaling notes");
        draft.draft = Some(true);

        let catalog = Catalog::new(
            MemorySource::new(vec![
                record("query.md", "Query", &["db"], "postgres scaling notes"),
                draft,
                record("other.md", "Other", &[], "postgres"),
            ]),
            CategoryOrder::default(),
        );
        let docs = catalog.load_all().expect("load");
        let query = find_by_slug(&docs, "query-md").expect("query doc");

        let result = related(query, &docs, DEFAULT_RELATED_COUNT);
        let ids: Vec<&str> = result.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["other.md"]);
    }

    #[test]
    fn ranks_over_catalog_snapshot() {
        let catalog = Catalog::new(
            MemorySource::new(vec![
                record(
                    "q",
                    "Postgres Scaling",
                    &["Database", "Scaling"],
                    "Postgres scaling guide for production clusters",
                ),
                record(
                    "a",
                    "Replication",
                    &["database"],
                    "Postgres replication and scaling tips",
                ),
                record("b", "Networking", &[], "Unrelated networking guide"),
                record("c", "Cooking", &["food"], "Bread recipes"),
            ]),
            CategoryOrder::default(),
        );
        let docs = catalog.load_all().expect("load");
        let query = docs.iter().find(|d| d.id == "q").expect("query");

        let ranked = rank(query, &docs);
        let order: Vec<&str> = ranked.iter().map(|s| s.document.id.as_str()).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
        assert_eq!(ranked[2].score, 0.0);
    }
}
