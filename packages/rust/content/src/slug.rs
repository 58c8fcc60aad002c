//! Kebab-case cleaning shared by slugs, categories, and tags.

/// Clean a raw slug, path, category, or tag into kebab-case.
///
/// Every run of non-alphanumeric characters (path separators included)
/// becomes a single hyphen, leading and trailing separators are dropped, and
/// the result is lowercase. Uppercase letters with no lowercase form are
/// treated as separators. Cleaning is idempotent.
pub fn clean_slug(raw: &str) -> String {
    raw.to_lowercase()
        .split(|c: char| !c.is_alphanumeric() || c.is_uppercase())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
