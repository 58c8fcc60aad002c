//! Word-set extraction for overlap scoring.

use std::collections::HashSet;

use docrank_shared::Document;

/// Tokens of this many characters or fewer are ignored.
pub const MIN_WORD_CHARS: usize = 3;

/// Deduplicated lowercase words of a document's title and body text.
///
/// Title and body are tokenized separately on whitespace; only tokens longer
/// than [`MIN_WORD_CHARS`] characters are kept. Punctuation stays attached to
/// its token.
pub fn word_set(doc: &Document) -> HashSet<String> {
    tokens(&doc.title).chain(tokens(&doc.body_text)).collect()
}

fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace()
        .map(str::to_lowercase)
        .filter(|word| word.chars().count() > MIN_WORD_CHARS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(title: &str, body: &str) -> Document {
        Document {
            id: "x".into(),
            slug: "x".into(),
            title: title.into(),
            description: None,
            category: None,
            tags: vec![],
            draft: false,
            date: None,
            headings: vec![],
            body_text: body.into(),
        }
    }

    fn sorted(set: HashSet<String>) -> Vec<String> {
        let mut words: Vec<String> = set.into_iter().collect();
        words.sort();
        words
    }

    #[test]
    fn keeps_long_lowercased_words() {
        let words = word_set(&doc("Scaling Postgres", "a guide for the Postgres team"));
        assert_eq!(sorted(words), vec!["guide", "postgres", "scaling", "team"]);
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // "été" is three characters but five bytes.
        let words = word_set(&doc("", "été café naïve"));
        assert_eq!(sorted(words), vec!["café", "naïve"]);
    }

    #[test]
    fn length_is_measured_after_lowercasing() {
        // "İST" lowercases to four characters.
        let words = word_set(&doc("", "İST ABC"));
        assert_eq!(sorted(words), vec!["i\u{307}st"]);
    }

    #[test]
    fn title_and_body_do_not_merge() {
        let words = word_set(&doc("Deploy", "Notes\non\ttabs"));
        assert_eq!(sorted(words), vec!["deploy", "notes", "tabs"]);
    }

    #[test]
    fn punctuation_stays_attached() {
        let words = word_set(&doc("", "clusters, clusters"));
        assert_eq!(sorted(words), vec!["clusters", "clusters,"]);
    }

    #[test]
    fn empty_document_has_no_words() {
        assert!(word_set(&doc("", "")).is_empty());
    }
}
