//! Fuzzy title index shared by the list stores.
//!
//! Approximate matching over the searchable field of every record in a
//! collection: letter-pair similarity scored against the query, with a low
//! acceptance threshold so near-misses ("mth" for "math") still hit.
//! Entries are reference-counted so deleting the last record with a given
//! title removes it from the index.

use std::collections::{HashMap, HashSet};

/// Lowercase, keep alphanumerics, collapse everything else to single spaces.
fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_was_space = true;
    for c in text.chars() {
        if c.is_alphanumeric() {
            out.extend(c.to_lowercase());
            last_was_space = false;
        } else if !last_was_space {
            out.push(' ');
            last_was_space = true;
        }
    }
    while out.ends_with(' ') {
        out.pop();
    }
    out
}

/// Letter-pair counts of `-text-` (padding makes word edges significant).
fn gram_counts(text: &str) -> HashMap<String, u32> {
    let padded: Vec<char> = std::iter::once('-')
        .chain(text.chars())
        .chain(std::iter::once('-'))
        .collect();
    let mut counts = HashMap::new();
    for pair in padded.windows(2) {
        *counts.entry(pair.iter().collect::<String>()).or_insert(0) += 1;
    }
    counts
}

fn magnitude(counts: &HashMap<String, u32>) -> f64 {
    (counts.values().map(|&c| u64::from(c) * u64::from(c)).sum::<u64>() as f64).sqrt()
}

/// Cosine similarity between two gram-count vectors, in [0, 1].
fn similarity(a: &HashMap<String, u32>, b: &HashMap<String, u32>) -> f64 {
    let dot: u64 = a
        .iter()
        .filter_map(|(gram, &count)| b.get(gram).map(|&other| u64::from(count) * u64::from(other)))
        .sum();
    let denominator = magnitude(a) * magnitude(b);
    if denominator == 0.0 {
        0.0
    } else {
        dot as f64 / denominator
    }
}

struct IndexEntry {
    refs: usize,
    grams: HashMap<String, u32>,
}

/// Reference-counted fuzzy index over record titles.
#[derive(Default)]
pub struct FuzzyIndex {
    entries: HashMap<String, IndexEntry>,
}

impl FuzzyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one record's searchable text. Repeated titles share an entry.
    pub fn add(&mut self, text: &str) {
        let key = normalize(text);
        if key.is_empty() {
            return;
        }
        match self.entries.get_mut(&key) {
            Some(entry) => entry.refs += 1,
            None => {
                let grams = gram_counts(&key);
                self.entries.insert(key, IndexEntry { refs: 1, grams });
            }
        }
    }

    /// Drop one reference to a record's searchable text; the entry is removed
    /// when the last record carrying it goes away.
    pub fn remove(&mut self, text: &str) {
        let key = normalize(text);
        if let Some(entry) = self.entries.get_mut(&key) {
            entry.refs -= 1;
            if entry.refs == 0 {
                self.entries.remove(&key);
            }
        }
    }

    /// Normalized titles scoring above `threshold` against the query.
    pub fn matches(&self, query: &str, threshold: f64) -> HashSet<String> {
        let key = normalize(query);
        if key.is_empty() {
            return HashSet::new();
        }
        let query_grams = gram_counts(&key);
        self.entries
            .iter()
            .filter(|(_, entry)| similarity(&query_grams, &entry.grams) > threshold)
            .map(|(title, _)| title.clone())
            .collect()
    }

    /// Whether `text` would be selected by `query` at `threshold`.
    pub fn is_match(&self, text: &str, query: &str, threshold: f64) -> bool {
        self.matches(query, threshold).contains(&normalize(text))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Normalized form of a record's searchable text, for membership checks
/// against `FuzzyIndex::matches`.
pub fn search_key(text: &str) -> String {
    normalize(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::FUZZY_THRESHOLD;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Math: Homework #3 "), "math homework 3");
        assert_eq!(normalize("Art"), "art");
        assert_eq!(normalize("!!!"), "");
    }

    #[test]
    fn test_exact_match_case_insensitive() {
        let mut index = FuzzyIndex::new();
        index.add("Art");
        let found = index.matches("art", FUZZY_THRESHOLD);
        assert!(found.contains("art"));
    }

    #[test]
    fn test_approximate_match() {
        let mut index = FuzzyIndex::new();
        index.add("Math");
        // Dropped vowel still scores well above the threshold.
        assert!(index.is_match("Math", "mth", FUZZY_THRESHOLD));
    }

    #[test]
    fn test_unrelated_titles_do_not_match() {
        let mut index = FuzzyIndex::new();
        index.add("Science fair");
        assert!(index.matches("art", FUZZY_THRESHOLD).is_empty());
    }

    #[test]
    fn test_remove_prunes_entry() {
        let mut index = FuzzyIndex::new();
        index.add("Field trip");
        assert_eq!(index.len(), 1);
        index.remove("Field trip");
        assert!(index.is_empty());
        assert!(index.matches("field", FUZZY_THRESHOLD).is_empty());
    }

    #[test]
    fn test_shared_titles_are_reference_counted() {
        let mut index = FuzzyIndex::new();
        index.add("Homework");
        index.add("Homework");
        index.remove("Homework");
        // One record with this title remains.
        assert!(index.is_match("Homework", "homework", FUZZY_THRESHOLD));
        index.remove("Homework");
        assert!(index.is_empty());
    }

    #[test]
    fn test_empty_query_matches_nothing() {
        let mut index = FuzzyIndex::new();
        index.add("Anything");
        assert!(index.matches("", FUZZY_THRESHOLD).is_empty());
        assert!(index.matches("   ", FUZZY_THRESHOLD).is_empty());
    }
}
