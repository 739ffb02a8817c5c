//! Search index model and filtering.
//!
//! The index is a flat list of `(url, title)` pairs published as
//! `search-index.json` and held in memory by the overlay client for the
//! rest of the page session. Entries are stored in canonical display
//! order: home page first, then titles in German dictionary order.

use std::{cmp::Ordering, fs, path::Path};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{Result, SearchError, collate::compare_titles};

/// One indexed page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Relative path of the page (e.g. "kontakte.html").
    pub url: String,

    /// Display title shown in the result list.
    pub title: String,
}

/// The published search index.
///
/// Wire format: `{ "pages": [ { "url": ..., "title": ... }, ... ] }`.
/// Array order is the canonical display order; the index is never mutated
/// after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchIndex {
    /// All indexed pages, in canonical order.
    pub pages: Vec<IndexEntry>,
}

impl SearchIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self { pages: Vec::new() }
    }

    /// Build an index from entries, sorting them canonically.
    ///
    /// `home_page` is the filename that always sorts first (the site's
    /// entry page); everything else is ordered by title collation.
    pub fn from_entries(entries: Vec<IndexEntry>, home_page: &str) -> Self {
        let mut index = Self { pages: entries };
        index.sort_canonical(home_page);
        index
    }

    /// Sort entries into canonical display order.
    pub fn sort_canonical(&mut self, home_page: &str) {
        self.pages.sort_by(|a, b| {
            match (a.url == home_page, b.url == home_page) {
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                _ => compare_titles(&a.title, &b.title),
            }
        });
    }

    /// Filter entries whose title contains `query` as a substring.
    ///
    /// `query` must already be normalized (trimmed, lowercased); an empty
    /// query returns the whole index. Matching is pure substring
    /// containment, no tokenization or ranking, and the result preserves
    /// index order, so it is always a stable subsequence of `pages`.
    pub fn filter(&self, query: &str) -> Vec<&IndexEntry> {
        if query.is_empty() {
            return self.pages.iter().collect();
        }

        self.pages
            .iter()
            .filter(|entry| entry.title.to_lowercase().contains(query))
            .collect()
    }

    /// Parse an index from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| SearchError::Serialization(e.to_string()))
    }

    /// Serialize the index to JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| SearchError::Serialization(e.to_string()))
    }

    /// Serialize the index to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| SearchError::Serialization(e.to_string()))
    }

    /// Write the index to a file, creating parent directories as needed.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| SearchError::Io(e.to_string()))?;
        }

        fs::write(path, json).map_err(|e| SearchError::Io(e.to_string()))?;

        info!(path = %path.display(), pages = self.pages.len(), "wrote search index");
        Ok(())
    }

    /// Number of indexed pages.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether the index has no pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(url: &str, title: &str) -> IndexEntry {
        IndexEntry {
            url: url.to_string(),
            title: title.to_string(),
        }
    }

    fn create_test_index() -> SearchIndex {
        SearchIndex::from_entries(
            vec![
                entry("b-page.html", "Berlin"),
                entry("index.html", "Home"),
                entry("a-page.html", "Alpha"),
            ],
            "index.html",
        )
    }

    #[test]
    fn test_canonical_order_home_first() {
        let index = create_test_index();
        let titles: Vec<_> = index.pages.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Home", "Alpha", "Berlin"]);
    }

    #[test]
    fn test_canonical_order_without_home() {
        let index = SearchIndex::from_entries(
            vec![entry("z.html", "Zimmer"), entry("a.html", "Ärzte")],
            "index.html",
        );
        let titles: Vec<_> = index.pages.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Ärzte", "Zimmer"]);
    }

    #[test]
    fn test_filter_empty_query_returns_all() {
        let index = create_test_index();
        let results = index.filter("");
        assert_eq!(results.len(), index.len());
        let titles: Vec<_> = results.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Home", "Alpha", "Berlin"]);
    }

    #[test]
    fn test_filter_substring_case_insensitive() {
        let index = create_test_index();
        assert_eq!(index.filter("berlin").len(), 1);
        assert_eq!(index.filter("erli").len(), 1);
        assert_eq!(index.filter("nothing-matches").len(), 0);
        // caller normalizes; uppercase titles still match lowercase queries
        assert_eq!(index.filter("home").len(), 1);
    }

    #[test]
    fn test_filter_is_stable_subsequence() {
        let index = SearchIndex::from_entries(
            vec![
                entry("index.html", "Home"),
                entry("a.html", "Anfahrt"),
                entry("b.html", "Beratung"),
                entry("c.html", "Bewertungen"),
            ],
            "index.html",
        );

        let all: Vec<_> = index.filter("").iter().map(|e| e.url.clone()).collect();
        let narrowed: Vec<_> = index.filter("be").iter().map(|e| e.url.clone()).collect();

        // narrowed results appear in the same relative order as the full list
        let positions: Vec<_> = narrowed
            .iter()
            .map(|u| {
                all.iter()
                    .position(|other| other == u)
                    .expect("result must come from the index")
            })
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));

        assert_eq!(narrowed, vec!["b.html".to_string(), "c.html".to_string()]);
    }

    #[test]
    fn test_filter_monotonic_narrowing() {
        let index = create_test_index();
        let broad: Vec<_> = index.filter("l").iter().map(|e| e.url.clone()).collect();
        let narrow: Vec<_> = index.filter("lin").iter().map(|e| e.url.clone()).collect();
        assert!(narrow.iter().all(|url| broad.contains(url)));
    }

    #[test]
    fn test_json_round_trip() {
        let index = create_test_index();
        let json = index.to_json().unwrap();
        assert!(json.starts_with(r#"{"pages":["#));

        let parsed = SearchIndex::from_json(&json).unwrap();
        assert_eq!(parsed, index);
    }

    #[test]
    fn test_from_json_wire_format() {
        let json = r#"{"pages":[{"url":"index.html","title":"Home"}]}"#;
        let index = SearchIndex::from_json(json).unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index.pages[0].url, "index.html");
        assert_eq!(index.pages[0].title, "Home");
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(SearchIndex::from_json("not json").is_err());
        assert!(SearchIndex::from_json(r#"{"pages": 3}"#).is_err());
    }

    #[test]
    fn test_write_to_file_creates_parents() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let out = dir.path().join("js").join("search-index.json");

        let index = create_test_index();
        index.write_to_file(&out).expect("write index");

        let written = std::fs::read_to_string(&out).expect("read back");
        assert_eq!(SearchIndex::from_json(&written).unwrap(), index);
    }
}
