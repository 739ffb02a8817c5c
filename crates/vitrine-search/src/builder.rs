//! Offline search index builder.
//!
//! Scans the page sources of the site (a flat directory of `*.html` files)
//! and produces the index the browser client fetches. Titles come from the
//! first `<h1>` of each page, with a readable fallback derived from the
//! filename; configured per-file prefixes add extra searchable terms.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use rayon::prelude::*;
use regex::Regex;
use tracing::{debug, info, warn};
use vitrine_core::SearchConfig;

use crate::{
    Result, SearchError,
    index::{IndexEntry, SearchIndex},
};

static H1_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<h1[^>]*>(.*?)</h1>").expect("valid h1 pattern"));

/// Builds the search index from page sources.
#[derive(Debug)]
pub struct IndexBuilder {
    config: SearchConfig,
}

impl IndexBuilder {
    /// Create a new builder.
    #[must_use]
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    /// Scan the source directory and build the index in canonical order.
    pub fn build(&self) -> Result<SearchIndex> {
        let source = Path::new(&self.config.source_dir);
        if !source.is_dir() {
            return Err(SearchError::MissingSource(source.to_path_buf()));
        }

        let files = self.find_page_files(source)?;
        info!(dir = %source.display(), count = files.len(), "found page sources");

        let entries: Vec<IndexEntry> = files
            .par_iter()
            .filter_map(|path| match self.read_entry(path) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping unreadable page");
                    None
                }
            })
            .collect();

        let index = SearchIndex::from_entries(entries, &self.config.home_page);
        info!(pages = index.len(), "built search index");
        Ok(index)
    }

    /// Write the index to the configured output path.
    ///
    /// Returns the path written.
    pub fn write(&self, index: &SearchIndex) -> Result<PathBuf> {
        let out = PathBuf::from(&self.config.index_file);
        index.write_to_file(&out)?;
        Ok(out)
    }

    /// List the indexable page files, sorted for a deterministic scan.
    fn find_page_files(&self, source: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        let entries = fs::read_dir(source).map_err(|e| SearchError::Io(e.to_string()))?;
        for entry in entries {
            let entry = entry.map_err(|e| SearchError::Io(e.to_string()))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let Some(file_name) = path.file_name().map(|n| n.to_string_lossy().to_string()) else {
                continue;
            };
            if !file_name.ends_with(".html") {
                continue;
            }
            if self.config.exclude.iter().any(|ex| ex == &file_name) {
                debug!(file = %file_name, "excluded from index");
                continue;
            }

            files.push(path);
        }

        files.sort();
        Ok(files)
    }

    /// Read one page and derive its index entry.
    fn read_entry(&self, path: &Path) -> std::io::Result<IndexEntry> {
        let html = fs::read_to_string(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let mut title =
            extract_h1(&html).unwrap_or_else(|| title_from_filename(&file_name));
        if let Some(prefix) = self.config.title_prefixes.get(&file_name) {
            title = format!("{prefix}{title}");
        }

        Ok(IndexEntry {
            url: file_name,
            title,
        })
    }
}

/// Extract the text of the first `<h1>` from an HTML document.
///
/// Inner tags are stripped and whitespace collapsed; returns `None` when
/// the page has no `<h1>` or it is empty.
pub fn extract_h1(html: &str) -> Option<String> {
    let caps = H1_RE.captures(html)?;
    let inner = strip_tags(caps.get(1)?.as_str());
    let title = inner.split_whitespace().collect::<Vec<_>>().join(" ");
    (!title.is_empty()).then_some(title)
}

/// Derive a readable title from a filename.
///
/// `-` and `_` split words, each word is capitalized, and "Index" maps to
/// "Home" so the entry page gets a sensible display name.
pub fn title_from_filename(file_name: &str) -> String {
    let stem = file_name.strip_suffix(".html").unwrap_or(file_name);
    stem.split(['-', '_'])
        .filter(|w| !w.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
        .replace("Index", "Home")
}

/// Capitalize the first character, lowercase the rest.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// Remove markup tags, keeping only text content.
fn strip_tags(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut in_tag = false;

    for c in html.chars() {
        if c == '<' {
            in_tag = true;
        } else if c == '>' {
            in_tag = false;
        } else if !in_tag {
            result.push(c);
        }
    }

    result
}
