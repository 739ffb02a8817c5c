//! Vitrine Search Library
//!
//! Client-side site search for a static site: index generation at build
//! time and the overlay client consuming that index in the browser.
//!
//! # Features
//!
//! - **Index builder**: scans published HTML pages and writes the
//!   `search-index.json` the site ships
//! - **Canonical ordering**: home page first, then German-collated titles
//! - **Overlay client**: a sans-IO state machine answering substring
//!   queries with render-ready results and a count hint
//!
//! # Example
//!
//! ```no_run
//! use vitrine_core::SearchConfig;
//! use vitrine_search::IndexBuilder;
//!
//! let builder = IndexBuilder::new(SearchConfig::default());
//! let index = builder.build().unwrap();
//! builder.write(&index).unwrap();
//! ```

pub mod builder;
pub mod client;
pub mod collate;
pub mod fetch;
pub mod index;

pub use builder::{IndexBuilder, extract_h1, title_from_filename};
pub use client::{
    FetchDirective, HINT_LOAD_FAILED, HINT_NO_MATCHES, Phase, RenderPayload, ResultItem,
    SearchClient,
};
pub use collate::compare_titles;
pub use fetch::FetchError;
pub use index::{IndexEntry, SearchIndex};
use thiserror::Error;

/// Search-related errors.
#[derive(Debug, Error)]
pub enum SearchError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Page source directory does not exist.
    #[error("Source directory not found: {0}")]
    MissingSource(std::path::PathBuf),
}

/// Result type for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;
