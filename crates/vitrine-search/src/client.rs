//! Search overlay client.
//!
//! Owns the lifecycle of the site search overlay: a lazy, at-most-once
//! fetch of the published index, substring filtering on every input event,
//! and a render payload for the presentation layer to paint. The core is
//! sans-IO so it stays testable without a browser: [`SearchClient::open`]
//! tells the caller whether to start a fetch, and the caller reports the
//! outcome through [`SearchClient::fetch_resolved`].

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{fetch::FetchError, index::SearchIndex};

/// Hint shown when no page title matches the query.
pub const HINT_NO_MATCHES: &str = "Keine Treffer.";

/// Hint shown when the index could not be loaded.
pub const HINT_LOAD_FAILED: &str = "Suchindex konnte nicht geladen werden.";

/// Overlay lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Overlay hidden; initial and terminal state.
    Closed,
    /// Overlay visible, index fetch outstanding.
    Loading,
    /// Overlay visible, index in memory, queries answered synchronously.
    Ready,
    /// Overlay visible, the fetch failed; fixed failure hint displayed.
    Error,
}

/// What the adapter must do after an [`SearchClient::open`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum FetchDirective {
    /// Nothing to do; the index is loaded or a fetch is already in flight.
    None,
    /// Start the one index fetch and report back via `fetch_resolved`.
    Start,
}

/// One entry of the rendered result list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultItem {
    /// Display title, HTML-escaped. Safe to insert as markup text; page
    /// titles are never interpreted as markup.
    pub title: String,

    /// Link target, relative to the page.
    pub url: String,
}

/// Render payload emitted on every state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderPayload {
    /// Matching entries, in canonical index order.
    pub results: Vec<ResultItem>,

    /// Status line: match count, load failure, or empty while loading.
    pub hint: String,
}

impl RenderPayload {
    fn empty() -> Self {
        Self {
            results: Vec::new(),
            hint: String::new(),
        }
    }
}

/// The current query, normalized once per input event and discarded on the
/// next one.
#[derive(Debug, Clone, Default)]
struct QueryState {
    raw: String,
    normalized: String,
}

impl QueryState {
    fn from_raw(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            normalized: raw.trim().to_lowercase(),
        }
    }
}

/// Tracks the single index fetch of a page session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FetchState {
    /// No fetch attempted yet.
    Idle,
    /// One fetch outstanding; never more than one.
    InFlight,
    /// Index cached for the rest of the session.
    Loaded,
    /// Last attempt failed; retried on the next open.
    Failed,
}

/// State machine behind the search overlay.
///
/// A plain owned value: instances are independent, so tests (or multiple
/// overlays) never interfere with each other. The loaded index is treated
/// as immutable; filtering borrows it and never clones or reorders it.
#[derive(Debug)]
pub struct SearchClient {
    index: Option<SearchIndex>,
    fetch: FetchState,
    phase: Phase,
    query: QueryState,
}

impl SearchClient {
    /// Create a client in the `Closed` phase with no index loaded.
    pub fn new() -> Self {
        Self {
            index: None,
            fetch: FetchState::Idle,
            phase: Phase::Closed,
            query: QueryState::default(),
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the overlay is visible.
    pub fn is_open(&self) -> bool {
        self.phase != Phase::Closed
    }

    /// Whether the index has been fetched and cached.
    pub fn index_loaded(&self) -> bool {
        self.fetch == FetchState::Loaded
    }

    /// The raw query as last passed to [`Self::set_query`].
    pub fn query(&self) -> &str {
        &self.query.raw
    }

    /// Open the overlay.
    ///
    /// Clears any previous query synchronously, then transitions to `Ready`
    /// if the index is cached, or to `Loading` otherwise. Re-opening while
    /// already open just resets the query and re-renders. A previously
    /// failed fetch is retried here; a fetch already in flight never gets a
    /// second one started next to it.
    pub fn open(&mut self) -> (FetchDirective, RenderPayload) {
        self.query = QueryState::default();

        let directive = match self.fetch {
            FetchState::Loaded => {
                self.phase = Phase::Ready;
                FetchDirective::None
            }
            FetchState::InFlight => {
                self.phase = Phase::Loading;
                FetchDirective::None
            }
            FetchState::Idle | FetchState::Failed => {
                self.phase = Phase::Loading;
                self.fetch = FetchState::InFlight;
                FetchDirective::Start
            }
        };

        debug!(phase = ?self.phase, ?directive, "search overlay opened");
        (directive, self.render())
    }

    /// Close the overlay. The cached index stays in memory.
    pub fn close(&mut self) {
        self.phase = Phase::Closed;
    }

    /// Replace the query and recompute the result list.
    ///
    /// `text` may be empty; an empty normalized query yields the full index
    /// in canonical order. While the index has not loaded the result list
    /// stays empty with an empty hint.
    pub fn set_query(&mut self, text: &str) -> RenderPayload {
        self.query = QueryState::from_raw(text);
        self.render()
    }

    /// Report the outcome of the fetch started by [`Self::open`].
    ///
    /// A successful fetch caches the index for the rest of the session,
    /// even when the overlay was closed while the request was outstanding
    /// (there is no cancellation). Returns a payload only when the overlay
    /// is still waiting on the result; otherwise the resolution is silent.
    pub fn fetch_resolved(
        &mut self,
        outcome: Result<SearchIndex, FetchError>,
    ) -> Option<RenderPayload> {
        match outcome {
            Ok(index) => {
                debug!(pages = index.len(), "search index loaded");
                self.index = Some(index);
                self.fetch = FetchState::Loaded;

                if self.phase == Phase::Loading {
                    self.phase = Phase::Ready;
                    return Some(self.render());
                }
            }
            Err(error) => {
                warn!(%error, "search index fetch failed");
                self.fetch = FetchState::Failed;

                if self.phase == Phase::Loading {
                    self.phase = Phase::Error;
                    return Some(self.render());
                }
            }
        }

        None
    }

    /// Compute the render payload for the current phase and query.
    fn render(&self) -> RenderPayload {
        match self.phase {
            Phase::Closed | Phase::Loading => RenderPayload::empty(),
            Phase::Error => RenderPayload {
                results: Vec::new(),
                hint: HINT_LOAD_FAILED.to_string(),
            },
            Phase::Ready => {
                let Some(index) = self.index.as_ref() else {
                    return RenderPayload::empty();
                };
                if index.is_empty() {
                    return RenderPayload::empty();
                }

                let matches = index.filter(&self.query.normalized);
                let hint = match matches.len() {
                    0 => HINT_NO_MATCHES.to_string(),
                    1 => "1 Ergebnis".to_string(),
                    n => format!("{n} Ergebnisse"),
                };
                let results = matches
                    .into_iter()
                    .map(|entry| ResultItem {
                        title: escape_html(&entry.title),
                        url: entry.url.clone(),
                    })
                    .collect();

                RenderPayload { results, hint }
            }
        }
    }
}

impl Default for SearchClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Escape text for literal inclusion in HTML.
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
