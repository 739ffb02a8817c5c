//! Index fetch over HTTP.
//!
//! One GET of the published index document, raced against a deadline so a
//! hung request surfaces as an error instead of leaving the overlay in the
//! loading phase forever. Transport, HTTP, and parse failures all map to
//! [`FetchError`]; the client treats them uniformly.

use futures::{
    future::{Either, select},
    pin_mut,
};
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use vitrine_search::{FetchError, SearchIndex};

/// Index location relative to the page, matching what the site publishes.
pub const DEFAULT_INDEX_URL: &str = "js/search-index.json";

/// Default deadline for the index request, in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u32 = 8_000;

/// Fetch and parse the search index from `url`.
pub async fn fetch_index(url: &str, timeout_ms: u32) -> Result<SearchIndex, FetchError> {
    let request = request_index(url);
    let deadline = TimeoutFuture::new(timeout_ms);
    pin_mut!(request, deadline);

    match select(request, deadline).await {
        Either::Left((outcome, _)) => outcome,
        Either::Right(((), _)) => Err(FetchError::TimedOut(timeout_ms)),
    }
}

async fn request_index(url: &str) -> Result<SearchIndex, FetchError> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| FetchError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(FetchError::Http(response.status()));
    }

    let body = response
        .text()
        .await
        .map_err(|e| FetchError::Network(e.to_string()))?;

    SearchIndex::from_json(&body).map_err(|e| FetchError::Parse(e.to_string()))
}
