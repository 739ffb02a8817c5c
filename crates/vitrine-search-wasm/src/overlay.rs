//! Browser-facing overlay adapter.
//!
//! Thin binding between UI events and the overlay state machine. The
//! overlay owns a [`SearchClient`] and forwards every render payload to a
//! caller-supplied JavaScript callback; it never touches markup itself.

use std::{cell::RefCell, rc::Rc};

use js_sys::Function;
use vitrine_search::{FetchDirective, RenderPayload, SearchClient};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::fetch::{self, DEFAULT_INDEX_URL, DEFAULT_TIMEOUT_MS};

/// Search overlay bound to a JavaScript render callback.
///
/// The callback receives `{ results: [{ title, url }, ...], hint }` on
/// every state change; titles arrive HTML-escaped.
#[wasm_bindgen]
pub struct SearchOverlay {
    client: Rc<RefCell<SearchClient>>,
    on_render: Function,
    index_url: String,
    timeout_ms: u32,
}

#[wasm_bindgen]
impl SearchOverlay {
    /// Create an overlay.
    ///
    /// `index_url` defaults to `js/search-index.json` relative to the
    /// page; `timeout_ms` to 8000.
    #[wasm_bindgen(constructor)]
    pub fn new(
        on_render: Function,
        index_url: Option<String>,
        timeout_ms: Option<u32>,
    ) -> SearchOverlay {
        SearchOverlay {
            client: Rc::new(RefCell::new(SearchClient::new())),
            on_render,
            index_url: index_url.unwrap_or_else(|| DEFAULT_INDEX_URL.to_string()),
            timeout_ms: timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS),
        }
    }

    /// Open the overlay, starting the index fetch on first use.
    pub fn open(&self) {
        let (directive, payload) = self.client.borrow_mut().open();
        emit(&self.on_render, &payload);

        if directive == FetchDirective::Start {
            self.spawn_fetch();
        }
    }

    /// Close the overlay. The cached index stays in memory.
    pub fn close(&self) {
        self.client.borrow_mut().close();
    }

    /// Replace the query and re-render, typically on every input event.
    #[wasm_bindgen(js_name = setQuery)]
    pub fn set_query(&self, text: &str) {
        let payload = self.client.borrow_mut().set_query(text);
        emit(&self.on_render, &payload);
    }

    /// Whether the overlay is currently visible.
    #[wasm_bindgen(js_name = isOpen)]
    pub fn is_open(&self) -> bool {
        self.client.borrow().is_open()
    }

    /// Whether the index has been fetched and cached.
    #[wasm_bindgen(js_name = indexLoaded)]
    pub fn index_loaded(&self) -> bool {
        self.client.borrow().index_loaded()
    }

    fn spawn_fetch(&self) {
        let client = Rc::clone(&self.client);
        let on_render = self.on_render.clone();
        let url = self.index_url.clone();
        let timeout_ms = self.timeout_ms;

        spawn_local(async move {
            let outcome = fetch::fetch_index(&url, timeout_ms).await;
            let payload = client.borrow_mut().fetch_resolved(outcome);
            if let Some(payload) = payload {
                emit(&on_render, &payload);
            }
        });
    }
}

/// Serialize a payload and invoke the JS callback.
///
/// The callback runs outside any client borrow, so it may synchronously
/// call back into the overlay.
fn emit(on_render: &Function, payload: &RenderPayload) {
    if let Ok(value) = serde_wasm_bindgen::to_value(payload) {
        let _ = on_render.call1(&JsValue::NULL, &value);
    }
}
