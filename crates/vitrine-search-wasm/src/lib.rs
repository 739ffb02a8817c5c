//! Vitrine Search WASM Runtime
//!
//! Browser-side adapter for the site search overlay.
//!
//! # Features
//!
//! - **SearchOverlay**: binds UI events to the overlay state machine and
//!   forwards every render payload to a JavaScript callback
//! - **Single fetch**: the index is requested at most once per visit, with
//!   a configurable deadline
//!
//! # Example (JavaScript)
//!
//! ```javascript
//! import init, { SearchOverlay } from 'vitrine-search-wasm';
//!
//! await init();
//! const overlay = new SearchOverlay((payload) => paint(payload));
//!
//! openButton.addEventListener('click', () => overlay.open());
//! input.addEventListener('input', () => overlay.setQuery(input.value));
//! ```

pub mod fetch;
pub mod overlay;

pub use fetch::{DEFAULT_INDEX_URL, DEFAULT_TIMEOUT_MS, fetch_index};
pub use overlay::SearchOverlay;
use wasm_bindgen::prelude::*;

/// Initialize the WASM module.
///
/// Sets up panic hook for better error messages in the console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Get the version of the search library.
#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Check if the library is ready.
#[wasm_bindgen(js_name = isReady)]
pub fn is_ready() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_version() {
        let version = get_version();
        assert!(!version.is_empty());
        assert!(version.starts_with("0."));
    }

    #[test]
    fn test_is_ready() {
        assert!(is_ready());
    }
}
