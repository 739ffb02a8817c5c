//! End-to-end lifecycle tests.
//!
//! Builds an index from real page files, round-trips it through the wire
//! format, and drives the overlay client the way a browser session would.

use std::fs;

use vitrine_core::SearchConfig;
use vitrine_search::{
    FetchDirective, FetchError, IndexBuilder, Phase, SearchClient, SearchIndex,
};

fn build_site_index() -> SearchIndex {
    let dir = tempfile::tempdir().expect("create temp dir");
    let pages = [
        ("index.html", "<h1>Willkommen</h1>"),
        ("berlin.html", "<h1>Standort <em>Berlin</em></h1>"),
        ("aerzte.html", "<h1>Ärzte vor Ort</h1>"),
        ("beratung.html", "<h1>Beratung</h1>"),
        ("404.html", "<h1>Seite nicht gefunden</h1>"),
    ];
    for (name, body) in pages {
        fs::write(dir.path().join(name), body).expect("write page");
    }

    let config = SearchConfig {
        source_dir: dir.path().to_string_lossy().to_string(),
        ..SearchConfig::default()
    };
    IndexBuilder::new(config).build().expect("build index")
}

#[test]
fn test_full_session() {
    let index = build_site_index();

    // canonical order: home first, umlauts collated with their base vowels
    let titles: Vec<_> = index.pages.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Willkommen", "Ärzte vor Ort", "Beratung", "Standort Berlin"]
    );

    // ship over the wire exactly once, as the browser would receive it
    let json = index.to_json().expect("serialize");
    let fetched = SearchIndex::from_json(&json).expect("parse");

    let mut client = SearchClient::new();
    let (directive, payload) = client.open();
    assert_eq!(directive, FetchDirective::Start);
    assert!(payload.results.is_empty());

    let payload = client.fetch_resolved(Ok(fetched)).expect("render on load");
    assert_eq!(client.phase(), Phase::Ready);
    assert_eq!(payload.results.len(), 4);
    assert_eq!(payload.hint, "4 Ergebnisse");

    // keystrokes narrow monotonically and stay stable
    let broad = client.set_query("ber");
    assert_eq!(broad.hint, "2 Ergebnisse");
    let narrow = client.set_query("berli");
    assert_eq!(narrow.hint, "1 Ergebnis");
    assert!(
        narrow
            .results
            .iter()
            .all(|r| broad.results.iter().any(|b| b.url == r.url))
    );
    assert_eq!(narrow.results[0].url, "berlin.html");

    // dismiss and reopen: no refetch, stale query cleared
    client.close();
    let (directive, payload) = client.open();
    assert_eq!(directive, FetchDirective::None);
    assert_eq!(payload.results.len(), 4);
}

#[test]
fn test_failed_session_recovers_on_reopen() {
    let index = build_site_index();

    let mut client = SearchClient::new();
    let (directive, _) = client.open();
    assert_eq!(directive, FetchDirective::Start);

    let payload = client
        .fetch_resolved(Err(FetchError::TimedOut(8000)))
        .expect("render on failure");
    assert_eq!(client.phase(), Phase::Error);
    assert_eq!(payload.hint, "Suchindex konnte nicht geladen werden.");

    // next visit to the overlay retries and succeeds
    client.close();
    let (directive, _) = client.open();
    assert_eq!(directive, FetchDirective::Start);
    let payload = client.fetch_resolved(Ok(index)).expect("render on load");
    assert_eq!(client.phase(), Phase::Ready);
    assert_eq!(payload.hint, "4 Ergebnisse");
}

#[test]
fn test_injected_title_stays_inert() {
    let dir = tempfile::tempdir().expect("create temp dir");
    fs::write(
        dir.path().join("index.html"),
        "<h1>Home &amp; <b>more</b></h1>",
    )
    .expect("write page");

    let config = SearchConfig {
        source_dir: dir.path().to_string_lossy().to_string(),
        ..SearchConfig::default()
    };
    let index = IndexBuilder::new(config).build().expect("build index");

    let mut client = SearchClient::new();
    let (_, _) = client.open();
    let payload = client.fetch_resolved(Ok(index)).expect("render");

    // the builder keeps entity text verbatim; the client escapes it again
    // so the payload is always literal text
    assert_eq!(payload.results[0].title, "Home &amp;amp; more");
}
