//! Index command - builds the client-side search index

use std::{path::Path, time::Instant};

use color_eyre::eyre::{Result, WrapErr};
use vitrine_core::Config;
use vitrine_search::IndexBuilder;

/// Run the index command.
///
/// Scans the page sources and writes the search index file.
pub fn run(config_path: &Path, source: Option<&Path>, output: Option<&Path>) -> Result<()> {
    let start = Instant::now();
    tracing::info!(?config_path, ?source, ?output, "Building search index");

    // Load configuration
    let mut config = Config::load(config_path).wrap_err("Failed to load configuration")?;

    // Override source directory if specified via CLI
    if let Some(dir) = source {
        tracing::info!(source = %dir.display(), "Overriding source directory from CLI");
        config.search.source_dir = dir.to_string_lossy().to_string();
    }

    // Override output file if specified via CLI
    if let Some(file) = output {
        tracing::info!(output = %file.display(), "Overriding index file from CLI");
        config.search.index_file = file.to_string_lossy().to_string();
    }

    if !config.search.enabled {
        println!();
        println!("  Search is disabled in the configuration, nothing to do.");
        return Ok(());
    }

    let builder = IndexBuilder::new(config.search);
    let index = builder.build().wrap_err("Failed to build search index")?;
    let written = builder.write(&index).wrap_err("Failed to write search index")?;

    let duration = start.elapsed();

    // Print build statistics
    println!();
    println!("  Search index written!");
    println!();
    println!("  Pages:    {}", index.len());
    println!("  Output:   {}", written.display());
    println!("  Duration: {:.2}s", duration.as_secs_f64());
    println!();

    tracing::info!(pages = index.len(), ?duration, "Search index build complete");

    Ok(())
}
