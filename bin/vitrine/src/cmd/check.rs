//! Check command - validate configuration and page sources

use std::{collections::HashMap, path::Path};

use color_eyre::eyre::{Result, bail};
use vitrine_core::Config;
use vitrine_search::extract_h1;

/// Validation result.
#[derive(Debug, Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
///
/// Validates the configuration and every indexable page source.
pub fn run(config_path: &Path, strict: bool) -> Result<()> {
    tracing::info!(?config_path, strict, "Checking configuration and page sources");

    let mut result = ValidationResult::default();

    // Validate configuration
    println!("Checking configuration...");
    let config = match Config::load(config_path) {
        Ok(c) => {
            println!("  ✓ Configuration valid");
            Some(c)
        }
        Err(e) => {
            result.add_error(format!("Configuration error: {e}"));
            println!("  ✗ Configuration invalid: {e}");
            None
        }
    };

    // Validate page sources
    if let Some(ref cfg) = config {
        println!();
        println!("Checking page sources...");
        validate_page_sources(cfg, &mut result);
    }

    // Print summary
    println!();
    println!("Summary:");
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    // Determine exit status
    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

/// Validate every indexable page in the source directory.
fn validate_page_sources(config: &Config, result: &mut ValidationResult) {
    let source = Path::new(&config.search.source_dir);
    if !source.is_dir() {
        result.add_error(format!(
            "Source directory missing: {}",
            config.search.source_dir
        ));
        println!("  ✗ {}/ missing", config.search.source_dir);
        return;
    }

    let entries = match std::fs::read_dir(source) {
        Ok(entries) => entries,
        Err(e) => {
            result.add_error(format!("Failed to read source directory: {e}"));
            return;
        }
    };

    let mut checked = 0;
    let mut missing_heading = 0;
    let mut titles_seen: HashMap<String, String> = HashMap::new();

    for entry in entries.filter_map(|e| e.ok()) {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let file_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        if !file_name.ends_with(".html") {
            continue;
        }
        if config.search.exclude.iter().any(|ex| ex == &file_name) {
            continue;
        }

        checked += 1;

        let html = match std::fs::read_to_string(&path) {
            Ok(html) => html,
            Err(e) => {
                result.add_error(format!("{file_name}: Failed to read file: {e}"));
                continue;
            }
        };

        match extract_h1(&html) {
            Some(title) => {
                if let Some(other) = titles_seen.insert(title.clone(), file_name.clone()) {
                    result.add_warning(format!(
                        "Duplicate title \"{title}\" in {other} and {file_name}"
                    ));
                }
            }
            None => {
                missing_heading += 1;
                result.add_warning(format!(
                    "{file_name}: no <h1> found, index will fall back to the filename"
                ));
            }
        }
    }

    if checked == 0 {
        result.add_warning(format!(
            "No indexable pages found in {}",
            config.search.source_dir
        ));
        println!("  ⚠ No indexable pages found");
    } else if missing_heading == 0 {
        println!("  ✓ All {checked} pages have a heading");
    } else {
        println!("  ⚠ {missing_heading}/{checked} pages without a heading");
    }
}
