//! Vitrine CLI
//!
//! Build tooling for the static site: generates the client-side search
//! index and validates the page sources it is built from.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use clap::Parser;
use color_eyre::eyre::Result;

/// Command-line interface for Vitrine.
#[derive(Parser)]
#[command(
    name = "vitrine",
    version,
    about = "Search index tooling for static sites"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "vitrine.toml")]
    config: std::path::PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Build the client-side search index
    Index {
        /// Override the page source directory
        #[arg(short, long)]
        source: Option<std::path::PathBuf>,
        /// Override the index output file
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
    },
    /// Validate configuration and page sources
    Check {
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    vitrine::init_tracing(cli.verbose);

    match cli.command {
        Commands::Index { source, output } => {
            vitrine::cmd::index::run(&cli.config, source.as_deref(), output.as_deref())?;
        }
        Commands::Check { strict } => {
            vitrine::cmd::check::run(&cli.config, strict)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_cli_index_command_parsing() {
        let args = ["vitrine", "index", "--output", "docs/js/search-index.json"];
        let cli = Cli::parse_from(args);

        assert_eq!(cli.config, std::path::PathBuf::from("vitrine.toml"));
        assert_eq!(cli.verbose, 0);

        match cli.command {
            Commands::Index { source, output } => {
                assert!(source.is_none());
                assert_eq!(
                    output,
                    Some(std::path::PathBuf::from("docs/js/search-index.json"))
                );
            }
            _ => panic!("Expected Index command"),
        }
    }

    #[test]
    fn test_cli_index_with_source() {
        let args = ["vitrine", "index", "--source", "app/src"];
        let cli = Cli::parse_from(args);

        match cli.command {
            Commands::Index { source, .. } => {
                assert_eq!(source, Some(std::path::PathBuf::from("app/src")));
            }
            _ => panic!("Expected Index command"),
        }
    }

    #[test]
    fn test_cli_check_command_parsing() {
        let args = ["vitrine", "check", "--strict"];
        let cli = Cli::parse_from(args);

        match cli.command {
            Commands::Check { strict } => {
                assert!(strict);
            }
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_cli_verbosity_flags() {
        let args = ["vitrine", "-vvv", "check"];
        let cli = Cli::parse_from(args);
        assert_eq!(cli.verbose, 3);
    }

    #[test]
    fn test_cli_custom_config_path() {
        let args = ["vitrine", "--config", "site.toml", "index"];
        let cli = Cli::parse_from(args);
        assert_eq!(cli.config, std::path::PathBuf::from("site.toml"));
    }
}
