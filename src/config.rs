//! Command-line configuration and logging setup.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ong-explorer", version, about = "Browse humanitarian organizations on a development-index world map")]
pub struct Cli {
    /// NGO catalog (`;`-delimited, header row)
    #[arg(long, value_name = "CSV", default_value = "data/bdd_ong.csv")]
    pub catalog: PathBuf,

    /// World boundary GeoJSON with a `name` property per country
    #[arg(long, value_name = "GEOJSON", default_value = "data/world-countries.json")]
    pub world: PathBuf,

    /// Log file for the interactive dashboard
    #[arg(long, value_name = "FILE", default_value = "ong-explorer.log")]
    pub log_file: PathBuf,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the organizations matching a search
    Search {
        /// Intervention country ("Tous" for any)
        #[arg(long, default_value = "Tous")]
        country: String,

        /// Domain, repeatable
        #[arg(long = "domain")]
        domains: Vec<String>,

        /// Part of the organization name
        #[arg(long, default_value = "")]
        name: String,

        /// Require an exact intervention country instead of a substring
        #[arg(long)]
        exact: bool,
    },

    /// Print the development-index band of map regions
    Colorize {
        #[arg(required = true, value_name = "REGION")]
        regions: Vec<String>,
    },
}

/// Default filter when `RUST_LOG` is unset
const DEFAULT_LOG_FILTER: &str = "info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Log to a file so the terminal UI is left alone
pub fn init_file_logging(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

/// Log to stderr for the headless subcommands
pub fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["ong-explorer"]);
        assert_eq!(cli.catalog, PathBuf::from("data/bdd_ong.csv"));
        assert_eq!(cli.world, PathBuf::from("data/world-countries.json"));
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_search_args() {
        let cli = Cli::parse_from([
            "ong-explorer", "search", "--country", "Kenya", "--domain", "Santé", "--domain", "Eau", "--exact",
        ]);
        match cli.command {
            Some(Command::Search { country, domains, name, exact }) => {
                assert_eq!(country, "Kenya");
                assert_eq!(domains, vec!["Santé", "Eau"]);
                assert!(name.is_empty());
                assert!(exact);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_colorize_requires_region() {
        assert!(Cli::try_parse_from(["ong-explorer", "colorize"]).is_err());
    }
}
