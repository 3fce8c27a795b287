// Core modules
pub mod config;
pub mod data;
pub mod domain;
pub mod selection;
pub mod utils;

// Re-export commonly used types
pub use config::CATALOG_ACCEPTABLE_AGE_SECONDS;
pub use data::{CatalogPayload, fetch_catalog_data, write_catalog_data_async};
pub use domain::{PairCatalog, PairCategory, PairSymbol, Tier};
pub use selection::{SelectorSession, TierBoundedSelection, validate_scan_request};

// CLI argument parsing
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Use API as primary source instead of the local cache
    #[arg(long, default_value_t = false)]
    pub prefer_api: bool,

    /// Pre-select these pairs before any interaction (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub seed: Vec<String>,
}
