// Async code that runs in main before the interactive prompt starts

use anyhow::Result;

use crate::Cli;
use crate::config::CATALOG_VERSION;
use crate::data::api_version::ApiVersion;
use crate::data::cache_version::{CacheVersion, check_local_catalog_validity};
use crate::data::{CatalogPayload, FetchCatalogData, get_catalog_data_async};

/// Load the catalog payload, preferring whichever source the CLI and cache
/// state make sensible. If the cache fails validation, the API is the only
/// remaining choice; otherwise the `--prefer-api` flag decides which source
/// goes first, with the other as fallback.
pub async fn fetch_catalog_data(
    catalog_acceptable_age_secs: i64,
    args: &Cli,
) -> Result<(CatalogPayload, &'static str)> {
    let sources: Vec<Box<dyn FetchCatalogData>> = {
        let api_first = args.prefer_api;
        match (
            api_first,
            check_local_catalog_validity(catalog_acceptable_age_secs, CATALOG_VERSION),
        ) {
            (false, Ok(_)) => vec![Box::new(CacheVersion), Box::new(ApiVersion)], // local first
            (true, Ok(_)) => vec![Box::new(ApiVersion), Box::new(CacheVersion)], // API first
            (_, Err(e)) => {
                log::warn!("Local catalog cache validation failed: {:#}", e);
                log::warn!("Falling back to the scanner API...");
                vec![Box::new(ApiVersion)] // API only
            }
        }
    };

    get_catalog_data_async(&sources).await
}
