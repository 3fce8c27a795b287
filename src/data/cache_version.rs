use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;

use crate::config::{CATALOG_PATH, CATALOG_VERSION, catalog_cache_filename};
#[cfg(debug_assertions)]
use crate::config::debug::PRINT_SERDE;
use crate::data::cache_file::CacheFile;
use crate::data::{CatalogPayload, FetchCatalogData};
use crate::utils::how_many_seconds_ago;

/// Checks whether the on-disk catalog is usable before we put it ahead of
/// the API in the source chain.
pub fn check_local_catalog_validity(recency_required_secs: i64, version_required: f64) -> Result<()> {
    let filename = catalog_cache_filename();
    let full_path = PathBuf::from(CATALOG_PATH).join(&filename);

    #[cfg(debug_assertions)]
    if PRINT_SERDE {
        log::info!("Checking validity of local catalog cache at {:?}...", full_path);
    }
    let cache = CacheFile::load_from_path(&full_path)?;

    if cache.version != version_required {
        bail!(
            "Cache version mismatch: file v{} vs required v{}",
            cache.version,
            version_required
        );
    }

    let seconds_ago = how_many_seconds_ago(cache.timestamp_ms);
    if seconds_ago > recency_required_secs {
        bail!(
            "Cache too old: created {} seconds ago (limit: {} seconds)",
            seconds_ago,
            recency_required_secs
        );
    }

    #[cfg(debug_assertions)]
    if PRINT_SERDE {
        log::info!(
            "Cache valid: v{}, {}s old (limit {}s)",
            cache.version,
            seconds_ago,
            recency_required_secs
        );
    }
    Ok(())
}

fn write_catalog_data_locally(payload: &CatalogPayload) -> Result<()> {
    let cache = CacheFile::new(payload.clone(), CATALOG_VERSION);
    let path = CacheFile::default_cache_path();
    cache.save_to_path(&path)?;

    #[cfg(debug_assertions)]
    if PRINT_SERDE {
        log::info!(
            "Wrote catalog cache ({} pairs) to {:?}",
            payload.available_pairs.len(),
            path
        );
    }
    Ok(())
}

/// Persist the freshly fetched payload off the hot path so the next start
/// can skip the network.
pub async fn write_catalog_data_async(payload: CatalogPayload) -> Result<()> {
    tokio::task::spawn_blocking(move || write_catalog_data_locally(&payload))
        .await
        .context("Cache write task panicked")?
}

/// Catalog source backed by the local cache file.
pub struct CacheVersion;

#[async_trait]
impl FetchCatalogData for CacheVersion {
    fn signature(&self) -> &'static str {
        "Local Cache"
    }

    async fn fetch_catalog_data(&self) -> Result<CatalogPayload> {
        let path = CacheFile::default_cache_path();
        let cache = CacheFile::load_from_path(&path)?;

        if cache.version != CATALOG_VERSION {
            bail!(
                "Cache version mismatch: file v{} vs required v{}",
                cache.version,
                CATALOG_VERSION
            );
        }

        #[cfg(debug_assertions)]
        if PRINT_SERDE {
            log::info!(
                "Loaded {} pairs from local catalog cache",
                cache.payload.available_pairs.len()
            );
        }
        Ok(cache.payload)
    }
}
