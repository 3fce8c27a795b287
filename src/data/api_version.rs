use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use async_trait::async_trait;

use crate::config::SCANNER_API;
#[cfg(debug_assertions)]
use crate::config::debug::PRINT_FETCH_RETRIES;

use super::{CatalogPayload, FetchCatalogData};

/// Catalog source backed by the scanner backend's REST API.
pub struct ApiVersion;

impl ApiVersion {
    fn endpoint() -> String {
        format!(
            "{}{}",
            SCANNER_API.base_url, SCANNER_API.available_pairs_route
        )
    }

    async fn fetch_once(client: &reqwest::Client, url: &str) -> Result<CatalogPayload> {
        let response = client
            .get(url)
            .send()
            .await
            .context("Request to the scanner backend failed")?;

        if !response.status().is_success() {
            bail!("Backend returned HTTP {}", response.status());
        }

        let payload = response
            .json::<CatalogPayload>()
            .await
            .context("Failed to decode the available-pairs payload")?;
        Ok(payload)
    }
}

#[async_trait]
impl FetchCatalogData for ApiVersion {
    fn signature(&self) -> &'static str {
        "Scanner REST API"
    }

    async fn fetch_catalog_data(&self) -> Result<CatalogPayload> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(SCANNER_API.client.timeout_ms))
            .build()
            .context("Failed to build the HTTP client")?;
        let url = Self::endpoint();

        let mut last_error = None;
        for attempt in 0..=SCANNER_API.client.retries {
            if attempt > 0 {
                tokio::time::sleep(Duration::from_millis(SCANNER_API.client.backoff_ms)).await;
            }

            match Self::fetch_once(&client, &url).await {
                Ok(payload) => return Ok(payload),
                Err(e) => {
                    #[cfg(debug_assertions)]
                    if PRINT_FETCH_RETRIES {
                        log::info!(
                            "Catalog fetch attempt {}/{} failed: {:#}",
                            attempt + 1,
                            SCANNER_API.client.retries + 1,
                            e
                        );
                    }
                    last_error = Some(e);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| anyhow!("Catalog fetch failed before the first attempt"))
            .context(format!("Giving up on {} after retries", url)))
    }
}
