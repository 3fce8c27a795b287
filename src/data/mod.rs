// Catalog loading and caching
pub mod api_version;
pub mod bootstrap;
pub mod cache_file;
pub mod cache_version;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use bootstrap::fetch_catalog_data;
pub use cache_version::write_catalog_data_async;

/// Wire payload the scanner backend returns for the current user.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CatalogPayload {
    /// Selectable pairs in the backend's listing order
    pub available_pairs: Vec<String>,
    pub user_tier: String,
    /// None (null on the wire) means the plan has no pair ceiling
    pub max_pairs: Option<usize>,
}

#[async_trait]
pub trait FetchCatalogData {
    // Either produce a payload OR return an anyhow::Error
    async fn fetch_catalog_data(&self) -> Result<CatalogPayload>;

    /// A unique identifier for this implementation (so that afterwards we know which one we used).
    fn signature(&self) -> &'static str;
}

pub async fn get_catalog_data_async(
    implementations: &[Box<dyn FetchCatalogData>],
) -> Result<(CatalogPayload, &'static str)> {
    for imp in implementations {
        match imp.fetch_catalog_data().await {
            Ok(payload) => {
                let signature = imp.signature();
                return Ok((payload, signature));
            }
            Err(e) => {
                log::info!("Catalog source {} unavailable: {}", imp.signature(), e);
                // Fall through to the next source
            }
        }
    }
    Err(anyhow!("All catalog sources failed"))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubSource {
        payload: Option<CatalogPayload>,
        name: &'static str,
    }

    #[async_trait]
    impl FetchCatalogData for StubSource {
        async fn fetch_catalog_data(&self) -> Result<CatalogPayload> {
            self.payload
                .clone()
                .ok_or_else(|| anyhow!("{} is down", self.name))
        }

        fn signature(&self) -> &'static str {
            self.name
        }
    }

    fn sample_payload() -> CatalogPayload {
        CatalogPayload {
            available_pairs: vec!["BTCUSDT".to_string(), "ETHUSDT".to_string()],
            user_tier: "plus".to_string(),
            max_pairs: Some(25),
        }
    }

    #[tokio::test]
    async fn falls_through_to_the_next_source() {
        let sources: Vec<Box<dyn FetchCatalogData>> = vec![
            Box::new(StubSource {
                payload: None,
                name: "primary",
            }),
            Box::new(StubSource {
                payload: Some(sample_payload()),
                name: "secondary",
            }),
        ];

        let (payload, signature) = get_catalog_data_async(&sources)
            .await
            .expect("second source should win");
        assert_eq!(signature, "secondary");
        assert_eq!(payload.available_pairs.len(), 2);
    }

    #[tokio::test]
    async fn errors_when_every_source_fails() {
        let sources: Vec<Box<dyn FetchCatalogData>> = vec![
            Box::new(StubSource {
                payload: None,
                name: "primary",
            }),
            Box::new(StubSource {
                payload: None,
                name: "secondary",
            }),
        ];

        assert!(get_catalog_data_async(&sources).await.is_err());
    }

    #[test]
    fn null_max_pairs_decodes_as_unbounded() {
        let raw = r#"{"available_pairs":["BTCUSDT"],"user_tier":"pro","max_pairs":null}"#;
        let payload: CatalogPayload = serde_json::from_str(raw).expect("payload should decode");
        assert_eq!(payload.max_pairs, None);
        assert_eq!(payload.user_tier, "pro");
    }

    #[test]
    fn bounded_payload_round_trips_through_json() {
        let payload = sample_payload();
        let encoded = serde_json::to_string(&payload).expect("encode");
        let decoded: CatalogPayload = serde_json::from_str(&encoded).expect("decode");
        assert_eq!(decoded, payload);
    }
}
