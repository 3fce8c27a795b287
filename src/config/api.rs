//! Scanner-backend REST configuration constants and types.

/// Default values for the Rest Client
pub struct ClientDefaults {
    pub timeout_ms: u64,
    pub retries: u32,
    pub backoff_ms: u64,
}

/// The Master API Configuration Struct
pub struct ScannerApiConfig {
    /// Base URL of the scanner backend
    pub base_url: &'static str,
    /// Route returning the available-pairs payload for the current user
    pub available_pairs_route: &'static str,
    pub client: ClientDefaults,
}

pub const SCANNER_API: ScannerApiConfig = ScannerApiConfig {
    base_url: "http://127.0.0.1:5000/api",
    available_pairs_route: "/available-pairs",
    client: ClientDefaults {
        timeout_ms: 5000,
        retries: 5,
        backoff_ms: 5000,
    },
};
