//! File persistence and serialization configuration

/// Directory path for storing the cached catalog payload
pub const CATALOG_PATH: &str = "catalog_data";

/// Base filename for catalog cache files (without extension)
pub const CATALOG_FILENAME_WITHOUT_EXT: &str = "catalog";

/// Current version of the catalog cache serialization format
pub const CATALOG_VERSION: f64 = 1.0;

/// Maximum age of a cached catalog before we go back to the API (seconds).
/// Plans and listings change rarely; one hour keeps restarts snappy without
/// letting a stale tier bound linger all day.
pub const CATALOG_ACCEPTABLE_AGE_SECONDS: i64 = 3_600;

/// Generate the versioned cache filename
/// Example: "catalog_v1.bin"
pub fn catalog_cache_filename() -> String {
    format!("{}_v{}.bin", CATALOG_FILENAME_WITHOUT_EXT, CATALOG_VERSION)
}
