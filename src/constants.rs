//! Catalog Constants
//!
//! Centralized API paths and defaults shared by the query builder and config.

/// Listing resource, relative to the API base URL
pub const PRODUCTS_RESOURCE: &str = "products";

/// Count resource, relative to the API base URL
pub const PRODUCTS_COUNT_RESOURCE: &str = "products/count";

/// Category the filtered listing and count queries are pinned to ("library")
pub const DEFAULT_LIBRARY_CATEGORY: &str = "서재";

/// Sort applied by the binary's initial listing
pub const DEFAULT_SORT_FIELD: &str = "createdAt";
pub const DEFAULT_SORT_ORDER: &str = "desc";

/// Default API base URL
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/";

/// Default log filter directive
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Config file name inside the platform config directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variable holding an explicit config path
pub const CONFIG_PATH_ENV: &str = "LIBRARY_CATALOG_CONFIG";

/// Rolling log file prefix
pub const LOG_FILE_PREFIX: &str = "library-catalog.log";

/// Pending change notifications kept for a slow consumer
pub const EVENT_CHANNEL_CAPACITY: usize = 256;
