use std::time::Duration;

/// Options that control how the Postgres catalog connects and looks up tables.
#[derive(Debug, Clone)]
pub struct CatalogOptions {
    /// Schema searched for tables.
    pub schema: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            schema: "public".to_string(),
            max_connections: 2,
            acquire_timeout: Duration::from_secs(10),
        }
    }
}
