use fixtura_core::{ColumnDescriptor, Error, Result};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tokio::runtime::Runtime;
use tracing::debug;

use crate::catalog::SchemaCatalog;
use crate::options::CatalogOptions;

mod mapper;
mod queries;

/// Catalog reading column metadata from a live PostgreSQL database.
///
/// The catalog owns a current-thread runtime so that lookups stay blocking
/// calls; it must not be used from inside another async runtime.
#[derive(Debug)]
pub struct PostgresCatalog {
    pool: PgPool,
    runtime: Runtime,
    opts: CatalogOptions,
}

impl PostgresCatalog {
    /// Connect with default options.
    pub fn connect(url: &str) -> Result<Self> {
        Self::connect_with_options(url, CatalogOptions::default())
    }

    /// Connect with caller-provided options.
    pub fn connect_with_options(url: &str, opts: CatalogOptions) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|err| Error::Db(format!("failed to start runtime: {err}")))?;

        let pool = runtime
            .block_on(
                PgPoolOptions::new()
                    .max_connections(opts.max_connections)
                    .acquire_timeout(opts.acquire_timeout)
                    .connect(url),
            )
            .map_err(|err| Error::Db(err.to_string()))?;

        Ok(Self {
            pool,
            runtime,
            opts,
        })
    }

    pub fn schema(&self) -> &str {
        &self.opts.schema
    }
}

impl SchemaCatalog for PostgresCatalog {
    fn engine(&self) -> &'static str {
        "postgres"
    }

    fn columns(&self, table: &str) -> Result<Vec<ColumnDescriptor>> {
        let raw = self
            .runtime
            .block_on(queries::list_columns(&self.pool, &self.opts.schema, table))?;
        if raw.is_empty() {
            return Err(Error::UnknownTable(format!("{}.{}", self.opts.schema, table)));
        }

        debug!(schema = %self.opts.schema, table, columns = raw.len(), "columns fetched");
        Ok(mapper::map_columns(raw))
    }
}
