use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use fixtura_catalog::SchemaCatalog;
use fixtura_core::{ColumnDescriptor, Result};
use tracing::debug;

/// Memoizes column metadata per table for the lifetime of the cache.
///
/// The first request for a table goes to the catalog; later requests return
/// the stored columns. Nothing is invalidated until [`SchemaCache::reset`].
pub struct SchemaCache {
    catalog: Box<dyn SchemaCatalog>,
    tables: HashMap<String, Arc<[ColumnDescriptor]>>,
    lookups: u64,
}

impl SchemaCache {
    pub fn new(catalog: impl SchemaCatalog + 'static) -> Self {
        Self {
            catalog: Box::new(catalog),
            tables: HashMap::new(),
            lookups: 0,
        }
    }

    pub fn columns_for(&mut self, table: &str) -> Result<Arc<[ColumnDescriptor]>> {
        if let Some(columns) = self.tables.get(table) {
            return Ok(Arc::clone(columns));
        }

        self.lookups += 1;
        let columns: Arc<[ColumnDescriptor]> = self.catalog.columns(table)?.into();
        debug!(
            engine = self.catalog.engine(),
            table,
            columns = columns.len(),
            "schema cache miss"
        );
        self.tables.insert(table.to_string(), Arc::clone(&columns));
        Ok(columns)
    }

    /// Drop every cached table so the next request goes back to the catalog.
    pub fn reset(&mut self) {
        self.tables.clear();
    }

    pub fn is_cached(&self, table: &str) -> bool {
        self.tables.contains_key(table)
    }

    /// Number of catalog lookups issued so far.
    pub fn lookups(&self) -> u64 {
        self.lookups
    }
}

impl fmt::Debug for SchemaCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaCache")
            .field("engine", &self.catalog.engine())
            .field("tables", &self.tables.keys().collect::<Vec<_>>())
            .field("lookups", &self.lookups)
            .finish()
    }
}
