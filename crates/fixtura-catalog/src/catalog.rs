use std::sync::Arc;

use fixtura_core::{ColumnDescriptor, Result};

/// Trait implemented by catalogs that can report the columns of a table.
///
/// Lookups are blocking. Implementations fail with
/// [`fixtura_core::Error::UnknownTable`] when the table does not exist.
pub trait SchemaCatalog {
    /// Returns the engine identifier (e.g. `postgres`).
    fn engine(&self) -> &'static str;

    /// Columns of `table` in schema order, with normalized declared types.
    fn columns(&self, table: &str) -> Result<Vec<ColumnDescriptor>>;
}

impl<T: SchemaCatalog + ?Sized> SchemaCatalog for Arc<T> {
    fn engine(&self) -> &'static str {
        (**self).engine()
    }

    fn columns(&self, table: &str) -> Result<Vec<ColumnDescriptor>> {
        (**self).columns(table)
    }
}

impl<T: SchemaCatalog + ?Sized> SchemaCatalog for Box<T> {
    fn engine(&self) -> &'static str {
        (**self).engine()
    }

    fn columns(&self, table: &str) -> Result<Vec<ColumnDescriptor>> {
        (**self).columns(table)
    }
}
