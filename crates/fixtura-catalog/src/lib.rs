//! Schema catalogs: where the fixture engine learns a table's columns.

pub mod catalog;
pub mod options;
pub mod postgres;
pub mod snapshot;

pub use catalog::SchemaCatalog;
pub use options::CatalogOptions;
pub use postgres::PostgresCatalog;
pub use snapshot::SnapshotCatalog;

pub use fixtura_core::ColumnDescriptor;
