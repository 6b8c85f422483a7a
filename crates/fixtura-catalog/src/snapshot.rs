use std::collections::HashMap;
use std::path::Path;

use fixtura_core::{
    ColumnDescriptor, Error, Result, SchemaSnapshot, normalize_type, validate_snapshot,
};
use tracing::debug;

use crate::catalog::SchemaCatalog;

/// Catalog backed by a schema snapshot held in memory.
///
/// Declared types are normalized when the snapshot is loaded, so raw names
/// such as `character varying(255)` are reported as `string`.
#[derive(Debug, Clone)]
pub struct SnapshotCatalog {
    snapshot: SchemaSnapshot,
    tables: HashMap<String, Vec<ColumnDescriptor>>,
}

impl SnapshotCatalog {
    pub fn new(snapshot: SchemaSnapshot) -> Result<Self> {
        validate_snapshot(&snapshot)?;

        let tables = snapshot
            .tables
            .iter()
            .map(|table| {
                let columns = table
                    .columns
                    .iter()
                    .map(|column| {
                        ColumnDescriptor::new(
                            column.name.clone(),
                            normalize_type(&column.declared_type),
                        )
                    })
                    .collect();
                (table.name.clone(), columns)
            })
            .collect();

        Ok(Self { snapshot, tables })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: SchemaSnapshot = serde_json::from_str(json)
            .map_err(|err| Error::InvalidSchema(format!("snapshot json: {err}")))?;
        Self::new(snapshot)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|err| Error::Other(format!("reading {}: {err}", path.display())))?;
        debug!(path = %path.display(), "loading schema snapshot");
        Self::from_json(&content)
    }

    pub fn snapshot(&self) -> &SchemaSnapshot {
        &self.snapshot
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.snapshot.tables.iter().map(|table| table.name.as_str())
    }
}

impl SchemaCatalog for SnapshotCatalog {
    fn engine(&self) -> &'static str {
        "snapshot"
    }

    fn columns(&self, table: &str) -> Result<Vec<ColumnDescriptor>> {
        self.tables
            .get(table)
            .cloned()
            .ok_or_else(|| Error::UnknownTable(table.to_string()))
    }
}
