use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::types::normalize_type;

/// Top-level schema snapshot consumed by the snapshot catalog.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SchemaSnapshot {
    /// Contract version for this snapshot format.
    pub schema_version: String,
    /// Database engine the snapshot was taken from (e.g. `postgres`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    /// Tables captured in the snapshot.
    pub tables: Vec<TableSnapshot>,
}

impl SchemaSnapshot {
    pub fn table(&self, name: &str) -> Option<&TableSnapshot> {
        self.tables.iter().find(|table| table.name == name)
    }
}

/// A table together with the model that is backed by it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TableSnapshot {
    pub name: String,
    /// Class name of the backing model. Defaults to the studly table name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Primary key column. Defaults to `id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<String>,
    pub columns: Vec<ColumnDescriptor>,
}

/// Column metadata as reported by a schema catalog.
///
/// `declared_type` is a normalized type name such as `string`, `integer` or
/// `datetime`; see [`normalize_type`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ColumnDescriptor {
    pub name: String,
    #[serde(alias = "data_type")]
    pub declared_type: String,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
        }
    }

    /// Build a descriptor from a raw database type, normalizing it.
    pub fn from_raw(name: impl Into<String>, raw_type: &str) -> Self {
        Self {
            name: name.into(),
            declared_type: normalize_type(raw_type),
        }
    }
}
