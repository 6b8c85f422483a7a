use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::schema::SchemaSnapshot;

/// Validate internal consistency of a schema snapshot.
///
/// This checks:
/// - empty or duplicate table names
/// - empty or duplicate column names
/// - declared primary keys exist among the table columns
pub fn validate_snapshot(snapshot: &SchemaSnapshot) -> Result<()> {
    let mut tables = BTreeSet::new();

    for table in &snapshot.tables {
        if table.name.trim().is_empty() {
            return Err(Error::InvalidSchema("table name must not be empty".to_string()));
        }
        if !tables.insert(table.name.as_str()) {
            return Err(Error::InvalidSchema(format!(
                "duplicate table name: {}",
                table.name
            )));
        }

        let mut columns = BTreeSet::new();
        for column in &table.columns {
            if column.name.trim().is_empty() {
                return Err(Error::InvalidSchema(format!(
                    "empty column name in table: {}",
                    table.name
                )));
            }
            if !columns.insert(column.name.as_str()) {
                return Err(Error::InvalidSchema(format!(
                    "duplicate column name: {}.{}",
                    table.name, column.name
                )));
            }
        }

        if let Some(primary_key) = &table.primary_key
            && !columns.contains(primary_key.as_str())
        {
            return Err(Error::InvalidSchema(format!(
                "primary key column not found: {}.{}",
                table.name, primary_key
            )));
        }
    }

    Ok(())
}
