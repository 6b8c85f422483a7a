use fixtura_core::{ColumnDescriptor, Error, SchemaSnapshot, TableSnapshot, validate_snapshot};

fn table(name: &str, columns: &[&str]) -> TableSnapshot {
    TableSnapshot {
        name: name.to_string(),
        model: None,
        primary_key: None,
        columns: columns
            .iter()
            .map(|column| ColumnDescriptor::new(*column, "string"))
            .collect(),
    }
}

fn snapshot(tables: Vec<TableSnapshot>) -> SchemaSnapshot {
    SchemaSnapshot {
        schema_version: fixtura_core::SNAPSHOT_VERSION.to_string(),
        engine: None,
        tables,
    }
}

#[test]
fn accepts_consistent_snapshot() {
    let snapshot = snapshot(vec![table("posts", &["id", "title"]), table("authors", &["id"])]);
    assert!(validate_snapshot(&snapshot).is_ok());
}

#[test]
fn rejects_duplicate_tables() {
    let snapshot = snapshot(vec![table("posts", &["id"]), table("posts", &["id"])]);
    let result = validate_snapshot(&snapshot);
    assert!(matches!(result, Err(Error::InvalidSchema(message)) if message.contains("posts")));
}

#[test]
fn rejects_duplicate_columns() {
    let snapshot = snapshot(vec![table("posts", &["title", "title"])]);
    assert!(matches!(
        validate_snapshot(&snapshot),
        Err(Error::InvalidSchema(_))
    ));
}

#[test]
fn rejects_missing_primary_key_column() {
    let mut posts = table("posts", &["title"]);
    posts.primary_key = Some("uuid".to_string());
    let result = validate_snapshot(&snapshot(vec![posts]));
    assert!(matches!(result, Err(Error::InvalidSchema(message)) if message.contains("posts.uuid")));
}
