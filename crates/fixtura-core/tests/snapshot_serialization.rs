use fixtura_core::{ColumnDescriptor, SchemaSnapshot, TableSnapshot};

#[test]
fn serializes_snapshot_deterministically() {
    let snapshot = SchemaSnapshot {
        schema_version: "0.1".to_string(),
        engine: None,
        tables: vec![TableSnapshot {
            name: "posts".to_string(),
            model: Some("Blog::Post".to_string()),
            primary_key: None,
            columns: vec![ColumnDescriptor::new("title", "string")],
        }],
    };

    let json = serde_json::to_string_pretty(&snapshot).expect("serialize snapshot");
    let expected = r#"{
  "schema_version": "0.1",
  "tables": [
    {
      "name": "posts",
      "model": "Blog::Post",
      "columns": [
        {
          "name": "title",
          "declared_type": "string"
        }
      ]
    }
  ]
}"#;
    assert_eq!(json, expected);
}

#[test]
fn accepts_data_type_alias_for_columns() {
    let json = r#"{
      "schema_version": "0.1",
      "engine": "postgres",
      "tables": [
        { "name": "authors", "columns": [ { "name": "email", "data_type": "text" } ] }
      ]
    }"#;

    let snapshot: SchemaSnapshot = serde_json::from_str(json).expect("parse snapshot");
    let table = snapshot.table("authors").expect("authors table");
    assert_eq!(table.columns, vec![ColumnDescriptor::new("email", "text")]);
    assert_eq!(snapshot.engine.as_deref(), Some("postgres"));
    assert!(snapshot.table("posts").is_none());
}
