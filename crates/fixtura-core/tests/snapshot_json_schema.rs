use fixtura_core::SchemaSnapshot;
use schemars::schema_for;

#[test]
fn json_schema_describes_snapshot_contract() {
    let generated = schema_for!(SchemaSnapshot);
    let json = serde_json::to_value(&generated).expect("serialize generated schema");

    let required = json["required"].as_array().expect("required list");
    assert!(required.iter().any(|field| field == "schema_version"));
    assert!(required.iter().any(|field| field == "tables"));
    assert!(!required.iter().any(|field| field == "engine"));

    let definitions = json["definitions"].as_object().expect("definitions");
    assert!(definitions.contains_key("TableSnapshot"));
    assert!(definitions.contains_key("ColumnDescriptor"));
}
