use fixtura_core::{ColumnDescriptor, normalize_type};

use super::queries::RawColumn;

pub fn map_columns(raw: Vec<RawColumn>) -> Vec<ColumnDescriptor> {
    raw.into_iter()
        .map(|col| {
            let declared_type = normalize_type(raw_type(&col));
            ColumnDescriptor::new(col.name, declared_type)
        })
        .collect()
}

// Enums, domains and extension types report `USER-DEFINED`; fall back to
// the underlying type name so custom generators can target it.
fn raw_type(col: &RawColumn) -> &str {
    match col.data_type.as_str() {
        "USER-DEFINED" | "ARRAY" => col.udt_name.as_str(),
        other => other,
    }
}
