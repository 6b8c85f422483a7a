use std::fmt;

/// Normalized column types understood by the default generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclaredType {
    String,
    Text,
    Integer,
    BigInt,
    SmallInt,
    Float,
    Decimal,
    Boolean,
    Date,
    DateTime,
    Time,
    Uuid,
    Json,
}

impl DeclaredType {
    pub const ALL: [DeclaredType; 13] = [
        DeclaredType::String,
        DeclaredType::Text,
        DeclaredType::Integer,
        DeclaredType::BigInt,
        DeclaredType::SmallInt,
        DeclaredType::Float,
        DeclaredType::Decimal,
        DeclaredType::Boolean,
        DeclaredType::Date,
        DeclaredType::DateTime,
        DeclaredType::Time,
        DeclaredType::Uuid,
        DeclaredType::Json,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DeclaredType::String => "string",
            DeclaredType::Text => "text",
            DeclaredType::Integer => "integer",
            DeclaredType::BigInt => "bigint",
            DeclaredType::SmallInt => "smallint",
            DeclaredType::Float => "float",
            DeclaredType::Decimal => "decimal",
            DeclaredType::Boolean => "boolean",
            DeclaredType::Date => "date",
            DeclaredType::DateTime => "datetime",
            DeclaredType::Time => "time",
            DeclaredType::Uuid => "uuid",
            DeclaredType::Json => "json",
        }
    }

    /// Map a raw database type name onto a normalized type.
    pub fn from_raw(raw: &str) -> Option<Self> {
        let lowered = raw.trim().to_lowercase();
        let base = match lowered.split_once('(') {
            Some((head, _)) => head.trim(),
            None => lowered.as_str(),
        };

        let declared = match base {
            "string" | "character varying" | "varchar" | "character" | "char" | "bpchar"
            | "citext" => DeclaredType::String,
            "text" | "mediumtext" | "longtext" => DeclaredType::Text,
            "integer" | "int" | "int4" | "serial" | "serial4" | "mediumint" => {
                DeclaredType::Integer
            }
            "bigint" | "int8" | "bigserial" | "serial8" => DeclaredType::BigInt,
            "smallint" | "int2" | "smallserial" | "serial2" | "tinyint" => DeclaredType::SmallInt,
            "float" | "double" | "real" | "float4" | "float8" | "double precision" => {
                DeclaredType::Float
            }
            "decimal" | "numeric" | "money" => DeclaredType::Decimal,
            "boolean" | "bool" => DeclaredType::Boolean,
            "date" => DeclaredType::Date,
            "datetime" | "timestamp" | "timestamptz" | "timestamp without time zone"
            | "timestamp with time zone" => DeclaredType::DateTime,
            "time" | "timetz" | "time without time zone" | "time with time zone" => {
                DeclaredType::Time
            }
            "uuid" => DeclaredType::Uuid,
            "json" | "jsonb" => DeclaredType::Json,
            _ => return None,
        };
        Some(declared)
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalize a raw database type name.
///
/// Known types collapse onto a [`DeclaredType`] name; anything else is
/// lowercased with its modifier stripped so custom generators can still be
/// registered for it.
pub fn normalize_type(raw: &str) -> String {
    if let Some(declared) = DeclaredType::from_raw(raw) {
        return declared.as_str().to_string();
    }

    raw.split('(')
        .next()
        .unwrap_or(raw)
        .trim()
        .to_lowercase()
}
