use std::collections::BTreeMap;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rand::RngCore;
use serde::{Serialize, Serializer};
use serde_json::Value;

use fixtura_core::ColumnDescriptor;

use crate::errors::{FixtureError, Result};

mod locale;
pub mod primitives;
pub mod semantic;

pub use locale::Locale;

use semantic::SemanticField;

/// Column names that always get a semantically shaped value, whatever their
/// declared storage type. Matching is exact.
pub const SPECIAL_FIELDS: [&str; SemanticField::ALL.len()] = special_fields();

const fn special_fields() -> [&'static str; SemanticField::ALL.len()] {
    let mut fields = [""; SemanticField::ALL.len()];
    let mut index = 0;
    while index < fields.len() {
        fields[index] = SemanticField::ALL[index].column();
        index += 1;
    }
    fields
}

/// Value assigned to a model attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum FixtureValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Uuid(String),
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(NaiveDateTime),
    Json(Value),
}

impl FixtureValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FixtureValue::Null)
    }

    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            FixtureValue::Null => "null",
            FixtureValue::Bool(_) => "bool",
            FixtureValue::Int(_) => "int",
            FixtureValue::Float(_) => "float",
            FixtureValue::Text(_) => "text",
            FixtureValue::Uuid(_) => "uuid",
            FixtureValue::Date(_) => "date",
            FixtureValue::Time(_) => "time",
            FixtureValue::Timestamp(_) => "timestamp",
            FixtureValue::Json(_) => "json",
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FixtureValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FixtureValue::Int(value) => Some(*value as f64),
            FixtureValue::Float(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FixtureValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FixtureValue::Text(value) | FixtureValue::Uuid(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn require_int(&self, attribute: &str) -> Result<i64> {
        self.as_i64()
            .ok_or_else(|| self.type_error(attribute, "int"))
    }

    pub fn require_float(&self, attribute: &str) -> Result<f64> {
        self.as_f64()
            .ok_or_else(|| self.type_error(attribute, "float"))
    }

    pub fn require_bool(&self, attribute: &str) -> Result<bool> {
        self.as_bool()
            .ok_or_else(|| self.type_error(attribute, "bool"))
    }

    pub fn require_text(&self, attribute: &str) -> Result<String> {
        self.as_str()
            .map(str::to_string)
            .ok_or_else(|| self.type_error(attribute, "text"))
    }

    fn type_error(&self, attribute: &str, expected: &'static str) -> FixtureError {
        FixtureError::AttributeType {
            attribute: attribute.to_string(),
            expected,
            found: self.kind(),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            FixtureValue::Null => Value::Null,
            FixtureValue::Bool(value) => Value::Bool(*value),
            FixtureValue::Int(value) => Value::from(*value),
            FixtureValue::Float(value) => serde_json::Number::from_f64(*value)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            FixtureValue::Text(value) | FixtureValue::Uuid(value) => Value::String(value.clone()),
            FixtureValue::Date(value) => Value::String(value.format("%Y-%m-%d").to_string()),
            FixtureValue::Time(value) => Value::String(value.format("%H:%M:%S").to_string()),
            FixtureValue::Timestamp(value) => {
                Value::String(value.format("%Y-%m-%dT%H:%M:%S").to_string())
            }
            FixtureValue::Json(value) => value.clone(),
        }
    }

    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => FixtureValue::Null,
            Value::Bool(value) => FixtureValue::Bool(value),
            Value::Number(number) => match number.as_i64() {
                Some(value) => FixtureValue::Int(value),
                None => number
                    .as_f64()
                    .map(FixtureValue::Float)
                    .unwrap_or(FixtureValue::Null),
            },
            Value::String(value) => FixtureValue::Text(value),
            other => FixtureValue::Json(other),
        }
    }
}

impl Serialize for FixtureValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl fmt::Display for FixtureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FixtureValue::Text(value) | FixtureValue::Uuid(value) => f.write_str(value),
            other => write!(f, "{}", other.to_json()),
        }
    }
}

impl From<&str> for FixtureValue {
    fn from(value: &str) -> Self {
        FixtureValue::Text(value.to_string())
    }
}

impl From<String> for FixtureValue {
    fn from(value: String) -> Self {
        FixtureValue::Text(value)
    }
}

impl From<i64> for FixtureValue {
    fn from(value: i64) -> Self {
        FixtureValue::Int(value)
    }
}

impl From<i32> for FixtureValue {
    fn from(value: i32) -> Self {
        FixtureValue::Int(i64::from(value))
    }
}

impl From<f64> for FixtureValue {
    fn from(value: f64) -> Self {
        FixtureValue::Float(value)
    }
}

impl From<bool> for FixtureValue {
    fn from(value: bool) -> Self {
        FixtureValue::Bool(value)
    }
}

impl From<NaiveDate> for FixtureValue {
    fn from(value: NaiveDate) -> Self {
        FixtureValue::Date(value)
    }
}

impl From<NaiveDateTime> for FixtureValue {
    fn from(value: NaiveDateTime) -> Self {
        FixtureValue::Timestamp(value)
    }
}

impl From<Value> for FixtureValue {
    fn from(value: Value) -> Self {
        FixtureValue::from_json(value)
    }
}

impl<T: Into<FixtureValue>> From<Option<T>> for FixtureValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FixtureValue::Null)
    }
}

/// Draw a value from a `fake` faker using a type-erased rng.
pub(crate) fn fake_with<U, F>(faker: F, rng: &mut dyn RngCore) -> U
where
    F: fake::Fake,
    U: fake::Dummy<F>,
{
    let mut rng = rng;
    faker.fake_with_rng(&mut rng)
}

/// Inputs available to a generator for a single column.
#[derive(Debug, Clone, Copy)]
pub struct GeneratorContext<'a> {
    pub column: &'a ColumnDescriptor,
    pub base_date: NaiveDate,
    pub locale: Locale,
}

/// A strategy producing a plausible value for a column.
pub trait Generator: Send + Sync {
    fn id(&self) -> &str;

    fn generate(
        &self,
        ctx: &GeneratorContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<FixtureValue>;
}

type GenerateFn = dyn Fn(&mut dyn RngCore) -> FixtureValue + Send + Sync;

/// Generator backed by a closure, for ad-hoc registrations.
pub struct FnGenerator {
    id: String,
    generate: Box<GenerateFn>,
}

impl FnGenerator {
    pub fn new<F>(id: impl Into<String>, generate: F) -> Self
    where
        F: Fn(&mut dyn RngCore) -> FixtureValue + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            generate: Box::new(generate),
        }
    }
}

impl Generator for FnGenerator {
    fn id(&self) -> &str {
        &self.id
    }

    fn generate(
        &self,
        _ctx: &GeneratorContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<FixtureValue> {
        Ok((self.generate)(rng))
    }
}

/// Which strategy table a generator is registered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Slot {
    Field,
    Type,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Field => f.write_str("field"),
            Slot::Type => f.write_str("type"),
        }
    }
}

/// A registered generator, as listed by [`GeneratorRegistry::entries`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorEntry {
    pub slot: Slot,
    pub key: String,
    pub id: String,
}

/// Two strategy tables: generators keyed by exact column name, tried first,
/// then generators keyed by normalized declared type.
#[derive(Default)]
pub struct GeneratorRegistry {
    fields: BTreeMap<String, Box<dyn Generator>>,
    types: BTreeMap<String, Box<dyn Generator>>,
}

impl GeneratorRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the semantic field generators and one generator per
    /// [`fixtura_core::DeclaredType`].
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        semantic::register(&mut registry);
        primitives::register(&mut registry);
        registry
    }

    pub fn register_field(
        &mut self,
        field: impl Into<String>,
        generator: impl Generator + 'static,
    ) {
        self.fields.insert(field.into(), Box::new(generator));
    }

    pub fn register_type(
        &mut self,
        declared_type: impl Into<String>,
        generator: impl Generator + 'static,
    ) {
        self.types.insert(declared_type.into(), Box::new(generator));
    }

    /// Register a closure under a column name or a declared type.
    pub fn register_fn<F>(
        &mut self,
        slot: Slot,
        key: impl Into<String>,
        id: impl Into<String>,
        generate: F,
    ) where
        F: Fn(&mut dyn RngCore) -> FixtureValue + Send + Sync + 'static,
    {
        let generator = FnGenerator::new(id, generate);
        match slot {
            Slot::Field => self.register_field(key, generator),
            Slot::Type => self.register_type(key, generator),
        }
    }

    pub fn generator_for(&self, column: &str, declared_type: &str) -> Option<&dyn Generator> {
        self.fields
            .get(column)
            .or_else(|| self.types.get(declared_type))
            .map(|generator| generator.as_ref())
    }

    /// Produce a stub value for the column in `ctx`.
    pub fn resolve(
        &self,
        ctx: &GeneratorContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<FixtureValue> {
        let column = ctx.column;
        let generator = self
            .generator_for(&column.name, &column.declared_type)
            .ok_or_else(|| FixtureError::NoGeneratorFound {
                column: column.name.clone(),
                declared_type: column.declared_type.clone(),
            })?;
        generator.generate(ctx, rng)
    }

    pub fn entries(&self) -> Vec<GeneratorEntry> {
        let fields = self.fields.iter().map(|(key, generator)| (Slot::Field, key, generator));
        let types = self.types.iter().map(|(key, generator)| (Slot::Type, key, generator));
        fields
            .chain(types)
            .map(|(slot, key, generator)| GeneratorEntry {
                slot,
                key: key.clone(),
                id: generator.id().to_string(),
            })
            .collect()
    }

    /// Ids of every registered generator, sorted and deduplicated.
    pub fn generator_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.entries().into_iter().map(|entry| entry.id).collect();
        ids.sort();
        ids.dedup();
        ids
    }
}

impl fmt::Debug for GeneratorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorRegistry")
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .field("types", &self.types.keys().collect::<Vec<_>>())
            .finish()
    }
}
