use std::any::Any;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use fixtura_core::{ClassName, SchemaSnapshot, studly};

use crate::errors::{FixtureError, Result};
use crate::generators::FixtureValue;

/// Attribute name to value mapping, used for overrides and flattened fixtures.
pub type Attributes = BTreeMap<String, FixtureValue>;

/// Primary key column assumed when a model type does not name one.
pub const DEFAULT_PRIMARY_KEY: &str = "id";

/// Type-erasure helpers every [`Model`] gets for free.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// Adapter a model implements so the engine can populate it.
///
/// `assign` is the explicit column-to-field setter; typed models match on the
/// attribute name and convert the value, dynamic models store it as is.
pub trait Model: AsAny + fmt::Debug {
    fn assign(&mut self, attribute: &str, value: FixtureValue) -> Result<()>;

    fn attribute(&self, attribute: &str) -> Option<FixtureValue>;

    fn attributes(&self) -> Attributes;
}

/// Downcast a built fixture back to its concrete type.
pub fn downcast<M: Model>(instance: Box<dyn Model>, class_name: &str) -> Result<M> {
    instance
        .into_any()
        .downcast::<M>()
        .map(|model| *model)
        .map_err(|_| FixtureError::ModelMismatch {
            model: class_name.to_string(),
            expected: std::any::type_name::<M>(),
        })
}

/// Dynamic model storing whatever attributes it is given.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    class_name: String,
    attributes: Attributes,
}

impl Record {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            attributes: Attributes::new(),
        }
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn get(&self, attribute: &str) -> Option<&FixtureValue> {
        self.attributes.get(attribute)
    }
}

impl Model for Record {
    fn assign(&mut self, attribute: &str, value: FixtureValue) -> Result<()> {
        self.attributes.insert(attribute.to_string(), value);
        Ok(())
    }

    fn attribute(&self, attribute: &str) -> Option<FixtureValue> {
        self.attributes.get(attribute).cloned()
    }

    fn attributes(&self) -> Attributes {
        self.attributes.clone()
    }
}

type Constructor = dyn Fn() -> Box<dyn Model> + Send + Sync;

/// A loadable model: its canonical class name, backing table and constructor.
#[derive(Clone)]
pub struct ModelType {
    class_name: String,
    table: String,
    primary_key: String,
    constructor: Arc<Constructor>,
}

impl ModelType {
    /// Model type for a typed model built through `Default`.
    pub fn of<M: Model + Default>(class_name: &str, table: impl Into<String>) -> Self {
        Self::with_constructor(class_name, table, || Box::new(M::default()))
    }

    /// Model type backed by a dynamic [`Record`].
    pub fn record(class_name: &str, table: impl Into<String>) -> Self {
        let record_name = canonical_name(class_name);
        Self::with_constructor(class_name, table, move || {
            Box::new(Record::new(record_name.clone()))
        })
    }

    pub fn with_constructor<F>(class_name: &str, table: impl Into<String>, constructor: F) -> Self
    where
        F: Fn() -> Box<dyn Model> + Send + Sync + 'static,
    {
        Self {
            class_name: canonical_name(class_name),
            table: table.into(),
            primary_key: DEFAULT_PRIMARY_KEY.to_string(),
            constructor: Arc::new(constructor),
        }
    }

    pub fn with_primary_key(mut self, primary_key: impl Into<String>) -> Self {
        self.primary_key = primary_key.into();
        self
    }

    pub fn new_instance(&self) -> Box<dyn Model> {
        (self.constructor)()
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn primary_key(&self) -> &str {
        &self.primary_key
    }
}

impl fmt::Debug for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelType")
            .field("class_name", &self.class_name)
            .field("table", &self.table)
            .field("primary_key", &self.primary_key)
            .finish_non_exhaustive()
    }
}

/// Registry resolving class names to model types, ignoring case.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    models: HashMap<String, ModelType>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one dynamic [`Record`] model per snapshot table.
    ///
    /// The class name is the table's `model` entry, or the studly table name.
    pub fn from_snapshot(snapshot: &SchemaSnapshot) -> Self {
        let mut registry = Self::new();
        for table in &snapshot.tables {
            let class_name = table.model.clone().unwrap_or_else(|| studly(&table.name));
            let mut model = ModelType::record(&class_name, table.name.clone());
            if let Some(primary_key) = &table.primary_key {
                model = model.with_primary_key(primary_key.clone());
            }
            registry.register(model);
        }
        registry
    }

    pub fn register(&mut self, model: ModelType) -> &mut Self {
        self.models.insert(model.class_name.to_lowercase(), model);
        self
    }

    pub fn contains(&self, class_name: &ClassName) -> bool {
        self.models.contains_key(&class_name.lookup_key())
    }

    pub fn get(&self, class_name: &ClassName) -> Option<&ModelType> {
        self.models.get(&class_name.lookup_key())
    }

    pub fn resolve(&self, class_name: &ClassName) -> Result<&ModelType> {
        self.get(class_name)
            .ok_or_else(|| FixtureError::ModelNotFound(class_name.canonical()))
    }

    /// Registered class names, sorted.
    pub fn class_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.models.values().map(ModelType::class_name).collect();
        names.sort_unstable();
        names
    }
}

fn canonical_name(class_name: &str) -> String {
    ClassName::parse(class_name)
        .map(|class| class.canonical())
        .unwrap_or_else(|| class_name.to_string())
}
