use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use thiserror::Error;
use tracing::debug;

use crate::errors::BoxError;
use crate::generators::FixtureValue;
use crate::model::{Attributes, Model, ModelType};

/// Saves fully populated fixtures. Invoked only when creating.
pub trait PersistenceGateway {
    /// Persist `instance`, assigning its primary key when storage generates one.
    fn save(&self, model: &ModelType, instance: &mut dyn Model) -> Result<(), BoxError>;
}

impl<T: PersistenceGateway + ?Sized> PersistenceGateway for Arc<T> {
    fn save(&self, model: &ModelType, instance: &mut dyn Model) -> Result<(), BoxError> {
        (**self).save(model, instance)
    }
}

/// Errors raised by [`InMemoryStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate primary key {key} in table {table}")]
    DuplicateKey { table: String, key: String },
    #[error("store lock poisoned")]
    Poisoned,
}

#[derive(Debug, Default)]
struct StoreState {
    rows: BTreeMap<String, Vec<Attributes>>,
    sequences: BTreeMap<String, i64>,
}

/// Persistence gateway keeping saved rows in memory.
///
/// Integer primary keys left unset are filled from a per-table sequence
/// starting at 1. Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows saved into `table`, in insertion order.
    pub fn rows(&self, table: &str) -> Vec<Attributes> {
        self.lock()
            .map(|state| state.rows.get(table).cloned().unwrap_or_default())
            .unwrap_or_default()
    }

    pub fn count(&self, table: &str) -> usize {
        self.lock()
            .map(|state| state.rows.get(table).map_or(0, Vec::len))
            .unwrap_or(0)
    }

    /// Number of rows saved across all tables.
    pub fn total(&self) -> usize {
        self.lock()
            .map(|state| state.rows.values().map(Vec::len).sum())
            .unwrap_or(0)
    }

    /// Every saved row grouped by table.
    pub fn snapshot(&self) -> BTreeMap<String, Vec<Attributes>> {
        self.lock()
            .map(|state| state.rows.clone())
            .unwrap_or_default()
    }

    pub fn clear(&self) {
        if let Ok(mut state) = self.lock() {
            state.rows.clear();
            state.sequences.clear();
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreState>, StoreError> {
        self.state.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl PersistenceGateway for InMemoryStore {
    fn save(&self, model: &ModelType, instance: &mut dyn Model) -> Result<(), BoxError> {
        let mut state = self.lock()?;
        let table = model.table().to_string();
        let primary_key = model.primary_key();

        let key = match instance.attribute(primary_key) {
            Some(FixtureValue::Int(value)) => {
                let sequence = state.sequences.entry(table.clone()).or_insert(0);
                *sequence = (*sequence).max(value);
                FixtureValue::Int(value)
            }
            Some(value) if !value.is_null() => value,
            _ => {
                let sequence = state.sequences.entry(table.clone()).or_insert(0);
                *sequence += 1;
                let value = FixtureValue::Int(*sequence);
                instance.assign(primary_key, value.clone())?;
                value
            }
        };

        let rows = state.rows.entry(table.clone()).or_default();
        if rows.iter().any(|row| row.get(primary_key) == Some(&key)) {
            return Err(Box::new(StoreError::DuplicateKey {
                table,
                key: key.to_string(),
            }));
        }

        debug!(table = %table, key = %key, "row saved");
        rows.push(instance.attributes());
        Ok(())
    }
}
