//! Fixture engine for Fixtura.
//!
//! Builds placeholder model instances for tests from the columns of the
//! model's backing table: overrides first, then related fixtures for
//! foreign-key columns when saving, then generated stub values.

pub mod cache;
pub mod engine;
pub mod errors;
pub mod generators;
pub mod model;
pub mod options;
pub mod persistence;
pub mod relationship;

pub use cache::SchemaCache;
pub use engine::{FixtureBuilder, FixtureEngine};
pub use errors::{BoxError, FixtureError, Result};
pub use generators::{FixtureValue, Generator, GeneratorRegistry, Locale, SPECIAL_FIELDS};
pub use model::{Attributes, Model, ModelRegistry, ModelType, Record};
pub use options::{FixtureOptions, Mode};
pub use persistence::{InMemoryStore, PersistenceGateway, StoreError};
pub use relationship::RelationshipDetector;
