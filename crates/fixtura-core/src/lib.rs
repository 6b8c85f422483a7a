//! Core contracts and helpers for Fixtura.
//!
//! This crate defines the column descriptors and schema snapshot contract
//! shared by catalogs and the fixture engine, plus the naming rules used to
//! turn model identifiers into canonical class names.

pub mod error;
pub mod naming;
pub mod schema;
pub mod types;
pub mod validation;

pub use error::{Error, Result};
pub use naming::{ClassName, NAMESPACE_SEPARATOR, studly};
pub use schema::{ColumnDescriptor, SchemaSnapshot, TableSnapshot};
pub use types::{DeclaredType, normalize_type};
pub use validation::validate_snapshot;

/// Current contract version for schema snapshot artifacts.
pub const SNAPSHOT_VERSION: &str = "0.1";
