use thiserror::Error;

/// Boxed error returned by external collaborators such as persistence gateways.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors emitted while building fixtures.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("model not found: {0}")]
    ModelNotFound(String),
    #[error("no generator found for column '{column}' of type '{declared_type}'")]
    NoGeneratorFound {
        column: String,
        declared_type: String,
    },
    #[error("relationship cycle: {}", chain.join(" -> "))]
    RelationshipCycle { chain: Vec<String> },
    #[error("model '{model}' has no primary key value after saving")]
    MissingPrimaryKey { model: String },
    #[error("model '{model}' has no attribute '{attribute}'")]
    UnknownAttribute { model: String, attribute: String },
    #[error("attribute '{attribute}' expects {expected}, got {found}")]
    AttributeType {
        attribute: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("model '{model}' is not a {expected}")]
    ModelMismatch {
        model: String,
        expected: &'static str,
    },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Catalog(#[from] fixtura_core::Error),
    #[error(transparent)]
    Persistence(BoxError),
}

/// Result type for fixture operations.
pub type Result<T> = std::result::Result<T, FixtureError>;
