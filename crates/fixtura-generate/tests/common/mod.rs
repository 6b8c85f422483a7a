#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use chrono::NaiveDateTime;

use fixtura_catalog::{SchemaCatalog, SnapshotCatalog};
use fixtura_core::{ColumnDescriptor, Result as CoreResult};
use fixtura_generate::{
    Attributes, FixtureEngine, FixtureError, FixtureOptions, FixtureValue, InMemoryStore, Model,
    ModelRegistry, ModelType, Result,
};

pub const BLOG_SNAPSHOT: &str = r#"{
  "schema_version": "0.1",
  "engine": "postgres",
  "tables": [
    {
      "name": "authors",
      "model": "Author",
      "columns": [
        { "name": "id", "data_type": "integer" },
        { "name": "name", "data_type": "character varying(120)" },
        { "name": "email", "data_type": "character varying(255)" }
      ]
    },
    {
      "name": "posts",
      "model": "Post",
      "columns": [
        { "name": "id", "data_type": "bigint" },
        { "name": "title", "data_type": "character varying(200)" },
        { "name": "author_id", "data_type": "integer" },
        { "name": "body", "data_type": "text" },
        { "name": "published_at", "data_type": "timestamp without time zone" }
      ]
    },
    {
      "name": "comments",
      "model": "Comment",
      "columns": [
        { "name": "id", "data_type": "integer" },
        { "name": "post_id", "data_type": "integer" },
        { "name": "external_id", "data_type": "character varying(64)" },
        { "name": "body", "data_type": "text" }
      ]
    },
    {
      "name": "blog_posts",
      "model": "Blog::Post",
      "columns": [
        { "name": "id", "data_type": "integer" },
        { "name": "title", "data_type": "character varying(200)" },
        { "name": "editor_id", "data_type": "integer" }
      ]
    },
    {
      "name": "blog_editors",
      "model": "Blog::Editor",
      "columns": [
        { "name": "id", "data_type": "integer" },
        { "name": "name", "data_type": "character varying(120)" }
      ]
    },
    {
      "name": "chickens",
      "model": "Chicken",
      "columns": [
        { "name": "id", "data_type": "integer" },
        { "name": "egg_id", "data_type": "integer" }
      ]
    },
    {
      "name": "eggs",
      "model": "Egg",
      "columns": [
        { "name": "id", "data_type": "integer" },
        { "name": "chicken_id", "data_type": "integer" }
      ]
    },
    {
      "name": "reviews",
      "model": "Review",
      "columns": [
        { "name": "id", "data_type": "integer" },
        { "name": "AUTHOR_ID", "data_type": "integer" },
        { "name": "body", "data_type": "text" }
      ]
    },
    {
      "name": "notes",
      "model": "Note",
      "columns": [
        { "name": "id", "data_type": "integer" },
        { "name": "fk_author", "data_type": "integer" },
        { "name": "body", "data_type": "text" }
      ]
    },
    {
      "name": "widgets",
      "model": "Widget",
      "columns": [
        { "name": "id", "data_type": "integer" },
        { "name": "shape", "data_type": "geometry(Point, 4326)" }
      ]
    }
  ]
}"#;

pub fn blog_catalog() -> SnapshotCatalog {
    SnapshotCatalog::from_json(BLOG_SNAPSHOT).expect("blog snapshot")
}

pub fn blog_models() -> ModelRegistry {
    ModelRegistry::from_snapshot(blog_catalog().snapshot())
}

pub fn seeded_options(seed: u64) -> FixtureOptions {
    FixtureOptions {
        seed: Some(seed),
        ..FixtureOptions::default()
    }
}

/// Engine over the blog snapshot, returning the store it persists into.
pub fn blog_engine() -> (FixtureEngine, InMemoryStore) {
    let store = InMemoryStore::new();
    let engine = FixtureEngine::new(blog_catalog(), blog_models(), store.clone())
        .with_options(seeded_options(42));
    (engine, store)
}

pub fn overrides<const N: usize>(pairs: [(&str, FixtureValue); N]) -> Attributes {
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

/// Catalog wrapper recording how often each table is looked up.
#[derive(Clone)]
pub struct CountingCatalog {
    inner: Arc<SnapshotCatalog>,
    lookups: Arc<Mutex<BTreeMap<String, usize>>>,
}

impl CountingCatalog {
    pub fn new(inner: SnapshotCatalog) -> Self {
        Self {
            inner: Arc::new(inner),
            lookups: Arc::new(Mutex::new(BTreeMap::new())),
        }
    }

    pub fn lookups(&self, table: &str) -> usize {
        self.lookups
            .lock()
            .expect("lookups lock")
            .get(table)
            .copied()
            .unwrap_or(0)
    }
}

impl SchemaCatalog for CountingCatalog {
    fn engine(&self) -> &'static str {
        "counting"
    }

    fn columns(&self, table: &str) -> CoreResult<Vec<ColumnDescriptor>> {
        *self
            .lookups
            .lock()
            .expect("lookups lock")
            .entry(table.to_string())
            .or_insert(0) += 1;
        self.inner.columns(table)
    }
}

/// Typed model over the `posts` table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Article {
    pub id: Option<i64>,
    pub title: String,
    pub author_id: i64,
    pub body: String,
    pub published_at: Option<NaiveDateTime>,
}

impl Model for Article {
    fn assign(&mut self, attribute: &str, value: FixtureValue) -> Result<()> {
        match attribute {
            "id" => self.id = Some(value.require_int(attribute)?),
            "title" => self.title = value.require_text(attribute)?,
            "author_id" => self.author_id = value.require_int(attribute)?,
            "body" => self.body = value.require_text(attribute)?,
            "published_at" => match value {
                FixtureValue::Timestamp(timestamp) => self.published_at = Some(timestamp),
                FixtureValue::Null => self.published_at = None,
                other => {
                    return Err(FixtureError::AttributeType {
                        attribute: attribute.to_string(),
                        expected: "timestamp",
                        found: other.kind(),
                    });
                }
            },
            _ => {
                return Err(FixtureError::UnknownAttribute {
                    model: "Article".to_string(),
                    attribute: attribute.to_string(),
                });
            }
        }
        Ok(())
    }

    fn attribute(&self, attribute: &str) -> Option<FixtureValue> {
        match attribute {
            "id" => self.id.map(FixtureValue::Int),
            "title" => Some(FixtureValue::Text(self.title.clone())),
            "author_id" => Some(FixtureValue::Int(self.author_id)),
            "body" => Some(FixtureValue::Text(self.body.clone())),
            "published_at" => Some(self.published_at.into()),
            _ => None,
        }
    }

    fn attributes(&self) -> Attributes {
        ["id", "title", "author_id", "body", "published_at"]
            .into_iter()
            .filter_map(|name| self.attribute(name).map(|value| (name.to_string(), value)))
            .collect()
    }
}

pub fn register_article(registry: &mut ModelRegistry) {
    registry.register(ModelType::of::<Article>("Article", "posts"));
}
