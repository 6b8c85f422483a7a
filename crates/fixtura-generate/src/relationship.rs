use std::sync::OnceLock;

use regex::Regex;
use tracing::warn;

use fixtura_core::ClassName;

use crate::errors::{FixtureError, Result};
use crate::model::ModelRegistry;

/// Column names ending in `<word>_id` or `<word>-id`, case-insensitive.
pub const FOREIGN_KEY_PATTERN: &str = r"(?i)([a-z0-9_-]*[a-z0-9])[-_]id$";

fn default_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(FOREIGN_KEY_PATTERN).expect("foreign key pattern is valid"))
}

/// Decides whether a column refers to another model.
#[derive(Debug, Clone)]
pub struct RelationshipDetector {
    pattern: Regex,
}

impl Default for RelationshipDetector {
    fn default() -> Self {
        Self {
            pattern: default_pattern().clone(),
        }
    }
}

impl RelationshipDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Detector using a custom pattern; its first capture group names the model.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|err| {
            FixtureError::InvalidConfig(format!("relationship pattern: {err}"))
        })?;
        if pattern.captures_len() < 2 {
            return Err(FixtureError::InvalidConfig(
                "relationship pattern needs a capture group".to_string(),
            ));
        }
        Ok(Self { pattern })
    }

    /// The word a foreign-key-shaped column points at, e.g. `author` for `author_id`.
    pub fn candidate<'a>(&self, column: &'a str) -> Option<&'a str> {
        self.pattern
            .captures(column)
            .and_then(|captures| captures.get(1))
            .map(|word| word.as_str())
    }

    /// Class name of the model referenced by `column`, if it is loadable.
    ///
    /// The bare studly word is tried first, then the word under the root
    /// namespace. Columns that merely look like foreign keys yield `None`.
    pub fn detect(
        &self,
        column: &str,
        root_namespace: Option<&str>,
        models: &ModelRegistry,
    ) -> Option<ClassName> {
        let word = self.candidate(column)?;

        let bare = ClassName::in_namespace(None, word);
        if models.contains(&bare) {
            return Some(bare);
        }

        if root_namespace.is_some() {
            let namespaced = ClassName::in_namespace(root_namespace, word);
            if models.contains(&namespaced) {
                return Some(namespaced);
            }
        }

        warn!(column, word, "foreign key shaped column has no model");
        None
    }
}
