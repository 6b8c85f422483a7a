use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use fixtura_core::ClassName;
use fixtura_generate::{Attributes, FixtureOptions, FixtureValue};

use crate::CliError;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG: &str = "fixtura.toml";

/// Contents of `fixtura.toml`.
///
/// ```toml
/// schema = "schema.json"
///
/// [options]
/// seed = 7
/// locale = "pt_BR"
///
/// [models.post]
/// title = "Hello"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Schema snapshot path, relative to the config file.
    pub schema: Option<PathBuf>,
    pub options: FixtureOptions,
    /// Default overrides per model identifier.
    pub models: BTreeMap<String, BTreeMap<String, Value>>,
}

impl Settings {
    pub fn from_toml(content: &str) -> Result<Self, CliError> {
        Ok(toml::from_str(content)?)
    }

    /// Default overrides configured for `identifier`, matched on the case-folded
    /// class name so `post`, `Post` and `POST` share one entry.
    pub fn model_defaults(&self, identifier: &str) -> Attributes {
        let Some(wanted) = ClassName::parse(identifier).map(|class| class.lookup_key()) else {
            return Attributes::new();
        };

        self.models
            .iter()
            .filter(|(key, _)| {
                ClassName::parse(key).map(|class| class.lookup_key()).as_ref() == Some(&wanted)
            })
            .flat_map(|(_, values)| values.iter())
            .map(|(attribute, value)| (attribute.clone(), FixtureValue::from_json(value.clone())))
            .collect()
    }
}

/// Load settings from `path`, or from [`DEFAULT_CONFIG`] when it exists.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, CliError> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let fallback = PathBuf::from(DEFAULT_CONFIG);
            if !fallback.exists() {
                return Ok(Settings::default());
            }
            fallback
        }
    };

    let content = std::fs::read_to_string(&path)?;
    let mut settings = Settings::from_toml(&content)?;
    if let (Some(schema), Some(dir)) = (settings.schema.as_mut(), path.parent())
        && schema.is_relative()
    {
        *schema = dir.join(&*schema);
    }
    tracing::debug!(path = %path.display(), "settings loaded");
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixtura_generate::Locale;

    #[test]
    fn parses_full_config() {
        let settings = Settings::from_toml(
            r#"
schema = "db/schema.json"

[options]
seed = 7
locale = "pt_BR"
base_date = "2023-06-01"

[models.post]
title = "Hello"
views = 3

[models."blog::post"]
title = "Namespaced"
"#,
        )
        .expect("settings");

        assert_eq!(settings.schema, Some(PathBuf::from("db/schema.json")));
        assert_eq!(settings.options.seed, Some(7));
        assert_eq!(settings.options.locale, Locale::PtBr);
        assert!(settings.options.detect_relationships);

        let defaults = settings.model_defaults("Post");
        assert_eq!(defaults.get("title"), Some(&FixtureValue::from("Hello")));
        assert_eq!(defaults.get("views"), Some(&FixtureValue::Int(3)));

        let shouted = settings.model_defaults("POST");
        assert_eq!(shouted.get("title"), Some(&FixtureValue::from("Hello")));

        let namespaced = settings.model_defaults("Blog/Post");
        assert_eq!(namespaced.get("title"), Some(&FixtureValue::from("Namespaced")));
    }

    #[test]
    fn empty_config_uses_defaults() {
        let settings = Settings::from_toml("").expect("settings");
        assert!(settings.schema.is_none());
        assert!(settings.options.seed.is_none());
        assert!(settings.model_defaults("post").is_empty());
    }

    #[test]
    fn rejects_unknown_locale() {
        let result = Settings::from_toml("[options]\nlocale = \"xx_XX\"\n");
        assert!(matches!(result, Err(CliError::Toml(_))));
    }
}
