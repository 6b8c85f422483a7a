use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::generators::Locale;

/// Options for the fixture engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FixtureOptions {
    /// Seed for the value generators. Unset means a fresh random seed.
    pub seed: Option<u64>,
    /// Locale used by the semantic field generators.
    pub locale: Locale,
    /// First day of the window date and datetime generators draw from.
    pub base_date: NaiveDate,
    /// Create related fixtures for foreign-key columns when saving.
    pub detect_relationships: bool,
}

impl Default for FixtureOptions {
    fn default() -> Self {
        Self {
            seed: None,
            locale: Locale::default(),
            base_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
            detect_relationships: true,
        }
    }
}

/// Whether a build is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Build in memory only.
    Make,
    /// Build, then persist through the gateway.
    Create,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Make => f.write_str("make"),
            Mode::Create => f.write_str("create"),
        }
    }
}
