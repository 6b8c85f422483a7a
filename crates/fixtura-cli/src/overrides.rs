use serde_json::Value;

use fixtura_generate::{Attributes, FixtureValue};

use crate::CliError;

/// Parse one `--set key=value` flag. The value is read as JSON when it
/// parses, so `--set views=3` is an integer and `--set title=Hello` a string.
pub fn parse_assignment(raw: &str) -> Result<(String, FixtureValue), CliError> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| CliError::InvalidConfig(format!("expected key=value, got '{raw}'")))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(CliError::InvalidConfig(format!("empty attribute name in '{raw}'")));
    }

    let value = match serde_json::from_str::<Value>(value) {
        Ok(json) => FixtureValue::from_json(json),
        Err(_) => FixtureValue::Text(value.to_string()),
    };
    Ok((key.to_string(), value))
}

/// Configured defaults with command-line assignments layered on top.
pub fn merge(defaults: Attributes, assignments: &[String]) -> Result<Attributes, CliError> {
    let mut overrides = defaults;
    for raw in assignments {
        let (key, value) = parse_assignment(raw)?;
        overrides.insert(key, value);
    }
    Ok(overrides)
}
