//! Loading game settings from a JSON file

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::Value;

use crate::game::GameConfig;

/// Read a JSON object from `path` and apply its keys on top of `base`.
///
/// Keys missing from the file keep the value from `base`, so a file can
/// tweak a single setting of either variant. The result is validated.
pub fn load_config(path: &Path, base: GameConfig) -> Result<GameConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {:?}", path))?;
    let overrides: Value = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse config {:?}", path))?;

    let config = apply_overrides(base, overrides)
        .with_context(|| format!("Invalid settings in {:?}", path))?;
    config.validate()?;

    Ok(config)
}

fn apply_overrides(base: GameConfig, overrides: Value) -> Result<GameConfig> {
    let Value::Object(overrides) = overrides else {
        bail!("expected a JSON object at the top level");
    };

    let mut merged = serde_json::to_value(base).context("Failed to serialize base config")?;
    if let Value::Object(fields) = &mut merged {
        for (key, value) in overrides {
            if !fields.contains_key(&key) {
                bail!("unknown setting `{}`", key);
            }
            fields.insert(key, value);
        }
    }

    serde_json::from_value(merged).context("Failed to deserialize config")
}
