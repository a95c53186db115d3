use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

/// Reads a JSON configuration record. Fields missing from the file keep
/// their defaults.
pub fn load<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    log::info!("loaded configuration from {}", path.display());
    Ok(config)
}

/// Loads `path` if given, otherwise the built-in scenario.
pub fn load_or_default<T: DeserializeOwned + Default>(path: Option<&str>) -> Result<T> {
    match path {
        Some(path) => load(path),
        None => Ok(T::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workforce::WorkforceConfig;

    #[test]
    fn missing_path_yields_defaults() {
        let config: WorkforceConfig = load_or_default(None).unwrap();
        assert_eq!(config, WorkforceConfig::default());
    }

    #[test]
    fn reads_file_and_reports_bad_json() {
        let dir = std::env::temp_dir();
        let good = dir.join(format!("shift-planner-config-{}.json", std::process::id()));
        fs::write(&good, r#"{ "days": 2, "targets": [] }"#).unwrap();
        let config: WorkforceConfig = load(&good).unwrap();
        assert_eq!(config.days, 2);
        assert!(config.targets.is_empty());

        fs::write(&good, "{ days: ").unwrap();
        let err = load::<WorkforceConfig>(&good).unwrap_err();
        assert!(err.to_string().contains("parsing config"));
        fs::remove_file(&good).unwrap();

        assert!(load::<WorkforceConfig>(dir.join("does-not-exist.json")).is_err());
    }
}
