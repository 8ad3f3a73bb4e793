use crate::error::{ClientSpecError, Result};
use clientspec_api::DEFAULT_API_NAME;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Optional per-project settings file, read from the project root.
pub const CONFIG_FILE_NAME: &str = "clientspec.json";

/// Name of the generated document inside the output directory.
pub const OUTPUT_FILE_NAME: &str = "api-spec.json";

pub const DEFAULT_OUTPUT_DIR: &str = "build/generated/clientspec";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProcessorConfig {
    /// Value of the document's top-level `name`.
    pub api_name: String,
    /// Relative paths are resolved against the project root.
    pub output_dir: PathBuf,
    pub pretty: bool,
    pub collect_entities: bool,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            api_name: DEFAULT_API_NAME.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            pretty: false,
            collect_entities: true,
        }
    }
}

impl ProcessorConfig {
    /// Reads `clientspec.json` from `root`, falling back to defaults when the
    /// file does not exist.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE_NAME);
        if !path.is_file() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| ClientSpecError::Config(format!("{}: {}", path.display(), e)))?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn output_dir(&self, root: &Path) -> PathBuf {
        if self.output_dir.is_absolute() {
            self.output_dir.clone()
        } else {
            root.join(&self.output_dir)
        }
    }

    pub fn output_path(&self, root: &Path) -> PathBuf {
        self.output_dir(root).join(OUTPUT_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_without_file() {
        let dir = tempdir().unwrap();
        let config = ProcessorConfig::load(dir.path()).unwrap();
        assert_eq!(config, ProcessorConfig::default());
        assert_eq!(config.api_name, "service");
        assert_eq!(
            config.output_path(dir.path()),
            dir.path().join("build/generated/clientspec/api-spec.json")
        );
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{ "apiName": "billing", "pretty": true }"#,
        )
        .unwrap();

        let config = ProcessorConfig::load(dir.path()).unwrap();
        assert_eq!(config.api_name, "billing");
        assert!(config.pretty);
        assert!(config.collect_entities);
        assert_eq!(config.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "{ not json").unwrap();
        assert!(matches!(
            ProcessorConfig::load(dir.path()),
            Err(ClientSpecError::Config(_))
        ));
    }

    #[test]
    fn absolute_output_dir_is_kept() {
        let dir = tempdir().unwrap();
        let config = ProcessorConfig {
            output_dir: dir.path().join("out"),
            ..Default::default()
        };
        assert_eq!(
            config.output_path(Path::new("/elsewhere")),
            dir.path().join("out").join(OUTPUT_FILE_NAME)
        );
    }
}
