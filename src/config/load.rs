//! Configuration loading from files.
//!
//! The config file is optional: every setting has a default reproducing the
//! fixed project layout. Environment variables such as
//! `CARDSMITH_PROCESS__OUTPUT_DIR` override file values.

use std::path::{Path, PathBuf};

use config::{Environment, File, FileFormat};

use super::{ConfigError, Settings};

const DEFAULT_CONFIG_FILE: &str = "cardsmith.yaml";
const ENV_PREFIX: &str = "CARDSMITH";

impl Settings {
    /// Load the settings from the command line argument, defaulting to `cardsmith.yaml`.
    ///
    /// Relative paths in the result are resolved against the config file's directory.
    pub fn load_from_arg(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let config_file = config_file.unwrap_or(Path::new(DEFAULT_CONFIG_FILE));
        let config_file = if config_file.is_relative() {
            std::env::current_dir()
                .map_err(ConfigError::CwdFailure)?
                .join(config_file)
        } else {
            config_file.to_path_buf()
        };

        let settings = Self::load_from_file(&config_file)?;
        Ok(settings.resolve_paths(&base_path_from_config(&config_file)))
    }

    /// Load the settings from a file path, which need not exist.
    pub(crate) fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let layered = config::Config::builder()
            .add_source(File::from(path).format(FileFormat::Yaml).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        Ok(layered.try_deserialize()?)
    }
}

/// Get the base path from a config file path (its parent directory).
pub fn base_path_from_config(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CardLayout;

    #[test]
    fn test_base_path_from_config() {
        assert_eq!(
            base_path_from_config(Path::new("/project/cardsmith.yaml")),
            PathBuf::from("/project")
        );
        assert_eq!(
            base_path_from_config(Path::new("cardsmith.yaml")),
            PathBuf::from("")
        );
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let settings = Settings::load_from_file(&dir.path().join("cardsmith.yaml")).unwrap();
        assert_eq!(settings.process.output_dir, PathBuf::from("output"));
        assert_eq!(settings.extract.section, "home");
    }

    #[test]
    fn test_load_yaml_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("cardsmith.yaml");
        std::fs::write(
            &path,
            "extract:\n  layout: flat\n  locale: de\nmarkdown:\n  extensions: [tables]\n",
        )
        .unwrap();

        let settings = Settings::load_from_arg(Some(&path)).unwrap();
        assert_eq!(settings.extract.layout, CardLayout::Flat);
        assert_eq!(settings.extract.locale, "de");
        assert_eq!(settings.markdown.extensions, vec!["tables".to_string()]);
        assert_eq!(settings.process.output_dir, dir.path().join("output"));
    }
}
