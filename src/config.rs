use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings for the `grasp-bridge` command itself, read from
/// `<config dir>/grasp-bridge/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CliConfig {
    #[serde(default)]
    pub parameters: ParameterFilesConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ParameterFilesConfig {
    /// Parameter files loaded before any given on the command line
    pub files: Vec<PathBuf>,
    /// Apply `GRASP_PARAM_*` environment overrides
    pub env_overrides: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub color: bool,
    pub pretty_json: bool,
}

impl Default for ParameterFilesConfig {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            env_overrides: true,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            pretty_json: true,
        }
    }
}

impl CliConfig {
    pub fn load() -> Self {
        match Self::config_file_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Read the config at `path`, falling back to defaults when it is missing
    /// or unreadable.
    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        match toml::from_str(&content) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "ignoring invalid config file");
                Self::default()
            }
        }
    }

    pub fn config_file_path() -> Option<PathBuf> {
        Self::config_dir().map(|mut path| {
            path.push("config.toml");
            path
        })
    }

    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push("grasp-bridge");
            path
        })
    }
}
