use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors reading or parsing a config file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub paths: PathsConfig,
    pub catalog: CatalogConfig,
    pub logging: LoggingConfig,
}

/// Input and output locations, relative to the working directory unless
/// absolute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory of primary assets and their `.meta` companions.
    pub input_dir: PathBuf,
    /// Item localization table used for display names.
    pub localization_file: PathBuf,
    /// Email localization table (`emailKey`, `emailSubject`, `emailBody`).
    pub email_localization_file: PathBuf,
    /// Persisted catalog.
    pub catalog: PathBuf,
    /// Root for extractor output.
    pub output_dir: PathBuf,
    /// Diagnostic logs, one per command.
    pub log_dir: PathBuf,
}

/// Catalog build settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Primary asset extension, without the dot.
    pub asset_extension: String,
    /// Save-key prefixes that take their display name from localization.
    pub item_key_prefixes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive for the diagnostic log; `RUST_LOG` wins.
    pub level: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("Input/Assets/MonoBehaviour"),
            localization_file: PathBuf::from("Input/Assets/TextAsset/English_Items.txt"),
            email_localization_file: PathBuf::from("Input/Assets/TextAsset/English_Emails.txt"),
            catalog: PathBuf::from("Output/guid_lookup.json"),
            output_dir: PathBuf::from("Output"),
            log_dir: PathBuf::from(".hidden/debug_output"),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            asset_extension: "asset".to_string(),
            item_key_prefixes: vec!["item".to_string()],
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// A loaded configuration plus the reason defaults were used, if any.
///
/// Config is read before logging starts, so the fallback reason is handed
/// back for the caller to report.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub fallback: Option<ConfigError>,
}

impl AppConfig {
    /// Load configuration.
    ///
    /// An explicit `path` must exist and parse. Otherwise the first of
    /// `./assetlore.toml` and `~/.config/assetlore/config.toml` is used,
    /// falling back to defaults when missing or unparseable.
    pub fn load(path: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
        if let Some(path) = path {
            return Ok(LoadedConfig {
                config: Self::from_file(path)?,
                fallback: None,
            });
        }
        Ok(Self::load_first_of(&Self::search_paths()))
    }

    fn load_first_of(candidates: &[PathBuf]) -> LoadedConfig {
        for candidate in candidates {
            if !candidate.is_file() {
                continue;
            }
            return match Self::from_file(candidate) {
                Ok(config) => LoadedConfig {
                    config,
                    fallback: None,
                },
                Err(e) => LoadedConfig {
                    config: Self::default(),
                    fallback: Some(e),
                },
            };
        }

        LoadedConfig {
            config: Self::default(),
            fallback: None,
        }
    }

    /// Read and parse one TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config)
    }

    fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("assetlore.toml")];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("assetlore").join("config.toml"));
        }
        paths
    }
}
