use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use mdgen::RenderOptions;

pub const DEFAULT_SETTINGS_FILE: &str = "mdgen.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse settings file at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Settings for the `mdgen` binary, read from `mdgen.toml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Directory generated files go to when no explicit path is given.
    pub output_dir: PathBuf,
    /// Replace existing files without `--force`.
    pub force_overwrite: bool,
    pub render: RenderSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderSettings {
    pub indent: usize,
    pub default_code_language: String,
    pub bullet: char,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            output_dir: PathBuf::from("markdown_output"),
            force_overwrite: false,
            render: RenderSettings::default(),
        }
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        let options = RenderOptions::default();
        RenderSettings {
            indent: options.indent,
            default_code_language: options.default_code_language,
            bullet: options.bullet,
        }
    }
}

impl RenderSettings {
    pub fn to_options(&self) -> RenderOptions {
        RenderOptions::new()
            .with_indent(self.indent)
            .with_default_code_language(self.default_code_language.clone())
            .with_bullet(self.bullet)
    }
}

impl Settings {
    /// Load settings from `path`. A missing file yields `None`.
    pub fn load_from_path(path: &Path) -> Result<Option<Self>, SettingsError> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = toml::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Some(settings))
    }

    /// Load from an explicit path, which must exist, or from
    /// `mdgen.toml` in the working directory if present.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, SettingsError> {
        match explicit {
            Some(path) => match Self::load_from_path(path)? {
                Some(settings) => Ok(settings),
                None => Err(SettingsError::Read {
                    path: path.to_path_buf(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
                }),
            },
            None => Ok(Self::load_from_path(Path::new(DEFAULT_SETTINGS_FILE))?.unwrap_or_default()),
        }
    }
}
