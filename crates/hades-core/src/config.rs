//! Run configuration for hades
//!
//! A configuration file is YAML (`.yaml`/`.yml`) or TOML (`.toml`). It is
//! read into a [`PartialConfiguration`], command-line overrides are layered
//! on top, and the result is validated into a [`Configuration`].

pub mod types;

use std::fs;
use std::path::Path;

use crate::error::{HadesError, Result};
use crate::{bail_invalid, bail_missing};

pub use types::{
    Configuration, JunkMode, LineBreakPolicy, PartialConfiguration, ScoringErrorPolicy,
    DEFAULT_CONFIG_FILE,
};

/// Supported configuration file syntaxes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSyntax {
    Yaml,
    Toml,
}

impl ConfigSyntax {
    /// Pick the syntax from a file extension; anything unknown is treated as YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ConfigSyntax::Toml,
            _ => ConfigSyntax::Yaml,
        }
    }
}

impl PartialConfiguration {
    /// Load configuration from a file
    #[tracing::instrument(skip(path), fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| HadesError::io_operation("read configuration", path.display(), e))?;
        Self::parse(&content, ConfigSyntax::from_path(path)).map_err(|e| {
            HadesError::InvalidConfig {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        })
    }

    /// Parse configuration text in the given syntax
    pub fn parse(content: &str, syntax: ConfigSyntax) -> Result<Self> {
        let config = match syntax {
            ConfigSyntax::Yaml => {
                if content.trim().is_empty() {
                    PartialConfiguration::default()
                } else {
                    serde_yaml::from_str(content)?
                }
            }
            ConfigSyntax::Toml => toml::from_str(content)?,
        };
        Ok(config)
    }

    /// Layer `overrides` on top of `self`; set fields in `overrides` win
    pub fn merge(self, overrides: PartialConfiguration) -> Self {
        PartialConfiguration {
            file_extensions: overrides.file_extensions.or(self.file_extensions),
            dir_name: overrides.dir_name.or(self.dir_name),
            number_of_top_results: overrides
                .number_of_top_results
                .or(self.number_of_top_results),
            reports_dir: overrides.reports_dir.or(self.reports_dir),
            number_of_processes: overrides.number_of_processes.or(self.number_of_processes),
            junk: overrides.junk.or(self.junk),
            line_breaks: overrides.line_breaks.or(self.line_breaks),
            on_scoring_error: overrides.on_scoring_error.or(self.on_scoring_error),
        }
    }

    /// Validate into a complete configuration.
    ///
    /// `origin` names where the configuration came from and is used in
    /// missing-field errors.
    pub fn resolve(self, origin: &str) -> Result<Configuration> {
        let Some(file_extensions) = self.file_extensions else {
            bail_missing!("file_extensions", origin);
        };
        let Some(dir_name) = self.dir_name else {
            bail_missing!("dir_name", origin);
        };
        let Some(number_of_top_results) = self.number_of_top_results else {
            bail_missing!("number_of_top_results", origin);
        };
        let Some(reports_dir) = self.reports_dir else {
            bail_missing!("reports_dir", origin);
        };
        let Some(number_of_processes) = self.number_of_processes else {
            bail_missing!("number_of_processes", origin);
        };

        let config = Configuration {
            file_extensions,
            dir_name,
            number_of_top_results,
            reports_dir,
            number_of_processes,
            junk: self.junk.unwrap_or_default(),
            line_breaks: self.line_breaks.unwrap_or_default(),
            on_scoring_error: self.on_scoring_error.unwrap_or_default(),
        };
        config.validate()?;
        Ok(config)
    }
}

impl Configuration {
    /// Load and validate a configuration file with no overrides
    pub fn load(path: &Path) -> Result<Self> {
        PartialConfiguration::load(path)?.resolve(&path.display().to_string())
    }

    /// Check value ranges that serde cannot express
    pub fn validate(&self) -> Result<()> {
        if self.number_of_processes == 0 {
            bail_invalid!("number_of_processes", "0 (must be at least 1)");
        }
        if self.file_extensions.is_empty() {
            bail_invalid!("file_extensions", "empty list");
        }
        if let Some(ext) = self.file_extensions.iter().find(|e| e.is_empty()) {
            bail_invalid!("file_extensions", format!("{:?} (empty suffix)", ext));
        }
        if self.dir_name.as_os_str().is_empty() {
            bail_invalid!("dir_name", "empty path");
        }
        if self.reports_dir.as_os_str().is_empty() {
            bail_invalid!("reports_dir", "empty path");
        }
        Ok(())
    }
}
