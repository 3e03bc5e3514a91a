//! Optional `specwatch.toml` defaults.
//!
//! ```toml
//! [spec]
//! dir = "specs"
//! mapping = "acme_news"
//!
//! [output]
//! format = "json"
//! ```
//!
//! Command-line flags override every value here.

use clap::ValueEnum;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const DEFAULT_CONFIG_FILE: &str = "specwatch.toml";
const DEFAULT_SPEC_DIR: &str = "specs";

/// How a report is written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Colored, human-readable report
    #[default]
    Terminal,
    /// Pretty-printed JSON
    Json,
}

/// Effective defaults after reading the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub spec_dir: PathBuf,
    pub mapping: Option<String>,
    pub format: OutputFormat,
    /// The file these values came from, if one was read.
    pub source: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            spec_dir: PathBuf::from(DEFAULT_SPEC_DIR),
            mapping: None,
            format: OutputFormat::Terminal,
            source: None,
        }
    }
}

/// On-disk layout.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    spec: SpecSection,
    #[serde(default)]
    output: OutputSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SpecSection {
    dir: Option<PathBuf>,
    mapping: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct OutputSection {
    format: Option<OutputFormat>,
}

impl ConfigFile {
    fn into_config(self, source: &Path) -> CliConfig {
        let defaults = CliConfig::default();
        CliConfig {
            spec_dir: self.spec.dir.unwrap_or(defaults.spec_dir),
            mapping: self.spec.mapping.filter(|m| !m.is_empty()),
            format: self.output.format.unwrap_or(defaults.format),
            source: Some(source.to_path_buf()),
        }
    }
}

impl CliConfig {
    /// Loads config from an explicit path.
    ///
    /// A missing file means defaults. A file that can't be read or parsed
    /// is reported and ignored.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!("No config file at {:?}, using defaults", path);
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<ConfigFile>(&contents) {
                Ok(file) => {
                    info!("Loaded config from {:?}", path);
                    file.into_config(path)
                }
                Err(e) => {
                    warn!("Failed to parse config file {:?}: {}. Using defaults.", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read config file {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Applies command-line overrides on top of the file values.
    pub fn merge_flags(
        mut self,
        spec_dir: Option<PathBuf>,
        mapping: Option<String>,
        format: Option<OutputFormat>,
    ) -> Self {
        if let Some(dir) = spec_dir {
            self.spec_dir = dir;
        }
        if mapping.is_some() {
            self.mapping = mapping;
        }
        if let Some(format) = format {
            self.format = format;
        }
        self
    }
}
