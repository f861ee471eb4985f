//! Dashboard configuration.
//!
//! Values are resolved in order: built-in defaults, then `dashboard.toml`
//! (or the file given with `--config`), then environment variables, then
//! command-line flags.

use std::path::{Path, PathBuf};

use crime_dashboard_analytics::queries::QueryOptions;
use crime_dashboard_analytics_models::{DEFAULT_TOP_N, GeoJoin};
use crime_dashboard_store::LoadOptions;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Config file picked up from the working directory when `--config` is not
/// given.
pub const DEFAULT_CONFIG_FILE: &str = "dashboard.toml";

/// Overrides [`DashboardConfig::incidents_path`].
pub const INCIDENTS_ENV: &str = "CRIME_DASHBOARD_INCIDENTS";

/// Overrides [`DashboardConfig::boundaries_path`].
pub const BOUNDARIES_ENV: &str = "CRIME_DASHBOARD_BOUNDARIES";

/// Errors that can occur while resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config file {}: {source}", path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`DashboardConfig`].
    #[error("Invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    /// The delimiter cannot be used to split CSV fields.
    #[error("Delimiter {0:?} is not a single-byte ASCII character")]
    Delimiter(char),
}

/// Where the data lives and how the charts are computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Incident CSV file.
    pub incidents_path: PathBuf,
    /// Neighborhood boundary GeoJSON file.
    pub boundaries_path: PathBuf,
    /// Field delimiter of the incident file.
    pub delimiter: char,
    /// Bars in the category chart.
    pub top_n: usize,
    /// How the choropleth joins counts onto neighborhoods.
    pub geo_join: GeoJoin,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            incidents_path: PathBuf::from("data/crime.csv"),
            boundaries_path: PathBuf::from("data/Boston_Neighborhoods.geojson"),
            delimiter: ',',
            top_n: DEFAULT_TOP_N,
            geo_join: GeoJoin::default(),
        }
    }
}

impl DashboardConfig {
    /// Parses a TOML document. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// * If the document is not valid TOML or has mistyped keys
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::de::from_str(toml_str)?)
    }

    /// Reads the config file at `path`, or [`DEFAULT_CONFIG_FILE`] if it
    /// exists, or falls back to defaults.
    ///
    /// # Errors
    ///
    /// * If an explicitly given file cannot be read
    /// * If the file is not valid TOML
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path,
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if !default.is_file() {
                    log::debug!("No {DEFAULT_CONFIG_FILE} found, using defaults");
                    return Ok(Self::default());
                }
                default
            }
        };

        log::debug!("Reading config from {}", path.display());
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Applies path overrides from the environment. `lookup` is
    /// `std::env::var` in production.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup(INCIDENTS_ENV).filter(|v| !v.is_empty()) {
            self.incidents_path = PathBuf::from(path);
        }
        if let Some(path) = lookup(BOUNDARIES_ENV).filter(|v| !v.is_empty()) {
            self.boundaries_path = PathBuf::from(path);
        }
    }

    /// Options for reading the source files.
    ///
    /// # Errors
    ///
    /// * If the delimiter is not a single-byte ASCII character
    pub fn load_options(&self) -> Result<LoadOptions, ConfigError> {
        if !self.delimiter.is_ascii() {
            return Err(ConfigError::Delimiter(self.delimiter));
        }
        let mut buf = [0u8; 1];
        self.delimiter.encode_utf8(&mut buf);
        Ok(LoadOptions { delimiter: buf[0] })
    }

    /// Options for computing the charts.
    #[must_use]
    pub const fn query_options(&self) -> QueryOptions {
        QueryOptions {
            geo_join: self.geo_join,
            top_n: self.top_n,
        }
    }
}
