#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Immutable in-memory incident table and neighborhood boundaries.
//!
//! A [`RecordStore`] is constructed once at startup and then only borrowed.
//! It holds no interior mutability, so a single instance can be shared
//! across threads and handed to every chart query without locking. Failure
//! to load either source is fatal: the dashboard cannot start without both.

pub mod boundaries;
pub mod incidents;
pub mod progress;

use std::collections::BTreeSet;
use std::path::Path;

use crime_dashboard_crime_models::Incident;
use crime_dashboard_geography_models::Neighborhood;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::progress::ProgressCallback;

/// Errors that can occur while loading the record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading a source file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The incident file is not valid delimited text.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The boundary file is not valid `GeoJSON`.
    #[error("GeoJSON error: {0}")]
    GeoJson(Box<geojson::Error>),

    /// A required incident column is absent from the header row.
    #[error("Incident file is missing required column '{column}'")]
    MissingColumn {
        /// Header name that was expected.
        column: &'static str,
    },

    /// An incident row could not be parsed.
    #[error("Malformed incident on line {line}: {message}")]
    Malformed {
        /// One-based line number in the source file.
        line: u64,
        /// Description of what went wrong.
        message: String,
    },

    /// The boundary file has the wrong shape.
    #[error("Invalid boundary file: {message}")]
    Boundary {
        /// Description of what went wrong.
        message: String,
    },

    /// Two boundary features share a name.
    #[error("Duplicate neighborhood '{name}' in boundary file")]
    DuplicateNeighborhood {
        /// The repeated neighborhood name.
        name: String,
    },
}

/// How the source files are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Field delimiter of the incident file.
    pub delimiter: u8,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

/// Distinct values available for each filter dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    /// Years present in the incident table, ascending.
    pub years: Vec<i32>,
    /// Months present in the incident table, ascending.
    pub months: Vec<u8>,
    /// Neighborhood names incidents are mapped to, alphabetical.
    pub neighborhoods: Vec<String>,
    /// Offense categories present in the incident table, alphabetical.
    pub categories: Vec<String>,
}

/// The loaded incident table and neighborhood boundaries.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordStore {
    incidents: Vec<Incident>,
    neighborhoods: Vec<Neighborhood>,
}

impl RecordStore {
    /// Loads both sources from disk.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if either file is missing or malformed.
    pub fn load(
        incidents_path: &Path,
        boundaries_path: &Path,
        options: LoadOptions,
        progress: &dyn ProgressCallback,
    ) -> Result<Self, StoreError> {
        log::info!("Loading incidents from {}", incidents_path.display());
        let incidents = incidents::load_incidents(incidents_path, options.delimiter, progress)?;

        let unmapped = incidents.iter().filter(|i| i.district.is_none()).count();
        log::info!(
            "Loaded {} incidents ({unmapped} without a mapped district)",
            incidents.len()
        );

        log::info!("Loading boundaries from {}", boundaries_path.display());
        let neighborhoods = boundaries::load_neighborhoods(boundaries_path)?;
        log::info!("Loaded {} neighborhood boundaries", neighborhoods.len());
        for name in boundaries::unmapped_neighborhoods(&neighborhoods) {
            log::warn!("Neighborhood '{name}' has no police district and will show no incidents");
        }

        Ok(Self::from_parts(incidents, neighborhoods))
    }

    /// Builds a store from already-parsed data.
    #[must_use]
    pub const fn from_parts(incidents: Vec<Incident>, neighborhoods: Vec<Neighborhood>) -> Self {
        Self {
            incidents,
            neighborhoods,
        }
    }

    /// Every incident, in source order.
    #[must_use]
    pub fn all_incidents(&self) -> &[Incident] {
        &self.incidents
    }

    /// Every neighborhood boundary, in source order.
    #[must_use]
    pub fn all_neighborhoods(&self) -> &[Neighborhood] {
        &self.neighborhoods
    }

    /// Collects the distinct values of each filter dimension.
    #[must_use]
    pub fn filter_options(&self) -> FilterOptions {
        let mut years = BTreeSet::new();
        let mut months = BTreeSet::new();
        let mut neighborhoods = BTreeSet::new();
        let mut categories = BTreeSet::new();

        for incident in &self.incidents {
            years.insert(incident.year);
            months.insert(incident.month);
            if let Some(name) = incident.neighborhood() {
                neighborhoods.insert(name);
            }
            categories.insert(incident.category.as_str());
        }

        FilterOptions {
            years: years.into_iter().collect(),
            months: months.into_iter().collect(),
            neighborhoods: neighborhoods.into_iter().map(str::to_string).collect(),
            categories: categories.into_iter().map(str::to_string).collect(),
        }
    }
}
