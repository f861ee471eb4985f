#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Police district lookup and neighborhood boundary types.
//!
//! Incidents are located by police district only; the dashboard displays
//! them per neighborhood. These types hold the fixed district lookup and
//! the boundary polygons the choropleth is drawn from.

pub mod district;

pub use district::District;

use geo::MultiPolygon;

/// A neighborhood boundary loaded from the boundary file.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighborhood {
    /// Neighborhood name. Unique across the boundary file and used as the
    /// join key against [`District::neighborhood_name`].
    pub name: String,
    /// Boundary polygon(s) in WGS84 longitude/latitude.
    pub geometry: MultiPolygon<f64>,
}

impl Neighborhood {
    /// Returns the district displayed under this neighborhood's name, if any.
    #[must_use]
    pub fn district(&self) -> Option<District> {
        District::for_neighborhood(&self.name)
    }
}
