#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Filter engine and aggregators behind the dashboard charts.
//!
//! Every function here is a pure reduction over the immutable
//! [`RecordStore`](crime_dashboard_store::RecordStore) and the current
//! [`FilterCriteria`](crime_dashboard_analytics_models::FilterCriteria).
//! [`queries`] composes them into one payload per chart.

pub mod filter;
pub mod hour_day;
pub mod queries;
pub mod ranking;
pub mod region;
pub mod time;

use crime_dashboard_analytics_models::InvalidCriteriaError;
use thiserror::Error;

/// Errors that can occur during analytics operations.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// The filter criteria cannot describe a valid query.
    #[error("Invalid filter criteria: {0}")]
    InvalidCriteria(#[from] InvalidCriteriaError),
}
