#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Filter criteria, aggregate results and chart payload types.
//!
//! The aggregate types are what the four dashboard charts are drawn from.
//! Every type here serializes to JSON so the presentation layer can render
//! it without knowing anything about the incident table.

pub mod criteria;

use std::collections::BTreeMap;

use chrono::NaiveDate;
use crime_dashboard_crime_models::DayOfWeek;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

pub use criteria::{FilterCriteria, InvalidCriteriaError, Selection, Span};

/// Number of hours in the hour/day grid.
pub const HOURS_PER_DAY: usize = 24;
/// Number of days in the hour/day grid.
pub const DAYS_PER_WEEK: usize = 7;
/// Default number of categories in the top-N ranking.
pub const DEFAULT_TOP_N: usize = 10;

/// How incident counts are joined onto neighborhood polygons.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GeoJoin {
    /// Only neighborhoods with at least one incident (or masked by the
    /// neighborhood selection) appear in the result.
    Inner,
    /// Every neighborhood appears; those without incidents count zero.
    #[default]
    Complete,
}

/// Incident count per neighborhood.
///
/// `None` means "no data": the neighborhood is outside the active
/// neighborhood selection and should render without a fill value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeoCounts(pub BTreeMap<String, Option<u64>>);

impl GeoCounts {
    /// Returns the entry for a neighborhood: `None` if absent from the
    /// result, `Some(None)` if masked, `Some(Some(n))` otherwise.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Option<u64>> {
        self.0.get(name).copied()
    }

    /// Number of neighborhoods in the result.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no neighborhood is in the result.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates `(name, count)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<u64>)> {
        self.0.iter().map(|(name, count)| (name.as_str(), *count))
    }
}

/// Incident count for one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyCount {
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1-12.
    pub month: u8,
    /// Incidents in this month.
    pub count: u64,
}

/// Incident counts per month, chronological. Months without incidents are
/// absent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeSeries(pub Vec<MonthlyCount>);

/// Count of incidents in a single offense category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    /// Offense category.
    pub category: String,
    /// Number of incidents.
    pub count: u64,
}

/// Highest-count categories, descending. Ties keep the order in which the
/// categories were first encountered.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryRanking(pub Vec<CategoryCount>);

impl CategoryRanking {
    /// Returns `true` if `category` made the ranking.
    #[must_use]
    pub fn contains(&self, category: &str) -> bool {
        self.0.iter().any(|entry| entry.category == category)
    }
}

/// One cell of the hour/day grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourDayCell {
    /// Day of the week.
    pub day: DayOfWeek,
    /// Hour of the day, 0-23.
    pub hour: u8,
    /// Incidents at this day and hour.
    pub count: u64,
}

/// Incident counts on a fixed 7x24 grid of weekday by hour.
///
/// Every cell is always present; cells without incidents hold zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourDayMatrix {
    counts: [[u64; HOURS_PER_DAY]; DAYS_PER_WEEK],
}

impl Default for HourDayMatrix {
    fn default() -> Self {
        Self::new()
    }
}

impl HourDayMatrix {
    /// Creates an all-zero grid.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            counts: [[0; HOURS_PER_DAY]; DAYS_PER_WEEK],
        }
    }

    /// Adds one incident to a cell. Hours past 23 are ignored.
    pub fn record(&mut self, day: DayOfWeek, hour: u8) {
        if let Some(cell) = self.counts[day.index()].get_mut(usize::from(hour)) {
            *cell += 1;
        }
    }

    /// Count at a cell, or `None` if `hour` is past 23.
    #[must_use]
    pub fn get(&self, day: DayOfWeek, hour: u8) -> Option<u64> {
        self.counts[day.index()].get(usize::from(hour)).copied()
    }

    /// All 168 cells, Monday first, hours ascending within each day.
    pub fn cells(&self) -> impl Iterator<Item = HourDayCell> + '_ {
        DayOfWeek::all().iter().flat_map(move |&day| {
            self.counts[day.index()]
                .iter()
                .zip(0u8..)
                .map(move |(&count, hour)| HourDayCell { day, hour, count })
        })
    }

    /// Sum of every cell.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }

    /// Largest single cell value.
    #[must_use]
    pub fn max(&self) -> u64 {
        self.counts.iter().flatten().copied().max().unwrap_or(0)
    }
}

/// Choropleth payload: counts per neighborhood plus the polygons to shade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoroplethChart {
    /// Counts joined onto neighborhoods.
    pub counts: GeoCounts,
    /// One feature per joined neighborhood with `Name` and `count`
    /// properties (`count` is `null` for masked neighborhoods).
    pub features: geojson::FeatureCollection,
}

/// One point of the trend line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    /// First day of the month.
    pub date: NaiveDate,
    /// Axis label: month only for single-year views, month and two-digit
    /// year otherwise.
    pub label: String,
    /// Incidents in this month.
    pub count: u64,
}

/// Trend line payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendChart {
    /// Whether the year filter collapses to one year.
    pub single_year: bool,
    /// Chronological points.
    pub points: Vec<TrendPoint>,
}

/// Heatmap payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapChart {
    /// All 168 cells, Monday first.
    pub cells: Vec<HourDayCell>,
    /// Largest cell value, for the color scale.
    pub max_count: u64,
}

/// Top-N category bar chart payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryChart {
    /// Bars, highest first.
    pub ranking: CategoryRanking,
    /// Incidents covered by the displayed bars.
    pub displayed_incidents: u64,
}

/// All four charts computed for the same criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    /// The criteria the charts were computed for.
    pub criteria: FilterCriteria,
    /// Choropleth map.
    pub map: ChoroplethChart,
    /// Monthly trend line.
    pub trend: TrendChart,
    /// Hour/day heatmap.
    pub heatmap: HeatmapChart,
    /// Top-N category bars.
    pub top_categories: CategoryChart,
}
