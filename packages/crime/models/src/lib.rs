#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Incident record and day-of-week types.
//!
//! An [`Incident`] is one row of the incident table after normalization.
//! Incidents are immutable once loaded; every downstream filter and
//! aggregate borrows them from the record store.

use crime_dashboard_geography_models::District;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use thiserror::Error;

/// Day of the week an incident occurred on, Monday first.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum DayOfWeek {
    /// Monday
    #[strum(to_string = "Monday", serialize = "Mon")]
    Monday,
    /// Tuesday
    #[strum(to_string = "Tuesday", serialize = "Tue")]
    Tuesday,
    /// Wednesday
    #[strum(to_string = "Wednesday", serialize = "Wed")]
    Wednesday,
    /// Thursday
    #[strum(to_string = "Thursday", serialize = "Thu")]
    Thursday,
    /// Friday
    #[strum(to_string = "Friday", serialize = "Fri")]
    Friday,
    /// Saturday
    #[strum(to_string = "Saturday", serialize = "Sat")]
    Saturday,
    /// Sunday
    #[strum(to_string = "Sunday", serialize = "Sun")]
    Sunday,
}

impl DayOfWeek {
    /// Zero-based position in the week, Monday = 0.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the day at the given zero-based position, Monday = 0.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Monday),
            1 => Some(Self::Tuesday),
            2 => Some(Self::Wednesday),
            3 => Some(Self::Thursday),
            4 => Some(Self::Friday),
            5 => Some(Self::Saturday),
            6 => Some(Self::Sunday),
            _ => None,
        }
    }

    /// Returns all variants of this enum, Monday first.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Monday,
            Self::Tuesday,
            Self::Wednesday,
            Self::Thursday,
            Self::Friday,
            Self::Saturday,
            Self::Sunday,
        ]
    }
}

/// Error returned when an incident's time fields are out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidIncidentError {
    /// Month outside 1-12.
    #[error("month {0} is out of range 1-12")]
    MonthOutOfRange(u8),

    /// Hour outside 0-23.
    #[error("hour {0} is out of range 0-23")]
    HourOutOfRange(u8),
}

/// A single incident record.
///
/// Only constructible through [`Incident::try_new`], so `month` is always
/// 1-12 and `hour` always 0-23.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct Incident {
    /// Police district code exactly as it appeared in the source row.
    pub district_code: String,
    /// Parsed district, `None` when the code is blank or not one of the
    /// twelve mapped districts.
    pub district: Option<District>,
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1-12.
    pub month: u8,
    /// Day of the week.
    pub day_of_week: DayOfWeek,
    /// Hour of the day, 0-23.
    pub hour: u8,
    /// Offense code group (e.g. `"Larceny"`).
    pub category: String,
}

impl Incident {
    /// Creates an incident, resolving the district from its raw code.
    ///
    /// # Errors
    ///
    /// * If `month` is outside 1-12
    /// * If `hour` is outside 0-23
    pub fn try_new(
        district_code: &str,
        year: i32,
        month: u8,
        day_of_week: DayOfWeek,
        hour: u8,
        category: &str,
    ) -> Result<Self, InvalidIncidentError> {
        if !(1..=12).contains(&month) {
            return Err(InvalidIncidentError::MonthOutOfRange(month));
        }
        if hour > 23 {
            return Err(InvalidIncidentError::HourOutOfRange(hour));
        }

        Ok(Self {
            district_code: district_code.to_string(),
            district: District::from_code(district_code),
            year,
            month,
            day_of_week,
            hour,
            category: category.to_string(),
        })
    }

    /// Neighborhood name this incident is displayed under, if its district
    /// is mapped.
    #[must_use]
    pub fn neighborhood(&self) -> Option<&'static str> {
        self.district.map(District::neighborhood_name)
    }
}
