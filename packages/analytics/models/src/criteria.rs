//! Filter criteria.
//!
//! Each dimension is a sum type rather than a loosely-typed value: a time
//! dimension is unconstrained, a single value, or an inclusive range; a
//! categorical dimension is unconstrained or a set of accepted values.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Constraint on an ordered dimension such as year or month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Span<T> {
    /// Matches every value.
    #[default]
    Unconstrained,
    /// Matches exactly one value.
    Single(T),
    /// Matches every value in `lo..=hi`.
    Range {
        /// Inclusive lower bound.
        lo: T,
        /// Inclusive upper bound.
        hi: T,
    },
}

impl<T: PartialOrd + Copy> Span<T> {
    /// Returns `true` if `value` satisfies this constraint.
    ///
    /// An inverted range (`lo > hi`) matches nothing.
    #[must_use]
    pub fn contains(&self, value: T) -> bool {
        match *self {
            Self::Unconstrained => true,
            Self::Single(v) => value == v,
            Self::Range { lo, hi } => lo <= value && value <= hi,
        }
    }

    /// Returns `true` if the span collapses to exactly one value.
    #[must_use]
    pub fn is_single(&self) -> bool {
        match *self {
            Self::Unconstrained => false,
            Self::Single(_) => true,
            Self::Range { lo, hi } => lo == hi,
        }
    }

    /// Returns `true` unless this is [`Span::Unconstrained`].
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !matches!(self, Self::Unconstrained)
    }

    /// Returns `(lo, hi)` of an inverted range, if this is one.
    fn inverted(&self) -> Option<(T, T)> {
        match *self {
            Self::Range { lo, hi } if lo > hi => Some((lo, hi)),
            _ => None,
        }
    }

    /// Returns the bounds of the span, if constrained.
    #[must_use]
    pub fn bounds(&self) -> Option<(T, T)> {
        match *self {
            Self::Unconstrained => None,
            Self::Single(v) => Some((v, v)),
            Self::Range { lo, hi } => Some((lo, hi)),
        }
    }
}

/// Constraint on a categorical dimension such as neighborhood or offense
/// category.
///
/// An empty [`Selection::Set`] is treated exactly like
/// [`Selection::Unconstrained`]: clearing every selection in the UI shows
/// everything rather than nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Selection {
    /// Matches every value.
    #[default]
    Unconstrained,
    /// Matches values in the set (or everything, if the set is empty).
    Set(BTreeSet<String>),
}

impl Selection {
    /// Creates a selection of the given values.
    pub fn of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Set(values.into_iter().map(Into::into).collect())
    }

    /// Returns `true` if this selection actually restricts anything.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Set(values) if !values.is_empty())
    }

    /// Returns `true` if `value` satisfies this selection.
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        match self {
            Self::Set(values) if !values.is_empty() => values.contains(value),
            _ => true,
        }
    }

    /// Returns the selected values when the selection is active.
    #[must_use]
    pub fn values(&self) -> Option<&BTreeSet<String>> {
        match self {
            Self::Set(values) if !values.is_empty() => Some(values),
            _ => None,
        }
    }
}

/// Error returned when [`FilterCriteria`] cannot describe a valid query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidCriteriaError {
    /// Year range with `lo > hi`.
    #[error("year range {lo}-{hi} is inverted")]
    InvertedYearRange {
        /// Lower bound given.
        lo: i32,
        /// Upper bound given.
        hi: i32,
    },

    /// Month range with `lo > hi`.
    #[error("month range {lo}-{hi} is inverted")]
    InvertedMonthRange {
        /// Lower bound given.
        lo: u8,
        /// Upper bound given.
        hi: u8,
    },

    /// Month bound outside 1-12.
    #[error("month {month} is out of range 1-12")]
    MonthOutOfRange {
        /// The offending month.
        month: u8,
    },
}

/// The user's current filter state across all four dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    /// Year constraint.
    pub year: Span<i32>,
    /// Month constraint (1-12).
    pub month: Span<u8>,
    /// Neighborhood name selection.
    pub neighborhoods: Selection,
    /// Offense category selection.
    pub categories: Selection,
}

impl FilterCriteria {
    /// Criteria that match every incident.
    #[must_use]
    pub fn unconstrained() -> Self {
        Self::default()
    }

    /// Sets the year constraint.
    #[must_use]
    pub fn with_year(mut self, year: Span<i32>) -> Self {
        self.year = year;
        self
    }

    /// Sets the month constraint.
    #[must_use]
    pub fn with_month(mut self, month: Span<u8>) -> Self {
        self.month = month;
        self
    }

    /// Sets the neighborhood selection.
    #[must_use]
    pub fn with_neighborhoods(mut self, neighborhoods: Selection) -> Self {
        self.neighborhoods = neighborhoods;
        self
    }

    /// Sets the category selection.
    #[must_use]
    pub fn with_categories(mut self, categories: Selection) -> Self {
        self.categories = categories;
        self
    }

    /// Copy of these criteria with the neighborhood dimension cleared.
    ///
    /// The choropleth filters rows on every other dimension and applies the
    /// neighborhood selection as a display mask instead.
    #[must_use]
    pub fn without_neighborhoods(&self) -> Self {
        Self {
            neighborhoods: Selection::Unconstrained,
            ..self.clone()
        }
    }

    /// Copy of these criteria with the month dimension cleared.
    ///
    /// The trend line always spans whole years.
    #[must_use]
    pub fn without_month(&self) -> Self {
        Self {
            month: Span::Unconstrained,
            ..self.clone()
        }
    }

    /// Returns `true` if the year constraint collapses to a single year.
    #[must_use]
    pub fn single_year(&self) -> bool {
        self.year.is_single()
    }

    /// Checks that every range is ordered and every month is in 1-12.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvalidCriteriaError`] found.
    pub fn validate(&self) -> Result<(), InvalidCriteriaError> {
        if let Some((lo, hi)) = self.year.inverted() {
            return Err(InvalidCriteriaError::InvertedYearRange { lo, hi });
        }
        if let Some((lo, hi)) = self.month.inverted() {
            return Err(InvalidCriteriaError::InvertedMonthRange { lo, hi });
        }
        if let Some((lo, hi)) = self.month.bounds() {
            for month in [lo, hi] {
                if !(1..=12).contains(&month) {
                    return Err(InvalidCriteriaError::MonthOutOfRange { month });
                }
            }
        }
        Ok(())
    }
}
