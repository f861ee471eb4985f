//! Command-line arguments.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand};
use crime_dashboard_analytics_models::{FilterCriteria, GeoJoin, Selection, Span};

#[derive(Parser)]
#[command(
    name = "crime_dashboard",
    about = "Filter Boston crime incidents and print dashboard chart data as JSON"
)]
pub struct Cli {
    /// Config file (defaults to `dashboard.toml` if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Incident CSV file (overrides config and `CRIME_DASHBOARD_INCIDENTS`)
    #[arg(long, global = true)]
    pub incidents: Option<PathBuf>,
    /// Neighborhood boundary GeoJSON file (overrides config and
    /// `CRIME_DASHBOARD_BOUNDARIES`)
    #[arg(long, global = true)]
    pub boundaries: Option<PathBuf>,
    /// Pretty-print the JSON output
    #[arg(long, global = true)]
    pub pretty: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the years, months, neighborhoods and categories in the data
    Options,
    /// Incident counts per neighborhood with boundary polygons
    Map {
        #[command(flatten)]
        filter: FilterArgs,
        /// Neighborhood join mode: `complete` or `inner`
        #[arg(long, value_parser = parse_join)]
        join: Option<GeoJoin>,
    },
    /// Monthly incident counts
    Trend {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Incident counts by weekday and hour
    Heatmap {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Most frequent offense categories
    Top {
        #[command(flatten)]
        filter: FilterArgs,
        /// Number of categories to show
        #[arg(long)]
        limit: Option<usize>,
    },
    /// All four charts at once
    All {
        #[command(flatten)]
        filter: FilterArgs,
        /// Neighborhood join mode: `complete` or `inner`
        #[arg(long, value_parser = parse_join)]
        join: Option<GeoJoin>,
        /// Number of categories to show
        #[arg(long)]
        limit: Option<usize>,
    },
}

impl Commands {
    /// The filter flags of chart subcommands.
    #[must_use]
    pub const fn filter(&self) -> Option<&FilterArgs> {
        match self {
            Self::Options => None,
            Self::Map { filter, .. }
            | Self::Trend { filter }
            | Self::Heatmap { filter }
            | Self::Top { filter, .. }
            | Self::All { filter, .. } => Some(filter),
        }
    }
}

/// Filter flags shared by every chart subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Year or inclusive year range, e.g. `2016` or `2015-2017`
    #[arg(long, value_parser = parse_span::<i32>)]
    pub year: Option<Span<i32>>,
    /// Month or inclusive month range, e.g. `6` or `3-8`
    #[arg(long, value_parser = parse_span::<u8>)]
    pub month: Option<Span<u8>>,
    /// Neighborhood to include (repeatable)
    #[arg(long = "neighborhood")]
    pub neighborhoods: Vec<String>,
    /// Offense category to include (repeatable)
    #[arg(long = "category")]
    pub categories: Vec<String>,
}

impl FilterArgs {
    /// Converts the flags into filter criteria. Omitted flags leave their
    /// dimension unconstrained.
    #[must_use]
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria::default()
            .with_year(self.year.unwrap_or_default())
            .with_month(self.month.unwrap_or_default())
            .with_neighborhoods(selection(&self.neighborhoods))
            .with_categories(selection(&self.categories))
    }
}

fn selection(values: &[String]) -> Selection {
    if values.is_empty() {
        Selection::Unconstrained
    } else {
        Selection::of(values.iter().cloned())
    }
}

/// Parses `N` as a single value and `LO-HI` as an inclusive range.
///
/// # Errors
///
/// * If either bound is not a valid number
pub fn parse_span<T: FromStr + Copy>(value: &str) -> Result<Span<T>, String> {
    let parse = |s: &str| {
        s.trim()
            .parse::<T>()
            .map_err(|_| format!("'{}' is not a valid number", s.trim()))
    };

    match value.split_once('-') {
        Some((lo, hi)) => Ok(Span::Range {
            lo: parse(lo)?,
            hi: parse(hi)?,
        }),
        None => Ok(Span::Single(parse(value)?)),
    }
}

/// Parses a neighborhood join mode (`complete` or `inner`).
///
/// # Errors
///
/// * If `value` names no join mode
pub fn parse_join(value: &str) -> Result<GeoJoin, String> {
    value
        .trim()
        .parse::<GeoJoin>()
        .map_err(|e| format!("'{}' is not a join mode (complete, inner): {e}", value.trim()))
}
