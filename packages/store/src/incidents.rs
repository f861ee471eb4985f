//! Incident table reader.
//!
//! Parses the delimited incident export into [`Incident`] rows. Columns are
//! located by header name so the export may carry any number of extra
//! columns in any order. Free-text fields in the export are not guaranteed
//! to be UTF-8; fields that fail UTF-8 validation are decoded as Latin-1.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crime_dashboard_crime_models::{DayOfWeek, Incident};
use csv::{ByteRecord, ReaderBuilder};

use crate::StoreError;
use crate::progress::ProgressCallback;

/// Header of the police district column.
pub const DISTRICT_COLUMN: &str = "DISTRICT";
/// Header of the year column.
pub const YEAR_COLUMN: &str = "YEAR";
/// Header of the month column.
pub const MONTH_COLUMN: &str = "MONTH";
/// Header of the day-of-week column.
pub const DAY_OF_WEEK_COLUMN: &str = "DAY_OF_WEEK";
/// Header of the hour column.
pub const HOUR_COLUMN: &str = "HOUR";
/// Header of the offense category column.
pub const CATEGORY_COLUMN: &str = "OFFENSE_CODE_GROUP";

/// Rows between progress updates.
const PROGRESS_INTERVAL: u64 = 10_000;

/// Positions of the required columns within a row.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    district: usize,
    year: usize,
    month: usize,
    day_of_week: usize,
    hour: usize,
    category: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &ByteRecord) -> Result<Self, StoreError> {
        let find = |column: &'static str| {
            headers
                .iter()
                .position(|h| {
                    decode_field(h)
                        .trim()
                        .trim_start_matches('\u{feff}')
                        .eq_ignore_ascii_case(column)
                })
                .ok_or(StoreError::MissingColumn { column })
        };

        Ok(Self {
            district: find(DISTRICT_COLUMN)?,
            year: find(YEAR_COLUMN)?,
            month: find(MONTH_COLUMN)?,
            day_of_week: find(DAY_OF_WEEK_COLUMN)?,
            hour: find(HOUR_COLUMN)?,
            category: find(CATEGORY_COLUMN)?,
        })
    }
}

/// Decodes a raw field as UTF-8, falling back to Latin-1.
///
/// Every byte is a valid Latin-1 code point, so this never fails.
#[must_use]
pub fn decode_field(bytes: &[u8]) -> Cow<'_, str> {
    std::str::from_utf8(bytes).map_or_else(
        |_| Cow::Owned(bytes.iter().copied().map(char::from).collect()),
        Cow::Borrowed,
    )
}

/// Loads the incident table from a file.
///
/// # Errors
///
/// Returns [`StoreError`] if the file cannot be opened, a required column
/// is missing, or any row is malformed.
pub fn load_incidents(
    path: &Path,
    delimiter: u8,
    progress: &dyn ProgressCallback,
) -> Result<Vec<Incident>, StoreError> {
    let file = File::open(path)?;
    if let Ok(metadata) = file.metadata() {
        progress.set_total(metadata.len());
    }
    progress.set_message(format!("Reading {}", path.display()));

    read_incidents(BufReader::new(file), delimiter, progress)
}

/// Reads the incident table from any reader.
///
/// Progress positions are reported in bytes consumed.
///
/// # Errors
///
/// Returns [`StoreError`] if a required column is missing, the data is not
/// valid delimited text, or any row is malformed.
pub fn read_incidents<R: Read>(
    reader: R,
    delimiter: u8,
    progress: &dyn ProgressCallback,
) -> Result<Vec<Incident>, StoreError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let columns = ColumnIndex::from_headers(reader.byte_headers()?)?;

    let mut incidents = Vec::new();
    let mut record = ByteRecord::new();
    let mut rows: u64 = 0;

    while reader.read_byte_record(&mut record)? {
        let line = record.position().map_or(rows + 2, csv::Position::line);
        incidents.push(parse_row(&record, columns, line)?);
        rows += 1;

        if rows % PROGRESS_INTERVAL == 0
            && let Some(position) = record.position()
        {
            progress.set_position(position.byte());
        }
    }

    progress.finish(format!("Read {} incidents", incidents.len()));
    Ok(incidents)
}

fn parse_row(record: &ByteRecord, columns: ColumnIndex, line: u64) -> Result<Incident, StoreError> {
    let field = |index: usize, column: &str| {
        record
            .get(index)
            .map(decode_field)
            .ok_or_else(|| StoreError::Malformed {
                line,
                message: format!("missing {column} field"),
            })
    };

    let year: i32 = parse_number(&field(columns.year, YEAR_COLUMN)?, YEAR_COLUMN, line)?;
    let month: u8 = parse_number(&field(columns.month, MONTH_COLUMN)?, MONTH_COLUMN, line)?;
    let hour: u8 = parse_number(&field(columns.hour, HOUR_COLUMN)?, HOUR_COLUMN, line)?;

    let day_raw = field(columns.day_of_week, DAY_OF_WEEK_COLUMN)?;
    let day_of_week: DayOfWeek = day_raw.trim().parse().map_err(|_| StoreError::Malformed {
        line,
        message: format!("unrecognized {DAY_OF_WEEK_COLUMN} '{}'", day_raw.trim()),
    })?;

    let district = field(columns.district, DISTRICT_COLUMN)?;
    let category = field(columns.category, CATEGORY_COLUMN)?;

    Incident::try_new(
        district.trim(),
        year,
        month,
        day_of_week,
        hour,
        category.trim(),
    )
    .map_err(|e| StoreError::Malformed {
        line,
        message: e.to_string(),
    })
}

fn parse_number<T: std::str::FromStr>(raw: &str, column: &str, line: u64) -> Result<T, StoreError>
where
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e| StoreError::Malformed {
        line,
        message: format!("invalid {column} '{}': {e}", raw.trim()),
    })
}
