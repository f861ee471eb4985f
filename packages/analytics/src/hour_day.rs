//! Weekday by hour incident grid.

use crime_dashboard_analytics_models::HourDayMatrix;
use crime_dashboard_crime_models::Incident;

/// Counts incidents into the fixed 7x24 grid.
#[must_use]
pub fn aggregate_hour_day(filtered: &[&Incident]) -> HourDayMatrix {
    let mut matrix = HourDayMatrix::new();
    for incident in filtered {
        matrix.record(incident.day_of_week, incident.hour);
    }
    matrix
}
