//! One query per dashboard chart.
//!
//! Each query validates the criteria, filters the store's incidents with the
//! variant of the criteria that chart uses, and reduces the result into a
//! serializable payload:
//!
//! * the choropleth ignores the neighborhood selection when filtering and
//!   applies it as a display mask instead,
//! * the trend line ignores the month selection so it always spans whole
//!   years,
//! * the heatmap and the category bars use every dimension.

use crime_dashboard_analytics_models::{
    CategoryChart, ChoroplethChart, DEFAULT_TOP_N, Dashboard, FilterCriteria, GeoJoin,
    HeatmapChart, TrendChart,
};
use crime_dashboard_crime_models::Incident;
use crime_dashboard_store::RecordStore;

use crate::{AnalyticsError, filter, hour_day, ranking, region, time};

/// Knobs for [`dashboard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    /// How the choropleth joins counts onto neighborhoods.
    pub geo_join: GeoJoin,
    /// Number of bars in the category chart.
    pub top_n: usize,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            geo_join: GeoJoin::default(),
            top_n: DEFAULT_TOP_N,
        }
    }
}

fn filtered<'a>(store: &'a RecordStore, criteria: &FilterCriteria, chart: &str) -> Vec<&'a Incident> {
    let rows = filter::apply(store.all_incidents(), criteria);
    log::debug!(
        "{chart}: {} of {} incidents match",
        rows.len(),
        store.all_incidents().len()
    );
    rows
}

/// Incident counts per neighborhood, with the polygons to shade.
///
/// # Errors
///
/// * If the criteria are invalid
pub fn choropleth(
    store: &RecordStore,
    criteria: &FilterCriteria,
    join: GeoJoin,
) -> Result<ChoroplethChart, AnalyticsError> {
    criteria.validate()?;

    let rows = filtered(store, &criteria.without_neighborhoods(), "map");
    let counts = region::aggregate_by_region(
        &rows,
        store.all_neighborhoods(),
        &criteria.neighborhoods,
        join,
    );
    let features = region::feature_collection(&counts, store.all_neighborhoods());

    Ok(ChoroplethChart { counts, features })
}

/// Monthly incident counts.
///
/// # Errors
///
/// * If the criteria are invalid
pub fn trend(store: &RecordStore, criteria: &FilterCriteria) -> Result<TrendChart, AnalyticsError> {
    criteria.validate()?;

    let rows = filtered(store, &criteria.without_month(), "trend");
    let single_year = criteria.single_year();
    let series = time::aggregate_by_month(&rows);

    Ok(TrendChart {
        single_year,
        points: time::trend_points(&series, single_year),
    })
}

/// Incident counts by weekday and hour.
///
/// # Errors
///
/// * If the criteria are invalid
pub fn heatmap(
    store: &RecordStore,
    criteria: &FilterCriteria,
) -> Result<HeatmapChart, AnalyticsError> {
    criteria.validate()?;

    let rows = filtered(store, criteria, "heatmap");
    let matrix = hour_day::aggregate_hour_day(&rows);

    Ok(HeatmapChart {
        cells: matrix.cells().collect(),
        max_count: matrix.max(),
    })
}

/// The `limit` most frequent offense categories.
///
/// # Errors
///
/// * If the criteria are invalid
pub fn top_categories(
    store: &RecordStore,
    criteria: &FilterCriteria,
    limit: usize,
) -> Result<CategoryChart, AnalyticsError> {
    criteria.validate()?;

    let rows = filtered(store, criteria, "top categories");
    let ranked = ranking::rank_categories(&rows, limit);

    Ok(CategoryChart {
        displayed_incidents: ranked.rows.len() as u64,
        ranking: ranked.ranking,
    })
}

/// Computes all four charts for the same criteria.
///
/// # Errors
///
/// * If the criteria are invalid
pub fn dashboard(
    store: &RecordStore,
    criteria: &FilterCriteria,
    options: QueryOptions,
) -> Result<Dashboard, AnalyticsError> {
    criteria.validate()?;

    Ok(Dashboard {
        criteria: criteria.clone(),
        map: choropleth(store, criteria, options.geo_join)?,
        trend: trend(store, criteria)?,
        heatmap: heatmap(store, criteria)?,
        top_categories: top_categories(store, criteria, options.top_n)?,
    })
}

#[cfg(test)]
mod tests {
    use crime_dashboard_analytics_models::{InvalidCriteriaError, Selection, Span};
    use crime_dashboard_crime_models::DayOfWeek;
    use crime_dashboard_geography_models::Neighborhood;
    use geo::{MultiPolygon, polygon};

    use super::*;

    fn neighborhood(name: &str) -> Neighborhood {
        Neighborhood {
            name: name.to_string(),
            geometry: MultiPolygon(vec![polygon![
                (x: 0.0, y: 0.0),
                (x: 1.0, y: 0.0),
                (x: 1.0, y: 1.0),
                (x: 0.0, y: 0.0),
            ]]),
        }
    }

    fn store() -> RecordStore {
        RecordStore::from_parts(
            vec![
                Incident::try_new("D14", 2015, 6, DayOfWeek::Monday, 10, "Larceny").unwrap(),
                Incident::try_new("D14", 2015, 6, DayOfWeek::Monday, 10, "Larceny").unwrap(),
                Incident::try_new("B2", 2016, 1, DayOfWeek::Tuesday, 14, "Vandalism").unwrap(),
                Incident::try_new("B2", 2015, 2, DayOfWeek::Sunday, 23, "Towed").unwrap(),
            ],
            vec![
                neighborhood("Brighton"),
                neighborhood("Roxbury"),
                neighborhood("Mattapan"),
            ],
        )
    }

    #[test]
    fn choropleth_masks_instead_of_filtering() {
        let store = store();
        let criteria = FilterCriteria::default()
            .with_year(Span::Single(2015))
            .with_neighborhoods(Selection::of(["Roxbury"]));

        let chart = choropleth(&store, &criteria, GeoJoin::Complete).unwrap();

        assert_eq!(chart.counts.get("Brighton"), Some(None));
        assert_eq!(chart.counts.get("Roxbury"), Some(Some(1)));
        assert_eq!(chart.counts.get("Mattapan"), Some(None));
        assert_eq!(chart.features.features.len(), 3);
    }

    #[test]
    fn choropleth_inner_join_drops_empty_neighborhoods() {
        let store = store();
        let chart = choropleth(&store, &FilterCriteria::unconstrained(), GeoJoin::Inner).unwrap();

        assert_eq!(chart.counts.len(), 2);
        assert_eq!(chart.counts.get("Mattapan"), None);
        assert_eq!(chart.features.features.len(), 2);
    }

    #[test]
    fn trend_ignores_month_selection() {
        let store = store();
        let criteria = FilterCriteria::default()
            .with_year(Span::Single(2015))
            .with_month(Span::Single(6));

        let chart = trend(&store, &criteria).unwrap();

        assert!(chart.single_year);
        let labels: Vec<&str> = chart.points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["Feb", "Jun"]);
        assert_eq!(chart.points[1].count, 2);
    }

    #[test]
    fn trend_labels_include_year_across_years() {
        let store = store();
        let chart = trend(&store, &FilterCriteria::unconstrained()).unwrap();

        assert!(!chart.single_year);
        let labels: Vec<&str> = chart.points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["Feb 15", "Jun 15", "Jan 16"]);
    }

    #[test]
    fn heatmap_uses_every_dimension() {
        let store = store();
        let criteria = FilterCriteria::default().with_neighborhoods(Selection::of(["Brighton"]));

        let chart = heatmap(&store, &criteria).unwrap();

        assert_eq!(chart.cells.len(), 168);
        assert_eq!(chart.max_count, 2);
        assert_eq!(chart.cells.iter().map(|c| c.count).sum::<u64>(), 2);
    }

    #[test]
    fn top_categories_counts_displayed_rows() {
        let store = store();

        let chart = top_categories(&store, &FilterCriteria::unconstrained(), 2).unwrap();

        assert_eq!(chart.ranking.0.len(), 2);
        assert_eq!(chart.ranking.0[0].category, "Larceny");
        assert_eq!(chart.ranking.0[1].category, "Vandalism");
        assert_eq!(chart.displayed_incidents, 3);
    }

    #[test]
    fn empty_result_is_not_an_error() {
        let store = store();
        let criteria = FilterCriteria::default().with_year(Span::Single(1999));

        let dashboard = dashboard(&store, &criteria, QueryOptions::default()).unwrap();

        assert!(dashboard.trend.points.is_empty());
        assert!(dashboard.top_categories.ranking.0.is_empty());
        assert_eq!(dashboard.heatmap.max_count, 0);
        assert!(dashboard.map.counts.iter().all(|(_, count)| count == Some(0)));
    }

    #[test]
    fn rejects_invalid_criteria() {
        let store = store();
        let criteria = FilterCriteria::default().with_year(Span::Range { lo: 2018, hi: 2015 });

        let result = dashboard(&store, &criteria, QueryOptions::default());

        assert!(matches!(
            result,
            Err(AnalyticsError::InvalidCriteria(
                InvalidCriteriaError::InvertedYearRange { lo: 2018, hi: 2015 }
            ))
        ));
    }
}
