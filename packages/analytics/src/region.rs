//! Incident counts joined onto neighborhood polygons.

use std::collections::BTreeMap;

use crime_dashboard_analytics_models::{GeoCounts, GeoJoin, Selection};
use crime_dashboard_crime_models::Incident;
use crime_dashboard_geography_models::Neighborhood;
use geo::BoundingRect;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject};

/// Counts incidents per neighborhood name. Incidents without a mapped
/// district are not counted.
#[must_use]
pub fn count_by_neighborhood(filtered: &[&Incident]) -> BTreeMap<&'static str, u64> {
    let mut counts = BTreeMap::new();
    for name in filtered.iter().filter_map(|incident| incident.neighborhood()) {
        *counts.entry(name).or_insert(0) += 1;
    }
    counts
}

/// Joins per-neighborhood counts onto the boundary set.
///
/// Neighborhoods outside a non-empty `active_neighborhoods` selection are
/// kept with a `None` count so the map still draws their outline. With
/// [`GeoJoin::Inner`], neighborhoods that have no incidents are dropped
/// from the result; with [`GeoJoin::Complete`] they count zero.
#[must_use]
pub fn aggregate_by_region(
    filtered: &[&Incident],
    neighborhoods: &[Neighborhood],
    active_neighborhoods: &Selection,
    join: GeoJoin,
) -> GeoCounts {
    let counts = count_by_neighborhood(filtered);

    for name in counts.keys() {
        if !neighborhoods.iter().any(|n| n.name == *name) {
            log::debug!("No boundary polygon for neighborhood '{name}'");
        }
    }

    let mut result = BTreeMap::new();
    for neighborhood in neighborhoods {
        let count = counts.get(neighborhood.name.as_str()).copied();
        if join == GeoJoin::Inner && count.is_none() {
            continue;
        }

        let value = if active_neighborhoods.contains(&neighborhood.name) {
            Some(count.unwrap_or(0))
        } else {
            None
        };
        result.insert(neighborhood.name.clone(), value);
    }

    GeoCounts(result)
}

/// Builds the choropleth `FeatureCollection`: one feature per neighborhood
/// present in `counts`, in boundary-file order, carrying `Name` and
/// `count` properties.
#[must_use]
pub fn feature_collection(counts: &GeoCounts, neighborhoods: &[Neighborhood]) -> FeatureCollection {
    let features = neighborhoods
        .iter()
        .filter_map(|neighborhood| {
            let count = counts.get(&neighborhood.name)?;

            let mut properties = JsonObject::new();
            properties.insert(
                "Name".to_string(),
                serde_json::Value::from(neighborhood.name.as_str()),
            );
            properties.insert(
                "count".to_string(),
                count.map_or(serde_json::Value::Null, serde_json::Value::from),
            );

            let bbox = neighborhood
                .geometry
                .bounding_rect()
                .map(|rect| vec![rect.min().x, rect.min().y, rect.max().x, rect.max().y]);

            Some(Feature {
                bbox,
                geometry: Some(Geometry::new(geojson::Value::from(&neighborhood.geometry))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            })
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}
