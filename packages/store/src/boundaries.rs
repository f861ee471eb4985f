//! Neighborhood boundary reader.
//!
//! Reads a `GeoJSON` `FeatureCollection` whose features carry the
//! neighborhood name in their `Name` property. Features with a missing name
//! or a non-polygonal geometry are skipped; duplicate names are rejected
//! since the name is the join key for every geographic aggregate.

use std::collections::BTreeSet;
use std::path::Path;

use crime_dashboard_geography_models::Neighborhood;
use geo::MultiPolygon;
use geojson::{Feature, GeoJson};

use crate::StoreError;

/// Feature property holding the neighborhood name.
pub const NAME_PROPERTY: &str = "Name";

/// Loads neighborhood boundaries from a `GeoJSON` file.
///
/// # Errors
///
/// Returns [`StoreError`] if the file cannot be read, is not a valid
/// `FeatureCollection`, or contains duplicate neighborhood names.
pub fn load_neighborhoods(path: &Path) -> Result<Vec<Neighborhood>, StoreError> {
    let data = std::fs::read_to_string(path)?;
    parse_neighborhoods(&data)
}

/// Parses neighborhood boundaries from `GeoJSON` text.
///
/// # Errors
///
/// Returns [`StoreError`] if the text is not a valid `FeatureCollection` or
/// contains duplicate neighborhood names.
pub fn parse_neighborhoods(data: &str) -> Result<Vec<Neighborhood>, StoreError> {
    let geojson: GeoJson = data
        .parse()
        .map_err(|e| StoreError::GeoJson(Box::new(e)))?;

    let GeoJson::FeatureCollection(collection) = geojson else {
        return Err(StoreError::Boundary {
            message: "expected a FeatureCollection".to_string(),
        });
    };

    let mut seen = BTreeSet::new();
    let mut neighborhoods = Vec::with_capacity(collection.features.len());

    for (index, feature) in collection.features.into_iter().enumerate() {
        let Some(name) = feature_name(&feature) else {
            log::warn!("Skipping boundary feature {index}: no '{NAME_PROPERTY}' property");
            continue;
        };

        let Some(geometry) = feature.geometry.and_then(to_multipolygon) else {
            log::warn!("Skipping boundary feature '{name}': geometry is not a polygon");
            continue;
        };

        if !seen.insert(name.clone()) {
            return Err(StoreError::DuplicateNeighborhood { name });
        }

        neighborhoods.push(Neighborhood { name, geometry });
    }

    Ok(neighborhoods)
}

/// Names of boundary polygons that no police district maps onto. Such
/// neighborhoods can never receive incidents.
#[must_use]
pub fn unmapped_neighborhoods(neighborhoods: &[Neighborhood]) -> Vec<&str> {
    neighborhoods
        .iter()
        .filter(|neighborhood| neighborhood.district().is_none())
        .map(|neighborhood| neighborhood.name.as_str())
        .collect()
}

fn feature_name(feature: &Feature) -> Option<String> {
    feature
        .property(NAME_PROPERTY)
        .and_then(serde_json::Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Converts a `GeoJSON` geometry into a [`MultiPolygon`].
/// Handles both `Polygon` and `MultiPolygon` geometry types.
fn to_multipolygon(geometry: geojson::Geometry) -> Option<MultiPolygon<f64>> {
    let geo_geom: geo::Geometry<f64> = geometry.try_into().ok()?;
    match geo_geom {
        geo::Geometry::MultiPolygon(mp) => Some(mp),
        geo::Geometry::Polygon(p) => Some(MultiPolygon(vec![p])),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = r#"{ "type": "Polygon", "coordinates": [[[-71.1, 42.3], [-71.0, 42.3], [-71.0, 42.4], [-71.1, 42.4], [-71.1, 42.3]]] }"#;

    fn feature(name: &str, geometry: &str) -> String {
        format!(r#"{{ "type": "Feature", "properties": {{ "Name": "{name}" }}, "geometry": {geometry} }}"#)
    }

    fn collection(features: &[String]) -> String {
        format!(
            r#"{{ "type": "FeatureCollection", "features": [{}] }}"#,
            features.join(",")
        )
    }

    #[test]
    fn parses_named_polygons() {
        let multi = r#"{ "type": "MultiPolygon", "coordinates": [[[[-71.2, 42.2], [-71.1, 42.2], [-71.1, 42.3], [-71.2, 42.2]]]] }"#;
        let data = collection(&[feature("Roxbury", SQUARE), feature("Brighton", multi)]);

        let neighborhoods = parse_neighborhoods(&data).unwrap();

        assert_eq!(neighborhoods.len(), 2);
        assert_eq!(neighborhoods[0].name, "Roxbury");
        assert_eq!(neighborhoods[0].geometry.0.len(), 1);
        assert_eq!(neighborhoods[1].name, "Brighton");
    }

    #[test]
    fn skips_unnamed_and_non_polygon_features() {
        let point = r#"{ "type": "Point", "coordinates": [-71.0, 42.3] }"#;
        let unnamed = format!(
            r#"{{ "type": "Feature", "properties": {{ "OBJECTID": 7 }}, "geometry": {SQUARE} }}"#
        );
        let data = collection(&[
            unnamed,
            feature("  ", SQUARE),
            feature("Fenway", point),
            feature("Mattapan", SQUARE),
        ]);

        let neighborhoods = parse_neighborhoods(&data).unwrap();

        assert_eq!(neighborhoods.len(), 1);
        assert_eq!(neighborhoods[0].name, "Mattapan");
    }

    #[test]
    fn rejects_duplicate_names() {
        let data = collection(&[feature("Downtown", SQUARE), feature("Downtown", SQUARE)]);
        assert!(matches!(
            parse_neighborhoods(&data),
            Err(StoreError::DuplicateNeighborhood { name }) if name == "Downtown"
        ));
    }

    #[test]
    fn rejects_non_collections() {
        assert!(matches!(
            parse_neighborhoods(SQUARE),
            Err(StoreError::Boundary { .. })
        ));
        assert!(matches!(
            parse_neighborhoods("not json"),
            Err(StoreError::GeoJson(_))
        ));
    }

    #[test]
    fn reports_neighborhoods_without_a_district() {
        let data = collection(&[
            feature("Roxbury", SQUARE),
            feature("Back Bay", SQUARE),
            feature("Dorchester", SQUARE),
            feature("Fenway", SQUARE),
        ]);
        let neighborhoods = parse_neighborhoods(&data).unwrap();

        assert_eq!(unmapped_neighborhoods(&neighborhoods), vec!["Back Bay", "Fenway"]);
    }
}
