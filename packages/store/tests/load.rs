use std::io::Write as _;
use std::path::Path;

use crime_dashboard_store::progress::NullProgress;
use crime_dashboard_store::{LoadOptions, RecordStore, StoreError};

const INCIDENTS: &str = "\
INCIDENT_NUMBER,OFFENSE_CODE,OFFENSE_CODE_GROUP,DISTRICT,YEAR,MONTH,DAY_OF_WEEK,HOUR
I182070945,619,Larceny,D14,2018,9,Sunday,13
I182070943,1402,Vandalism,C11,2018,8,Tuesday,0
I182070941,3410,Towed,,2018,9,Monday,19
";

const BOUNDARIES: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {
      "type": "Feature",
      "properties": { "Name": "Brighton", "Acres": 1782.3 },
      "geometry": { "type": "Polygon", "coordinates": [[[-71.17, 42.34], [-71.13, 42.34], [-71.13, 42.37], [-71.17, 42.37], [-71.17, 42.34]]] }
    },
    {
      "type": "Feature",
      "properties": { "Name": "Dorchester", "Acres": 4662.8 },
      "geometry": { "type": "Polygon", "coordinates": [[[-71.08, 42.28], [-71.04, 42.28], [-71.04, 42.32], [-71.08, 42.32], [-71.08, 42.28]]] }
    }
  ]
}"#;

fn write_file(dir: &Path, name: &str, contents: &[u8]) -> std::path::PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents).unwrap();
    path
}

#[test]
fn loads_both_sources() {
    let dir = tempfile::tempdir().unwrap();
    let incidents = write_file(dir.path(), "crime.csv", INCIDENTS.as_bytes());
    let boundaries = write_file(dir.path(), "boundaries.geojson", BOUNDARIES.as_bytes());

    let store = RecordStore::load(
        &incidents,
        &boundaries,
        LoadOptions::default(),
        &NullProgress,
    )
    .unwrap();

    assert_eq!(store.all_incidents().len(), 3);
    assert_eq!(store.all_incidents()[0].neighborhood(), Some("Brighton"));
    assert_eq!(store.all_incidents()[2].neighborhood(), None);

    let names: Vec<&str> = store
        .all_neighborhoods()
        .iter()
        .map(|n| n.name.as_str())
        .collect();
    assert_eq!(names, vec!["Brighton", "Dorchester"]);
}

#[test]
fn missing_incident_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let boundaries = write_file(dir.path(), "boundaries.geojson", BOUNDARIES.as_bytes());

    let result = RecordStore::load(
        &dir.path().join("missing.csv"),
        &boundaries,
        LoadOptions::default(),
        &NullProgress,
    );

    assert!(matches!(result, Err(StoreError::Io(_))));
}

#[test]
fn malformed_boundary_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let incidents = write_file(dir.path(), "crime.csv", INCIDENTS.as_bytes());
    let boundaries = write_file(dir.path(), "boundaries.geojson", b"{ \"type\": ");

    let result = RecordStore::load(
        &incidents,
        &boundaries,
        LoadOptions::default(),
        &NullProgress,
    );

    assert!(matches!(result, Err(StoreError::GeoJson(_))));
}

#[test]
fn tolerates_latin1_incident_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut data = b"DISTRICT;YEAR;MONTH;DAY_OF_WEEK;HOUR;OFFENSE_CODE_GROUP;STREET\n".to_vec();
    data.extend_from_slice(b"A7;2016;2;Saturday;4;Auto Theft;MAVERICK SQ \xC9\n");
    let incidents = write_file(dir.path(), "crime.csv", &data);
    let boundaries = write_file(dir.path(), "boundaries.geojson", BOUNDARIES.as_bytes());

    let store = RecordStore::load(
        &incidents,
        &boundaries,
        LoadOptions { delimiter: b';' },
        &NullProgress,
    )
    .unwrap();

    assert_eq!(store.all_incidents().len(), 1);
    assert_eq!(store.all_incidents()[0].neighborhood(), Some("East Boston"));
}
