use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;
use zone_geojson::{
    convert, ConvertOptions, DirectorySink, MemorySink, NumericPolicy, RowErrorPolicy, ZoneError,
    ZoneMode,
};

const TWO_ROWS: &str = "district,ward,geometry,area,status
1,Ben Nghe,\"(106.70,10.77 106.71,10.78 106.70,10.77)\",1.2,Ok
1,Da Kao,\"(106.69,10.79 106.70,10.80 106.69,10.79)\",0.9,no
";

fn write_csv(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("wards.csv");
    fs::write(&path, contents).unwrap();
    path
}

fn run(input: PathBuf, mode: ZoneMode) -> (&'static str, serde_json::Value) {
    let mut sink = MemorySink::default();
    let file_name = convert(&ConvertOptions::new(input, mode), &mut sink).unwrap();
    assert_eq!(sink.files.len(), 1);
    let json = serde_json::from_slice(&sink.files[file_name]).unwrap();
    (file_name, json)
}

#[test]
fn non_flagged_mode_keeps_the_other_rows() {
    let dir = tempfile::tempdir().unwrap();
    let (file_name, json) = run(write_csv(&dir, TWO_ROWS), ZoneMode::NonFlagged);

    assert_eq!(file_name, "non_FD_zone.geojson");
    let features = json["features"].as_array().unwrap();
    assert_eq!(features.len(), 1);
    assert_eq!(features[0]["properties"]["name"], "District 1 - Ward Da Kao");
    assert_eq!(features[0]["geometry"]["type"], "Polygon");
}

#[test]
fn flagged_mode_keeps_ok_rows() {
    let dir = tempfile::tempdir().unwrap();
    let (file_name, json) = run(write_csv(&dir, TWO_ROWS), ZoneMode::Flagged);

    assert_eq!(file_name, "FD_zone.geojson");
    let features = json["features"].as_array().unwrap();
    assert_eq!(features.len(), 1);
    assert_eq!(features[0]["properties"]["name"], "District 1 - Ward Ben Nghe");
    assert_eq!(
        features[0]["geometry"]["coordinates"],
        serde_json::json!([[[106.70, 10.77], [106.71, 10.78], [106.70, 10.77]]])
    );
    assert_eq!(json["name_vi"], "Việt Nam");
}

#[test]
fn grouping_merges_wards_into_a_multipolygon() {
    let dir = tempfile::tempdir().unwrap();
    let csv = "district,ward,geometry,area,status
1,a,\"(0,0 1,0 1,1 0,0)\",,no
1,b,\"(2,2 3,2 3,3 2,2)\",,no
4,c,\"(5,5 6,5 6,6 5,5)\",,no
";
    let mut options = ConvertOptions::new(write_csv(&dir, csv), ZoneMode::NonFlagged);
    options.group_districts = true;

    let mut sink = MemorySink::default();
    let file_name = convert(&options, &mut sink).unwrap();
    let json: serde_json::Value = serde_json::from_slice(&sink.files[file_name]).unwrap();

    let features = json["features"].as_array().unwrap();
    assert_eq!(features.len(), 2);
    assert_eq!(features[0]["geometry"]["type"], "MultiPolygon");
    assert_eq!(features[0]["geometry"]["coordinates"].as_array().unwrap().len(), 2);
    assert_eq!(features[1]["geometry"]["type"], "Polygon");
}

#[test]
fn bad_coordinate_fails_unless_zero_filled() {
    let dir = tempfile::tempdir().unwrap();
    let csv = "district,ward,geometry,area,status\n1,a,\"(x,2.0 3.0,4.0)\",,no\n";
    let input = write_csv(&dir, csv);

    let mut sink = MemorySink::default();
    let err = convert(&ConvertOptions::new(&input, ZoneMode::NonFlagged), &mut sink).unwrap_err();
    assert!(matches!(err, ZoneError::Coordinate { line: 2, .. }));
    assert!(sink.files.is_empty());

    let mut options = ConvertOptions::new(&input, ZoneMode::NonFlagged);
    options.numeric_policy = NumericPolicy::ZeroFill;
    let file_name = convert(&options, &mut sink).unwrap();
    let json: serde_json::Value = serde_json::from_slice(&sink.files[file_name]).unwrap();
    assert_eq!(
        json["features"][0]["geometry"]["coordinates"],
        serde_json::json!([[[0.0, 2.0], [3.0, 4.0]]])
    );
}

#[test]
fn malformed_row_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let csv = "district,ward,geometry,area,status\n1,a,\"(0,0 1,1)\"\n";
    let input = write_csv(&dir, csv);

    let mut sink = DirectorySink::new(dir.path());
    let err = convert(&ConvertOptions::new(&input, ZoneMode::NonFlagged), &mut sink).unwrap_err();
    assert!(matches!(err, ZoneError::ShortRow { line: 2, found: 3 }));
    assert!(!dir.path().join("non_FD_zone.geojson").exists());

    let mut options = ConvertOptions::new(&input, ZoneMode::NonFlagged);
    options.row_policy = RowErrorPolicy::Skip;
    convert(&options, &mut sink).unwrap();
    let written = fs::read_to_string(dir.path().join("non_FD_zone.geojson")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(json["features"], serde_json::json!([]));
}

#[test]
fn missing_input_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = MemorySink::default();
    let err = convert(
        &ConvertOptions::new(dir.path().join("nope.csv"), ZoneMode::Flagged),
        &mut sink,
    )
    .unwrap_err();
    assert!(matches!(err, ZoneError::Io { .. }));
}
