use std::fs;
use std::path::{Path, PathBuf};

use routelog_core::error::PipelineError;
use routelog_core::ingestion::{
    discover_inputs, export_routes, ingest_directory, ingest_file, ingest_files, FileReport,
};
use routelog_core::routes::METERS_PER_MILE;
use routelog_parser::ParserError;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../routelog-parser/tests/data")
        .join(name)
}

fn file_names(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn discovery_is_sorted_non_recursive_and_json_only() {
    let inputs = discover_inputs(&fixture_path("takeout")).expect("discovery failed");

    assert_eq!(file_names(&inputs), ["2015_AUGUST.json", "2015_JULY.json"]);
}

#[test]
fn discovery_escapes_glob_characters_in_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    let odd = dir.path().join("exports [2015]");
    fs::create_dir(&odd).expect("create dir");
    fs::copy(
        fixture_path("takeout/2015_JULY.json"),
        odd.join("2015_JULY.json"),
    )
    .expect("copy fixture");

    let inputs = discover_inputs(&odd).expect("discovery failed");

    assert_eq!(file_names(&inputs), ["2015_JULY.json"]);
}

#[test]
fn discovery_skips_dotfiles() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::copy(
        fixture_path("takeout/2015_JULY.json"),
        dir.path().join("2015_JULY.json"),
    )
    .expect("copy fixture");
    fs::write(dir.path().join("._2015_JULY.json"), [0x00, 0x05, 0x16, 0x07, 0xff])
        .expect("write AppleDouble file");
    fs::write(dir.path().join(".hidden.json"), "not json").expect("write hidden file");

    let inputs = discover_inputs(dir.path()).expect("discovery failed");
    assert_eq!(file_names(&inputs), ["2015_JULY.json"]);

    let output = dir.path().join("routes.csv");
    let batch = export_routes(dir.path(), &output).expect("export failed");
    assert_eq!(batch.routes.len(), 2);
}

#[test]
fn ingest_file_reports_counts() {
    let path = fixture_path("takeout/2015_JULY.json");
    let (routes, report) = ingest_file(&path).expect("ingest failed");

    assert_eq!(
        report,
        FileReport {
            path: path.clone(),
            activities: 2,
            places: 3,
            untagged: 1,
            routes: 2,
        }
    );

    assert_eq!(routes[0].start_address.as_deref(), Some("123 Main St, Springfield, IL 62701"));
    assert_eq!(routes[0].end_address.as_deref(), Some("500 Market St, Springfield, IL 62701"));
    assert_eq!(routes[0].distance_in_miles, 16093.0 / METERS_PER_MILE);

    assert_eq!(routes[1].start_address.as_deref(), Some("500 Market St, Springfield, IL 62701"));
    assert_eq!(routes[1].end_address, None);
    assert_eq!(routes[1].distance_in_miles, 0.0);
}

#[test]
fn routes_concatenate_in_file_order() {
    let july = fixture_path("takeout/2015_JULY.json");
    let august = fixture_path("takeout/2015_AUGUST.json");

    let batch = ingest_files(&[&july, &august]).expect("ingest failed");

    let starts: Vec<&str> = batch
        .routes
        .iter()
        .map(|route| route.start_date.as_ref().unwrap().as_str())
        .collect();
    assert_eq!(
        starts,
        [
            "2015-07-31T08:00:00Z",
            "2015-07-31T17:00:00Z",
            "2015-08-01T07:00:00Z",
        ]
    );
    assert_eq!(batch.reports.len(), 2);
    assert_eq!(batch.reports[0].path, july);
    assert_eq!(batch.reports[1].path, august);
}

#[test]
fn places_only_match_within_their_own_document() {
    // The July park visit ends at 2015-08-01T07:00:00Z, but lives in another file.
    let batch = ingest_directory(&fixture_path("takeout")).expect("ingest failed");

    let august_route = batch
        .routes
        .iter()
        .find(|route| route.start_date.as_ref().map(|t| t.as_str()) == Some("2015-08-01T07:00:00Z"))
        .expect("missing August route");

    assert_eq!(august_route.start_address, None);
    assert_eq!(august_route.end_address.as_deref(), Some("Joe's \"Diner\", 2 Oak Ave"));
    assert_eq!(august_route.distance_in_miles, 1.0);
}

#[test]
fn directory_order_follows_enumeration() {
    let batch = ingest_directory(&fixture_path("takeout")).expect("ingest failed");

    let sources: Vec<&Path> = batch.reports.iter().map(|report| report.path.as_path()).collect();
    assert_eq!(sources.len(), 2);
    assert!(sources[0].ends_with("2015_AUGUST.json"));
    assert!(sources[1].ends_with("2015_JULY.json"));
    assert_eq!(batch.routes.len(), 3);
    assert_eq!(
        batch.routes[0].end_date.as_ref().map(|t| t.as_str()),
        Some("2015-08-01T07:20:00Z")
    );
}

#[test]
fn malformed_document_aborts_with_parse_error() {
    let err = ingest_directory(&fixture_path("malformed")).expect_err("broken JSON should fail");

    match err {
        PipelineError::Parse { path, source } => {
            assert!(path.ends_with("broken.json"));
            assert!(matches!(source, ParserError::Json { .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_file_is_an_io_error() {
    let err = ingest_files(&[fixture_path("takeout/2015_DECEMBER.json")])
        .expect_err("missing file should fail");

    assert!(matches!(err, PipelineError::Io { .. }));
    assert!(err.to_string().contains("2015_DECEMBER.json"));
}

#[test]
fn export_writes_header_for_empty_directory() {
    let input = tempfile::tempdir().expect("input dir");
    let output = tempfile::tempdir().expect("output dir");
    let csv_path = output.path().join("routes.csv");

    let batch = export_routes(input.path(), &csv_path).expect("export failed");

    assert!(batch.routes.is_empty());
    assert!(batch.reports.is_empty());
    assert_eq!(
        fs::read_to_string(&csv_path).expect("read CSV"),
        "start_date,end_date,start_address,end_address,distance_in_miles\r\n"
    );
}

#[test]
fn export_writes_all_routes() {
    let output = tempfile::tempdir().expect("output dir");
    let csv_path = output.path().join("routes.csv");

    export_routes(&fixture_path("takeout"), &csv_path).expect("export failed");

    let written = fs::read_to_string(&csv_path).expect("read CSV");
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(
        lines[1],
        r#"2015-08-01T07:00:00Z,2015-08-01T07:20:00Z,,"Joe's ""Diner"", 2 Oak Ave",1.0"#
    );
    assert_eq!(
        lines[3],
        r#"2015-07-31T17:00:00Z,2015-07-31T17:45:00Z,"500 Market St, Springfield, IL 62701",,0.0"#
    );
}

#[test]
fn failed_export_leaves_no_output() {
    let output = tempfile::tempdir().expect("output dir");
    let csv_path = output.path().join("routes.csv");

    assert!(export_routes(&fixture_path("malformed"), &csv_path).is_err());
    assert!(!csv_path.exists());
}
