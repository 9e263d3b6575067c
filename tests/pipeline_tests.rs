use std::{fs, sync::Arc};

use roleta::{
    Pipeline,
    config::{Config, ReferenceSource},
    engine::Direction,
    identity::IdentityResolver,
    reference::StaticReferenceData,
    store::Database,
};
use tempfile::TempDir;

fn fixture_path() -> String {
    format!("{}/tests/data/two_trips.xml", env!("CARGO_MANIFEST_DIR"))
}

fn pipeline_with_driver() -> Pipeline {
    let database = Database::in_memory().unwrap();
    database.insert_person(951716, Some("123.456.789-09")).unwrap();
    Pipeline::new(
        Config::default(),
        Arc::new(StaticReferenceData::embedded().unwrap()),
        Arc::new(IdentityResolver::new(database)),
    )
}

#[test]
fn run_fixture_test() {
    let pipeline = pipeline_with_driver();
    let btcs = roleta::btc::Btcs::from_path(fixture_path()).unwrap();
    let rows = pipeline.run(&btcs).unwrap();
    assert_eq!(rows.len(), 3);

    let first = &rows[0];
    assert_eq!(first.route_code, "1001");
    assert_eq!(first.direction, Direction::Outbound);
    assert_eq!(first.paying, 40);
    assert_eq!(first.elderly, 10);
    assert_eq!(first.free_pass, 10);
    assert_eq!(first.elapsed.to_hms_string(), "01:30:00");
    assert!(first.distance_km > 0);
    assert!(first.average_speed_kmh > 0);
    assert_eq!(first.vehicle_plate, "JHX-0E23");
    assert_eq!(first.driver_document, "12345678909");

    let second = &rows[1];
    assert_eq!(second.direction, Direction::Return);
    assert_eq!(second.open_latitude, first.close_latitude);
    assert_eq!(second.elapsed.to_hms_string(), "01:15:00");

    let third = &rows[2];
    assert_eq!(third.route_code, "");
    assert_eq!(third.distance_km, 0);
    assert_eq!(third.average_speed_kmh, 0);
    assert_eq!(third.vehicle_plate, "9999");
    assert_eq!(third.driver_document, "");
}

#[test]
fn runs_do_not_share_directions_test() {
    let pipeline = pipeline_with_driver();
    let btcs = roleta::btc::Btcs::from_path(fixture_path()).unwrap();
    let first_run = pipeline.run(&btcs).unwrap();
    let second_run = pipeline.run(&btcs).unwrap();
    assert_eq!(first_run, second_run);
}

#[test]
fn convert_writes_report_test() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("output.csv");
    let written = pipeline_with_driver().convert(fixture_path(), &output).unwrap();
    assert_eq!(written, output);

    let text = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("EMPRESA;"));
    assert!(lines[1].contains(";GO-DF;15/01/2024;08:00:00;09:30:00;40;10;10;"));
    assert!(lines[2].contains(";DF-GO;"));
}

#[test]
fn convert_to_writer_counts_rows_test() {
    let mut buf = Vec::new();
    let count = pipeline_with_driver()
        .convert_to_writer(fixture_path(), &mut buf)
        .unwrap();
    assert_eq!(count, 3);
    assert_eq!(String::from_utf8(buf).unwrap().lines().count(), 4);
}

#[test]
fn malformed_input_leaves_no_report_test() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("input.xml");
    let output = dir.path().join("output.csv");
    fs::write(&input, "<btcs><btc><operacoes></btc>").unwrap();

    let result = pipeline_with_driver().convert(&input, &output);
    assert!(matches!(result, Err(roleta::Error::Input(_))));
    assert!(!output.exists());
}

#[test]
fn missing_input_test() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("output.csv");
    let result = pipeline_with_driver().convert(dir.path().join("missing.xml"), &output);
    assert!(result.is_err());
    assert!(!output.exists());
}

#[test]
fn invalid_timestamp_leaves_no_report_test() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("input.xml");
    let output = dir.path().join("output.csv");
    fs::write(
        &input,
        r#"<btcs><btc matdmtu="1"><operacoes>
            <operacao linha="1001" veiculo="1001" datainicio="yesterday" datafim="2024-01-15 09:00:00"/>
        </operacoes></btc></btcs>"#,
    )
    .unwrap();

    let result = pipeline_with_driver().convert(&input, &output);
    assert!(matches!(result, Err(roleta::Error::Trip(_))));
    assert!(!output.exists());
}

#[test]
fn from_config_without_database_test() {
    let config = Config {
        database_url: None,
        ..Default::default()
    };
    let (pipeline, database) = Pipeline::from_config(config).unwrap();
    assert!(database.is_none());
    let btcs = roleta::btc::Btcs::from_path(fixture_path()).unwrap();
    let rows = pipeline.run(&btcs).unwrap();
    assert!(rows.iter().all(|row| row.driver_document.is_empty()));
}

#[test]
fn from_config_database_references_test() {
    let dir = TempDir::new().unwrap();
    let url = format!("sqlite://{}", dir.path().join("roleta.db").display());
    let config = Config {
        database_url: Some(url),
        reference_source: ReferenceSource::Database,
        ..Default::default()
    };
    let (pipeline, database) = Pipeline::from_config(config).unwrap();
    let database = database.unwrap();
    assert_eq!(database.personnel_count().unwrap(), 0);

    let btcs = roleta::btc::Btcs::from_path(fixture_path()).unwrap();
    let rows = pipeline.run(&btcs).unwrap();
    assert!(rows.iter().all(|row| row.route_code.is_empty()));
}
