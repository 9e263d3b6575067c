use chrono::{NaiveDate, NaiveTime};
use roleta::{
    engine::{Direction, EnrichedTripRow, SpeedBand},
    report::{self, HEADERS},
    shared::time::Duration,
};
use tempfile::TempDir;

fn row() -> EnrichedTripRow {
    EnrichedTripRow {
        company: "Amazonia Inter Turismo LTDA".into(),
        prefix: "12073070".into(),
        route_code: "1001".into(),
        direction: Direction::Return,
        trip_date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(9, 30, 5).unwrap(),
        paying: 40,
        elderly: 10,
        free_pass: 10,
        other_gratuity: 0,
        total_passengers: 50,
        cash_paid: 10,
        electronic_paid: 30,
        distance_km: 71,
        elapsed: Duration::from_seconds(5405),
        average_speed_kmh: 48,
        open_latitude: "-15.7936645".into(),
        open_longitude: "-47.8829638".into(),
        close_latitude: "-15.43488062".into(),
        close_longitude: "-47.6108282".into(),
        vehicle_plate: "JHX-0E23".into(),
        driver_document: "12345678909".into(),
        speed_band: SpeedBand::Accepted,
    }
}

#[test]
fn header_only_test() {
    let mut buf = Vec::new();
    report::write_rows(&mut buf, &[]).unwrap();
    let text = String::from_utf8(buf).unwrap();
    assert_eq!(text, format!("{}\n", HEADERS.join(";")));
}

#[test]
fn row_layout_test() {
    let mut buf = Vec::new();
    report::write_rows(&mut buf, &[row()]).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("EMPRESA;PREFIXO;CODIGO_LINHA;SENTIDO;"));
    assert!(lines[0].ends_with(";VEICULO_NUMERO;CPF_RODOVIARIO"));
    assert_eq!(
        lines[1],
        "Amazonia Inter Turismo LTDA;12073070;1001;DF-GO;05/01/2024;08:00:00;09:30:05;\
         40;10;10;0;50;10;30;71;01:30:05;48;\
         -15.7936645;-47.8829638;-15.43488062;-47.6108282;JHX-0E23;12345678909"
    );
}

#[test]
fn blank_fields_stay_empty_test() {
    let mut row = row();
    row.route_code.clear();
    row.driver_document.clear();
    let mut buf = Vec::new();
    report::write_rows(&mut buf, &[row]).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let fields: Vec<&str> = text.lines().nth(1).unwrap().split(';').collect();
    assert_eq!(fields.len(), HEADERS.len());
    assert_eq!(fields[2], "");
    assert_eq!(fields[22], "");
}

#[test]
fn write_to_path_test() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("output.csv");
    let written = report::write_to_path(&path, &[row(), row()]).unwrap();
    assert_eq!(written, path);
    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 3);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}
