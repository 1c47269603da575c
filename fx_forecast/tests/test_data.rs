use chrono::NaiveDate;
use fx_forecast::config::ColumnMap;
use fx_forecast::data::DataLoader;
use fx_forecast::diagnosis::Outcome;
use fx_forecast::error::ForecastError;
use pretty_assertions::assert_eq;
use std::io::Write;
use tempfile::NamedTempFile;

fn day(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, m, d).unwrap()
}

#[test]
fn test_forecast_table_from_csv() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Fecha,DXY estimado,yhat_lower,yhat_upper,Dispersión,Confianza").unwrap();
    writeln!(file, "2025-09-11,97.42,96.10,98.80,2.70,0.18").unwrap();
    writeln!(file, "2025-09-10,97.35,96.05,98.65,2.60,0.19").unwrap();
    writeln!(file, "2025-09-12,97.50,95.90,99.10,,0.16").unwrap();

    let table = DataLoader::forecast_table(file.path(), &ColumnMap::default()).unwrap();

    assert_eq!(table.len(), 3);
    assert_eq!(table.first_date(), Some(day(9, 10)));
    let row = table.get(day(9, 12)).unwrap();
    assert_eq!(row.dispersion, None);
    assert_eq!(row.confidence, Some(0.16));
    assert_eq!(row.real, None);
    // Falls back to the band when the precomputed width is blank
    assert!((row.dispersion().unwrap() - 3.2).abs() < 1e-9);
}

#[test]
fn test_custom_column_names() {
    let csv = "date,actual,forecast\n2025-07-01,97.1,97.0\n2025-07-02,97.3,97.4\n";
    let columns = ColumnMap {
        date: "date".to_string(),
        real: "actual".to_string(),
        predicted: "forecast".to_string(),
        ..ColumnMap::default()
    };

    let table = DataLoader::forecast_table_from_reader(csv.as_bytes(), &columns).unwrap();
    let (real, predicted) = table.realized();
    assert_eq!(real, vec![97.1, 97.3]);
    assert_eq!(predicted, vec![97.0, 97.4]);
}

#[test]
fn test_header_match_ignores_case() {
    let csv = "FECHA,dxy ESTIMADO\n2025-07-01,97.0\n";
    let table = DataLoader::forecast_table_from_reader(csv.as_bytes(), &ColumnMap::default()).unwrap();
    assert_eq!(table.len(), 1);
}

#[test]
fn test_missing_required_column() {
    let csv = "Fecha,DXY real\n2025-07-01,97.1\n";
    let result = DataLoader::forecast_table_from_reader(csv.as_bytes(), &ColumnMap::default());

    match result {
        Err(ForecastError::MissingField { field, date }) => {
            assert_eq!(field, "DXY estimado");
            assert_eq!(date, None);
        }
        other => panic!("Expected MissingField, got {:?}", other),
    }
}

#[test]
fn test_rows_without_prediction_are_skipped() {
    let csv = "Fecha,DXY estimado\n2025-07-01,97.0\n2025-07-02,\n2025-07-03,n/a\n";
    let table = DataLoader::forecast_table_from_reader(csv.as_bytes(), &ColumnMap::default()).unwrap();
    assert_eq!(table.len(), 1);
}

#[test]
fn test_duplicate_dates_in_file() {
    let csv = "Fecha,DXY estimado\n2025-07-01,97.0\n2025-07-01,97.2\n";
    let result = DataLoader::forecast_table_from_reader(csv.as_bytes(), &ColumnMap::default());
    assert!(matches!(result, Err(ForecastError::DuplicateDate(_))));
}

#[test]
fn test_bad_date_is_data_error() {
    let csv = "Fecha,DXY estimado\nyesterday,97.0\n";
    let result = DataLoader::forecast_table_from_reader(csv.as_bytes(), &ColumnMap::default());
    assert!(matches!(result, Err(ForecastError::DataError(_))));
}

#[test]
fn test_nonexistent_file() {
    let result = DataLoader::forecast_table("nonexistent_file.csv", &ColumnMap::default());
    assert!(matches!(result, Err(ForecastError::IoError(_))));
}

#[test]
fn test_scenario_table_from_csv() {
    let csv = "\
Fecha,DXY_neutro,DXY_positivo,DXY_negativo,yhat_lower,yhat_upper,Confianza
2026-01-05,98.20,99.10,96.80,97.00,99.40,0.21
2026-01-06,98.25,,96.90,97.10,99.50,0.20
";
    let table = DataLoader::scenario_table_from_reader(csv.as_bytes(), &ColumnMap::default()).unwrap();

    assert_eq!(table.len(), 1);
    let point = table.get(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()).unwrap();
    assert_eq!(point.positive, 99.10);
    assert_eq!(point.upper, Some(99.40));
}

#[test]
fn test_outcome_log_from_csv() {
    let csv = "\
Fecha,DXY real,Acierto,Confianza
2025-07-02,97.10,❌,0.12
2025-07-01,96.90,✔️,0.17
2025-07-03,97.30,,0.15
";
    let log = DataLoader::outcome_log_from_reader(csv.as_bytes(), &ColumnMap::default()).unwrap();

    let outcomes: Vec<Outcome> = log.iter().map(|r| r.outcome).collect();
    assert_eq!(outcomes, vec![Outcome::Hit, Outcome::Miss, Outcome::Unmarked]);
    assert_eq!(log[0].date, day(7, 1));
    assert_eq!(log[1].confidence, Some(0.12));
}
