use approx::assert_relative_eq;
use chrono::NaiveDate;
use fx_forecast::config::{EvaluatorConfig, ZeroRealPolicy};
use fx_forecast::data::{ForecastTable, TimeSeriesPoint};
use fx_forecast::error::ForecastError;
use fx_forecast::metrics::{directional_accuracy, evaluate, evaluate_table, Evaluator};
use rstest::rstest;

#[rstest]
#[case(vec![], vec![])]
#[case(vec![104.2], vec![104.0])]
fn test_fewer_than_two_points(#[case] real: Vec<f64>, #[case] predicted: Vec<f64>) {
    let result = evaluate(&real, &predicted);
    assert!(matches!(
        result,
        Err(ForecastError::InsufficientData { required: 2, .. })
    ));
}

#[test]
fn test_identical_series() {
    let series = vec![104.3, 104.9, 103.8, 103.8, 105.1];
    let report = evaluate(&series, &series).unwrap();

    assert_eq!(report.mae, 0.0);
    assert_eq!(report.rmse, 0.0);
    assert_eq!(report.bias, 0.0);
    assert_eq!(report.mape, Some(0.0));
    // The flat step matches itself too
    assert_eq!(report.directional_accuracy, 100.0);
}

#[test]
fn test_rmse_never_below_mae() {
    let real = vec![101.2, 102.8, 100.4, 99.9, 103.7, 104.1];
    let predicted = vec![101.0, 103.5, 101.9, 99.1, 102.2, 104.0];

    let report = evaluate(&real, &predicted).unwrap();
    assert!(report.rmse >= report.mae);
}

#[test]
fn test_direction_unchanged_by_constant_offset() {
    let real = vec![100.0, 101.0, 100.5, 102.0, 103.0];
    let predicted = vec![100.2, 100.8, 101.4, 101.9, 103.3];
    let shifted: Vec<f64> = predicted.iter().map(|p| p + 7.5).collect();

    let base = directional_accuracy(&real, &predicted).unwrap();
    let offset = directional_accuracy(&real, &shifted).unwrap();
    assert_relative_eq!(base, 75.0);
    assert_eq!(base, offset);
}

#[test]
fn test_zero_real_fails_by_default() {
    let result = evaluate(&[1.5, 0.0, 2.0], &[1.4, 0.1, 2.1]);
    assert!(matches!(
        result,
        Err(ForecastError::DivisionByZero { index: 1 })
    ));
}

#[test]
fn test_zero_real_excluded_from_mape_only() {
    let evaluator = Evaluator::new(EvaluatorConfig {
        zero_real: ZeroRealPolicy::Exclude,
    });
    let report = evaluator.evaluate(&[2.0, 0.0, 4.0], &[1.0, 0.5, 5.0]).unwrap();

    // 0.5 and 0.25 averaged over the two non-zero rows
    assert_relative_eq!(report.mape.unwrap(), 37.5, epsilon = 1e-12);
    // The zero row still counts everywhere else
    assert_relative_eq!(report.mae, 2.5 / 3.0, epsilon = 1e-12);
}

#[test]
fn test_bias_sign() {
    let over = evaluate(&[100.0, 100.0], &[101.0, 102.0]).unwrap();
    let under = evaluate(&[100.0, 100.0], &[99.0, 98.0]).unwrap();
    assert_relative_eq!(over.bias, 1.5);
    assert_relative_eq!(under.bias, -1.5);
}

#[test]
fn test_evaluate_table_excludes_unrealized_rows() {
    let day = |d| NaiveDate::from_ymd_opt(2025, 7, d).unwrap();
    let table = ForecastTable::new(vec![
        TimeSeriesPoint::new(day(1), 97.0).with_real(96.5).with_confidence(0.2),
        TimeSeriesPoint::new(day(2), 97.5).with_real(97.0).with_confidence(0.1),
        TimeSeriesPoint::new(day(3), 98.0).with_real(97.4),
        TimeSeriesPoint::new(day(4), 98.5),
    ])
    .unwrap();

    let report = evaluate_table(&table).unwrap();
    assert_eq!(report.points, 3);
    assert_relative_eq!(report.bias, (0.5 + 0.5 + 0.6) / 3.0, epsilon = 1e-12);
    assert_relative_eq!(report.mean_confidence.unwrap(), 0.15, epsilon = 1e-12);
    assert_relative_eq!(report.directional_accuracy, 100.0);
}

#[test]
fn test_evaluate_table_without_confidence() {
    let day = |d| NaiveDate::from_ymd_opt(2025, 7, d).unwrap();
    let table = ForecastTable::new(vec![
        TimeSeriesPoint::new(day(1), 97.0).with_real(96.5),
        TimeSeriesPoint::new(day(2), 97.5).with_real(97.0),
    ])
    .unwrap();

    assert_eq!(evaluate_table(&table).unwrap().mean_confidence, None);
}
