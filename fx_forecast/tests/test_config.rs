use fx_forecast::config::{DashboardConfig, ZeroRealPolicy};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_load_config_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[paths]
forecasts = "data/forecasts.csv"

[evaluator]
zero_real = "exclude"

[diagnosis]
high_hit_rate = 85.0

[spot]
series_id = "DEXUSEU"
timeout_secs = 5
"#
    )
    .unwrap();

    let config = DashboardConfig::load(file.path()).unwrap();
    assert_eq!(config.paths.forecasts.to_str(), Some("data/forecasts.csv"));
    assert_eq!(config.evaluator.zero_real, ZeroRealPolicy::Exclude);
    assert_eq!(config.diagnosis.high_hit_rate, 85.0);
    assert_eq!(config.diagnosis.moderate_hit_rate, 65.0);
    assert_eq!(config.spot.timeout_secs, 5);
}

#[test]
fn test_missing_config_file() {
    assert!(DashboardConfig::load("/nonexistent/dashboard.toml").is_err());
}

#[test]
fn test_zero_timeout_rejected() {
    assert!(DashboardConfig::from_toml_str("[spot]\ntimeout_secs = 0\n").is_err());
}
