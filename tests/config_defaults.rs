use benchreport::config::{Config, REPORTS_LOG_FILENAME};
use benchreport::reporters::{JsonReporter, Reporter, RichTableReporter, Section};
use std::path::PathBuf;

#[test]
fn test_default_config_values() {
    let config = Config::default();

    assert_eq!(config.general.output_dir, PathBuf::from(".benchmarks"));
    assert!(config.general.reports_log);
    assert!(!config.general.verbose);
    assert!(config.table.virtual_width.is_none());
    assert!(config.json.full_data.is_none());
    assert!(config.graph.width.is_none());
    assert_eq!(
        config.reports_log_path(),
        Some(PathBuf::from(".benchmarks").join(REPORTS_LOG_FILENAME))
    );
}

#[test]
fn test_empty_file_uses_defaults() {
    let config = Config::parse("").unwrap();

    assert_eq!(config.general.output_dir, PathBuf::from(".benchmarks"));
    assert!(config.general.reports_log);
}

#[test]
fn test_generated_config_parses_back() {
    let mut config = Config::default();
    config.general.output_dir = PathBuf::from("bench-out");
    config.table.virtual_width = Some(100);

    let parsed = Config::parse(&config.to_toml()).unwrap();

    assert_eq!(parsed.general.output_dir, PathBuf::from("bench-out"));
    assert_eq!(parsed.table.virtual_width, Some(100));
    assert!(parsed.json.full_data.is_none());
}

#[test]
fn test_load_from_missing_file_fails() {
    let dir = tempfile::TempDir::new().unwrap();

    let result = Config::load_from_file(&dir.path().join("absent.toml"));

    assert!(result.is_err());
}

#[test]
fn test_load_from_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join(".benchreportrc.toml");
    std::fs::write(&path, "[general]\noutput_dir = \"reports\"\n").unwrap();

    let config = Config::load_from_file(&path).unwrap();

    assert_eq!(config.general.output_dir, PathBuf::from("reports"));
}

#[test]
fn test_default_runtime_uses_hardcoded_options() {
    let runtime = Config::default().to_runtime_config().unwrap();
    let table = RichTableReporter::new().unwrap();

    let options = table.get_default_options(&runtime).unwrap();

    assert!(std::sync::Arc::ptr_eq(
        &options,
        &table.get_hardcoded_default_options().unwrap()
    ));
}

#[test]
fn test_configured_width_reaches_table_options() {
    let config = Config::parse("[table]\nvirtual_width = 90\n").unwrap();
    let runtime = config.to_runtime_config().unwrap();
    let table = RichTableReporter::new().unwrap();

    let options = table.get_default_options(&runtime).unwrap();

    assert_eq!(options.as_table().unwrap().virtual_width(), Some(90));
}

#[test]
fn test_json_choice_with_options_ignores_configured_default() {
    let config = Config::parse("[json]\nfull_data = false\n").unwrap();
    let runtime = config.to_runtime_config().unwrap();
    let json = JsonReporter::new().unwrap();
    let choices = json.choices();
    let case = benchreport::Case::new("g", "t", "d").unwrap();

    let plain = json
        .get_prioritized_options(&case, choices.get("json").unwrap(), &runtime)
        .unwrap();
    let data = json
        .get_prioritized_options(&case, choices.get("json-data").unwrap(), &runtime)
        .unwrap();

    assert!(!plain.as_json().unwrap().full_data);
    assert!(data.as_json().unwrap().full_data);
    assert_eq!(
        json.config().sections().iter().copied().collect::<Vec<_>>(),
        vec![Section::Null]
    );
}
