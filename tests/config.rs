use tripclock::config::{Config, OutputFormat};
use tripclock::utils::datetime;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.calculator.zone, "America/New_York");
    assert_eq!(config.calculator.timestamp_format, datetime::CIVIL_TIMESTAMP_FORMAT);
    assert!(!config.calculator.strict);
    assert_eq!(config.output.format, OutputFormat::Text);
    assert!(!config.logging.enabled);
    assert_eq!(config.logging.level, "warn");
}

#[test]
fn test_config_validation() {
    let mut config = Config::default();

    // Valid config should pass
    assert!(config.validate().is_ok());

    // Unknown zone should fail
    config.calculator.zone = "America/Atlantis".to_string();
    assert!(config.validate().is_err());

    // Reset and test a format without a date
    config.calculator.zone = "Europe/London".to_string();
    config.calculator.timestamp_format = "%H:%M".to_string();
    assert!(config.validate().is_err());

    // Unknown specifier
    config.calculator.timestamp_format = "%Y-%m-%d %Q".to_string();
    assert!(config.validate().is_err());

    // An hour without minutes would be read back as midnight
    config.calculator.timestamp_format = "%Y-%m-%d %H".to_string();
    assert!(config.validate().is_err());

    // Minutes without seconds keep every field shown
    config.calculator.timestamp_format = "%m/%d/%Y %H:%M".to_string();
    assert!(config.validate().is_ok());

    // Date-only formats are fine
    config.calculator.timestamp_format = "%m/%d/%Y".to_string();
    assert!(config.validate().is_ok());

    config.logging.level = "loud".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_config_serialization() {
    let config = Config::default();
    let toml_str = toml::to_string_pretty(&config).unwrap();
    assert!(toml_str.contains("zone = \"America/New_York\""));
    assert!(toml_str.contains("format = \"text\""));
}

#[test]
fn test_partial_config_deserialization() {
    // Test that partial TOML configs merge with defaults
    let partial_toml = r#"
[calculator]
zone = "Europe/London"

[output]
format = "json"

[logging]
enabled = true
"#;

    let config: Config = toml::from_str(partial_toml).unwrap();

    // Check that specified values are used
    assert_eq!(config.calculator.zone, "Europe/London");
    assert_eq!(config.output.format, OutputFormat::Json);
    assert!(config.logging.enabled);

    // Check that unspecified values use defaults
    assert_eq!(config.calculator.timestamp_format, datetime::CIVIL_TIMESTAMP_FORMAT);
    assert!(!config.calculator.strict);
    assert_eq!(config.logging.level, "warn");
}

#[test]
fn test_empty_config_deserialization() {
    let config: Config = toml::from_str("").unwrap();
    let default_config = Config::default();

    assert_eq!(config.calculator.zone, default_config.calculator.zone);
    assert_eq!(
        config.calculator.timestamp_format,
        default_config.calculator.timestamp_format
    );
    assert_eq!(config.logging.enabled, default_config.logging.enabled);
}

#[test]
fn test_load_from_file_rejects_invalid_zone() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tripclock.toml");
    std::fs::write(&path, "[calculator]\nzone = \"Nowhere/Special\"\n").unwrap();

    let err = Config::load_from_file(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("Nowhere/Special"));
}

#[test]
fn test_generate_config_creates_directory() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("nested").join("config.toml");
    assert!(!config_path.parent().unwrap().exists());

    Config::generate_default_config(&config_path).unwrap();

    assert!(config_path.exists());
    let content = std::fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("# tripclock Configuration File"));
    assert!(content.contains("zone = \"America/New_York\""));

    // The generated file loads back and validates
    let loaded = Config::load_from_file(&config_path).unwrap();
    assert_eq!(loaded.calculator.zone, "America/New_York");
}
