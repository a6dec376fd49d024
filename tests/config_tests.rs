//! Tests for loading the site configuration from YAML files

use std::io::Write;
use tempfile::NamedTempFile;
use wedding::config::SiteConfig;
use wedding::core::error::ConfigError;

const SITE_YAML: &str = r#"
server:
  bind: "0.0.0.0:8080"
merchant:
  key: "09261139680"
  name: "Pauline Cerqueira Barbosa"
  city: "Cataguases"
storage:
  bucket: "fotos-casamento"
  public_base_url: "https://cdn.example.com"
  max_upload_bytes: 1048576
rsvp:
  max_plus_ones: 3
"#;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_from_file() {
    let file = write_config(SITE_YAML);
    let config = SiteConfig::from_yaml_file(file.path()).unwrap();

    assert_eq!(config.server.bind, "0.0.0.0:8080");
    assert_eq!(config.merchant.city, "Cataguases");
    assert_eq!(config.storage.bucket, "fotos-casamento");
    assert_eq!(config.storage.max_upload_bytes, 1024 * 1024);
    assert_eq!(config.rsvp.max_plus_ones, 3);
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = SiteConfig::from_yaml_file(dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound { .. }));
}

#[test]
fn test_parse_error_names_file() {
    let file = write_config("server: [unclosed");
    let err = SiteConfig::from_yaml_file(file.path()).unwrap_err();

    match err {
        ConfigError::ParseError { file: Some(path), .. } => {
            assert_eq!(path, file.path().display().to_string());
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_invalid_merchant_rejected_on_load() {
    let file = write_config(&SITE_YAML.replace("\"09261139680\"", "\"\""));
    let err = SiteConfig::from_yaml_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { field, .. } if field == "merchant.key"));
}

#[test]
fn test_zero_upload_limit_rejected() {
    let file = write_config(&SITE_YAML.replace("1048576", "0"));
    assert!(SiteConfig::from_yaml_file(file.path()).is_err());
}
