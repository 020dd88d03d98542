use std::io::Write;

use troupe::AppConfig;

#[test]
fn test_load_full_config_from_file() {
    let toml_content = r#"
[model]
provider = "groq"
model_id = "llama-3.3-70b-versatile"
api_key = "gsk-test-key"
max_tokens = 2048
temperature = 0.5

[reflection]
max_steps = 6
history_capacity = 5
"#;

    let mut tmp = tempfile::NamedTempFile::new().expect("create temp file");
    tmp.write_all(toml_content.as_bytes()).expect("write toml");

    let config = AppConfig::load(tmp.path()).expect("load config");

    assert_eq!(config.model.provider, "groq");
    assert_eq!(config.model.model_id, "llama-3.3-70b-versatile");
    assert_eq!(config.model.api_key, Some("gsk-test-key".to_string()));
    assert_eq!(config.model.max_tokens, 2048);
    assert_eq!(config.model.temperature, Some(0.5));
    assert_eq!(config.reflection.max_steps, 6);
    assert_eq!(config.reflection.history_capacity, 5);
}

#[test]
fn test_env_var_expansion_in_config() {
    std::env::set_var("TROUPE_TEST_API_KEY", "expanded-key-value");

    let toml_content = r#"
[model]
model_id = "m"
api_key = "${TROUPE_TEST_API_KEY}"
"#;

    let mut tmp = tempfile::NamedTempFile::new().expect("create temp file");
    tmp.write_all(toml_content.as_bytes()).expect("write toml");

    let config = AppConfig::load(tmp.path()).expect("load config");
    assert_eq!(config.model.api_key, Some("expanded-key-value".to_string()));

    std::env::remove_var("TROUPE_TEST_API_KEY");
}

#[test]
fn test_missing_file_is_config_not_found() {
    let err = AppConfig::load(std::path::Path::new("/nonexistent/troupe.toml")).unwrap_err();
    assert!(matches!(err, troupe::TroupeError::ConfigNotFound(_)));
}
