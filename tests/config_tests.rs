use std::collections::HashMap;
use std::fs;

use myadmin_rs::config::{Config, ENV_PASSWORD, ENV_URI, ENV_USERNAME, ENV_WIRE_FORMAT};
use myadmin_rs::{MyAdminApiClient, WireFormat, DEFAULT_SERVER_URL};
use tempfile::tempdir;

#[test]
fn test_config_from_path_with_valid_file() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    let config_content = r#"
[myadmin]
username = "test_user"
password = "test_pass"
uri = "https://myadminapitest.geotab.com/v2/MyAdminApi.ashx"
wire_format = "form"
timeout_secs = 15
"#;

    fs::write(&config_path, config_content).unwrap();

    let config = Config::from_path(&config_path).unwrap();
    let options = config.client_options();

    assert_eq!(options.username.as_deref(), Some("test_user"));
    assert_eq!(options.password.as_deref(), Some("test_pass"));
    assert_eq!(
        options.uri.as_deref(),
        Some("https://myadminapitest.geotab.com/v2/MyAdminApi.ashx")
    );
    assert_eq!(options.wire_format, WireFormat::Form);
    assert!(options.api_key.is_none());
    assert_eq!(config.myadmin.timeout_secs, Some(15));
}

#[test]
fn test_config_defaults_optional_fields() {
    let config = Config::from_toml_str(
        r#"
[myadmin]
username = "test_user"
password = "test_pass"
"#,
    )
    .unwrap();

    assert_eq!(config.myadmin.options.wire_format, WireFormat::Json);
    assert!(config.myadmin.timeout_secs.is_none());

    let client = MyAdminApiClient::new(config.client_options()).unwrap();
    assert_eq!(client.server_url(), DEFAULT_SERVER_URL);
}

#[test]
fn test_config_from_path_with_missing_file() {
    let dir = tempdir().unwrap();

    let result = Config::from_path(dir.path().join("config.toml"));

    assert!(result.is_err());
}

#[test]
fn test_config_with_invalid_toml() {
    let invalid_content = r#"
[myadmin
username = "test_user"
"#;

    assert!(Config::from_toml_str(invalid_content).is_err());
}

#[test]
fn test_config_from_lookup() {
    let vars: HashMap<&str, &str> = HashMap::from([
        (ENV_USERNAME, "env_user"),
        (ENV_PASSWORD, "env_pass"),
        (ENV_URI, "https://sandbox.example/MyAdminApi.ashx"),
        (ENV_WIRE_FORMAT, "JSON"),
    ]);

    let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string())).unwrap();
    let options = config.client_options();

    assert_eq!(options.username.as_deref(), Some("env_user"));
    assert_eq!(options.password.as_deref(), Some("env_pass"));
    assert_eq!(
        options.uri.as_deref(),
        Some("https://sandbox.example/MyAdminApi.ashx")
    );
    assert_eq!(options.wire_format, WireFormat::Json);
    assert!(options.session_id.is_none());
}

#[test]
fn test_config_from_lookup_rejects_unknown_wire_format() {
    let result = Config::from_lookup(|key| (key == ENV_WIRE_FORMAT).then(|| "xml".to_string()));

    assert!(result.is_err());
}

#[test]
fn test_config_debug_redacts_password() {
    let config = Config::from_toml_str(
        r#"
[myadmin]
username = "test_user"
password = "hunter2"
"#,
    )
    .unwrap();

    let printed = format!("{config:?}");
    assert!(printed.contains("test_user"));
    assert!(!printed.contains("hunter2"));
}
