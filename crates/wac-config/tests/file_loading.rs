//! Loading configuration files from disk.

use std::io::Write;

use tempfile::{Builder, NamedTempFile};
use wac_config::{ConfigError, ConfigLoader, LogFormat};

fn write_config(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_toml_file() {
    let file = write_config(
        ".toml",
        r#"
            [acl]
            suffix = ".meta"

            [fetch]
            timeout_ms = 2000

            [cache]
            ttl_secs = 30
            cache_not_found = false

            [evaluation]
            max_group_documents = 4

            [logging]
            level = "wac_authz=debug,info"
            format = "pretty"
        "#,
    );

    let loader = ConfigLoader::new().with_file(file.path()).unwrap();
    assert!(loader.file_loaded());
    let config = loader.load().unwrap();

    assert_eq!(config.acl.suffix, ".meta");
    assert_eq!(config.fetch.timeout_ms, 2000);
    assert_eq!(config.cache.ttl_secs, 30);
    assert!(!config.cache.cache_not_found);
    assert!(config.cache.enabled);
    assert_eq!(config.evaluation.max_group_documents, 4);
    assert_eq!(config.logging.format, LogFormat::Pretty);
    assert!(!config.metrics.enabled);
}

#[test]
fn test_load_json_file() {
    let file = write_config(
        ".json",
        r#"{
            "evaluation": { "check_groups": false },
            "metrics": { "enabled": true, "addr": "127.0.0.1:9464" }
        }"#,
    );

    let config = ConfigLoader::new()
        .with_file(file.path())
        .unwrap()
        .load()
        .unwrap();

    assert!(!config.evaluation.check_groups);
    assert!(config.metrics.enabled);
    assert_eq!(config.metrics.addr.as_deref(), Some("127.0.0.1:9464"));
}

#[test]
fn test_unknown_field_in_file_rejected() {
    let file = write_config(".toml", "[evaluation]\ncheck_group = false\n");

    let result = ConfigLoader::new().with_file(file.path());
    assert!(matches!(result, Err(ConfigError::TomlError(_))));
}

#[test]
fn test_unsupported_extension_rejected() {
    let file = write_config(".yaml", "acl:\n  suffix: .meta\n");

    let result = ConfigLoader::new().with_file(file.path());
    assert!(matches!(result, Err(ConfigError::ValidationError(_))));
}

#[test]
fn test_invalid_value_in_file_fails_on_load() {
    let file = write_config(".toml", "[metrics]\naddr = \"localhost\"\n");

    let result = ConfigLoader::new().with_file(file.path()).unwrap().load();
    match result {
        Err(ConfigError::InvalidValue { field, .. }) => assert_eq!(field, "metrics.addr"),
        other => panic!("expected invalid metrics.addr, got {other:?}"),
    }
}

#[test]
fn test_optional_file_present() {
    let file = write_config(".toml", "[acl]\nsuffix = \".access\"\n");

    let config = ConfigLoader::new()
        .with_optional_file(file.path())
        .unwrap()
        .load()
        .unwrap();
    assert_eq!(config.acl.suffix, ".access");
}
