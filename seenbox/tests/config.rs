use seenbox::{ConfigError, DEFAULT_CAPACITY, StoreConfig};

#[test]
fn test_config_deserialize() {
    let yaml = r#"
uri: "mongodb://localhost:27017"
database: scraper
collection: pastes
cache_capacity: 500
"#;

    let config = StoreConfig::from_yaml_str(yaml).expect("failed to load config");

    assert_eq!(config.uri, "mongodb://localhost:27017");
    assert_eq!(config.database, "scraper");
    assert_eq!(config.collection, "pastes");
    assert_eq!(config.cache_capacity, 500);
}

#[test]
fn test_cache_capacity_defaults() {
    let yaml = r#"
uri: "mongodb://localhost:27017"
database: scraper
collection: pastes
"#;

    let config = StoreConfig::from_yaml_str(yaml).expect("failed to load config");
    assert_eq!(config.cache_capacity, DEFAULT_CAPACITY);
    assert_eq!(config.cache_capacity, 250);
}

#[test]
fn test_missing_field_is_parse_error() {
    let yaml = r#"
uri: "mongodb://localhost:27017"
collection: pastes
"#;

    let err = StoreConfig::from_yaml_str(yaml).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)), "got {err:?}");
}

#[test]
fn test_empty_field_is_invalid() {
    let yaml = r#"
uri: ""
database: scraper
collection: pastes
"#;

    let err = StoreConfig::from_yaml_str(yaml).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)), "got {err:?}");
    assert!(err.to_string().contains("uri"));
}

#[test]
fn test_zero_capacity_is_invalid() {
    let config = StoreConfig::new("mongodb://localhost", "scraper", "pastes").with_cache_capacity(0);
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_missing_file() {
    let err = StoreConfig::from_path("/definitely/not/here/seenbox.yaml").unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }), "got {err:?}");
}

#[test]
fn test_connection_parameters() {
    let config = StoreConfig::new("mongodb://db:27017", "scraper", "pastes");
    let connection = config.connection();

    assert_eq!(connection.uri, "mongodb://db:27017");
    assert_eq!(connection.database, "scraper");
    assert_eq!(connection.collection, "pastes");
    assert_eq!(StoreConfig::from(connection), config);
}
