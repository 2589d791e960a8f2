use super::*;

#[test]
fn defaults_when_unset() {
    let cfg = ServerConfig::from_values(None, None).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.log_filter, DEFAULT_LOG_FILTER);
}

#[test]
fn blank_values_fall_back_to_defaults() {
    let cfg = ServerConfig::from_values(Some("  "), Some("")).unwrap();
    assert_eq!(cfg, ServerConfig { port: DEFAULT_PORT, log_filter: DEFAULT_LOG_FILTER.to_owned() });
}

#[test]
fn explicit_values_are_used() {
    let cfg = ServerConfig::from_values(Some("8080"), Some("debug")).unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.log_filter, "debug");
}

#[test]
fn invalid_port_is_rejected() {
    assert_eq!(ServerConfig::from_values(Some("http"), None), Err(ConfigError::InvalidPort("http".to_owned())));
    assert_eq!(ServerConfig::from_values(Some("70000"), None), Err(ConfigError::InvalidPort("70000".to_owned())));
}
