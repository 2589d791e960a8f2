use super::*;

#[test]
fn from_values_defaults() {
    let cfg = AppConfig::from_values(None, None, None, None).unwrap();
    assert_eq!(cfg, AppConfig::default());
    assert_eq!(cfg.api_url, DEFAULT_API_URL);
    assert_eq!(cfg.auth_backend, AuthBackendKind::Mock);
    assert_eq!(cfg.token_storage, TokenStorageKind::Local);
    assert_eq!(cfg.request_timeout_ms, 10_000);
}

#[test]
fn from_values_parses_overrides() {
    let cfg = AppConfig::from_values(Some("https://api.example.test/"), Some("HTTP"), Some("cookie"), Some("2500"))
        .unwrap();
    assert_eq!(cfg.api_url, "https://api.example.test");
    assert_eq!(cfg.auth_backend, AuthBackendKind::Http);
    assert_eq!(cfg.token_storage, TokenStorageKind::Cookie);
    assert_eq!(cfg.request_timeout_ms, 2500);
}

#[test]
fn blank_values_fall_back_to_defaults() {
    let cfg = AppConfig::from_values(Some("  "), Some(""), Some(" "), Some("")).unwrap();
    assert_eq!(cfg, AppConfig::default());
}

#[test]
fn rejects_unknown_backend() {
    assert_eq!(
        AppConfig::from_values(None, Some("ldap"), None, None),
        Err(ConfigError::UnknownAuthBackend("ldap".to_owned()))
    );
}

#[test]
fn rejects_unknown_storage() {
    assert_eq!(
        AppConfig::from_values(None, None, Some("indexeddb"), None),
        Err(ConfigError::UnknownTokenStorage("indexeddb".to_owned()))
    );
}

#[test]
fn rejects_zero_or_garbage_timeout() {
    assert_eq!(
        AppConfig::from_values(None, None, None, Some("0")),
        Err(ConfigError::InvalidTimeout("0".to_owned()))
    );
    assert_eq!(
        AppConfig::from_values(None, None, None, Some("soon")),
        Err(ConfigError::InvalidTimeout("soon".to_owned()))
    );
}

#[test]
fn rejects_non_http_api_url() {
    assert_eq!(
        AppConfig::from_values(Some("ftp://files"), None, None, None),
        Err(ConfigError::InvalidApiUrl("ftp://files".to_owned()))
    );
}

#[test]
fn query_timings_match_cache_windows() {
    let timings = QueryTimings::default();
    assert_eq!(timings.list_stale_ms, 120_000);
    assert_eq!(timings.counts_stale_ms, 60_000);
    assert_eq!(timings.gc_ms, 300_000);
    assert_eq!(timings.read_retries, 1);
}

#[test]
fn build_env_without_hydrate_uses_memory_storage() {
    let cfg = AppConfig::from_build_env();
    assert_eq!(cfg.token_storage, TokenStorageKind::Memory);
}
