use super::*;
use crate::schema::HenotaceConfig;

#[test]
fn default_config_is_valid() {
    assert!(validate(&HenotaceConfig::default()).is_ok());
}

#[test]
fn collects_every_error() {
    let mut config = HenotaceConfig::default();
    config.api.retries = 11;
    config.api.timeout_secs = 0;
    config.tutor.compression.max_turns = 0;

    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("api.retries = 11"));
    assert!(err.contains("api.timeout_secs = 0"));
    assert!(err.contains("tutor.compression.max_turns = 0"));
}

#[test]
fn rejects_non_http_base_url() {
    for bad in ["", "ftp://example.com", "api.henotace.ai", "https://"] {
        let mut config = HenotaceConfig::default();
        config.api.base_url = bad.into();
        assert!(validate(&config).is_err(), "{bad:?} should be rejected");
    }
}

#[test]
fn accepts_local_http_base_url() {
    let mut config = HenotaceConfig::default();
    config.api.base_url = "http://127.0.0.1:8000".into();
    assert!(validate(&config).is_ok());
}

#[test]
fn summary_bound_has_a_floor() {
    let mut config = HenotaceConfig::default();
    config.tutor.compression.max_summary_chars = 10;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("max_summary_chars"));
}
