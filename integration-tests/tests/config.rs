use forwardgate_core::conf::{ConfigError, config_error_hint, load_config};
use integration_tests::harness::{capture_events, write_config};
use pretty_assertions::assert_eq;
use tracing::Level;

/// An empty block gets loopback-only defaults
#[test]
fn empty_block_uses_defaults() {
    // Arrange
    let file = write_config("forwarded {}\n");

    // Act
    let cfg = load_config(file.path()).expect("config should load");

    // Assert
    let resolver = &cfg.resolver;
    assert_eq!(resolver.networks().render(), "127.0.0.1/32,::1/128");
    assert!(!resolver.allow_empty_source());
    assert!(!resolver.use_forwarded());
    assert_eq!(resolver.for_header(), Some("X-Forwarded-For"));
    assert_eq!(resolver.proto_header(), Some("X-Forwarded-Proto"));
    assert!(!cfg.validation.has_warnings());
}

/// A catch-all network loads but is reported as a warning
#[test]
fn catch_all_network_warns() {
    // Arrange
    let file = write_config(
        r#"
forwarded {
  trusted_networks = "0.0.0.0/0"
}
"#,
    );

    // Act
    let (cfg, events) = capture_events(|| load_config(file.path()));

    // Assert
    let cfg = cfg.expect("config should load");
    assert!(cfg.validation.has_warnings());
    assert!(cfg.resolver.is_trusted_source("198.51.100.7:1"));
    assert!(
        events.iter().any(|e| e.level == Level::WARN),
        "expected a warning event"
    );
    assert!(
        events
            .iter()
            .any(|e| e.message() == Some("configuration loaded")),
        "expected the load to be logged"
    );
}

/// Malformed networks are a hard failure with a hint
#[test]
fn malformed_network_is_rejected() {
    // Arrange
    let file = write_config(
        r#"
forwarded {
  trusted_networks = "10.0.0.0/33"
}
"#,
    );

    // Act
    let err = load_config(file.path()).expect_err("config should fail");

    // Assert
    assert!(matches!(err, ConfigError::InvalidTrustedNetworks { .. }));
    assert!(config_error_hint(&err).is_some());
}

/// Unknown fields are rejected at parse time
#[test]
fn unknown_field_is_rejected() {
    // Arrange
    let file = write_config(
        r#"
forwarded {
  trusted_proxies = "10.0.0.0/8"
}
"#,
    );

    // Act
    let err = load_config(file.path()).expect_err("config should fail");

    // Assert
    assert!(matches!(err, ConfigError::Parse { .. }));
}

/// A blank network list fails at load time instead of trusting nobody
#[test]
fn blank_trusted_networks_are_rejected() {
    // Arrange
    let file = write_config(
        r#"
forwarded {
  trusted_networks   = ""
  allow_empty_source = true
}
"#,
    );

    // Act
    let err = load_config(file.path()).expect_err("config should fail");

    // Assert
    assert!(matches!(err, ConfigError::InvalidTrustedNetworks { .. }));
}
