//! Config Tests

use rewind_client::config::{DEFAULT_HOST, DEFAULT_PORT};
use rewind_client::{Config, RewindError};

#[test]
fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.host, DEFAULT_HOST);
    assert_eq!(config.port, DEFAULT_PORT);
    assert_eq!(config.port, 7000);
    assert!(config.enabled);
    assert!(config.nodelay);
    assert!(!config.end_marker);
    assert_eq!(config.addr(), "127.0.0.1:7000");
}

#[test]
fn test_builder_overrides() {
    let config = Config::builder()
        .host("192.168.1.2")
        .port(7001)
        .connect_timeout_ms(250)
        .write_timeout_ms(100)
        .nodelay(false)
        .enabled(false)
        .end_marker(true)
        .build();

    assert_eq!(config.addr(), "192.168.1.2:7001");
    assert_eq!(config.connect_timeout_ms, 250);
    assert_eq!(config.write_timeout_ms, 100);
    assert!(!config.nodelay);
    assert!(!config.enabled);
    assert!(config.end_marker);
}

#[test]
fn test_validate() {
    assert!(Config::default().validate().is_ok());

    let empty_host = Config::builder().host("  ").build();
    assert!(matches!(empty_host.validate(), Err(RewindError::Config(_))));

    let zero_port = Config::builder().port(0).build();
    assert!(matches!(zero_port.validate(), Err(RewindError::Config(_))));
}
