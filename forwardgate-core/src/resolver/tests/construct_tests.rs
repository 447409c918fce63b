use crate::net::NetworkParseError;
use crate::resolver::TrustResolver;
use pretty_assertions::assert_eq;

#[test]
fn new_keeps_every_option() {
    // Act
    let resolver =
        TrustResolver::new("1.2.3.4, 192.168.4.0/24, 172.28.45.16/30", true, true, "Foo", "Bar")
            .unwrap();

    // Assert
    assert_eq!(resolver.networks().len(), 3);
    assert!(resolver.allow_empty_source());
    assert!(resolver.use_forwarded());
    assert_eq!(resolver.for_header(), Some("Foo"));
    assert_eq!(resolver.proto_header(), Some("Bar"));
}

#[test]
fn blank_header_names_are_unset() {
    let resolver = TrustResolver::new("10.0.0.0/8", false, false, "", "  ").unwrap();

    assert_eq!(resolver.for_header(), None);
    assert_eq!(resolver.proto_header(), None);
}

#[test]
fn network_errors_propagate_unchanged() {
    let err = TrustResolver::new("257.0.0.1", true, true, "Foo", "Bar").unwrap_err();

    assert_eq!(
        err,
        NetworkParseError::InvalidAddress {
            entry: "257.0.0.1".to_string()
        }
    );
}

#[test]
fn resolver_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TrustResolver>();
}
