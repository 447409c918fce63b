use crate::net::{PeerAddrError, PeerSource};
use pretty_assertions::assert_eq;
use std::net::IpAddr;

#[test]
fn parses_ip_with_and_without_port() {
    let expected = PeerSource::Ip("1.2.3.4".parse::<IpAddr>().unwrap());

    assert_eq!("1.2.3.4:1234".parse::<PeerSource>(), Ok(expected));
    assert_eq!("1.2.3.4".parse::<PeerSource>(), Ok(expected));
}

#[test]
fn parses_ipv6_with_and_without_port() {
    let expected = PeerSource::Ip("::1".parse::<IpAddr>().unwrap());

    assert_eq!("[::1]:8080".parse::<PeerSource>(), Ok(expected));
    assert_eq!("::1".parse::<PeerSource>(), Ok(expected));
}

#[test]
fn unix_socket_marker_is_an_empty_source() {
    let source: PeerSource = "@".parse().unwrap();

    assert_eq!(source, PeerSource::Empty);
    assert_eq!(source.to_string(), "@");
}

#[test]
fn invalid_ip_is_an_error() {
    assert_eq!(
        "256.1.1.0:123".parse::<PeerSource>(),
        Err(PeerAddrError {
            addr: "256.1.1.0:123".to_string()
        })
    );
    assert!("".parse::<PeerSource>().is_err());
    assert!("[::1]".parse::<PeerSource>().is_err());
}
