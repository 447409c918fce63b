use super::test_helpers::{ctx_with_headers, forwarded_resolver, legacy_resolver};
use crate::ctx::RequestCtx;
use crate::resolver::{Handler, PeerState, TrustResolver, handler_fn};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Handler that reports what it saw.
fn observer() -> impl Handler<Output = PeerState> {
    handler_fn(|ctx: &mut RequestCtx| ctx.peer_state())
}

#[test]
fn gate_shares_the_wrapping_resolver() {
    let resolver = Arc::new(legacy_resolver("10.0.0.0/8"));

    let gate = resolver.wrap(observer());

    assert_eq!(gate.resolver(), resolver.as_ref());
    assert!(gate.resolver().is_trusted_source("10.1.1.1:80"));
}

#[test]
fn trusted_peer_is_rewritten() {
    // Arrange
    let resolver = Arc::new(forwarded_resolver("127.0.0.1"));
    let gate = resolver.wrap(observer());
    let mut ctx = ctx_with_headers(
        "127.0.0.1:1234",
        &[("Forwarded", r#"for="2001:db8:cafe::17";proto=https"#)],
    );

    // Act
    let seen = gate.handle(&mut ctx);

    // Assert
    assert_eq!(seen, PeerState::new("[2001:db8:cafe::17]:65535", true));
    assert_eq!(ctx.peer_state(), seen);
}

#[test]
fn untrusted_peer_is_left_alone() {
    // Arrange
    let resolver = Arc::new(forwarded_resolver("127.0.0.1"));
    let gate = resolver.wrap(observer());
    let mut ctx = ctx_with_headers("192.168.1.1:1234", &[("Forwarded", "for=4.3.2.1;proto=https")]);

    // Act
    let seen = gate.handle(&mut ctx);

    // Assert
    assert_eq!(seen, PeerState::new("192.168.1.1:1234", false));
}

#[test]
fn empty_source_requires_allowance() {
    // Arrange
    let denied = Arc::new(forwarded_resolver("127.0.0.1"));
    let allowed = Arc::new(
        TrustResolver::new("127.0.0.1", true, true, "", "").expect("valid networks"),
    );
    let headers = [("Forwarded", "for=4.3.2.1;proto=https")];

    // Act
    let mut denied_ctx = ctx_with_headers("@", &headers);
    denied.wrap(observer()).handle(&mut denied_ctx);
    let mut allowed_ctx = ctx_with_headers("@", &headers);
    allowed.wrap(observer()).handle(&mut allowed_ctx);

    // Assert
    assert_eq!(denied_ctx.peer_state(), PeerState::new("@", false));
    assert_eq!(allowed_ctx.peer_state(), PeerState::new("4.3.2.1:65535", true));
}

#[test]
fn trusted_http_clears_secure() {
    let resolver = Arc::new(forwarded_resolver("127.0.0.1"));
    let mut ctx = ctx_with_headers("127.0.0.1:1234", &[("Forwarded", "for=1.2.3.4;proto=http")])
        .with_secure(true);

    resolver.wrap(observer()).handle(&mut ctx);

    assert_eq!(ctx.peer_state(), PeerState::new("1.2.3.4:65535", false));
}

#[test]
fn trusted_legacy_http_clears_secure() {
    let resolver = Arc::new(legacy_resolver("10.0.0.0/8"));
    let mut ctx = ctx_with_headers(
        "10.1.1.1:80",
        &[
            ("Forwarded", "for=4.3.2.1;proto=https"),
            ("X-Forwarded-Proto", "https"),
            ("X-Forwarded-Proto", "https, http"),
        ],
    )
    .with_secure(true);

    resolver.wrap(observer()).handle(&mut ctx);

    assert_eq!(ctx.peer_state(), PeerState::new("10.1.1.1:80", false));
}

#[test]
fn trusted_without_protocol_keeps_secure() {
    let resolver = Arc::new(forwarded_resolver("127.0.0.1"));
    let mut ctx = ctx_with_headers("127.0.0.1:1234", &[("Forwarded", "for=1.2.3.4:99")])
        .with_secure(true);

    resolver.wrap(observer()).handle(&mut ctx);

    assert_eq!(ctx.peer_state(), PeerState::new("1.2.3.4:99", true));
}

#[test]
fn malformed_peer_is_not_trusted_and_downstream_still_runs() {
    // Arrange
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let resolver = Arc::new(forwarded_resolver("0.0.0.0/0, ::/0"));
    let gate = resolver.wrap(handler_fn(move |_: &mut RequestCtx| {
        counter.fetch_add(1, Ordering::SeqCst);
    }));

    // Act
    for peer in ["256.1.1.0:123", "", "not-an-ip", "[::1]"] {
        let mut ctx = ctx_with_headers(peer, &[("Forwarded", "for=4.3.2.1;proto=https")]);
        gate.handle(&mut ctx);

        // Assert
        assert_eq!(ctx.peer_state(), PeerState::new(peer, false));
    }
    assert_eq!(calls.load(Ordering::SeqCst), 4);
}

#[test]
fn bare_trusted_peer_without_port_is_accepted() {
    let resolver = Arc::new(forwarded_resolver("::1"));
    let mut ctx = ctx_with_headers("::1", &[("Forwarded", "for=1.2.3.4")]);

    resolver.wrap(observer()).handle(&mut ctx);

    assert_eq!(ctx.peer_addr, "1.2.3.4:65535");
}

#[test]
fn evaluate_is_a_pure_transform() {
    // Arrange
    let resolver = forwarded_resolver("127.0.0.0/8");
    let ctx = ctx_with_headers("127.0.0.2:4000", &[("Forwarded", "for=192.0.2.60;proto=https")]);

    // Act
    let state = resolver.evaluate(&ctx.headers, ctx.peer_state());

    // Assert
    assert_eq!(state, PeerState::new("192.0.2.60:65535", true));
    assert_eq!(ctx.peer_state(), PeerState::new("127.0.0.2:4000", false));
}

#[test]
fn gates_can_be_nested() {
    // An outer gate rewriting to a trusted address lets the inner one run again.
    let outer = Arc::new(forwarded_resolver("127.0.0.1"));
    let inner = Arc::new(legacy_resolver("10.0.0.0/8"));
    let gate = outer.wrap(inner.wrap(observer()));
    let mut ctx = ctx_with_headers(
        "127.0.0.1:1",
        &[("Forwarded", "for=10.0.0.5:80"), ("X-Forwarded-For", "8.8.8.8")],
    );

    let seen = gate.handle(&mut ctx);

    assert_eq!(seen, PeerState::new("8.8.8.8:65535", false));
}
