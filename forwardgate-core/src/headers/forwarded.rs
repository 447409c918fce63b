use crate::headers::unquote;

/// The parts of a single RFC 7239 `forwarded-element` this crate cares about.
///
/// Both fields hold raw text as sent by the proxy. The address may be an
/// IPv4 or IPv6 literal, bracketed, with or without a port, or an
/// obfuscated identifier; it is not validated here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ForwardedElement<'a> {
    pub addr: &'a str,
    pub proto: &'a str,
}

/// Parse `token=value;token=value;...`.
///
/// Tokens are matched case-insensitively and only `for` and `proto` are kept.
/// When a token repeats, the last one wins. Pairs without `=` are skipped.
pub fn parse_forwarded_element(element: &str) -> ForwardedElement<'_> {
    let mut parsed = ForwardedElement::default();

    for pair in element.split(';') {
        let Some((token, value)) = pair.split_once('=') else {
            continue;
        };

        let token = token.trim();
        let value = unquote(value.trim());

        if token.eq_ignore_ascii_case("for") {
            parsed.addr = value;
        } else if token.eq_ignore_ascii_case("proto") {
            parsed.proto = value;
        }
    }

    parsed
}
