use thiserror::Error;

/// Port attached to forwarded addresses that arrive without one.
pub const SENTINEL_PORT: u16 = 65535;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HostPortError {
    #[error("missing port in address")]
    MissingPort,

    #[error("too many colons in address")]
    TooManyColons,

    #[error("missing ']' in address")]
    MissingBracket,

    #[error("unexpected bracket in address")]
    UnexpectedBracket,
}

/// Split `host:port` or `[host]:port` into its parts.
///
/// The port is not validated. An IPv6 literal must be bracketed to carry a
/// port, so a bare `2001:db8::1` is rejected with `TooManyColons`.
pub fn split_host_port(hostport: &str) -> Result<(&str, &str), HostPortError> {
    let colon = hostport.rfind(':').ok_or(HostPortError::MissingPort)?;

    let (host, host_start, host_end) = if hostport.starts_with('[') {
        let close = hostport.find(']').ok_or(HostPortError::MissingBracket)?;
        match close + 1 {
            after if after == hostport.len() => return Err(HostPortError::MissingPort),
            after if after == colon => {}
            after if hostport.as_bytes()[after] == b':' => {
                return Err(HostPortError::TooManyColons);
            }
            _ => return Err(HostPortError::MissingPort),
        }
        (&hostport[1..close], 1, close + 1)
    } else {
        let host = &hostport[..colon];
        if host.contains(':') {
            return Err(HostPortError::TooManyColons);
        }
        (host, 0, 0)
    };

    if hostport[host_start..].contains('[') {
        return Err(HostPortError::UnexpectedBracket);
    }
    if hostport[host_end..].contains(']') {
        return Err(HostPortError::UnexpectedBracket);
    }

    Ok((host, &hostport[colon + 1..]))
}

/// Join a host and port, bracketing hosts that contain a colon.
pub fn join_host_port(host: &str, port: impl std::fmt::Display) -> String {
    if host.contains(':') {
        format!("[{host}]:{port}")
    } else {
        format!("{host}:{port}")
    }
}

/// Return `addr` unchanged when it already is a `host:port`, otherwise attach
/// [`SENTINEL_PORT`]. A bracketed IPv6 literal without a port keeps one pair
/// of brackets.
///
/// Returns `None` when no valid `host:port` can be formed, e.g. for an
/// unbalanced bracket such as `[::1`.
pub fn with_sentinel_port(addr: &str) -> Option<String> {
    if split_host_port(addr).is_ok() {
        return Some(addr.to_string());
    }

    let host = addr
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(addr);

    let joined = join_host_port(host, SENTINEL_PORT);
    split_host_port(&joined).is_ok().then_some(joined)
}
