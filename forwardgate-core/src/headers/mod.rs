mod forwarded;

pub use forwarded::*;

use http::HeaderMap;

/// RFC 7239 header name.
pub const FORWARDED: &str = "forwarded";

/// Delimiter proxies use when appending to an existing header line.
const LIST_DELIMITER: &str = ", ";

/// Read access to a multi-valued, case-insensitive header collection.
///
/// Implemented by the hosting HTTP layer. Lines must be returned in arrival
/// order; a line that is not visible ASCII is returned as an empty string so
/// it still counts as the latest instance.
pub trait HeaderLookup {
    fn lookup(&self, name: &str) -> Vec<&str>;
}

impl HeaderLookup for HeaderMap {
    fn lookup(&self, name: &str) -> Vec<&str> {
        self.get_all(name)
            .iter()
            .map(|value| value.to_str().unwrap_or_default())
            .collect()
    }
}

/// Authoritative value of a header that proxies append to.
///
/// Takes the last line carrying `name`, then the last `", "` separated
/// segment of that line. A comma without a following space is not a
/// delimiter. Returns `""` when the header is absent. No trimming is done.
pub fn select_latest<'a, H>(headers: &'a H, name: &str) -> &'a str
where
    H: HeaderLookup + ?Sized,
{
    headers
        .lookup(name)
        .into_iter()
        .last()
        .and_then(|line| line.rsplit(LIST_DELIMITER).next())
        .unwrap_or_default()
}

/// Drop one layer of surrounding double quotes, then trim whitespace.
///
/// Quotes are only recognized at the very edges of `raw`.
pub(crate) fn unquote(raw: &str) -> &str {
    let value = raw.strip_prefix('"').unwrap_or(raw);
    let value = value.strip_suffix('"').unwrap_or(value);
    value.trim()
}
