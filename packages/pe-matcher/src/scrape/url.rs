//! Input URL normalization and validation.

use url::Url;

/// Prefix `https://` when the input has no http(s) scheme, then strip
/// trailing slashes.
pub fn normalize_url(input: &str) -> String {
    let with_scheme = if input.starts_with("http://") || input.starts_with("https://") {
        input.to_string()
    } else {
        format!("https://{}", input)
    };

    with_scheme.trim_end_matches('/').to_string()
}

/// An http(s) URL with a non-empty host.
pub fn is_valid_url(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => {
            matches!(parsed.scheme(), "http" | "https")
                && parsed.host_str().is_some_and(|h| !h.is_empty())
        }
        Err(_) => false,
    }
}

/// Host and port of a URL, the part compared for same-origin links.
pub(crate) fn network_location(url: &Url) -> Option<(String, Option<u16>)> {
    url.host_str()
        .map(|host| (host.to_ascii_lowercase(), url.port_or_known_default()))
}
