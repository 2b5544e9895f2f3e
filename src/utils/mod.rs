// src/utils/mod.rs

//! Utility functions and helpers.

pub mod http;

use url::Url;

/// Resolve a potentially relative URL against a base URL.
pub fn resolve_url(base: &Url, href: &str) -> String {
    base.join(href)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

/// Extract the `location` query parameter from a (possibly relative) link.
pub fn location_param(base: &Url, href: &str) -> Option<String> {
    let resolved = base.join(href).ok()?;
    resolved
        .query_pairs()
        .find(|(key, _)| key == "location")
        .map(|(_, value)| value.into_owned())
}

/// Collapse runs of whitespace into single spaces and trim the ends.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_url() {
        let base = Url::parse("http://example.com/laundry/").unwrap();
        assert_eq!(
            resolve_url(&base, "cerro-vista.html"),
            "http://example.com/laundry/cerro-vista.html"
        );
        assert_eq!(
            resolve_url(&base, "https://other.com/x"),
            "https://other.com/x"
        );
    }

    #[test]
    fn test_location_param_relative_link() {
        let base = Url::parse("http://example.com/laundry/village.html").unwrap();
        assert_eq!(
            location_param(&base, "washalertweb.aspx?location=abc-123"),
            Some("abc-123".to_string())
        );
    }

    #[test]
    fn test_location_param_missing() {
        let base = Url::parse("http://example.com/laundry/village.html").unwrap();
        assert_eq!(location_param(&base, "index.html"), None);
        assert_eq!(location_param(&base, "page.aspx?loc=abc"), None);
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  Cerro \n  Vista "), "Cerro Vista");
    }
}
