//! URL utilities for consistent URL handling
//!
//! This module provides utilities for URL validation and host extraction that
//! are used throughout the application.

use url::Url;

/// URL utilities for consistent URL handling
pub struct UrlUtils;

impl UrlUtils {
    /// Check that a URL uses an HTTP or HTTPS scheme
    ///
    /// The parser and prober only deal in plain web streams; anything else
    /// (rtmp, udp, relative paths) is rejected.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use iptv_sentinel::utils::url::UrlUtils;
    ///
    /// assert!(UrlUtils::is_http_url("http://example.com/a.m3u8"));
    /// assert!(UrlUtils::is_http_url("https://example.com/a.m3u8"));
    /// assert!(!UrlUtils::is_http_url("rtmp://example.com/live"));
    /// assert!(!UrlUtils::is_http_url("channels/a.m3u8"));
    /// ```
    pub fn is_http_url(url: &str) -> bool {
        let trimmed = url.trim();
        trimmed.starts_with("http://") || trimmed.starts_with("https://")
    }

    /// Extract the limiter key for a URL's origin
    ///
    /// Host plus explicit port, lowercased. URLs that fail to parse share the
    /// fallback key "unknown" so they still pass through a limiter rather than
    /// bypassing it.
    pub fn host_key(url: &str) -> String {
        match Url::parse(url) {
            Ok(parsed) => {
                let host = parsed.host_str().unwrap_or("unknown").to_lowercase();
                match parsed.port() {
                    Some(port) => format!("{host}:{port}"),
                    None => host,
                }
            }
            Err(_) => "unknown".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_http_url() {
        assert!(UrlUtils::is_http_url("http://example.com/a.ts"));
        assert!(UrlUtils::is_http_url("  https://example.com/a.ts"));
        assert!(!UrlUtils::is_http_url("ftp://example.com/a.ts"));
        assert!(!UrlUtils::is_http_url("//example.com/a.ts"));
        assert!(!UrlUtils::is_http_url(""));
    }

    #[test]
    fn test_host_key_ignores_path_and_case() {
        assert_eq!(UrlUtils::host_key("http://CDN.Example.com/live/1.m3u8"), "cdn.example.com");
        assert_eq!(
            UrlUtils::host_key("http://cdn.example.com/other/2.m3u8"),
            UrlUtils::host_key("http://cdn.example.com/live/1.m3u8")
        );
    }

    #[test]
    fn test_host_key_keeps_explicit_port() {
        assert_eq!(UrlUtils::host_key("http://example.com:8080/a"), "example.com:8080");
        assert_eq!(UrlUtils::host_key("http://example.com/a"), "example.com");
    }

    #[test]
    fn test_host_key_unparseable_falls_back() {
        assert_eq!(UrlUtils::host_key("not a url"), "unknown");
    }
}
