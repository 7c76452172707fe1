use std::sync::OnceLock;

use regex::Regex;
use url::Url;

fn data_url() -> &'static Regex {
  static PATTERN: OnceLock<Regex> = OnceLock::new();
  PATTERN.get_or_init(|| Regex::new(r"(?i)^data:").expect("invalid data URI regex"))
}

/// Determine whether a reference parses as an absolute `http` or `https` URL.
///
/// Anything the URL parser rejects (bad ports, malformed IPv4 hosts, forbidden host code
/// points, missing hosts) is simply not absolute.
pub fn is_absolute_http_url(value: &str) -> bool {
  Url::parse(value)
    .map(|url| matches!(url.scheme(), "http" | "https"))
    .unwrap_or(false)
}

/// Returns `true` for inline `data:` URIs, which never need fetching.
pub fn is_data_url(value: &str) -> bool {
  data_url().is_match(value.trim_start())
}

#[cfg(test)]
mod tests {
  use super::{is_absolute_http_url, is_data_url};

  #[test]
  fn accepts_http_and_https_urls() {
    assert!(is_absolute_http_url("https://example.com/cat.png"));
    assert!(is_absolute_http_url("http://localhost:7860"));
    assert!(is_absolute_http_url("HTTP://EXAMPLE.COM"));
    assert!(is_absolute_http_url("http://[::1]:8080/x"));
    assert!(is_absolute_http_url("https://user:pw@host/path?q=1"));
  }

  #[test]
  fn tolerates_whitespace_the_url_parser_would_strip() {
    assert!(is_absolute_http_url("  https://example.com  "));
    assert!(is_absolute_http_url("https://exa\tmple.com"));
  }

  #[test]
  fn accepts_special_scheme_without_slashes() {
    assert!(is_absolute_http_url("http:example.com"));
  }

  #[test]
  fn rejects_other_schemes() {
    assert!(!is_absolute_http_url("ftp://example.com/file"));
    assert!(!is_absolute_http_url("file:///tmp/a.png"));
    assert!(!is_absolute_http_url("data:image/png;base64,abc"));
    assert!(!is_absolute_http_url("httpx://example.com"));
  }

  #[test]
  fn rejects_malformed_urls() {
    assert!(!is_absolute_http_url("http://"));
    assert!(!is_absolute_http_url("https://:443/path"));
    assert!(!is_absolute_http_url("http://exa mple.com"));
    assert!(!is_absolute_http_url(""));
    assert!(!is_absolute_http_url("http://example.com:99999/a.png"));
    assert!(!is_absolute_http_url("http://1.2.3.256/a.png"));
    assert!(!is_absolute_http_url("http://exa<mple.com/a.png"));
    assert!(!is_absolute_http_url("http://exa%mple.com/a.png"));
    assert!(!is_absolute_http_url("http://exa^mple.com/a.png"));
  }

  #[test]
  fn rejects_relative_paths() {
    assert!(!is_absolute_http_url("images/photo.png"));
    assert!(!is_absolute_http_url("/tmp/gradio/abc/image.png"));
    assert!(!is_absolute_http_url("//cdn.example.com/a.png"));
  }

  #[test]
  fn detects_data_urls() {
    assert!(is_data_url("data:image/png;base64,abc"));
    assert!(is_data_url("DATA:text/plain,hi"));
    assert!(!is_data_url("images/data.png"));
  }
}
