use super::filters::is_absolute_http_url;

const PROXY_PREFIX: &str = "/proxy=";
const FILE_ROUTE: &str = "file=";
const STREAM_ROUTE: &str = "stream/";

/// Produce the URL at which `path` can be fetched from the serving host.
///
/// Absolute `http`/`https` URLs are returned untouched. Everything else is appended to the
/// host's file route, either directly under `root` or behind the `/proxy=` prefix when a
/// proxy root is configured. Without a path, the bare file route is returned.
pub fn get_fetchable_url_or_file(path: Option<&str>, root: &str, root_url: Option<&str>) -> String {
  match path {
    None => route_prefix(root, root_url, FILE_ROUTE),
    Some(path) if is_absolute_http_url(path) => path.to_string(),
    Some(path) => format!("{}{path}", route_prefix(root, root_url, FILE_ROUTE)),
  }
}

/// Produce the URL of a live stream published by the serving host.
pub fn get_stream_url(name: &str, root: &str, root_url: Option<&str>) -> String {
  format!("{}{name}", route_prefix(root, root_url, STREAM_ROUTE))
}

fn route_prefix(root: &str, root_url: Option<&str>, route: &str) -> String {
  match root_url {
    Some(proxy) => format!("{PROXY_PREFIX}{proxy}{route}"),
    None => format!("{root}/{route}"),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use proptest::prelude::*;

  #[test]
  fn joins_path_onto_direct_file_route() {
    assert_eq!(
      get_fetchable_url_or_file(Some("a/b.png"), "http://host", None),
      "http://host/file=a/b.png"
    );
  }

  #[test]
  fn joins_path_onto_proxied_file_route() {
    assert_eq!(
      get_fetchable_url_or_file(Some("a/b.png"), "http://host", Some("https://space.hf/")),
      "/proxy=https://space.hf/file=a/b.png"
    );
  }

  #[test]
  fn returns_bare_route_without_path() {
    assert_eq!(
      get_fetchable_url_or_file(None, "http://host", None),
      "http://host/file="
    );
    assert_eq!(
      get_fetchable_url_or_file(None, "http://host", Some("proxyhost/")),
      "/proxy=proxyhost/file="
    );
  }

  #[test]
  fn leaves_absolute_urls_alone() {
    let url = "https://raw.githubusercontent.com/gradio-app/gradio/main/test/test_files/bus.png";
    assert_eq!(get_fetchable_url_or_file(Some(url), "http://host", None), url);
    assert_eq!(
      get_fetchable_url_or_file(Some(url), "http://host", Some("proxyhost/")),
      url
    );
  }

  #[test]
  fn malformed_urls_fall_through_to_the_file_route() {
    assert_eq!(
      get_fetchable_url_or_file(Some("http://"), "http://host", None),
      "http://host/file=http://"
    );
  }

  #[test]
  fn unparsable_hosts_and_ports_fall_through_to_the_file_route() {
    for path in [
      "http://example.com:99999/a.png",
      "http://1.2.3.256/a.png",
      "http://exa<mple.com/a.png",
      "http://exa%mple.com/a.png",
      "http://exa^mple.com/a.png",
    ] {
      assert_eq!(
        get_fetchable_url_or_file(Some(path), "http://host", None),
        format!("http://host/file={path}")
      );
    }
  }

  #[test]
  fn builds_stream_urls() {
    assert_eq!(get_stream_url("s1", "http://host", None), "http://host/stream/s1");
    assert_eq!(
      get_stream_url("s1", "http://host", Some("proxyhost/")),
      "/proxy=proxyhost/stream/s1"
    );
  }

  proptest! {
    #[test]
    fn relative_paths_land_under_the_file_route(path in "[a-z0-9_./-]{1,32}") {
      prop_assert_eq!(
        get_fetchable_url_or_file(Some(&path), "http://host", None),
        format!("http://host/file={path}")
      );
    }

    #[test]
    fn absolute_urls_are_returned_verbatim(
      scheme in "https?",
      host in "[a-z][a-z0-9]{0,12}(\\.[a-z]{2,4})?",
      rest in "(/[a-z0-9_.-]{0,10}){0,3}",
      proxy in proptest::option::of("[a-z]{1,8}/"),
    ) {
      let url = format!("{scheme}://{host}{rest}");
      prop_assert_eq!(
        get_fetchable_url_or_file(Some(&url), "http://root", proxy.as_deref()),
        url
      );
    }
  }
}
