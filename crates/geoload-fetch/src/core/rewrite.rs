/// Rewrite `locator` to go through the proxy at `proxy_base`.
///
/// The locator is appended verbatim after a single `/`, which is the path
/// form understood by corsproxy-style relays.
///
/// # Examples
///
/// ```
/// use geoload_fetch::proxied_url;
///
/// assert_eq!(
///     proxied_url("https://corsproxy.io", "https://example.com/raster.tif"),
///     "https://corsproxy.io/https://example.com/raster.tif",
/// );
/// assert_eq!(
///     proxied_url("https://corsproxy.io/", "https://example.com/raster.tif"),
///     "https://corsproxy.io/https://example.com/raster.tif",
/// );
/// ```
pub fn proxied_url(proxy_base: &str, locator: &str) -> String {
    format!("{}/{}", proxy_base.trim_end_matches('/'), locator)
}

/// Whether `locator` is an absolute http(s) URL.
pub fn is_remote(locator: &str) -> bool {
    url::Url::parse(locator)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
        .unwrap_or(false)
}
