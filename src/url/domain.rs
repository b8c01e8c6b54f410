use url::Url;

/// Extracts the network location (`host[:port]`) from a URL or bare host
///
/// Inputs containing `://` are parsed as absolute URLs; the host is
/// lowercased and a non-default port is kept. Anything else is treated as a
/// bare network location and everything from the first `/`, `?` or `#` on is
/// dropped. Unparseable URLs and URLs without a host yield an empty string.
///
/// # Examples
///
/// ```
/// use wp_sweep::url::network_location;
///
/// assert_eq!(network_location("https://Example.com/path"), "example.com");
/// assert_eq!(network_location("http://example.com:8080/"), "example.com:8080");
/// assert_eq!(network_location("blog.example.com"), "blog.example.com");
/// assert_eq!(network_location("http://"), "");
/// ```
pub fn network_location(input: &str) -> String {
    let input = input.trim();

    if !input.contains("://") {
        let end = input.find(['/', '?', '#']).unwrap_or(input.len());
        return input[..end].to_string();
    }

    link_domain(input)
}

/// Extracts the network location of an absolute URL
///
/// Unlike [`network_location`], the input is never treated as a bare host:
/// relative references and `mailto:`-style links yield an empty string.
///
/// # Examples
///
/// ```
/// use wp_sweep::url::link_domain;
///
/// assert_eq!(link_domain("https://a.example/post"), "a.example");
/// assert_eq!(link_domain("/relative/path"), "");
/// assert_eq!(link_domain("mailto:someone@a.example"), "");
/// ```
pub fn link_domain(link: &str) -> String {
    match Url::parse(link.trim()) {
        Ok(url) => match (url.host_str(), url.port()) {
            (Some(host), Some(port)) => format!("{}:{}", host.to_lowercase(), port),
            (Some(host), None) => host.to_lowercase(),
            (None, _) => String::new(),
        },
        Err(_) => String::new(),
    }
}
