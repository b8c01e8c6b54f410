/// Returns the first exclusion substring found in a host, if any
///
/// Matching is plain substring containment against the lowercased host, so
/// `"gov"` excludes `whitehouse.gov` as well as `governor-blog.net`.
/// Exclusion entries are expected to be lowercase already.
///
/// # Examples
///
/// ```
/// use wp_sweep::url::matching_exclusion;
///
/// let excluded = vec!["google".to_string(), "gov".to_string()];
/// assert_eq!(matching_exclusion("Maps.Google.com", &excluded), Some("google"));
/// assert_eq!(matching_exclusion("cityhall.gov", &excluded), Some("gov"));
/// assert_eq!(matching_exclusion("myblog.net", &excluded), None);
/// ```
pub fn matching_exclusion<'a>(host: &str, excluded: &'a [String]) -> Option<&'a str> {
    let host = host.to_lowercase();
    excluded
        .iter()
        .map(String::as_str)
        .find(|entry| host.contains(entry))
}
