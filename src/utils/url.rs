//! URL helpers for joining configured base URLs with endpoint paths.

/// Strip trailing slashes from a configured base URL.
///
/// ```
/// use terryann::utils::url::normalize_base_url;
///
/// assert_eq!(normalize_base_url("https://gateway.example.com/"), "https://gateway.example.com");
/// assert_eq!(normalize_base_url("https://gateway.example.com///"), "https://gateway.example.com");
/// ```
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}

/// Join a base URL and an endpoint path with exactly one slash between them.
///
/// ```
/// use terryann::utils::url::construct_api_url;
///
/// assert_eq!(
///     construct_api_url("https://gateway.example.com/", "/gateway/message"),
///     "https://gateway.example.com/gateway/message"
/// );
/// ```
pub fn construct_api_url(base_url: &str, endpoint: &str) -> String {
    let normalized_base = normalize_base_url(base_url);
    let endpoint = endpoint.trim_start_matches('/');
    format!("{normalized_base}/{endpoint}")
}
