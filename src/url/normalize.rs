use crate::UrlError;
use url::Url;

/// Normalizes a URL so equal resources map to equal identifiers
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Reject schemes other than HTTP and HTTPS
/// 3. Lowercase the host
/// 4. Remove dot segments (`.` and `..`) from the path
/// 5. Remove the trailing slash (except for the root path)
/// 6. Remove the fragment
/// 7. Remove an empty query string
///
/// # Arguments
///
/// * `raw` - The URL string to normalize
///
/// # Returns
///
/// * `Ok(Url)` - Normalized URL
/// * `Err(UrlError)` - Failed to parse or normalize the URL
pub fn normalize_url(raw: &str) -> Result<Url, UrlError> {
    let mut url = Url::parse(raw.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    match url.host_str() {
        Some(host) => {
            let lowered = host.to_lowercase();
            if lowered != host {
                url.set_host(Some(&lowered))
                    .map_err(|e| UrlError::Parse(e.to_string()))?;
            }
        }
        None => return Err(UrlError::MissingHost),
    }

    let normalized_path = normalize_path(url.path());
    url.set_path(&normalized_path);

    url.set_fragment(None);

    if url.query() == Some("") {
        url.set_query(None);
    }

    Ok(url)
}

/// Removes dot segments and the trailing slash from a path
fn normalize_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    if segments.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", segments.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_host() {
        let url = normalize_url("https://EXAMPLE.COM/Page").unwrap();
        assert_eq!(url.as_str(), "https://example.com/Page");
    }

    #[test]
    fn test_strips_fragment() {
        let url = normalize_url("https://example.com/page#top").unwrap();
        assert_eq!(url.as_str(), "https://example.com/page");
    }

    #[test]
    fn test_strips_trailing_slash() {
        let url = normalize_url("https://example.com/page/").unwrap();
        assert_eq!(url.as_str(), "https://example.com/page");
    }

    #[test]
    fn test_root_path_kept() {
        let url = normalize_url("https://example.com").unwrap();
        assert_eq!(url.as_str(), "https://example.com/");
    }

    #[test]
    fn test_removes_dot_segments() {
        let url = normalize_url("https://example.com/a/b/../c/./d").unwrap();
        assert_eq!(url.as_str(), "https://example.com/a/c/d");
    }

    #[test]
    fn test_removes_empty_query() {
        let url = normalize_url("https://example.com/page?").unwrap();
        assert_eq!(url.as_str(), "https://example.com/page");
    }

    #[test]
    fn test_keeps_query() {
        let url = normalize_url("https://example.com/page?q=1").unwrap();
        assert_eq!(url.as_str(), "https://example.com/page?q=1");
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(matches!(
            normalize_url("not a url"),
            Err(UrlError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_scheme() {
        assert!(matches!(
            normalize_url("file:///etc/passwd"),
            Err(UrlError::InvalidScheme(_))
        ));
    }

    #[test]
    fn test_http_allowed() {
        assert!(normalize_url("http://example.com/").is_ok());
    }
}
