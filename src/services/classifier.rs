use url::Url;

/// A URL is accepted when it parses, carries an http(s) scheme, and names a
/// host. Everything else is classified as failed at submission time.
pub fn is_valid_url(raw: &str) -> bool {
    match Url::parse(raw) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https") && parsed.has_host(),
        Err(_) => false,
    }
}

/// Partition a submission into (valid, invalid), preserving order.
pub fn partition(urls: Vec<String>) -> (Vec<String>, Vec<String>) {
    urls.into_iter().partition(|url| is_valid_url(url))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_and_https() {
        assert!(is_valid_url("http://example.com/a.png"));
        assert!(is_valid_url("https://example.com/a.png"));
    }

    #[test]
    fn rejects_garbage_and_other_schemes() {
        assert!(!is_valid_url("not-a-url"));
        assert!(!is_valid_url(""));
        assert!(!is_valid_url("ftp://example.com/a.png"));
        assert!(!is_valid_url("file:///etc/passwd"));
        assert!(!is_valid_url("http://"));
    }

    #[test]
    fn partition_preserves_order() {
        let (valid, invalid) = partition(vec![
            "http://a/1.png".to_string(),
            "junk".to_string(),
            "https://b/2.png".to_string(),
            "also junk".to_string(),
        ]);
        assert_eq!(valid, vec!["http://a/1.png", "https://b/2.png"]);
        assert_eq!(invalid, vec!["junk", "also junk"]);
    }
}
