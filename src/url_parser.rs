//! URL helpers for share links.

use reqwest::Url;

use crate::error::{Result, ShareError};

/// Host fragments of the provider's domain aliases.
pub const SUPPORTED_HOSTS: &[&str] = &[
    "terabox",
    "nephobox",
    "4funbox",
    "mirrobox",
    "momerybox",
    "teraboxapp",
    "1024tera",
    "freeterabox",
];

/// Parse an absolute http(s) URL.
pub fn parse_url(url: &str) -> Result<Url> {
    let parsed =
        Url::parse(url.trim()).map_err(|_| ShareError::InvalidUrl(url.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        _ => Err(ShareError::InvalidUrl(url.to_string())),
    }
}

/// Check that a share link points at one of the provider's domains.
///
/// # Examples
///
/// ```
/// use terabox_resolver::url_parser::ensure_supported_link;
///
/// assert!(ensure_supported_link("https://www.terabox.com/s/1abc").is_ok());
/// assert!(ensure_supported_link("https://example.com/s/1abc").is_err());
/// ```
pub fn ensure_supported_link(url: &str) -> Result<Url> {
    let parsed = parse_url(url)?;
    let host = parsed
        .host_str()
        .ok_or_else(|| ShareError::InvalidUrl(url.to_string()))?
        .to_ascii_lowercase();

    if SUPPORTED_HOSTS.iter().any(|alias| host.contains(alias)) {
        Ok(parsed)
    } else {
        Err(ShareError::UnsupportedDomain(host))
    }
}

/// Read the share identifier (`surl`) from a URL's query string.
///
/// Empty values count as missing.
pub fn extract_share_id(url: &Url) -> Result<String> {
    url.query_pairs()
        .find(|(key, value)| key == "surl" && !value.is_empty())
        .map(|(_, value)| value.into_owned())
        .ok_or(ShareError::ShareIdNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_share_id() {
        let url = parse_url("https://www.1024tera.com/sharing/link?surl=AbC_123-x").unwrap();
        assert_eq!(extract_share_id(&url).unwrap(), "AbC_123-x");
    }

    #[test]
    fn test_extract_share_id_among_other_params() {
        let url = parse_url("https://www.terabox.com/sharing/link?lang=en&surl=xyz&pwd=1").unwrap();
        assert_eq!(extract_share_id(&url).unwrap(), "xyz");
    }

    #[test]
    fn test_missing_share_id() {
        let url = parse_url("https://www.terabox.com/s/1xyz").unwrap();
        assert!(matches!(
            extract_share_id(&url),
            Err(ShareError::ShareIdNotFound)
        ));

        let url = parse_url("https://www.terabox.com/sharing/link?surl=").unwrap();
        assert!(extract_share_id(&url).is_err());
    }

    #[test]
    fn test_supported_aliases() {
        for host in ["www.terabox.com", "nephobox.com", "www.4funbox.com", "teraboxapp.com"] {
            let url = format!("https://{}/s/1abc", host);
            assert!(ensure_supported_link(&url).is_ok(), "{} should be supported", host);
        }
    }

    #[test]
    fn test_invalid_urls() {
        assert!(matches!(parse_url("not a url"), Err(ShareError::InvalidUrl(_))));
        assert!(matches!(
            parse_url("ftp://terabox.com/s/1abc"),
            Err(ShareError::InvalidUrl(_))
        ));
    }
}
