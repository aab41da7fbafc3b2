//! Extraction of the `jsToken` embedded in a share landing page.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{Result, ShareError};

/// `window.jsToken = ...%22<TOKEN>%22...` inside an inline script.
static JS_TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"window\.jsToken.*%22(.*)%22").expect("Invalid jsToken regex")
});

/// Extract the session token from a landing page body.
///
/// The first matching line wins. Within that line the match is greedy, so the
/// token is the text between the last two `%22` quotes.
///
/// # Examples
///
/// ```
/// use terabox_resolver::token::extract_js_token;
///
/// let html = r#"<script>window.jsToken = decodeURIComponent("fn%28%22ABC123%22%29");</script>"#;
/// assert_eq!(extract_js_token(html).unwrap(), "ABC123");
/// ```
pub fn extract_js_token(html: &str) -> Result<String> {
    JS_TOKEN_REGEX
        .captures(html)
        .and_then(|captures| captures.get(1))
        .map(|token| token.as_str().to_string())
        .ok_or(ShareError::TokenNotFound)
}
