//! Tests for loading cookie files.

use std::io::Write;

use tempfile::NamedTempFile;
use terabox_resolver::{CookieSet, ShareError};

#[test]
fn test_cookie_set_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file
        .write_all(
            b"# Netscape HTTP Cookie File\n\
              .terabox.com\tTRUE\t/\tFALSE\t1767225600\tndus\tY2xvdWQ\n\
              .terabox.com\tTRUE\t/\tFALSE\t1767225600\tlang\ten\n",
        )
        .unwrap();

    let cookies = CookieSet::from_file(temp_file.path()).unwrap();
    assert_eq!(cookies.len(), 2);
    assert_eq!(cookies.get("ndus"), Some("Y2xvdWQ"));
    assert_eq!(cookies.get("lang"), Some("en"));
}

#[test]
fn test_cookie_set_from_empty_file() {
    let temp_file = NamedTempFile::new().unwrap();
    let cookies = CookieSet::from_file(temp_file.path()).unwrap();
    assert!(cookies.is_empty());
}

#[test]
fn test_cookie_set_from_missing_file() {
    let result = CookieSet::from_file("/nonexistent/path/cookies.txt");
    assert!(matches!(result, Err(ShareError::CookieFile(_))));
}
