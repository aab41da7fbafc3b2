//! Session cookies supplied by the caller.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Prefix curl and browsers put in front of HttpOnly entries.
const HTTP_ONLY_PREFIX: &str = "#HttpOnly_";

/// Name to value mapping of pre-authenticated cookies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieSet {
    cookies: BTreeMap<String, String>,
}

impl CookieSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load cookies from a Netscape-format `cookies.txt` file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(Self::parse_netscape(&content))
    }

    /// Parse Netscape cookie file content.
    ///
    /// Lines are tab separated with seven fields; name and value are the last two.
    /// Malformed lines are skipped.
    pub fn parse_netscape(content: &str) -> Self {
        let mut set = Self::new();

        for line in content.lines() {
            let line = match line.strip_prefix(HTTP_ONLY_PREFIX) {
                Some(rest) => rest,
                None if line.starts_with('#') => continue,
                None => line,
            };

            let fields: Vec<&str> = line.trim().split('\t').collect();
            if fields.len() >= 7 {
                set.insert(fields[5], fields[6]);
            }
        }

        set
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.cookies.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cookies.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CookieSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (name, value) in iter {
            set.insert(name, value);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_netscape() {
        let content = "# Netscape HTTP Cookie File\n\
            \n\
            .terabox.com\tTRUE\t/\tFALSE\t1767225600\tndus\tabc123\n\
            #HttpOnly_.terabox.com\tTRUE\t/\tTRUE\t1767225600\tcsrfToken\txyz\n\
            broken\tline\n";

        let cookies = CookieSet::parse_netscape(content);
        assert_eq!(cookies.len(), 2);
        assert_eq!(cookies.get("ndus"), Some("abc123"));
        assert_eq!(cookies.get("csrfToken"), Some("xyz"));
    }

    #[test]
    fn test_parse_skips_comments() {
        let content = "# .terabox.com\tTRUE\t/\tFALSE\t0\tndus\tabc\n";
        assert!(CookieSet::parse_netscape(content).is_empty());
    }

    #[test]
    fn test_from_iter() {
        let cookies: CookieSet = [("a", "1"), ("b", "2")].into_iter().collect();
        let pairs: Vec<_> = cookies.iter().collect();
        assert_eq!(pairs, vec![("a", "1"), ("b", "2")]);
    }
}
