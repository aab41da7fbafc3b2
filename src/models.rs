//! Data models for share listing responses and resolved manifests.

use serde::{Deserialize, Deserializer, Serialize};

use crate::cookies::CookieSet;
use crate::error::{Result, ShareError};

/// Message used when the provider fails without an `errmsg`.
pub const GENERIC_PROVIDER_ERROR: &str = "Something went wrong!";

/// Input to a single resolution.
#[derive(Debug, Clone)]
pub struct ShareRequest {
    pub url: String,
    pub cookies: CookieSet,
}

impl ShareRequest {
    pub fn new(url: impl Into<String>, cookies: CookieSet) -> Self {
        Self {
            url: url.into(),
            cookies,
        }
    }
}

/// Provider status code, sent either as a number or as a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Errno {
    Int(i64),
    Text(String),
}

impl Errno {
    pub fn is_success(&self) -> bool {
        match self {
            Errno::Int(code) => *code == 0,
            Errno::Text(code) => code == "0",
        }
    }

    pub fn code(&self) -> Option<i64> {
        match self {
            Errno::Int(code) => Some(*code),
            Errno::Text(code) => code.trim().parse().ok(),
        }
    }
}

/// Response from the `share/list` endpoint.
#[derive(Debug, Deserialize)]
pub struct ListResponse {
    #[serde(default)]
    pub errno: Option<Errno>,
    #[serde(default)]
    pub errmsg: Option<String>,
    #[serde(default)]
    pub list: Option<Vec<ListItem>>,
}

impl ListResponse {
    /// Turn the response into its children, or the provider failure.
    ///
    /// A missing `errno` counts as a failure.
    pub fn into_items(self) -> Result<Vec<ListItem>> {
        match self.errno {
            Some(ref errno) if errno.is_success() => Ok(self.list.unwrap_or_default()),
            errno => Err(ShareError::Provider {
                errno: errno.as_ref().and_then(Errno::code),
                message: self
                    .errmsg
                    .unwrap_or_else(|| GENERIC_PROVIDER_ERROR.to_string()),
            }),
        }
    }
}

/// One child of a listed folder, normalized at decode time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListItem {
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub isdir: bool,
    #[serde(default)]
    pub server_filename: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub dlink: Option<String>,
    #[serde(default, deserialize_with = "deserialize_size")]
    pub size: u64,
}

/// Accepts `1`, `1.0`, `"1"` and `true` as set; everything else is unset.
fn deserialize_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Int(i64),
        Float(f64),
        Bool(bool),
        Text(String),
        Other(serde_json::Value),
    }

    Ok(match Option::<Flag>::deserialize(deserializer)? {
        Some(Flag::Int(n)) => n == 1,
        Some(Flag::Float(f)) => f == 1.0,
        Some(Flag::Bool(b)) => b,
        Some(Flag::Text(s)) => s == "1",
        Some(Flag::Other(_)) | None => false,
    })
}

/// Sizes arrive as numbers or digit strings; anything else counts as zero.
///
/// Negative numbers also count as zero so the running total never shrinks.
fn deserialize_size<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawSize {
        Int(u64),
        Float(f64),
        Text(String),
        Other(serde_json::Value),
    }

    Ok(match Option::<RawSize>::deserialize(deserializer)? {
        Some(RawSize::Int(n)) => n,
        Some(RawSize::Float(f)) if f.is_finite() && f > 0.0 => f as u64,
        Some(RawSize::Text(s)) => s.parse::<u64>().unwrap_or(0),
        _ => 0,
    })
}

/// A downloadable file found during the walk.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FileEntry {
    pub url: String,
    pub filename: String,
    #[serde(rename = "path")]
    pub relative_path: String,
}

/// Aggregated result of a full tree walk.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Manifest {
    pub title: String,
    pub total_size: u64,
    #[serde(rename = "contents")]
    pub files: Vec<FileEntry>,
}

impl Manifest {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Append a file, keeping discovery order.
    pub fn add_file(&mut self, entry: FileEntry) {
        self.files.push(entry);
    }

    pub fn add_size(&mut self, bytes: u64) {
        self.total_size = self.total_size.saturating_add(bytes);
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// URL of the first discovered file.
    pub fn first_download_link(&self) -> Result<&str> {
        self.files
            .first()
            .map(|entry| entry.url.as_str())
            .ok_or(ShareError::EmptyShare)
    }

    /// Build the summary returned to HTTP callers.
    pub fn summary(&self, share_url: &str) -> Result<LinkSummary> {
        Ok(LinkSummary {
            title: format!("[{}]({})", self.title, share_url),
            size: self.total_size,
            download_link: self.first_download_link()?.to_string(),
        })
    }
}

/// Summary payload: title, aggregate size and the first file's link.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkSummary {
    pub title: String,
    pub size: u64,
    pub download_link: String,
}

/// Format bytes into human-readable size.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    if bytes >= TB {
        format!("{:.2} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
