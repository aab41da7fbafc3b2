//! Error types for the terabox_resolver crate.

use thiserror::Error;

/// Errors that can occur while resolving a share link.
#[derive(Error, Debug)]
pub enum ShareError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode provider response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("jsToken not found in share page")]
    TokenNotFound,

    #[error("surl not found in share page URL")]
    ShareIdNotFound,

    #[error("Provider error: {message}")]
    Provider { errno: Option<i64>, message: String },

    #[error("No download link for file: {0}")]
    MissingDownloadLink(String),

    #[error("No remote path for folder: {0}")]
    MissingFolderPath(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Unsupported domain: {0}")]
    UnsupportedDomain(String),

    #[error("Failed to read cookie file: {0}")]
    CookieFile(#[from] std::io::Error),

    #[error("Share contains no files")]
    EmptyShare,

    #[error("Resolution cancelled")]
    Cancelled,
}

impl ShareError {
    /// Short name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ShareError::Transport(_) => "TransportError",
            ShareError::Decode(_) => "DecodeError",
            ShareError::TokenNotFound => "TokenNotFound",
            ShareError::ShareIdNotFound => "ShareIdNotFound",
            ShareError::Provider { .. } => "ProviderError",
            ShareError::MissingDownloadLink(_) => "MissingDownloadLink",
            ShareError::MissingFolderPath(_) => "MissingFolderPath",
            ShareError::InvalidUrl(_) => "InvalidUrl",
            ShareError::UnsupportedDomain(_) => "UnsupportedDomain",
            ShareError::CookieFile(_) => "CookieFileError",
            ShareError::EmptyShare => "EmptyShare",
            ShareError::Cancelled => "Cancelled",
        }
    }

    /// Message exposed to callers of the HTTP front end.
    ///
    /// Token and surl failures keep their fixed wording, provider failures pass
    /// `errmsg` through, everything else collapses to `ERROR: <kind>`.
    pub fn boundary_message(&self) -> String {
        match self {
            ShareError::TokenNotFound => "jsToken not found".to_string(),
            ShareError::ShareIdNotFound => "Could not find surl".to_string(),
            ShareError::Provider { message, .. } => message.clone(),
            other => format!("ERROR: {}", other.kind()),
        }
    }
}

/// Result type alias for ShareError.
pub type Result<T> = std::result::Result<T, ShareError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_messages() {
        assert_eq!(ShareError::TokenNotFound.boundary_message(), "jsToken not found");
        assert_eq!(ShareError::ShareIdNotFound.boundary_message(), "Could not find surl");

        let err = ShareError::Provider {
            errno: Some(123),
            message: "share not found".to_string(),
        };
        assert_eq!(err.boundary_message(), "share not found");

        assert_eq!(ShareError::EmptyShare.boundary_message(), "ERROR: EmptyShare");
    }

    #[test]
    fn test_decode_error_kind() {
        let err: ShareError = serde_json::from_str::<serde_json::Value>("{oops")
            .unwrap_err()
            .into();
        assert_eq!(err.kind(), "DecodeError");
        assert_eq!(err.boundary_message(), "ERROR: DecodeError");
    }
}
