//! terabox_resolver - Resolve TeraBox share links into direct download manifests.
//!
//! This library provides functionality to:
//! - Extract the `jsToken` and `surl` from a share landing page
//! - Walk the share's folder tree through the `share/list` API
//! - Aggregate every file's download link, relative path and total size
//!
//! # Example
//!
//! ```no_run
//! use terabox_resolver::{CookieSet, Resolver, ShareRequest};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let cookies = CookieSet::from_file("cookies.txt")?;
//!     let request = ShareRequest::new("https://www.terabox.com/s/1abc", cookies);
//!
//!     let manifest = Resolver::default().resolve(&request).await?;
//!     for file in &manifest.files {
//!         println!("{} {}", file.filename, file.url);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod cookies;
pub mod error;
pub mod models;
pub mod resolver;
pub mod token;
pub mod url_parser;
pub mod walker;

// Re-exports for convenience
pub use client::ShareClient;
pub use config::{ClientConfig, PathLayout};
pub use cookies::CookieSet;
pub use error::{Result, ShareError};
pub use models::{FileEntry, LinkSummary, Manifest, ShareRequest};
pub use resolver::Resolver;
pub use token::extract_js_token;
pub use url_parser::{ensure_supported_link, extract_share_id};
