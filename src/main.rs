//! terabox_resolver CLI - Resolve TeraBox share links.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use terabox_resolver::config::{ClientConfig, PathLayout, DEFAULT_API_BASE, DEFAULT_TIMEOUT_SECS};
use terabox_resolver::models::{format_size, Manifest};
use terabox_resolver::{ensure_supported_link, CookieSet, Resolver, ShareRequest};

/// CLI tool for resolving TeraBox share links into direct download links.
#[derive(Parser)]
#[command(name = "terabox_resolver")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a Netscape-format cookies.txt file.
    #[arg(long, env = "TERABOX_COOKIES", default_value = "cookies.txt")]
    cookies: PathBuf,

    /// Base URL of the share listing API.
    #[arg(long, env = "TERABOX_API_BASE", default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Per-request timeout in seconds.
    #[arg(long, env = "TERABOX_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Keep nested folder names in file paths instead of flattening them.
    #[arg(long)]
    nested_paths: bool,

    /// Accept share links outside the TeraBox domain family.
    #[arg(long)]
    allow_any_host: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the title, total size and first download link.
    Link(ShareArgs),

    /// List every file in the share.
    List(ShareArgs),
}

#[derive(Args)]
struct ShareArgs {
    /// Share URL.
    url: String,

    /// Print JSON instead of text.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "terabox_resolver=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let layout = if cli.nested_paths {
        PathLayout::Nested
    } else {
        PathLayout::Flat
    };
    let config = ClientConfig::default()
        .with_api_base(&cli.api_base)
        .with_timeout(Duration::from_secs(cli.timeout))
        .with_path_layout(layout);
    let resolver = Resolver::new(config);

    let cookies = CookieSet::from_file(&cli.cookies)
        .with_context(|| format!("Failed to load cookies from {:?}", cli.cookies))?;
    if cookies.is_empty() {
        tracing::warn!("No cookies loaded from {:?}", cli.cookies);
    }

    let args = match &cli.command {
        Commands::Link(args) | Commands::List(args) => args,
    };
    if !cli.allow_any_host {
        ensure_supported_link(&args.url)
            .with_context(|| format!("No direct link resolver for {}", args.url))?;
    }

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    let request = ShareRequest::new(args.url.clone(), cookies);
    let manifest = resolver
        .resolve_with_cancel(&request, &cancel)
        .await
        .inspect_err(|e| tracing::error!("{}", e.boundary_message()))
        .with_context(|| format!("Failed to resolve share: {}", args.url))?;

    match cli.command {
        Commands::Link(args) => {
            let summary = manifest
                .summary(&args.url)
                .with_context(|| format!("No files in share: {}", args.url))?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("Title: {}", summary.title);
                println!("Size:  {}", format_size(summary.size));
                println!("Link:  {}", summary.download_link);
            }
        }

        Commands::List(args) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&manifest)?);
            } else {
                print_manifest(&manifest);
            }
        }
    }

    Ok(())
}

fn print_manifest(manifest: &Manifest) {
    if manifest.is_empty() {
        println!("No files found.");
        return;
    }

    for line in manifest_lines(manifest) {
        println!("{}", line);
    }
}

/// Render a manifest as a text table.
fn manifest_lines(manifest: &Manifest) -> Vec<String> {
    let mut lines = vec![
        format!("{:<40} {:<30} {}", "NAME", "PATH", "URL"),
        "-".repeat(100),
    ];
    for file in &manifest.files {
        let path = if file.relative_path.is_empty() {
            "-"
        } else {
            file.relative_path.as_str()
        };
        lines.push(format!("{:<40} {:<30} {}", file.filename, path, file.url));
    }
    lines.push(format!(
        "{} file(s), {}",
        manifest.len(),
        format_size(manifest.total_size)
    ));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use terabox_resolver::FileEntry;

    #[test]
    fn test_manifest_lines() {
        let mut manifest = Manifest::new("");
        manifest.add_size(2048);
        manifest.add_file(FileEntry {
            url: "https://x/a.mp4".to_string(),
            filename: "a.mp4".to_string(),
            relative_path: String::new(),
        });
        manifest.add_file(FileEntry {
            url: "https://x/b.mp4".to_string(),
            filename: "b.mp4".to_string(),
            relative_path: "Videos".to_string(),
        });

        let lines = manifest_lines(&manifest);
        assert_eq!(lines.len(), 5);
        assert!(lines[2].contains("a.mp4"));
        assert!(lines[2].contains(" - "));
        assert!(lines[3].contains("Videos"));
        assert_eq!(lines[4], "2 file(s), 2.00 KB");
    }

    #[test]
    fn test_cli_parses_link_command() {
        let cli = Cli::try_parse_from([
            "terabox_resolver",
            "--cookies",
            "/tmp/cookies.txt",
            "--nested-paths",
            "link",
            "https://www.terabox.com/s/1abc",
            "--json",
        ])
        .unwrap();

        assert!(cli.nested_paths);
        assert_eq!(cli.cookies, PathBuf::from("/tmp/cookies.txt"));
        match cli.command {
            Commands::Link(args) => {
                assert_eq!(args.url, "https://www.terabox.com/s/1abc");
                assert!(args.json);
            }
            Commands::List(_) => panic!("expected link command"),
        }
    }
}
