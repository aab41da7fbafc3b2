//! Resolution of a share link into a manifest.

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::client::ShareClient;
use crate::config::ClientConfig;
use crate::error::{Result, ShareError};
use crate::models::{Manifest, ShareRequest};
use crate::token::extract_js_token;
use crate::url_parser::{extract_share_id, parse_url};
use crate::walker::walk;

/// Entry point turning share links into manifests.
///
/// Each call builds its own HTTP session; nothing is shared between resolutions.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    config: ClientConfig,
}

impl Resolver {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    /// Resolve a share link into a manifest of direct download links.
    pub async fn resolve(&self, request: &ShareRequest) -> Result<Manifest> {
        self.resolve_with_cancel(request, &CancellationToken::new())
            .await
    }

    /// Like [`Resolver::resolve`], aborting with `Cancelled` once `cancel` fires.
    ///
    /// The first failure ends the resolution; no partial manifest is returned.
    pub async fn resolve_with_cancel(
        &self,
        request: &ShareRequest,
        cancel: &CancellationToken,
    ) -> Result<Manifest> {
        let share_url = parse_url(&request.url)?;
        info!("Resolving share {}", share_url);

        let client = ShareClient::new(self.config.clone(), &request.cookies, &share_url)?;

        let (body, final_url) = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ShareError::Cancelled),
            landing = client.fetch_landing(&share_url) => landing?,
        };

        let token = extract_js_token(&body)?;
        debug!("Extracted jsToken ({} chars)", token.len());

        let share_id = extract_share_id(&final_url)?;
        debug!("Resolved surl {}", share_id);

        let mut manifest = Manifest::new("");
        walk(&client, &share_id, &token, &mut manifest, cancel).await?;

        info!(
            "Resolved {} file(s), {} bytes",
            manifest.len(),
            manifest.total_size
        );
        Ok(manifest)
    }
}
