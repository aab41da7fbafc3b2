//! Depth-first walk of a share's folder tree.

use std::collections::HashSet;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::client::ShareClient;
use crate::config::PathLayout;
use crate::error::{Result, ShareError};
use crate::models::{FileEntry, ListItem, Manifest};

/// A folder waiting to be listed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderNode {
    /// Provider-side absolute path; `None` is the share root.
    pub remote_path: Option<String>,
    /// Folder names joined from the share root.
    pub local_path: String,
}

impl FolderNode {
    pub fn root(title: &str) -> Self {
        Self {
            remote_path: None,
            local_path: title.to_string(),
        }
    }

    fn child(&self, remote_path: String, name: &str) -> Self {
        Self {
            remote_path: Some(remote_path),
            local_path: join_path(&self.local_path, name),
        }
    }
}

/// Join a relative folder path and a child name with `/`.
pub fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent.trim_end_matches('/'), name)
    }
}

/// Walk the share from its root and record every file in `manifest`.
///
/// Items are handled in the order the provider returns them; a folder is
/// descended into as soon as it is reached (depth-first, pre-order). Each
/// remote path is listed at most once. The first failed listing aborts the walk.
pub async fn walk(
    client: &ShareClient,
    share_id: &str,
    token: &str,
    manifest: &mut Manifest,
    cancel: &CancellationToken,
) -> Result<()> {
    let layout = client.config().path_layout;
    let root = FolderNode::root(&manifest.title);
    let items = list_folder(client, &root, share_id, token, cancel).await?;

    let mut stack = vec![(root, items.into_iter())];
    let mut visited: HashSet<String> = HashSet::new();

    while let Some((node, items)) = stack.last_mut() {
        let Some(item) = items.next() else {
            stack.pop();
            continue;
        };

        if item.isdir {
            if item.path.is_empty() {
                return Err(ShareError::MissingFolderPath(item.server_filename));
            }
            if !visited.insert(item.path.clone()) {
                warn!("Skipping already visited folder {}", item.path);
                continue;
            }

            let child = node.child(item.path, &item.server_filename);
            let children = list_folder(client, &child, share_id, token, cancel).await?;
            stack.push((child, children.into_iter()));
            continue;
        }

        let url = item
            .dlink
            .ok_or_else(|| ShareError::MissingDownloadLink(item.server_filename.clone()))?;
        let relative_path = match layout {
            PathLayout::Flat => manifest.title.clone(),
            PathLayout::Nested => node.local_path.clone(),
        };

        manifest.add_size(item.size);
        manifest.add_file(FileEntry {
            url,
            filename: item.server_filename,
            relative_path,
        });
    }

    Ok(())
}

async fn list_folder(
    client: &ShareClient,
    node: &FolderNode,
    share_id: &str,
    token: &str,
    cancel: &CancellationToken,
) -> Result<Vec<ListItem>> {
    let items = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Err(ShareError::Cancelled),
        items = client.list(node.remote_path.as_deref(), share_id, token) => items?,
    };

    debug!(
        "Listed {} ({} items)",
        node.remote_path.as_deref().unwrap_or("<root>"),
        items.len()
    );
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("", "Videos"), "Videos");
        assert_eq!(join_path("Videos", "2024"), "Videos/2024");
        assert_eq!(join_path("Videos/", "2024"), "Videos/2024");
    }

    #[test]
    fn test_folder_node_child() {
        let root = FolderNode::root("");
        let child = root.child("/Videos".to_string(), "Videos");
        let grandchild = child.child("/Videos/2024".to_string(), "2024");

        assert_eq!(child.local_path, "Videos");
        assert_eq!(grandchild.remote_path.as_deref(), Some("/Videos/2024"));
        assert_eq!(grandchild.local_path, "Videos/2024");
    }
}
