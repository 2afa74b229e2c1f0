//! Locating and loading a route tree exported by the router's build step.

use std::path::{Path, PathBuf};

use crate::errors::{Result, SitemapError};
use crate::route_tree::RouteNode;

/// Where route tree exports conventionally live, relative to the project root.
pub const ROUTE_TREE_LOCATIONS: [&str; 4] = [
    "routeTree.json",
    "src/routeTree.json",
    "app/routeTree.json",
    "src/routes/routeTree.json",
];

/// Reads a JSON route tree from disk.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not JSON.
pub async fn load_route_tree(path: impl AsRef<Path>) -> Result<RouteNode> {
    let path = path.as_ref();
    let content = tokio::fs::read_to_string(path).await?;
    let tree: RouteNode = serde_json::from_str(&content)?;
    tracing::info!("Loaded route tree from {}", path.display());
    Ok(tree)
}

/// Returns the first conventional route tree location that exists under `root_dir`.
///
/// # Errors
///
/// Returns [`SitemapError::RouteTreeNotFound`] listing every probed path.
pub async fn find_route_tree(root_dir: impl AsRef<Path>) -> Result<PathBuf> {
    let candidates: Vec<PathBuf> = ROUTE_TREE_LOCATIONS.iter().map(|l| root_dir.as_ref().join(l)).collect();
    for candidate in &candidates {
        if tokio::fs::try_exists(candidate).await? {
            tracing::debug!("Detected route tree at {}", candidate.display());
            return Ok(candidate.clone());
        }
    }
    Err(SitemapError::RouteTreeNotFound(candidates))
}
