//! Main generator for creating sitemaps from route trees.

use crate::config::GeneratorConfig;
use crate::errors::Result;
use crate::flatten::flatten;
use crate::model::SitemapEntry;
use crate::render::render_sitemap;
use crate::resolver::{resolve_manual, resolve_routes};
use crate::route_tree::RouteNode;

/// Generates sitemaps for route trees with a fixed configuration.
///
/// Holds no state besides the configuration: every call runs the whole
/// flatten → resolve → render pipeline again and returns a fresh result.
///
/// # Examples
///
/// ```
/// # use core_sitemap::{GeneratorConfig, RouteNode, SitemapGenerator};
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = GeneratorConfig::builder()
///     .base_url("https://example.com")
///     .exclude_route("/admin/*")
///     .build()?;
///
/// let tree = RouteNode::new("/").with_children(vec![RouteNode::new("about"), RouteNode::new("admin")]);
/// let generator = SitemapGenerator::new(config);
/// let urls: Vec<String> = generator.entries(&tree).await.into_iter().map(|e| e.url).collect();
/// assert_eq!(urls, vec!["https://example.com/", "https://example.com/about"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SitemapGenerator {
    config: GeneratorConfig,
}

impl SitemapGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Static entries (depth-first, deduplicated) followed by manual entries.
    ///
    /// The manual routes provider is awaited once; a failing provider contributes no entries.
    pub async fn entries(&self, tree: &RouteNode) -> Vec<SitemapEntry> {
        let descriptors = flatten(tree, &self.config);
        let mut entries = resolve_routes(&descriptors, &self.config);
        let static_count = entries.len();

        entries.extend(resolve_manual(&self.config).await);

        tracing::info!(
            "Resolved {} sitemap entries ({} static, {} manual)",
            entries.len(),
            static_count,
            entries.len() - static_count
        );
        entries
    }

    /// The sitemap document for the tree, pretty-printed if configured.
    pub async fn xml(&self, tree: &RouteNode) -> Result<String> {
        let entries = self.entries(tree).await;
        render_sitemap(&entries, self.config.pretty_print())
    }
}

/// One-off generation of the sitemap document for a tree.
pub async fn generate_sitemap(tree: &RouteNode, config: &GeneratorConfig) -> Result<String> {
    SitemapGenerator::new(config.clone()).xml(tree).await
}

/// Writes a sitemap document to disk, creating missing parent directories.
pub async fn write_sitemap(path: impl AsRef<std::path::Path>, xml: &str) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, xml).await?;
    tracing::info!("Wrote sitemap ({} bytes) to {}", xml.len(), path.display());
    Ok(())
}
