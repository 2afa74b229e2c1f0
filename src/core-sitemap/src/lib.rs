//! # Route Tree Sitemap Generation Library
//!
//! Turns a web application's route tree into an XML sitemap.
//!
//! The pipeline flattens the tree into static paths, resolves each path into a
//! sitemap entry using configured defaults and per-route options, appends any
//! manually supplied entries, and renders the result as a sitemap-protocol
//! document.
//!
//! ## Features
//!
//! - Path normalization (absolute segments, index routes, root sentinels)
//! - Dynamic route filtering (`$id`, `[slug]`)
//! - Exclusion patterns with `*` and `?` wildcards
//! - Per-route `priority`, `changefreq` and `lastmod` overrides
//! - Manual routes from static lists, closures, async closures or JSON files
//! - Pretty-printed or compact output
//!
//! ## Examples
//!
//! ```
//! use core_sitemap::{GeneratorConfig, ManualEntry, RouteNode, SitemapGenerator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = GeneratorConfig::builder()
//!         .base_url("https://example.com")
//!         .exclude_route("/admin/*")
//!         .lastmod("2024-01-01")
//!         .manual_routes(vec![ManualEntry::new("/blog/hello-world").priority(0.8)])
//!         .build()?;
//!
//!     let tree = RouteNode::new("/").with_children(vec![
//!         RouteNode::new("about"),
//!         RouteNode::new("blog").with_children(vec![RouteNode::new("$slug")]),
//!         RouteNode::new("admin"),
//!     ]);
//!
//!     let xml = SitemapGenerator::new(config).xml(&tree).await?;
//!     assert!(xml.contains("<loc>https://example.com/blog/hello-world</loc>"));
//!     assert!(!xml.contains("admin"));
//!     Ok(())
//! }
//! ```

pub mod common;
mod config;
mod errors;
mod exclude;
mod flatten;
mod generator;
mod loader;
mod manual;
mod model;
mod reader;
mod render;
mod resolver;
mod route_tree;

// Public API re-exports
pub use config::{ConfigFile, DEFAULT_CHANGEFREQ, DEFAULT_PRIORITY, GeneratorConfig, GeneratorConfigBuilder};
pub use errors::{Result, SitemapError};
pub use generator::{SitemapGenerator, generate_sitemap, write_sitemap};
pub use manual::{
    FnManualRoutes, JsonFileManualRoutes, LastModified, ManualEntry, ManualRoutesProvider, SyncFnManualRoutes,
};
pub use model::{ChangeFrequency, RouteOverride, SitemapEntry, iso8601};
pub use route_tree::RouteNode;

// Additional exports for advanced usage
pub use common::logging::setup_logging;
pub use exclude::ExcludeMatcher;
pub use flatten::{INDEX_MARKER, ROOT_SENTINEL, RouteDescriptor, flatten, is_dynamic, join_paths};
pub use loader::{ROUTE_TREE_LOCATIONS, find_route_tree, load_route_tree};
pub use reader::parse_sitemap;
pub use render::{SITEMAP_NAMESPACE, render_sitemap};
pub use resolver::{build_url, resolve_manual, resolve_routes};
