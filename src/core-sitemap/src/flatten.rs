//! Flattening a route tree into the static, crawlable paths it describes.

use crate::{config::GeneratorConfig, model::RouteOverride, route_tree::RouteNode};

/// Path segment of an index route: resolves to its parent's path.
pub const INDEX_MARKER: &str = "index";

/// Path segment of a router's root route: contributes no path of its own.
pub const ROOT_SENTINEL: &str = "__root__";

/// A static route that survived flattening.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteDescriptor {
    /// Absolute, normalized path
    pub full_path: String,
    /// Per-route settings configured for `full_path`
    pub overrides: Option<RouteOverride>,
}

/// Walks the tree depth-first (parent before children, siblings in order) and
/// returns every static, non-excluded route.
///
/// Dynamic and excluded nodes are skipped but their children are still visited.
pub fn flatten(root: &RouteNode, config: &GeneratorConfig) -> Vec<RouteDescriptor> {
    let mut descriptors = Vec::new();
    visit(root, "", config, &mut descriptors);
    tracing::debug!("Flattened route tree into {} static routes", descriptors.len());
    descriptors
}

fn visit(node: &RouteNode, parent_path: &str, config: &GeneratorConfig, out: &mut Vec<RouteDescriptor>) {
    let segment = node.path.as_deref().unwrap_or("");
    let full_path = join_paths(parent_path, segment);

    if full_path.is_empty() {
        // nothing to emit
    } else if is_dynamic(segment) || is_dynamic(&full_path) {
        tracing::debug!("Skipping dynamic route: {}", full_path);
    } else if config.excludes().is_excluded(&full_path) {
        tracing::debug!("Skipping excluded route: {}", full_path);
    } else {
        out.push(RouteDescriptor {
            overrides: config.route_override(&full_path).cloned(),
            full_path: full_path.clone(),
        });
    }

    for child in &node.children {
        visit(child, &full_path, config, out);
    }
}

/// Computes a node's absolute path from its parent's path and its own segment.
///
/// # Examples
///
/// ```
/// # use core_sitemap::join_paths;
/// assert_eq!(join_paths("/", "home"), "/home");
/// assert_eq!(join_paths("/blog", "/absolute"), "/absolute");
/// assert_eq!(join_paths("/blog", "index"), "/blog");
/// assert_eq!(join_paths("", ""), "/");
/// assert_eq!(join_paths("", "__root__"), "");
/// ```
pub fn join_paths(parent_path: &str, segment: &str) -> String {
    if segment.starts_with('/') {
        segment.to_string()
    } else if segment.is_empty() || segment == INDEX_MARKER {
        if parent_path.is_empty() {
            "/".to_string()
        } else {
            parent_path.to_string()
        }
    } else if segment == ROOT_SENTINEL {
        String::new()
    } else {
        collapse_slashes(&format!("{}/{}", parent_path, segment))
    }
}

/// Replaces every run of consecutive slashes with a single one.
fn collapse_slashes(path: &str) -> String {
    let mut collapsed = String::with_capacity(path.len());
    let mut previous_slash = false;
    for c in path.chars() {
        if c == '/' {
            if !previous_slash {
                collapsed.push(c);
            }
            previous_slash = true;
        } else {
            collapsed.push(c);
            previous_slash = false;
        }
    }
    collapsed
}

/// True for parameterized segments such as `$id`, `[slug]` or `[...rest]`.
pub fn is_dynamic(segment: &str) -> bool {
    segment.contains(['$', '[', ']'])
}
