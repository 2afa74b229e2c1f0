//! The router's route tree, as consumed by the flattener.

use serde::{Deserialize, Deserializer, de::IgnoredAny};

/// One node of a router's route tree.
///
/// Only the path segment and the children matter here. Anything else a router
/// puts on its nodes (ids, loaders, components) is ignored on deserialization.
/// A node without a usable `path` contributes no segment, and a node without a
/// `children` array has no descendants; neither is an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RouteNode {
    #[serde(default, deserialize_with = "lenient_path")]
    pub path: Option<String>,
    #[serde(default, deserialize_with = "lenient_children")]
    pub children: Vec<RouteNode>,
}

impl RouteNode {
    /// A childless node with the given path segment.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            children: Vec::new(),
        }
    }

    /// A node without a path segment, e.g. a layout route.
    pub fn pathless() -> Self {
        Self::default()
    }

    /// Replaces the node's children.
    pub fn with_children(mut self, children: Vec<RouteNode>) -> Self {
        self.children = children;
        self
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MaybePath {
    Text(String),
    Other(IgnoredAny),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MaybeChildren {
    List(Vec<MaybeNode>),
    Other(IgnoredAny),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MaybeNode {
    Node(RouteNode),
    Other(IgnoredAny),
}

fn lenient_path<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match MaybePath::deserialize(deserializer)? {
        MaybePath::Text(path) => Some(path),
        MaybePath::Other(_) => None,
    })
}

fn lenient_children<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<RouteNode>, D::Error> {
    Ok(match MaybeChildren::deserialize(deserializer)? {
        MaybeChildren::List(children) => children
            .into_iter()
            .filter_map(|child| match child {
                MaybeNode::Node(node) => Some(node),
                MaybeNode::Other(_) => None,
            })
            .collect(),
        MaybeChildren::Other(_) => Vec::new(),
    })
}
