//! Node identifiers
//!
//! A node is either a bare module path (the root module) or `path@version`.

use std::fmt;

/// Separator between a module path and its version
pub const VERSION_SEPARATOR: char = '@';

/// A borrowed view of a node identifier split into path and version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId<'a> {
    pub path: &'a str,
    pub version: Option<&'a str>,
}

impl<'a> NodeId<'a> {
    /// Split a node on the first version separator
    pub fn parse(node: &'a str) -> Self {
        match node.split_once(VERSION_SEPARATOR) {
            Some((path, version)) => Self {
                path,
                version: Some(version),
            },
            None => Self {
                path: node,
                version: None,
            },
        }
    }
}

impl fmt::Display for NodeId<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.version {
            Some(version) => write!(f, "{}{}{}", self.path, VERSION_SEPARATOR, version),
            None => write!(f, "{}", self.path),
        }
    }
}

/// Join a module path and a version into a node identifier
pub fn versioned(path: &str, version: &str) -> String {
    NodeId {
        path,
        version: Some(version),
    }
    .to_string()
}
