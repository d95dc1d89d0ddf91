use serde::{Deserialize, Serialize};
use std::fmt;

pub mod constants;
pub mod node;
pub mod interface;
pub mod circuit;
pub mod demand;
pub mod lsp;
pub mod path;

pub use node::Node;
pub use interface::{Interface, Traffic};
pub use circuit::Circuit;
pub use demand::Demand;
pub use lsp::Lsp;
pub use path::{FeasiblePath, Hop, PathSet, ReservedPath, RoutedPath, LspPath};

/// A unique identifier for a node (its name)
#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct NodeId(pub String);

/// Identity of an interface: its name plus the name of the node that owns it
#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct InterfaceKey {
    /// Name of the node that owns the interface
    pub node: NodeId,
    /// Interface name, unique per node
    pub name: String,
}

/// Identity of a demand: (source, dest, name)
#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct DemandKey {
    pub source: NodeId,
    pub dest: NodeId,
    pub name: String,
}

/// Identity of an LSP: (source, dest, name)
#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct LspKey {
    pub source: NodeId,
    pub dest: NodeId,
    pub name: String,
}

impl NodeId {
    pub fn new(name: impl Into<String>) -> Self {
        NodeId(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(name: &str) -> Self {
        NodeId(name.to_string())
    }
}

impl InterfaceKey {
    pub fn new(name: impl Into<String>, node: impl Into<NodeId>) -> Self {
        Self {
            node: node.into(),
            name: name.into(),
        }
    }
}

impl From<String> for NodeId {
    fn from(name: String) -> Self {
        NodeId(name)
    }
}

impl DemandKey {
    pub fn new(source: impl Into<NodeId>, dest: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            dest: dest.into(),
            name: name.into(),
        }
    }
}

impl LspKey {
    pub fn new(source: impl Into<NodeId>, dest: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            dest: dest.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for InterfaceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.node)
    }
}

impl fmt::Display for DemandKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} ({})", self.source, self.dest, self.name)
    }
}

impl fmt::Display for LspKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lsp {} -> {} ({})", self.source, self.dest, self.name)
    }
}
