use serde::{Deserialize, Serialize};
use super::{InterfaceKey, LspKey};

/// One step of a path: either a raw interface or an established LSP
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Hop {
    Interface(InterfaceKey),
    Lsp(LspKey),
}

/// Result of a shortest-path query: every minimum-cost path plus that cost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSet {
    /// Sum of hop costs, shared by every path in the set
    pub cost: u64,
    /// Equal-cost alternatives, each an ordered list of hops
    pub paths: Vec<Vec<Hop>>,
}

impl PathSet {
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }
}

/// A single loop-free path and its total cost
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FeasiblePath {
    pub cost: u64,
    pub hops: Vec<Hop>,
}

/// The routed state of a demand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RoutedPath {
    /// No path exists between source and destination
    Unrouted,
    /// ECMP set; traffic splits evenly across alternatives
    Routed(Vec<Vec<Hop>>),
}

impl RoutedPath {
    pub fn is_unrouted(&self) -> bool {
        matches!(self, RoutedPath::Unrouted)
    }

    /// The ECMP alternatives, empty when unrouted
    pub fn alternatives(&self) -> &[Vec<Hop>] {
        match self {
            RoutedPath::Unrouted => &[],
            RoutedPath::Routed(paths) => paths,
        }
    }
}

/// The reserved path an LSP is signaled on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservedPath {
    /// Interfaces traversed, in order from source to destination
    pub interfaces: Vec<InterfaceKey>,
    /// Sum of interface costs along the path
    pub path_cost: u64,
    /// Smallest reservable bandwidth along the path when it was admitted
    pub baseline_path_reservable_bw: f64,
}

/// The signaled state of an LSP
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LspPath {
    Unrouted,
    Routed(ReservedPath),
}

impl LspPath {
    pub fn is_unrouted(&self) -> bool {
        matches!(self, LspPath::Unrouted)
    }

    pub fn reserved_path(&self) -> Option<&ReservedPath> {
        match self {
            LspPath::Unrouted => None,
            LspPath::Routed(path) => Some(path),
        }
    }
}
