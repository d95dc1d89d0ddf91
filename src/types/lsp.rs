use serde::{Deserialize, Serialize};
use super::{InterfaceKey, LspKey, LspPath, NodeId};

/// An RSVP-style label-switched path with a bandwidth reservation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lsp {
    pub source: NodeId,
    pub dest: NodeId,
    pub name: String,
    /// Reserved path, or Unrouted when no path could be signaled
    pub path: LspPath,
    /// Bandwidth requested, derived from the demands between source and dest
    pub setup_bandwidth: f64,
    /// Bandwidth actually held on the path; None while unrouted
    pub reserved_bandwidth: Option<f64>,
}

impl Lsp {
    /// Create a new unsignaled LSP
    pub fn new(source: impl Into<NodeId>, dest: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            dest: dest.into(),
            name: name.into(),
            path: LspPath::Unrouted,
            setup_bandwidth: 0.0,
            reserved_bandwidth: None,
        }
    }

    pub fn key(&self) -> LspKey {
        LspKey {
            source: self.source.clone(),
            dest: self.dest.clone(),
            name: self.name.clone(),
        }
    }

    pub fn is_signaled(&self) -> bool {
        !self.path.is_unrouted()
    }

    /// Cost of the reserved path, None while unrouted
    pub fn path_cost(&self) -> Option<u64> {
        self.path.reserved_path().map(|path| path.path_cost)
    }

    /// Interfaces of the reserved path, empty while unrouted
    pub fn interfaces(&self) -> &[InterfaceKey] {
        self.path
            .reserved_path()
            .map(|path| path.interfaces.as_slice())
            .unwrap_or(&[])
    }

    pub fn traverses(&self, interface: &InterfaceKey) -> bool {
        self.interfaces().contains(interface)
    }

    /// Drop the reserved path and its bandwidth
    pub(crate) fn tear_down(&mut self) {
        self.path = LspPath::Unrouted;
        self.reserved_bandwidth = None;
    }
}
