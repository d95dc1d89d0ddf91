use serde::{Deserialize, Serialize};
use super::{DemandKey, Hop, InterfaceKey, NodeId, RoutedPath};

/// Traffic offered from a source node to a destination node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Demand {
    pub source: NodeId,
    pub dest: NodeId,
    /// Offered volume, non-negative
    pub traffic: f64,
    pub name: String,
    /// Paths computed during the last simulation cycle
    pub path: RoutedPath,
}

impl Demand {
    /// Create a new demand that has not been routed yet
    pub fn new(source: impl Into<NodeId>, dest: impl Into<NodeId>, traffic: f64, name: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            dest: dest.into(),
            traffic,
            name: name.into(),
            path: RoutedPath::Unrouted,
        }
    }

    pub fn key(&self) -> DemandKey {
        DemandKey {
            source: self.source.clone(),
            dest: self.dest.clone(),
            name: self.name.clone(),
        }
    }

    /// Whether any ECMP alternative of the demand crosses `interface` directly
    pub fn traverses_interface(&self, interface: &InterfaceKey) -> bool {
        self.path
            .alternatives()
            .iter()
            .flatten()
            .any(|hop| matches!(hop, Hop::Interface(key) if key == interface))
    }
}
