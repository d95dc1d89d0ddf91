use serde::{Deserialize, Serialize};
use super::NodeId;

/// A router in the topology
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// The node name, unique in the model
    pub name: NodeId,
    /// Whether the node is failed
    pub failed: bool,
    /// Latitude, used for display only
    pub lat: f64,
    /// Longitude, used for display only
    pub lon: f64,
}

impl Node {
    /// Create a new node that is up and sits at (0, 0)
    pub fn new(name: impl Into<NodeId>) -> Self {
        Self {
            name: name.into(),
            failed: false,
            lat: 0.0,
            lon: 0.0,
        }
    }

    /// Create a new node with coordinates
    pub fn with_location(name: impl Into<NodeId>, lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            ..Self::new(name)
        }
    }
}
