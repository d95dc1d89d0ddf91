use serde::{Deserialize, Serialize};
use std::fmt;
use super::constants::DEFAULT_PERCENT_RESERVABLE_BANDWIDTH;
use super::{InterfaceKey, NodeId};

/// Traffic carried by an interface during the last simulation cycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Traffic {
    /// The interface is failed and carries nothing
    Down,
    /// Traffic volume in the same unit as capacity
    Load(f64),
}

impl Traffic {
    /// The carried volume, or None when the interface is down
    pub fn load(&self) -> Option<f64> {
        match self {
            Traffic::Down => None,
            Traffic::Load(value) => Some(*value),
        }
    }

    pub fn is_down(&self) -> bool {
        matches!(self, Traffic::Down)
    }
}

impl Default for Traffic {
    fn default() -> Self {
        Traffic::Load(0.0)
    }
}

impl fmt::Display for Traffic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Traffic::Down => write!(f, "Down"),
            Traffic::Load(value) => write!(f, "{}", value),
        }
    }
}

/// One direction of a link, owned by `node` and pointing at `remote_node`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interface {
    /// Interface name, unique per owning node
    pub name: String,
    /// The node that owns this interface
    pub node: NodeId,
    /// The node at the far end of the link
    pub remote_node: NodeId,
    /// IGP metric, must be positive
    pub cost: u32,
    /// Capacity, must be positive
    pub capacity: f64,
    /// Pairing key shared with the remote interface of the same circuit
    pub circuit_id: String,
    /// Whether the interface is failed
    pub failed: bool,
    /// Traffic accumulated during the last simulation cycle
    pub traffic: Traffic,
    /// Bandwidth held by LSPs traversing this interface
    pub reserved_bandwidth: f64,
    /// Whether LSPs may be signaled over this interface
    pub rsvp_enabled: bool,
    /// Share of capacity available for LSP reservations, in percent
    pub percent_reservable_bandwidth: f64,
}

impl Interface {
    /// Create a new RSVP-enabled interface that is up and carries nothing
    pub fn new(
        name: impl Into<String>,
        node: impl Into<NodeId>,
        remote_node: impl Into<NodeId>,
        cost: u32,
        capacity: f64,
        circuit_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            node: node.into(),
            remote_node: remote_node.into(),
            cost,
            capacity,
            circuit_id: circuit_id.into(),
            failed: false,
            traffic: Traffic::default(),
            reserved_bandwidth: 0.0,
            rsvp_enabled: true,
            percent_reservable_bandwidth: DEFAULT_PERCENT_RESERVABLE_BANDWIDTH,
        }
    }

    /// Set the RSVP parameters of the interface
    pub fn with_rsvp(mut self, rsvp_enabled: bool, percent_reservable_bandwidth: f64) -> Self {
        self.rsvp_enabled = rsvp_enabled;
        self.percent_reservable_bandwidth = percent_reservable_bandwidth;
        self
    }

    pub fn key(&self) -> InterfaceKey {
        InterfaceKey {
            node: self.node.clone(),
            name: self.name.clone(),
        }
    }

    /// Traffic divided by capacity, or `Traffic::Down` when failed
    pub fn utilization(&self) -> Traffic {
        match self.traffic {
            Traffic::Down => Traffic::Down,
            Traffic::Load(load) => Traffic::Load(load / self.capacity),
        }
    }

    /// Bandwidth that may still be reserved by LSPs
    pub fn reservable_bandwidth(&self) -> f64 {
        self.capacity * self.percent_reservable_bandwidth / 100.0 - self.reserved_bandwidth
    }
}
