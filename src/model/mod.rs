use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeMap;
use thiserror::Error;
use crate::graph::TopologyGraph;
use crate::types::{
    Circuit, Demand, DemandKey, FeasiblePath, Hop, Interface, InterfaceKey, Lsp, LspKey, Node, NodeId, PathSet,
};
use crate::validation::ValidationReport;

pub mod mutation;
pub mod report;


#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Model validation failed with {} violation(s):\n{0}", .0.violations.len())]
    Validation(ValidationReport),
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),
    #[error("Interface not found: {0}")]
    InterfaceNotFound(InterfaceKey),
    #[error("Demand not found: {0}")]
    DemandNotFound(DemandKey),
    #[error("LSP not found: {0}")]
    LspNotFound(LspKey),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Duplicate entity: {0}")]
    DuplicateEntity(String),
    #[error("Illegal state transition: {0}")]
    IllegalStateTransition(String),
    #[error("Interfaces without a matching remote counterpart: {}", join_keys(.0))]
    TopologyIntegrity(Vec<InterfaceKey>),
}

fn join_keys(keys: &[InterfaceKey]) -> String {
    keys.iter().map(|key| key.to_string()).collect::<Vec<_>>().join(", ")
}

/// The simulation model: every node, interface, demand and LSP, plus the
/// circuits derived from interface pairing.
///
/// Entities live in ordered maps keyed by their identity, so every pass over
/// a collection visits entities in ascending key order.
#[derive(Debug, Clone)]
pub struct Model {
    pub(crate) nodes: BTreeMap<NodeId, Node>,
    pub(crate) interfaces: BTreeMap<InterfaceKey, Interface>,
    pub(crate) demands: BTreeMap<DemandKey, Demand>,
    pub(crate) lsps: BTreeMap<LspKey, Lsp>,
    /// Derived from interface pairing by the validator, never set directly
    pub(crate) circuits: Vec<Circuit>,
    /// Tie-break source for equal-cost LSP candidates
    pub(crate) rng: StdRng,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    /// Create an empty model whose LSP tie-breaks are seeded from entropy
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Create an empty model with reproducible LSP tie-breaks
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            nodes: BTreeMap::new(),
            interfaces: BTreeMap::new(),
            demands: BTreeMap::new(),
            lsps: BTreeMap::new(),
            circuits: Vec::new(),
            rng,
        }
    }

    /// Run one full simulation cycle: signal LSPs, route demands, validate
    pub fn update_simulation(&mut self) -> Result<&mut Self, ModelError> {
        self.signal_lsps();
        self.route_demands();
        self.validate_model()?;

        tracing::info!(
            interfaces = self.interfaces.len(),
            demands = self.demands.len(),
            lsps = self.lsps.len(),
            unrouted_demands = self.get_unrouted_demands().len(),
            unrouted_lsps = self.get_unrouted_lsps().len(),
            "Simulation cycle complete"
        );
        Ok(self)
    }

    // --------------------------------------------------------------------------------------------
    // Lookups
    // --------------------------------------------------------------------------------------------

    pub fn get_node(&self, name: &str) -> Result<&Node, ModelError> {
        let id = NodeId::new(name);
        self.nodes.get(&id).ok_or(ModelError::NodeNotFound(id))
    }

    pub fn get_interface(&self, name: &str, node: &str) -> Result<&Interface, ModelError> {
        let key = InterfaceKey::new(name, node);
        self.interfaces.get(&key).ok_or(ModelError::InterfaceNotFound(key))
    }

    pub fn get_demand(&self, source: &str, dest: &str, name: &str) -> Result<&Demand, ModelError> {
        let key = DemandKey::new(source, dest, name);
        self.demands.get(&key).ok_or(ModelError::DemandNotFound(key))
    }

    pub fn get_lsp(&self, source: &str, dest: &str, name: &str) -> Result<&Lsp, ModelError> {
        let key = LspKey::new(source, dest, name);
        self.lsps.get(&key).ok_or(ModelError::LspNotFound(key))
    }

    pub(crate) fn interface_by_key(&self, key: &InterfaceKey) -> Result<&Interface, ModelError> {
        self.interfaces
            .get(key)
            .ok_or_else(|| ModelError::InterfaceNotFound(key.clone()))
    }

    /// The circuit an interface belongs to
    pub fn get_circuit(&self, name: &str, node: &str) -> Result<&Circuit, ModelError> {
        let key = InterfaceKey::new(name, node);
        self.circuits
            .iter()
            .find(|circuit| circuit.contains(&key))
            .ok_or(ModelError::InterfaceNotFound(key))
    }

    /// The interface on the far end of the circuit
    pub fn get_remote_interface(&self, name: &str, node: &str) -> Result<&Interface, ModelError> {
        let key = InterfaceKey::new(name, node);
        let peer = self
            .circuit_peer(&key)
            .ok_or_else(|| ModelError::InterfaceNotFound(key.clone()))?;
        self.interface_by_key(&peer)
    }

    pub(crate) fn circuit_peer(&self, key: &InterfaceKey) -> Option<InterfaceKey> {
        self.circuits.iter().find_map(|circuit| circuit.peer_of(key).cloned())
    }

    // --------------------------------------------------------------------------------------------
    // Read model
    // --------------------------------------------------------------------------------------------

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn interfaces(&self) -> impl Iterator<Item = &Interface> {
        self.interfaces.values()
    }

    pub fn demands(&self) -> impl Iterator<Item = &Demand> {
        self.demands.values()
    }

    pub fn lsps(&self) -> impl Iterator<Item = &Lsp> {
        self.lsps.values()
    }

    pub fn circuits(&self) -> &[Circuit] {
        &self.circuits
    }

    /// Interfaces owned by `node`
    pub fn get_node_interfaces(&self, node: &str) -> Result<Vec<&Interface>, ModelError> {
        let node = &self.get_node(node)?.name;
        Ok(self.interfaces.values().filter(|interface| &interface.node == node).collect())
    }

    pub fn get_failed_interfaces(&self) -> Vec<&Interface> {
        self.interfaces.values().filter(|interface| interface.failed).collect()
    }

    pub fn get_failed_nodes(&self) -> Vec<&Node> {
        self.nodes.values().filter(|node| node.failed).collect()
    }

    pub fn get_unrouted_demands(&self) -> Vec<&Demand> {
        self.demands.values().filter(|demand| demand.path.is_unrouted()).collect()
    }

    pub fn get_unrouted_lsps(&self) -> Vec<&Lsp> {
        self.lsps.values().filter(|lsp| lsp.path.is_unrouted()).collect()
    }

    /// Nodes that own no interface
    pub fn get_orphan_nodes(&self) -> Vec<&Node> {
        self.nodes
            .values()
            .filter(|node| !self.interfaces.values().any(|interface| interface.node == node.name))
            .collect()
    }

    /// Demands whose traffic is credited to the interface, directly or through an LSP
    pub fn get_demands_on_interface(&self, name: &str, node: &str) -> Result<Vec<&Demand>, ModelError> {
        let key = self.get_interface(name, node)?.key();
        Ok(self
            .demands
            .values()
            .filter(|demand| {
                demand.path.alternatives().iter().flatten().any(|hop| match hop {
                    Hop::Interface(interface) => interface == &key,
                    Hop::Lsp(lsp) => self.lsps.get(lsp).is_some_and(|lsp| lsp.traverses(&key)),
                })
            })
            .collect())
    }

    /// LSPs whose reserved path crosses the interface
    pub fn get_lsps_on_interface(&self, name: &str, node: &str) -> Result<Vec<&Lsp>, ModelError> {
        let key = self.get_interface(name, node)?.key();
        Ok(self.lsps.values().filter(|lsp| lsp.traverses(&key)).collect())
    }

    // --------------------------------------------------------------------------------------------
    // Path queries
    // --------------------------------------------------------------------------------------------

    /// ECMP shortest paths between two nodes over the non-failed topology
    pub fn get_shortest_path(&self, source: &str, dest: &str) -> Result<PathSet, ModelError> {
        let source = self.get_node(source)?.name.clone();
        let dest = self.get_node(dest)?.name.clone();
        Ok(TopologyGraph::igp(self.interfaces.values(), false).shortest_paths(&source, &dest))
    }

    /// Every loop-free path between two nodes over the non-failed topology
    pub fn get_feasible_paths(&self, source: &str, dest: &str) -> Result<Vec<FeasiblePath>, ModelError> {
        let source = self.get_node(source)?.name.clone();
        let dest = self.get_node(dest)?.name.clone();
        Ok(TopologyGraph::igp(self.interfaces.values(), false).feasible_paths(&source, &dest))
    }
}
