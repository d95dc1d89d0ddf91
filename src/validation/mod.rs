//! Whole-model validation.
//!
//! Circuits are re-derived from interface pairing, failed flags are brought
//! back in line across circuits and failed nodes, then every check runs to
//! completion and all violations are reported together.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use crate::model::{Model, ModelError};
use crate::types::constants::{bandwidth_eq, BANDWIDTH_EPSILON};
use crate::types::{Circuit, InterfaceKey, LspKey, NodeId};


/// A single problem found by the validator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Violation {
    /// Interface cost is not a positive integer
    InvalidCost { interface: InterfaceKey, cost: u32 },
    /// Interface capacity is not a positive finite number
    InvalidCapacity { interface: InterfaceKey, capacity: f64 },
    /// Reservable percentage outside 0..=100
    InvalidReservablePercent { interface: InterfaceKey, percent: f64 },
    /// LSPs crossing the interface hold more than its reservable share of capacity
    ReservableBandwidthExceeded { interface: InterfaceKey, held: f64, reservable: f64 },
    /// Recorded reservation differs from what the LSPs crossing the interface hold
    ReservedBandwidthMismatch { interface: InterfaceKey, recorded: f64, expected: f64 },
    /// The two interfaces of a circuit disagree on capacity
    CircuitCapacityMismatch { a: InterfaceKey, a_capacity: f64, b: InterfaceKey, b_capacity: f64 },
    /// An interface is stored under a key that does not match its own name and node
    InterfaceKeyMismatch { stored_as: InterfaceKey, actual: InterfaceKey },
    /// A node is stored under a key that does not match its own name
    NodeKeyMismatch { stored_as: NodeId, actual: NodeId },
    /// An interface references a node that is not in the model
    UnknownNode { interface: InterfaceKey, node: NodeId },
    /// Demand traffic is negative or not a number
    InvalidDemandTraffic { source: NodeId, dest: NodeId, name: String, traffic: f64 },
    /// An LSP path references an interface that is not in the model
    UnknownLspInterface { lsp: LspKey, interface: InterfaceKey },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::InvalidCost { interface, cost } => {
                write!(f, "interface {} has non-positive cost {}", interface, cost)
            }
            Violation::InvalidCapacity { interface, capacity } => {
                write!(f, "interface {} has invalid capacity {}", interface, capacity)
            }
            Violation::InvalidReservablePercent { interface, percent } => {
                write!(f, "interface {} has reservable percentage {} outside 0..=100", interface, percent)
            }
            Violation::ReservableBandwidthExceeded { interface, held, reservable } => write!(
                f,
                "LSPs on interface {} hold {} but only {} is reservable",
                interface, held, reservable
            ),
            Violation::ReservedBandwidthMismatch { interface, recorded, expected } => write!(
                f,
                "interface {} records {} reserved but its LSPs hold {}",
                interface, recorded, expected
            ),
            Violation::CircuitCapacityMismatch { a, a_capacity, b, b_capacity } => write!(
                f,
                "circuit {} / {} has mismatched capacities {} / {}",
                a, b, a_capacity, b_capacity
            ),
            Violation::InterfaceKeyMismatch { stored_as, actual } => {
                write!(f, "interface {} is stored as {}", actual, stored_as)
            }
            Violation::NodeKeyMismatch { stored_as, actual } => {
                write!(f, "node {} is stored as {}", actual, stored_as)
            }
            Violation::UnknownNode { interface, node } => {
                write!(f, "interface {} references unknown node {}", interface, node)
            }
            Violation::InvalidDemandTraffic { source, dest, name, traffic } => write!(
                f,
                "demand {} -> {} ({}) has invalid traffic {}",
                source, dest, name, traffic
            ),
            Violation::UnknownLspInterface { lsp, interface } => {
                write!(f, "{} references unknown interface {}", lsp, interface)
            }
        }
    }
}

/// Every violation found in one validation pass
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for violation in &self.violations {
            writeln!(f, "  - {}", violation)?;
        }
        Ok(())
    }
}

impl Model {
    /// Re-derive circuits and check every model invariant
    pub fn validate_model(&mut self) -> Result<&mut Self, ModelError> {
        self.run_validation()?;
        Ok(self)
    }

    pub(crate) fn run_validation(&mut self) -> Result<(), ModelError> {
        let circuits = self.derive_circuits()?;
        self.reconcile_failed_state(&circuits);

        let mut report = ValidationReport::default();
        self.check_nodes(&mut report);
        self.check_interfaces(&mut report);
        self.check_circuits(&circuits, &mut report);
        self.check_reservations(&mut report);
        self.check_demands(&mut report);

        if !report.is_empty() {
            tracing::warn!(violations = report.violations.len(), "Model validation failed");
            return Err(ModelError::Validation(report));
        }
        self.circuits = circuits;
        Ok(())
    }

    /// Pair every interface with the one on its remote node that points back
    /// at it with the same circuit id
    fn derive_circuits(&self) -> Result<Vec<Circuit>, ModelError> {
        let mut by_endpoints: HashMap<(&NodeId, &NodeId, &str), Vec<&InterfaceKey>> = HashMap::new();
        for (key, interface) in &self.interfaces {
            by_endpoints
                .entry((&interface.node, &interface.remote_node, interface.circuit_id.as_str()))
                .or_default()
                .push(key);
        }

        let mut circuits = Vec::new();
        let mut unmatched = Vec::new();
        for (key, interface) in &self.interfaces {
            let candidates = by_endpoints
                .get(&(&interface.remote_node, &interface.node, interface.circuit_id.as_str()))
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            let mirrored = by_endpoints
                .get(&(&interface.node, &interface.remote_node, interface.circuit_id.as_str()))
                .map(Vec::len)
                .unwrap_or(0);
            match candidates {
                [peer] if mirrored == 1 => {
                    if key < *peer {
                        circuits.push(Circuit::new(key.clone(), (*peer).clone(), interface.circuit_id.clone()));
                    }
                }
                _ => unmatched.push(key.clone()),
            }
        }

        if !unmatched.is_empty() {
            tracing::warn!(unmatched = unmatched.len(), "Interfaces without a remote counterpart");
            return Err(ModelError::TopologyIntegrity(unmatched));
        }
        Ok(circuits)
    }

    /// Force both sides of a circuit down when either is down, and every
    /// interface touching a failed node down
    fn reconcile_failed_state(&mut self, circuits: &[Circuit]) {
        for circuit in circuits {
            let a_failed = self.interfaces.get(&circuit.a).is_some_and(|interface| interface.failed);
            let b_failed = self.interfaces.get(&circuit.b).is_some_and(|interface| interface.failed);
            if a_failed != b_failed {
                tracing::debug!(a = %circuit.a, b = %circuit.b, "Forcing both sides of circuit to failed");
                for key in [&circuit.a, &circuit.b] {
                    if let Some(interface) = self.interfaces.get_mut(key) {
                        interface.failed = true;
                    }
                }
            }
        }

        let failed_nodes: Vec<NodeId> = self
            .nodes
            .values()
            .filter(|node| node.failed)
            .map(|node| node.name.clone())
            .collect();
        for interface in self.interfaces.values_mut() {
            if !interface.failed
                && (failed_nodes.contains(&interface.node) || failed_nodes.contains(&interface.remote_node))
            {
                interface.failed = true;
            }
        }
    }

    fn check_nodes(&self, report: &mut ValidationReport) {
        for (id, node) in &self.nodes {
            if id != &node.name {
                report.violations.push(Violation::NodeKeyMismatch {
                    stored_as: id.clone(),
                    actual: node.name.clone(),
                });
            }
        }
    }

    fn check_interfaces(&self, report: &mut ValidationReport) {
        for (key, interface) in &self.interfaces {
            let actual = interface.key();
            if key != &actual {
                report.violations.push(Violation::InterfaceKeyMismatch {
                    stored_as: key.clone(),
                    actual,
                });
            }
            if interface.cost == 0 {
                report.violations.push(Violation::InvalidCost {
                    interface: key.clone(),
                    cost: interface.cost,
                });
            }
            if !interface.capacity.is_finite() || interface.capacity <= 0.0 {
                report.violations.push(Violation::InvalidCapacity {
                    interface: key.clone(),
                    capacity: interface.capacity,
                });
            }
            if !(0.0..=100.0).contains(&interface.percent_reservable_bandwidth) {
                report.violations.push(Violation::InvalidReservablePercent {
                    interface: key.clone(),
                    percent: interface.percent_reservable_bandwidth,
                });
            }
            for node in [&interface.node, &interface.remote_node] {
                if !self.nodes.contains_key(node) {
                    report.violations.push(Violation::UnknownNode {
                        interface: key.clone(),
                        node: node.clone(),
                    });
                }
            }
        }
    }

    fn check_circuits(&self, circuits: &[Circuit], report: &mut ValidationReport) {
        for circuit in circuits {
            let (Some(a), Some(b)) = (self.interfaces.get(&circuit.a), self.interfaces.get(&circuit.b)) else {
                continue;
            };
            if !bandwidth_eq(a.capacity, b.capacity) {
                report.violations.push(Violation::CircuitCapacityMismatch {
                    a: circuit.a.clone(),
                    a_capacity: a.capacity,
                    b: circuit.b.clone(),
                    b_capacity: b.capacity,
                });
            }
        }
    }

    /// LSPs on an interface may hold at most its reservable share, and the
    /// interface must record exactly what they hold, capped at capacity
    fn check_reservations(&self, report: &mut ValidationReport) {
        let mut held: BTreeMap<&InterfaceKey, f64> = BTreeMap::new();
        for (lsp_key, lsp) in &self.lsps {
            let bandwidth = lsp.reserved_bandwidth.unwrap_or(0.0);
            for interface in lsp.interfaces() {
                if !self.interfaces.contains_key(interface) {
                    report.violations.push(Violation::UnknownLspInterface {
                        lsp: lsp_key.clone(),
                        interface: interface.clone(),
                    });
                    continue;
                }
                *held.entry(interface).or_insert(0.0) += bandwidth;
            }
        }

        for (key, interface) in &self.interfaces {
            let total = held.get(key).copied().unwrap_or(0.0);
            let reservable = (interface.capacity * interface.percent_reservable_bandwidth / 100.0).max(0.0);
            if total > reservable + BANDWIDTH_EPSILON {
                report.violations.push(Violation::ReservableBandwidthExceeded {
                    interface: key.clone(),
                    held: total,
                    reservable,
                });
            }
            let expected = total.min(interface.capacity);
            if !bandwidth_eq(interface.reserved_bandwidth, expected) {
                report.violations.push(Violation::ReservedBandwidthMismatch {
                    interface: key.clone(),
                    recorded: interface.reserved_bandwidth,
                    expected,
                });
            }
        }
    }

    fn check_demands(&self, report: &mut ValidationReport) {
        for demand in self.demands.values() {
            if !demand.traffic.is_finite() || demand.traffic < 0.0 {
                report.violations.push(Violation::InvalidDemandTraffic {
                    source: demand.source.clone(),
                    dest: demand.dest.clone(),
                    name: demand.name.clone(),
                    traffic: demand.traffic,
                });
            }
        }
    }
}
