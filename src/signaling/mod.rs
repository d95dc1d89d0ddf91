//! RSVP-style LSP signaling with bandwidth admission control.
//!
//! LSPs are signaled one at a time in ascending key order, each against the
//! headroom left by the LSPs signaled before it in the same cycle.

use rand::seq::SliceRandom;
use std::collections::{HashMap, HashSet};
use crate::graph::TopologyGraph;
use crate::model::Model;
use crate::types::constants::BANDWIDTH_EPSILON;
use crate::types::{FeasiblePath, Hop, InterfaceKey, LspKey, LspPath, NodeId, ReservedPath};

#[cfg(test)]
mod tests;

/// Outcome of signaling a single LSP
#[derive(Debug, Clone, PartialEq)]
enum Admission {
    /// A new path was admitted with the full setup bandwidth
    Admitted(ReservedPath),
    /// No candidate had room; the previous path and reservation are kept
    Held,
    /// No candidate had room and there was nothing to keep
    Unrouted,
}

impl Model {
    /// Signal every LSP and recompute the bandwidth reserved on each interface
    pub(crate) fn signal_lsps(&mut self) {
        self.compute_setup_bandwidths();

        for interface in self.interfaces.values_mut() {
            interface.reserved_bandwidth = 0.0;
        }

        // Paths that may be held stay charged until their own LSP is admitted,
        // so LSPs earlier in the order only see the headroom actually free
        let keys: Vec<LspKey> = self.lsps.keys().cloned().collect();
        let holdable: HashSet<LspKey> = keys.iter().filter(|key| self.can_hold(key)).cloned().collect();
        for key in &holdable {
            self.charge(key, 1.0);
        }

        let graph = TopologyGraph::rsvp(self.interfaces.values());
        for key in keys {
            if holdable.contains(&key) {
                self.charge(&key, -1.0);
            }
            let admission = self.admit(&graph, &key);
            let Some(lsp) = self.lsps.get_mut(&key) else {
                continue;
            };
            match admission {
                Admission::Admitted(path) => {
                    tracing::debug!(lsp = %key, cost = path.path_cost, bandwidth = lsp.setup_bandwidth, "LSP signaled");
                    lsp.reserved_bandwidth = Some(lsp.setup_bandwidth);
                    lsp.path = LspPath::Routed(path);
                }
                Admission::Held => {
                    tracing::warn!(
                        lsp = %key,
                        requested = lsp.setup_bandwidth,
                        held = lsp.reserved_bandwidth.unwrap_or(0.0),
                        "Not enough headroom, LSP keeps its current path"
                    );
                }
                Admission::Unrouted => {
                    tracing::debug!(lsp = %key, requested = lsp.setup_bandwidth, "LSP could not be signaled");
                    lsp.tear_down();
                }
            }

            // Later LSPs in this cycle see the headroom this one consumed
            self.charge(&key, 1.0);
        }

        self.recompute_reservations();
    }

    /// Split the demand between each LSP's endpoints evenly across every LSP
    /// sharing those endpoints
    fn compute_setup_bandwidths(&mut self) {
        let setup: Vec<(LspKey, f64)> = {
            let mut offered: HashMap<(&NodeId, &NodeId), f64> = HashMap::new();
            for demand in self.demands.values() {
                *offered.entry((&demand.source, &demand.dest)).or_insert(0.0) += demand.traffic;
            }
            let mut parallel: HashMap<(&NodeId, &NodeId), usize> = HashMap::new();
            for lsp in self.lsps.values() {
                *parallel.entry((&lsp.source, &lsp.dest)).or_insert(0) += 1;
            }

            self.lsps
                .iter()
                .map(|(key, lsp)| {
                    let endpoints = (&lsp.source, &lsp.dest);
                    let total = offered.get(&endpoints).copied().unwrap_or(0.0);
                    let count = parallel.get(&endpoints).copied().unwrap_or(1).max(1);
                    (key.clone(), total / count as f64)
                })
                .collect()
        };
        for (key, bandwidth) in setup {
            if let Some(lsp) = self.lsps.get_mut(&key) {
                lsp.setup_bandwidth = bandwidth;
            }
        }
    }

    /// Pick the path for one LSP given the headroom currently left
    fn admit(&mut self, graph: &TopologyGraph, key: &LspKey) -> Admission {
        let Some(lsp) = self.lsps.get(key) else {
            return Admission::Unrouted;
        };
        let setup = lsp.setup_bandwidth;

        let admissible: Vec<ReservedPath> = graph
            .feasible_paths(&lsp.source, &lsp.dest)
            .into_iter()
            .map(|candidate| self.evaluate(candidate))
            .filter(|candidate| candidate.baseline_path_reservable_bw + BANDWIDTH_EPSILON >= setup)
            .collect();

        let Some(lowest) = admissible.iter().map(|candidate| candidate.path_cost).min() else {
            return if self.can_hold(key) {
                Admission::Held
            } else {
                Admission::Unrouted
            };
        };
        let cheapest: Vec<ReservedPath> = admissible
            .into_iter()
            .filter(|candidate| candidate.path_cost == lowest)
            .collect();
        match cheapest.choose(&mut self.rng) {
            Some(path) => Admission::Admitted(path.clone()),
            None => Admission::Unrouted,
        }
    }

    /// Attach cost and smallest remaining headroom to a candidate path
    fn evaluate(&self, candidate: FeasiblePath) -> ReservedPath {
        let interfaces: Vec<InterfaceKey> = candidate
            .hops
            .into_iter()
            .filter_map(|hop| match hop {
                Hop::Interface(key) => Some(key),
                Hop::Lsp(_) => None,
            })
            .collect();
        let baseline_path_reservable_bw = interfaces
            .iter()
            .filter_map(|key| self.interfaces.get(key))
            .map(|interface| interface.reservable_bandwidth())
            .fold(f64::INFINITY, f64::min);
        ReservedPath {
            interfaces,
            path_cost: candidate.cost,
            baseline_path_reservable_bw,
        }
    }

    /// A signaled LSP keeps its path only while every interface on it is
    /// still up and RSVP-enabled
    fn can_hold(&self, key: &LspKey) -> bool {
        let Some(lsp) = self.lsps.get(key) else {
            return false;
        };
        lsp.is_signaled()
            && lsp.interfaces().iter().all(|interface| {
                self.interfaces
                    .get(interface)
                    .is_some_and(|interface| !interface.failed && interface.rsvp_enabled)
            })
    }

    /// Add `factor` times the bandwidth the LSP holds to every interface on its path
    fn charge(&mut self, key: &LspKey, factor: f64) {
        let Some(lsp) = self.lsps.get(key) else {
            return;
        };
        let bandwidth = lsp.reserved_bandwidth.unwrap_or(0.0) * factor;
        for interface in lsp.interfaces() {
            if let Some(interface) = self.interfaces.get_mut(interface) {
                interface.reserved_bandwidth += bandwidth;
            }
        }
    }

    /// Set each interface's reservation to what the LSPs crossing it hold,
    /// capped at capacity. Bookings past the reservable share are reported
    /// by the validator.
    pub(crate) fn recompute_reservations(&mut self) {
        let mut held: HashMap<InterfaceKey, f64> = HashMap::new();
        for lsp in self.lsps.values() {
            let bandwidth = lsp.reserved_bandwidth.unwrap_or(0.0);
            for interface in lsp.interfaces() {
                *held.entry(interface.clone()).or_insert(0.0) += bandwidth;
            }
        }

        for (key, interface) in self.interfaces.iter_mut() {
            let total = held.get(key).copied().unwrap_or(0.0);
            interface.reserved_bandwidth = total.min(interface.capacity);
        }
    }
}
