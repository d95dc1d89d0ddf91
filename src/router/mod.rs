//! Demand routing and per-interface traffic accumulation.

use std::collections::{HashMap, HashSet};
use crate::graph::TopologyGraph;
use crate::model::Model;
use crate::types::{DemandKey, Hop, InterfaceKey, NodeId, RoutedPath, Traffic};

#[cfg(test)]
mod tests;

impl Model {
    /// Route every demand and recompute the traffic on every interface.
    ///
    /// Demands whose endpoints are shared by at least one signaled LSP ride
    /// the LSP mesh; all others follow IGP shortest paths. Traffic splits
    /// evenly across the ECMP alternatives of each demand.
    pub(crate) fn route_demands(&mut self) {
        for interface in self.interfaces.values_mut() {
            interface.traffic = if interface.failed {
                Traffic::Down
            } else {
                Traffic::Load(0.0)
            };
        }

        let igp = TopologyGraph::igp(self.interfaces.values(), false);
        let mesh = TopologyGraph::lsp_mesh(self.lsps.values().filter(|lsp| lsp.is_signaled()));
        let lsp_endpoints: HashSet<(&NodeId, &NodeId)> = self
            .lsps
            .values()
            .filter(|lsp| lsp.is_signaled())
            .map(|lsp| (&lsp.source, &lsp.dest))
            .collect();

        let mut routed: Vec<(DemandKey, RoutedPath)> = Vec::with_capacity(self.demands.len());
        let mut credited: HashMap<InterfaceKey, f64> = HashMap::new();
        for (key, demand) in &self.demands {
            let rides_lsps = lsp_endpoints.contains(&(&demand.source, &demand.dest));
            let graph = if rides_lsps { &mesh } else { &igp };
            let paths = graph.shortest_paths(&demand.source, &demand.dest);
            if paths.is_empty() {
                tracing::debug!(demand = %key, "Demand is unrouted");
                routed.push((key.clone(), RoutedPath::Unrouted));
                continue;
            }

            let ecmp_split = 1.0 / paths.len() as f64;
            let share = demand.traffic * ecmp_split;
            tracing::debug!(demand = %key, alternatives = paths.len(), cost = paths.cost, over_lsps = rides_lsps, "Demand routed");
            for alternative in &paths.paths {
                for interface in self.expand_hops(alternative) {
                    *credited.entry(interface.clone()).or_insert(0.0) += share;
                }
            }
            routed.push((key.clone(), RoutedPath::Routed(paths.paths)));
        }

        for (key, path) in routed {
            if let Some(demand) = self.demands.get_mut(&key) {
                demand.path = path;
            }
        }
        for (key, load) in credited {
            if let Some(interface) = self.interfaces.get_mut(&key) {
                if let Traffic::Load(current) = interface.traffic {
                    interface.traffic = Traffic::Load(current + load);
                }
            }
        }
    }

    /// The interfaces a path physically crosses, with LSP hops replaced by
    /// the interfaces of their reserved paths
    pub(crate) fn expand_hops<'a>(&'a self, hops: &'a [Hop]) -> Vec<&'a InterfaceKey> {
        let mut interfaces = Vec::with_capacity(hops.len());
        for hop in hops {
            match hop {
                Hop::Interface(key) => interfaces.push(key),
                Hop::Lsp(key) => {
                    if let Some(lsp) = self.lsps.get(key) {
                        interfaces.extend(lsp.interfaces());
                    }
                }
            }
        }
        interfaces
    }
}
