//! Directed, cost-weighted graphs projected from the model.
//!
//! Two variants exist: the raw topology graph, whose edges are interfaces,
//! and the LSP mesh, whose edges are signaled LSPs weighted by their path
//! cost. Every edge carries the identity of the element it was built from,
//! so parallel interfaces between the same pair of nodes stay distinct
//! through path search.

use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;
use crate::types::{Hop, Interface, Lsp, NodeId};

pub mod paths;


/// Edge payload: the element the edge stands for and its cost
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub hop: Hop,
    pub cost: u64,
}

/// A snapshot graph keyed by node name
#[derive(Debug, Default)]
pub struct TopologyGraph {
    graph: DiGraph<NodeId, Edge>,
    index: HashMap<NodeId, NodeIndex>,
}

impl TopologyGraph {
    /// Build the raw topology graph from every interface accepted by `include`
    pub fn from_interfaces<'a, I, F>(interfaces: I, include: F) -> Self
    where
        I: IntoIterator<Item = &'a Interface>,
        F: Fn(&Interface) -> bool,
    {
        let mut topology = Self::default();
        for interface in interfaces.into_iter().filter(|interface| include(interface)) {
            topology.add_edge(
                &interface.node,
                &interface.remote_node,
                Edge {
                    hop: Hop::Interface(interface.key()),
                    cost: u64::from(interface.cost),
                },
            );
        }
        topology
    }

    /// Build the raw topology graph, optionally dropping failed interfaces
    pub fn igp<'a, I>(interfaces: I, include_failed: bool) -> Self
    where
        I: IntoIterator<Item = &'a Interface>,
    {
        Self::from_interfaces(interfaces, |interface| include_failed || !interface.failed)
    }

    /// Build the graph LSPs may be signaled over: up, RSVP-enabled interfaces
    pub fn rsvp<'a, I>(interfaces: I) -> Self
    where
        I: IntoIterator<Item = &'a Interface>,
    {
        Self::from_interfaces(interfaces, |interface| !interface.failed && interface.rsvp_enabled)
    }

    /// Build the LSP mesh: one edge per signaled LSP, weighted by its path cost
    pub fn lsp_mesh<'a, I>(lsps: I) -> Self
    where
        I: IntoIterator<Item = &'a Lsp>,
    {
        let mut topology = Self::default();
        for lsp in lsps {
            if let Some(cost) = lsp.path_cost() {
                topology.add_edge(
                    &lsp.source,
                    &lsp.dest,
                    Edge {
                        hop: Hop::Lsp(lsp.key()),
                        cost,
                    },
                );
            }
        }
        topology
    }

    fn node_index(&mut self, node: &NodeId) -> NodeIndex {
        if let Some(index) = self.index.get(node) {
            return *index;
        }
        let index = self.graph.add_node(node.clone());
        self.index.insert(node.clone(), index);
        index
    }

    fn add_edge(&mut self, from: &NodeId, to: &NodeId, edge: Edge) {
        let from = self.node_index(from);
        let to = self.node_index(to);
        self.graph.add_edge(from, to, edge);
    }

    pub(crate) fn graph(&self) -> &DiGraph<NodeId, Edge> {
        &self.graph
    }

    pub(crate) fn index_of(&self, node: &NodeId) -> Option<NodeIndex> {
        self.index.get(node).copied()
    }

    pub fn contains_node(&self, node: &NodeId) -> bool {
        self.index.contains_key(node)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}
