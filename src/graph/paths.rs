//! Path search over a built graph.
//!
//! Paths are returned as hop sequences taken straight from the edges the
//! search walked, never rebuilt from node sequences.

use petgraph::algo::dijkstra;
use petgraph::graph::NodeIndex;
use petgraph::visit::{EdgeRef, Reversed};
use std::collections::{HashMap, HashSet};
use crate::types::{FeasiblePath, Hop, NodeId, PathSet};
use super::TopologyGraph;

impl TopologyGraph {
    /// Every minimum-cost simple path from `source` to `dest` (the ECMP set).
    ///
    /// Returns an empty set when either node is absent from the graph, when
    /// `dest` is unreachable, or when `source == dest`.
    pub fn shortest_paths(&self, source: &NodeId, dest: &NodeId) -> PathSet {
        let empty = PathSet { cost: 0, paths: Vec::new() };
        let (Some(from), Some(to)) = (self.index_of(source), self.index_of(dest)) else {
            return empty;
        };
        if from == to {
            return empty;
        }

        // Distance of every node to `dest`, found by searching the reversed graph
        let distance = dijkstra(Reversed(self.graph()), to, None, |edge| edge.weight().cost);
        let Some(&cost) = distance.get(&from) else {
            return empty;
        };

        let mut paths = Vec::new();
        let mut visited = HashSet::from([from]);
        self.walk_shortest(from, to, &distance, &mut visited, &mut Vec::new(), &mut paths);
        paths.sort();
        PathSet { cost, paths }
    }

    fn walk_shortest(
        &self,
        at: NodeIndex,
        to: NodeIndex,
        distance: &HashMap<NodeIndex, u64>,
        visited: &mut HashSet<NodeIndex>,
        current: &mut Vec<Hop>,
        paths: &mut Vec<Vec<Hop>>,
    ) {
        if at == to {
            paths.push(current.clone());
            return;
        }
        let remaining = distance[&at];
        for edge in self.graph().edges(at) {
            let next = edge.target();
            let Some(&next_remaining) = distance.get(&next) else {
                continue;
            };
            if edge.weight().cost + next_remaining != remaining || visited.contains(&next) {
                continue;
            }
            visited.insert(next);
            current.push(edge.weight().hop.clone());
            self.walk_shortest(next, to, distance, visited, current, paths);
            current.pop();
            visited.remove(&next);
        }
    }

    /// Every loop-free path from `source` to `dest`, cheapest first
    pub fn feasible_paths(&self, source: &NodeId, dest: &NodeId) -> Vec<FeasiblePath> {
        let (Some(from), Some(to)) = (self.index_of(source), self.index_of(dest)) else {
            return Vec::new();
        };
        if from == to {
            return Vec::new();
        }

        let mut paths = Vec::new();
        let mut visited = HashSet::from([from]);
        self.walk_simple(from, to, 0, &mut visited, &mut Vec::new(), &mut paths);
        paths.sort();
        paths
    }

    fn walk_simple(
        &self,
        at: NodeIndex,
        to: NodeIndex,
        cost: u64,
        visited: &mut HashSet<NodeIndex>,
        current: &mut Vec<Hop>,
        paths: &mut Vec<FeasiblePath>,
    ) {
        if at == to {
            paths.push(FeasiblePath {
                cost,
                hops: current.clone(),
            });
            return;
        }
        for edge in self.graph().edges(at) {
            let next = edge.target();
            if visited.contains(&next) {
                continue;
            }
            visited.insert(next);
            current.push(edge.weight().hop.clone());
            self.walk_simple(next, to, cost + edge.weight().cost, visited, current, paths);
            current.pop();
            visited.remove(&next);
        }
    }
}
