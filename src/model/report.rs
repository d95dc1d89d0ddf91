//! Read-only dumps of the model for reporting and display.

use serde_json::{json, Value};
use crate::types::{Hop, Traffic};
use super::Model;

fn traffic_value(traffic: Traffic) -> Value {
    match traffic {
        Traffic::Down => json!("Down"),
        Traffic::Load(value) => json!(value),
    }
}

fn hop_value(hop: &Hop) -> Value {
    match hop {
        Hop::Interface(key) => json!({ "interface": key.name, "node": key.node }),
        Hop::Lsp(key) => json!({ "lsp": key.name, "source": key.source, "dest": key.dest }),
    }
}

impl Model {
    /// Dump the whole read model as JSON
    pub fn dump(&self) -> Value {
        let nodes: Vec<Value> = self
            .nodes
            .values()
            .map(|node| {
                json!({
                    "name": node.name,
                    "failed": node.failed,
                    "lat": node.lat,
                    "lon": node.lon,
                })
            })
            .collect();

        let interfaces: Vec<Value> = self
            .interfaces
            .values()
            .map(|interface| {
                json!({
                    "name": interface.name,
                    "node": interface.node,
                    "remote_node": interface.remote_node,
                    "cost": interface.cost,
                    "capacity": interface.capacity,
                    "circuit_id": interface.circuit_id,
                    "failed": interface.failed,
                    "traffic": traffic_value(interface.traffic),
                    "utilization": traffic_value(interface.utilization()),
                    "reserved_bandwidth": interface.reserved_bandwidth,
                    "rsvp_enabled": interface.rsvp_enabled,
                    "percent_reservable_bandwidth": interface.percent_reservable_bandwidth,
                })
            })
            .collect();

        let circuits: Vec<Value> = self
            .circuits
            .iter()
            .map(|circuit| {
                json!({
                    "circuit_id": circuit.circuit_id,
                    "a": circuit.a.to_string(),
                    "b": circuit.b.to_string(),
                })
            })
            .collect();

        let demands: Vec<Value> = self
            .demands
            .values()
            .map(|demand| {
                let path = if demand.path.is_unrouted() {
                    json!("Unrouted")
                } else {
                    let alternatives: Vec<Vec<Value>> = demand
                        .path
                        .alternatives()
                        .iter()
                        .map(|alternative| alternative.iter().map(hop_value).collect())
                        .collect();
                    json!(alternatives)
                };
                json!({
                    "source": demand.source,
                    "dest": demand.dest,
                    "name": demand.name,
                    "traffic": demand.traffic,
                    "path": path,
                })
            })
            .collect();

        let lsps: Vec<Value> = self
            .lsps
            .values()
            .map(|lsp| {
                let path = match lsp.path.reserved_path() {
                    None => json!("Unrouted"),
                    Some(path) => json!({
                        "interfaces": path.interfaces.iter().map(|key| key.to_string()).collect::<Vec<_>>(),
                        "path_cost": path.path_cost,
                        "baseline_path_reservable_bw": path.baseline_path_reservable_bw,
                    }),
                };
                json!({
                    "source": lsp.source,
                    "dest": lsp.dest,
                    "name": lsp.name,
                    "setup_bandwidth": lsp.setup_bandwidth,
                    "reserved_bandwidth": lsp.reserved_bandwidth.map_or(json!("Unrouted"), |bandwidth| json!(bandwidth)),
                    "path": path,
                })
            })
            .collect();

        json!({
            "nodes": nodes,
            "interfaces": interfaces,
            "circuits": circuits,
            "demands": demands,
            "lsps": lsps,
        })
    }
}
