use flowplane::types::{InterfaceKey, Traffic};
use flowplane::utils::logging;
use flowplane::Model;
use std::collections::BTreeMap;

/// Initialize logging once per test binary
pub fn init() {
    logging::init_logging();
    logging::init_tracing();
}

/// Traffic on every interface, keyed by interface
pub fn traffic_snapshot(model: &Model) -> BTreeMap<InterfaceKey, Traffic> {
    model
        .interfaces()
        .map(|interface| (interface.key(), interface.traffic))
        .collect()
}

/// Total load leaving `node`, ignoring failed interfaces
pub fn load_leaving(model: &Model, node: &str) -> f64 {
    model
        .interfaces()
        .filter(|interface| interface.node.as_str() == node)
        .filter_map(|interface| interface.traffic.load())
        .sum()
}

/// Total load arriving at `node`, ignoring failed interfaces
pub fn load_arriving(model: &Model, node: &str) -> f64 {
    model
        .interfaces()
        .filter(|interface| interface.remote_node.as_str() == node)
        .filter_map(|interface| interface.traffic.load())
        .sum()
}
