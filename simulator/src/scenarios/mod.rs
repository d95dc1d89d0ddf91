//! Failure scenarios: explicit ones from the configuration and the
//! single-element sweep.

use crate::config::ScenarioConfig;
use crate::stats::UtilizationStats;
use flowplane::{Model, ModelError};
use serde::Serialize;

pub mod sweep_runner;

/// Per-interface result of a scenario
#[derive(Debug, Clone, Serialize)]
pub struct InterfaceReport {
    pub interface: String,
    pub node: String,
    pub remote_node: String,
    pub capacity: f64,
    pub failed: bool,
    /// None when the interface is down
    pub traffic: Option<f64>,
    /// None when the interface is down
    pub utilization: Option<f64>,
    pub reserved_bandwidth: f64,
}

/// Everything recorded about one simulated state of the network
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    pub name: String,
    pub stats: UtilizationStats,
    pub interfaces: Vec<InterfaceReport>,
    pub unrouted_demands: Vec<String>,
    pub unrouted_lsps: Vec<String>,
}

impl ScenarioOutcome {
    /// Record the model's last simulation cycle under `name`
    pub fn capture(name: &str, model: &Model, threshold: f64) -> Self {
        let interfaces = model
            .interfaces()
            .map(|interface| InterfaceReport {
                interface: interface.name.clone(),
                node: interface.node.to_string(),
                remote_node: interface.remote_node.to_string(),
                capacity: interface.capacity,
                failed: interface.failed,
                traffic: interface.traffic.load(),
                utilization: interface.utilization().load(),
                reserved_bandwidth: interface.reserved_bandwidth,
            })
            .collect();

        Self {
            name: name.to_string(),
            stats: UtilizationStats::from_model(model, threshold),
            interfaces,
            unrouted_demands: model
                .get_unrouted_demands()
                .iter()
                .map(|demand| demand.key().to_string())
                .collect(),
            unrouted_lsps: model.get_unrouted_lsps().iter().map(|lsp| lsp.key().to_string()).collect(),
        }
    }
}

/// Apply a scenario's failures to a copy of the baseline and simulate it
pub fn run_scenario(baseline: &Model, scenario: &ScenarioConfig, threshold: f64) -> Result<ScenarioOutcome, ModelError> {
    let mut model = baseline.clone();
    for node in &scenario.fail_nodes {
        model.fail_node(node)?;
    }
    for interface in &scenario.fail_interfaces {
        model.fail_interface(&interface.name, &interface.node)?;
    }
    model.update_simulation()?;

    let outcome = ScenarioOutcome::capture(&scenario.name, &model, threshold);
    outcome.stats.log_summary(&scenario.name);
    Ok(outcome)
}
