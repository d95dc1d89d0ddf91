//! Single-element failure sweep: every circuit, then every node, is failed
//! on its own and the worst utilization seen by each interface is kept.

use flowplane::utils::logging;
use flowplane::{Model, ModelError};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::collections::BTreeMap;

/// Highest utilization an interface reached across the sweep
#[derive(Debug, Clone, Serialize)]
pub struct WorstCase {
    pub interface: String,
    pub node: String,
    pub utilization: f64,
    /// Scenario that produced the worst case; "baseline" when no failure made it worse
    pub scenario: String,
}

/// Result of a complete sweep
#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    pub scenarios_run: usize,
    /// One entry per interface, in interface key order
    pub worst_cases: Vec<WorstCase>,
    /// Scenarios that left demands unrouted, with those demands
    pub stranded_demands: BTreeMap<String, Vec<String>>,
}

/// A single failure to apply during the sweep
#[derive(Debug, Clone)]
enum Failure {
    Circuit { interface: String, node: String },
    Node(String),
}

impl Failure {
    fn label(&self) -> String {
        match self {
            Failure::Circuit { interface, node } => format!("circuit {}@{}", interface, node),
            Failure::Node(node) => format!("node {}", node),
        }
    }

    fn apply(&self, model: &mut Model) -> Result<(), ModelError> {
        match self {
            Failure::Circuit { interface, node } => model.fail_interface(interface, node),
            Failure::Node(node) => model.fail_node(node),
        }
    }
}

/// Runs the single-element failure sweep against a simulated baseline
pub struct FailureSweep<'a> {
    baseline: &'a Model,
    failures: Vec<Failure>,
}

impl<'a> FailureSweep<'a> {
    /// One failure per circuit and per node that is up in the baseline
    pub fn new(baseline: &'a Model) -> Self {
        let circuits = baseline.circuits().iter().filter_map(|circuit| {
            let interface = baseline.get_interface(&circuit.a.name, circuit.a.node.as_str()).ok()?;
            (!interface.failed).then(|| Failure::Circuit {
                interface: circuit.a.name.clone(),
                node: circuit.a.node.to_string(),
            })
        });
        let nodes = baseline
            .nodes()
            .filter(|node| !node.failed)
            .map(|node| Failure::Node(node.name.to_string()));
        Self {
            baseline,
            failures: circuits.chain(nodes).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Run every failure on its own copy of the baseline
    pub fn run(&self, show_progress: bool) -> Result<SweepReport, ModelError> {
        let mut worst: BTreeMap<(String, String), (f64, String)> = self
            .baseline
            .interfaces()
            .map(|interface| {
                let utilization = interface.utilization().load().unwrap_or(0.0);
                ((interface.node.to_string(), interface.name.clone()), (utilization, "baseline".to_string()))
            })
            .collect();
        let mut stranded_demands = BTreeMap::new();

        let progress_bar = if show_progress {
            ProgressBar::new(self.failures.len() as u64)
        } else {
            ProgressBar::hidden()
        };
        if let Ok(style) = ProgressStyle::default_bar().template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}") {
            progress_bar.set_style(style.progress_chars("+>-"));
        }

        for failure in &self.failures {
            let label = failure.label();
            progress_bar.set_message(label.clone());
            logging::log("SWEEP", &format!("Failing {}", label));

            let mut model = self.baseline.clone();
            failure.apply(&mut model)?;
            model.update_simulation()?;

            for interface in model.interfaces() {
                let Some(utilization) = interface.utilization().load() else {
                    continue;
                };
                let key = (interface.node.to_string(), interface.name.clone());
                if let Some(entry) = worst.get_mut(&key) {
                    if utilization > entry.0 {
                        *entry = (utilization, label.clone());
                    }
                }
            }
            let unrouted: Vec<String> = model
                .get_unrouted_demands()
                .iter()
                .map(|demand| demand.key().to_string())
                .collect();
            if !unrouted.is_empty() {
                stranded_demands.insert(label, unrouted);
            }
            progress_bar.inc(1);
        }
        progress_bar.finish_with_message("Failure sweep complete");

        let worst_cases = worst
            .into_iter()
            .map(|((node, interface), (utilization, scenario))| WorstCase {
                interface,
                node,
                utilization,
                scenario,
            })
            .collect();
        Ok(SweepReport {
            scenarios_run: self.failures.len(),
            worst_cases,
            stranded_demands,
        })
    }
}
