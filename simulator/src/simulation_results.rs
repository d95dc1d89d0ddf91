use crate::scenarios::sweep_runner::SweepReport;
use crate::scenarios::ScenarioOutcome;
use crate::SimulatorError;
use chrono::Local;
use flowplane::utils::logging;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Everything produced by one simulator run
#[derive(Debug, Serialize)]
pub struct SimulationResults {
    /// Local time the run started, RFC 3339
    pub started_at: String,
    /// Seed the LSP tie-break was drawn from
    pub seed: u64,
    pub topology_file: String,
    pub utilization_threshold: f64,
    pub baseline: ScenarioOutcome,
    pub scenarios: Vec<ScenarioOutcome>,
    /// Present when the failure sweep was enabled
    pub failure_sweep: Option<SweepReport>,
}

impl SimulationResults {
    pub fn new(seed: u64, topology_file: &Path, utilization_threshold: f64, baseline: ScenarioOutcome) -> Self {
        Self {
            started_at: Local::now().to_rfc3339(),
            seed,
            topology_file: topology_file.display().to_string(),
            utilization_threshold,
            baseline,
            scenarios: Vec::new(),
            failure_sweep: None,
        }
    }

    /// Writes the results as pretty JSON into `dir`, named after the current time
    pub fn save(&self, dir: &Path) -> Result<PathBuf, SimulatorError> {
        fs::create_dir_all(dir)?;
        let file = dir.join(format!("results_{}.json", Local::now().format("%Y%m%d_%H%M%S")));
        fs::write(&file, serde_json::to_string_pretty(self)?)?;
        logging::log("SIMULATOR", &format!("Saved simulation results to {}", file.display()));
        Ok(file)
    }

    /// Logs a short summary of every scenario and the sweep
    pub fn log_summary(&self) {
        logging::log("SIMULATOR", "=== Simulation Summary ===");
        logging::log("SIMULATOR", &format!("Started: {}", self.started_at));
        logging::log("SIMULATOR", &format!("Seed: {}", self.seed));
        logging::log("SIMULATOR", &format!("Topology: {}", self.topology_file));
        self.baseline.stats.log_summary(&self.baseline.name);
        for scenario in &self.scenarios {
            scenario.stats.log_summary(&scenario.name);
        }
        if let Some(sweep) = &self.failure_sweep {
            logging::log("SIMULATOR", &format!("Failure sweep: {} scenarios", sweep.scenarios_run));
            let hot = sweep
                .worst_cases
                .iter()
                .filter(|case| case.utilization > self.utilization_threshold);
            for case in hot {
                logging::log(
                    "SIMULATOR",
                    &format!(
                        "  {}@{} reaches {:.1}% when failing {}",
                        case.interface,
                        case.node,
                        case.utilization * 100.0,
                        case.scenario
                    ),
                );
            }
            for (scenario, demands) in &sweep.stranded_demands {
                logging::log(
                    "SIMULATOR",
                    &format!("  Failing {} strands {} demand(s)", scenario, demands.len()),
                );
            }
        }
        logging::log("SIMULATOR", "==========================");
    }
}
