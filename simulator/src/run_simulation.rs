use crate::config::Config;
use crate::scenarios::sweep_runner::FailureSweep;
use crate::scenarios::{run_scenario, ScenarioOutcome};
use crate::simulation_results::SimulationResults;
use crate::topology::load_topology;
use crate::SimulatorError;
use flowplane::utils::logging;
use std::path::Path;

/// Name the unfailed network is reported under
pub const BASELINE: &str = "baseline";

/// Runs the baseline, every configured scenario and, when enabled, the
/// failure sweep for the configuration loaded from `config_path`
pub fn run_simulation(config: &Config, config_path: &Path, show_progress: bool) -> Result<SimulationResults, SimulatorError> {
    let seed = config.simulation.seed.unwrap_or_else(rand::random);
    let threshold = config.simulation.utilization_threshold;
    let topology_path = config.topology_path(config_path);
    logging::log("SIMULATOR", &format!("Loading topology from {}", topology_path.display()));

    let mut baseline = load_topology(&topology_path, seed)?;
    baseline.update_simulation()?;
    let outcome = ScenarioOutcome::capture(BASELINE, &baseline, threshold);
    outcome.stats.log_summary(BASELINE);
    let mut results = SimulationResults::new(seed, &topology_path, threshold, outcome);

    for scenario in &config.scenarios {
        log::info!("Running scenario '{}'", scenario.name);
        results.scenarios.push(run_scenario(&baseline, scenario, threshold)?);
    }

    if config.simulation.failure_sweep {
        let sweep = FailureSweep::new(&baseline);
        log::info!("Running failure sweep over {} elements", sweep.len());
        results.failure_sweep = Some(sweep.run(show_progress)?);
    }

    Ok(results)
}
