use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::Context;
use chrono::Local;
use flowplane::utils::logging;
use simulator::{run_simulation, Config};

// ------------------------------------------------------------------------------------------------
// Main
// ------------------------------------------------------------------------------------------------

/// Loads the configuration, runs every scenario and saves the results
fn main() -> anyhow::Result<()> {
    let _ = env_logger::try_init();
    logging::init_tracing();

    let config_path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("simulator/config.toml"));
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path.display()))?;

    let results_dir = Path::new(&config.simulation.results_dir);
    fs::create_dir_all(results_dir)
        .with_context(|| format!("Failed to create results directory {}", results_dir.display()))?;
    setup_logging(results_dir);
    log_configuration(&config, &config_path);

    let results = run_simulation(&config, &config_path, true)?;
    results.log_summary();
    let file = results.save(results_dir)?;
    println!("Results written to {}", file.display());

    Ok(())
}

/// Sets up logging if ENABLE_LOGS environment variable is set
fn setup_logging(results_dir: &Path) {
    if env::var("ENABLE_LOGS").is_ok() {
        // Delete existing log file if it exists
        let log_path = results_dir.join("simulation.log");
        if let Err(e) = fs::remove_file(&log_path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                eprintln!("Error deleting log file: {}", e);
            }
        }

        env::set_var("FLOWPLANE_LOGGING", "true");
        env::set_var("FLOWPLANE_LOG_TO_FILE", "true");
        env::set_var("FLOWPLANE_LOG_FILE", &log_path);
        logging::init_logging();
    }
}

fn log_configuration(config: &Config, config_path: &Path) {
    logging::log("SIMULATOR", "=== Simulation Configuration ===");
    logging::log("SIMULATOR", &format!("Start Time: {}", Local::now().format("%Y-%m-%d %H:%M:%S")));
    logging::log("SIMULATOR", &format!("Config: {}", config_path.display()));
    logging::log("SIMULATOR", &format!("Topology: {}", config.topology_path(config_path).display()));
    match config.simulation.seed {
        Some(seed) => logging::log("SIMULATOR", &format!("Seed: {}", seed)),
        None => logging::log("SIMULATOR", "Seed: random"),
    }
    logging::log("SIMULATOR", &format!("Failure Sweep: {}", config.simulation.failure_sweep));
    logging::log(
        "SIMULATOR",
        &format!("Utilization Threshold: {:.0}%", config.simulation.utilization_threshold * 100.0),
    );
    for scenario in &config.scenarios {
        logging::log(
            "SIMULATOR",
            &format!(
                "Scenario '{}': {} interface(s), {} node(s)",
                scenario.name,
                scenario.fail_interfaces.len(),
                scenario.fail_nodes.len()
            ),
        );
    }
    logging::log("SIMULATOR", "=============================");
}
