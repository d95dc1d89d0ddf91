//! Utilization statistics for a simulated model.
//! Summarizes interface load, hot interfaces and stranded demands after a cycle.

use flowplane::utils::logging;
use flowplane::Model;
use serde::Serialize;

// ------------------------------------------------------------------------------------------------
// Statistics Tracking
// ------------------------------------------------------------------------------------------------

/// Load summary of one simulated state of the network
#[derive(Debug, Clone, Serialize)]
pub struct UtilizationStats {
    /// Number of interfaces that are up
    pub interfaces_up: usize,
    /// Number of failed interfaces
    pub interfaces_down: usize,
    /// Mean utilization over interfaces that are up
    pub mean_utilization: f64,
    /// Highest utilization and the interface carrying it, as `name@node`
    pub max_utilization: Option<(String, f64)>,
    /// Interfaces whose utilization exceeds the threshold, as `name@node`
    pub above_threshold: Vec<String>,
    /// Demands with no path
    pub unrouted_demands: usize,
    /// LSPs with no reserved path
    pub unrouted_lsps: usize,
}

impl UtilizationStats {
    /// Summarize the model's last simulation cycle
    pub fn from_model(model: &Model, threshold: f64) -> Self {
        let mut interfaces_up = 0;
        let mut interfaces_down = 0;
        let mut total = 0.0;
        let mut max_utilization: Option<(String, f64)> = None;
        let mut above_threshold = Vec::new();

        for interface in model.interfaces() {
            let Some(utilization) = interface.utilization().load() else {
                interfaces_down += 1;
                continue;
            };
            interfaces_up += 1;
            total += utilization;
            if utilization > threshold {
                above_threshold.push(interface.key().to_string());
            }
            if max_utilization.as_ref().map_or(true, |(_, max)| utilization > *max) {
                max_utilization = Some((interface.key().to_string(), utilization));
            }
        }

        Self {
            interfaces_up,
            interfaces_down,
            mean_utilization: if interfaces_up > 0 { total / interfaces_up as f64 } else { 0.0 },
            max_utilization,
            above_threshold,
            unrouted_demands: model.get_unrouted_demands().len(),
            unrouted_lsps: model.get_unrouted_lsps().len(),
        }
    }

    /// Logs the summary under the given scenario name
    pub fn log_summary(&self, scenario: &str) {
        logging::log("SIMULATOR", &format!("=== {} ===", scenario));
        logging::log(
            "SIMULATOR",
            &format!("Interfaces up/down: {}/{}", self.interfaces_up, self.interfaces_down),
        );
        logging::log("SIMULATOR", &format!("Mean utilization: {:.1}%", self.mean_utilization * 100.0));
        if let Some((interface, utilization)) = &self.max_utilization {
            logging::log(
                "SIMULATOR",
                &format!("Max utilization: {:.1}% on {}", utilization * 100.0, interface),
            );
        }
        logging::log("SIMULATOR", &format!("Hot interfaces: {}", self.above_threshold.len()));
        logging::log(
            "SIMULATOR",
            &format!("Unrouted demands/LSPs: {}/{}", self.unrouted_demands, self.unrouted_lsps),
        );
    }
}
