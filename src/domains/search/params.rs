use serde::{Deserialize, Serialize};

/// Strategy tunables. Defaults are the reference constants the comparisons
/// were calibrated with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    pub initial_radius: u32,
    pub radius_cap: u32,
    pub initial_temperature: f64,
    /// Once the annealing counter exceeds this, it restarts at 1.
    pub iteration_reset: u32,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            initial_radius: 2,
            radius_cap: 100,
            initial_temperature: 1000.0,
            iteration_reset: 1000,
        }
    }
}
