use serde::{Deserialize, Serialize};

/// Passes allowed after the first before giving up on convergence
pub const DEFAULT_MAX_ITERATIONS: usize = 50;

/// Settings shared by every alignment in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeftAlignConfig {
    /// Iteration budget handed to the stabilization driver
    pub max_iterations: usize,
    /// Worker threads for batch normalization
    pub threads: usize,
}

impl Default for LeftAlignConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            threads: 1,
        }
    }
}

impl LeftAlignConfig {
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }
}
