use kairos_core::Time;

/// Configuration for a simulation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    /// Latest simulated time an event may execute at.
    pub max_duration: Time,
    /// RNG seed handed to hooks through their context.
    pub seed: u64,
    /// Maximum diagnostics log size (oldest entries dropped when exceeded). 0 = unlimited.
    pub max_diagnostics: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_duration: 600,
            seed: 42,
            max_diagnostics: 0,
        }
    }
}

impl SimConfig {
    /// Set the latest simulated time an event may execute at.
    pub fn with_max_duration(mut self, max_duration: Time) -> Self {
        self.max_duration = max_duration;
        self
    }

    /// Set the RNG seed for reproducible hook randomness.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the maximum diagnostics log size (0 = unlimited).
    pub fn with_max_diagnostics(mut self, max: usize) -> Self {
        self.max_diagnostics = max;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_values() {
        let config = SimConfig::default();
        assert_eq!(config.max_duration, 600);
        assert_eq!(config.seed, 42);
        assert_eq!(config.max_diagnostics, 0);
    }

    #[test]
    fn config_builder_chain() {
        let config = SimConfig::default()
            .with_max_duration(8)
            .with_seed(123)
            .with_max_diagnostics(500);
        assert_eq!(config.max_duration, 8);
        assert_eq!(config.seed, 123);
        assert_eq!(config.max_diagnostics, 500);
    }
}
