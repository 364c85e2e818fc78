use edca_lab_abstract::{EmptySeriesPolicy, RunConfig};
use serde::Serialize;

/// Immutable parameters shared by every stage of one aggregation pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RunContext {
    pub payload_bits: u64,
    /// Observation window length in seconds
    pub window_s: f64,
    pub empty_series: EmptySeriesPolicy,
}

impl RunContext {
    pub fn new(payload_bits: u64, window_s: f64) -> Self {
        Self {
            payload_bits,
            window_s,
            empty_series: EmptySeriesPolicy::default(),
        }
    }

    pub fn with_empty_series(mut self, policy: EmptySeriesPolicy) -> Self {
        self.empty_series = policy;
        self
    }
}

impl From<&RunConfig> for RunContext {
    fn from(config: &RunConfig) -> Self {
        Self::new(config.payload_bits(), config.duration_s).with_empty_series(config.empty_series)
    }
}
