//! Engine configuration

use crate::observability::LogLevel;

/// Default smoothing rate for the selectivity moving average
pub const DEFAULT_SMOOTHING_RATE: f32 = 0.01;

/// Tunable engine settings with builder-style setters.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// Exponential moving-average rate for selectivity refresh, in (0, 1]
    pub selectivity_smoothing_rate: f32,
    /// Minimum level the engine logger emits
    pub log_level: LogLevel,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            selectivity_smoothing_rate: DEFAULT_SMOOTHING_RATE,
            log_level: LogLevel::Warn,
        }
    }
}

impl EngineConfig {
    /// Sets the selectivity smoothing rate.
    ///
    /// Panics if the rate is outside (0, 1]; a zero rate would freeze the
    /// statistics and anything above one would overshoot them.
    pub fn with_smoothing_rate(mut self, rate: f32) -> Self {
        assert!(
            rate > 0.0 && rate <= 1.0,
            "smoothing rate must be in (0, 1], got {rate}"
        );
        self.selectivity_smoothing_rate = rate;
        self
    }

    /// Sets the minimum log level
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }
}
