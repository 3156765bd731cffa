//! Configuration for the job execution controller.

use serde::{Deserialize, Serialize};

/// Tuning knobs for progress simulation and the service call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Interval between progress ticks in milliseconds.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Progress added per tick.
    #[serde(default = "default_progress_step")]
    pub progress_step: u8,

    /// Ceiling for ticked progress. Kept below 100 so only a real service
    /// completion can finish the bar.
    #[serde(default = "default_progress_cap")]
    pub progress_cap: u8,

    /// Deadline for the conversion service call in seconds. `None` means
    /// wait indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_timeout_secs: Option<u64>,
}

fn default_tick_interval_ms() -> u64 {
    300
}

fn default_progress_step() -> u8 {
    10
}

fn default_progress_cap() -> u8 {
    90
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            progress_step: default_progress_step(),
            progress_cap: default_progress_cap(),
            service_timeout_secs: None,
        }
    }
}

impl ControllerConfig {
    /// Sets the tick interval in milliseconds.
    pub fn with_tick_interval_ms(mut self, ms: u64) -> Self {
        self.tick_interval_ms = ms;
        self
    }

    /// Sets the service call deadline in seconds.
    pub fn with_service_timeout(mut self, secs: u64) -> Self {
        self.service_timeout_secs = Some(secs);
        self
    }
}
