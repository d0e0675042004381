use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// User-tunable application settings, loaded by the binary at startup
/// (confy) and passed down to services unchanged afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Speech rate for guide narration. 1.0 is the host's normal rate.
    pub narration_rate: f32,
    /// Interval between elapsed-time callbacks from the timer widget.
    pub tick_interval_ms: u64,
    /// Directory the ambient loop files are loaded from.
    pub sounds_dir: PathBuf,
}

impl AppSettings {
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Settings with out-of-range values pulled back to usable ones.
    ///
    /// A config file edited by hand can carry a zero tick interval or a
    /// nonsensical rate; sessions still have to run.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if !self.narration_rate.is_finite() || self.narration_rate <= 0.0 {
            self.narration_rate = defaults::NARRATION_RATE;
        }
        self.narration_rate = self.narration_rate.clamp(0.5, 2.0);
        if self.tick_interval_ms == 0 {
            self.tick_interval_ms = defaults::TICK_INTERVAL_MS;
        }
        self
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            narration_rate: defaults::NARRATION_RATE,
            tick_interval_ms: defaults::TICK_INTERVAL_MS,
            sounds_dir: PathBuf::from("assets/sounds"),
        }
    }
}

mod defaults {
    pub const NARRATION_RATE: f32 = 0.9;
    pub const TICK_INTERVAL_MS: u64 = 100;
}
