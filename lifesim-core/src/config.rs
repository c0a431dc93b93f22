//! Engine configuration.

use crate::narrative::NarrativeTiming;
use std::env;
use std::time::Duration;
use thiserror::Error;

pub const TICK_SECS_VAR: &str = "LIFESIM_TICK_SECS";
pub const TIME_SCALE_VAR: &str = "LIFESIM_TIME_SCALE";
pub const SEED_VAR: &str = "LIFESIM_SEED";

/// Errors from reading configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{var} must be a non-negative number of seconds, got {value:?}")]
    InvalidTick { var: &'static str, value: String },

    #[error("{var} must be a positive number, got {value:?}")]
    InvalidTimeScale { var: &'static str, value: String },

    #[error("{var} must be an unsigned integer, got {value:?}")]
    InvalidSeed { var: &'static str, value: String },
}

/// Settings for a game engine.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Real time between decay ticks. `None` disables passive decay.
    pub tick_period: Option<Duration>,

    /// Multiplier applied to every real-time delay (actions, story beats,
    /// day transition). The decay tick is not scaled.
    pub time_scale: f64,

    /// Pause between the day-end summary and the next morning.
    pub day_transition: Duration,

    /// How long input stays disabled during the day-4 event.
    pub forced_event: Duration,

    /// Gap between story beats of scripted sequences.
    pub story_beat: Duration,

    /// Seed for task generation. Random when unset.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_period: Some(Duration::from_secs(60)),
            time_scale: 1.0,
            day_transition: Duration::from_secs(3),
            forced_event: Duration::from_secs(5),
            story_beat: Duration::from_secs(2),
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `LIFESIM_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Like [`EngineConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(TICK_SECS_VAR) {
            let secs: f64 = value.trim().parse().map_err(|_| ConfigError::InvalidTick {
                var: TICK_SECS_VAR,
                value: value.clone(),
            })?;
            if !secs.is_finite() || secs < 0.0 {
                return Err(ConfigError::InvalidTick {
                    var: TICK_SECS_VAR,
                    value,
                });
            }
            config.tick_period = (secs > 0.0).then(|| Duration::from_secs_f64(secs));
        }

        if let Some(value) = lookup(TIME_SCALE_VAR) {
            let scale: f64 = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidTimeScale {
                    var: TIME_SCALE_VAR,
                    value: value.clone(),
                })?;
            if !scale.is_finite() || scale <= 0.0 {
                return Err(ConfigError::InvalidTimeScale {
                    var: TIME_SCALE_VAR,
                    value,
                });
            }
            config.time_scale = scale;
        }

        if let Some(value) = lookup(SEED_VAR) {
            let seed = value.trim().parse().map_err(|_| ConfigError::InvalidSeed {
                var: SEED_VAR,
                value: value.clone(),
            })?;
            config.seed = Some(seed);
        }

        Ok(config)
    }

    /// Set the decay tick period (`None` disables it).
    pub fn with_tick_period(mut self, period: Option<Duration>) -> Self {
        self.tick_period = period;
        self
    }

    pub fn without_decay(self) -> Self {
        self.with_tick_period(None)
    }

    /// Set the delay multiplier.
    pub fn with_time_scale(mut self, scale: f64) -> Self {
        self.time_scale = scale;
        self
    }

    pub fn with_day_transition(mut self, delay: Duration) -> Self {
        self.day_transition = delay;
        self
    }

    pub fn with_forced_event(mut self, delay: Duration) -> Self {
        self.forced_event = delay;
        self
    }

    pub fn with_story_beat(mut self, delay: Duration) -> Self {
        self.story_beat = delay;
        self
    }

    /// Fix the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Apply the time scale to a real-time delay.
    pub fn scaled(&self, delay: Duration) -> Duration {
        if delay.is_zero() || self.time_scale == 1.0 {
            return delay;
        }
        delay.mul_f64(self.time_scale)
    }

    pub fn narrative_timing(&self) -> NarrativeTiming {
        NarrativeTiming {
            beat: self.scaled(self.story_beat),
            forced_event: self.scaled(self.forced_event),
        }
    }
}
