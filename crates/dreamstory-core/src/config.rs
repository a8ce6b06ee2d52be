//! Configuration loading and typed config structures for DreamStory.
//!
//! The canonical configuration lives in `dreamstory-config.yaml` at the
//! project root. This module defines strongly-typed structs that mirror the
//! YAML structure and a loader that reads, overrides and validates the file.
//! Every field is optional; an empty document yields the built-in defaults.

use std::path::Path;

use dreamstory_types::{
    DEFAULT_HISTORY_CAPACITY, GameState, History, Need, NeedDelta, Needs, Room,
};
use serde::Deserialize;

use crate::clock::{ClockError, ClockTime};

/// Environment variable that overrides `world.seed`.
pub const SEED_ENV_VAR: &str = "DREAMSTORY_SEED";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The starting clock is not a valid reading.
    #[error("invalid start clock: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: ClockError,
    },

    /// The configuration parsed but holds an unusable value.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

fn invalid(reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        reason: reason.into(),
    }
}

/// Top-level configuration.
///
/// Mirrors the structure of `dreamstory-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DreamStoryConfig {
    /// World-level settings (seed).
    #[serde(default)]
    pub world: WorldConfig,

    /// Tick pacing and passive decay.
    #[serde(default)]
    pub tick: TickConfig,

    /// Bounds the presentation layer applies to speed changes.
    #[serde(default)]
    pub speed: SpeedConfig,

    /// Special situation tuning.
    #[serde(default)]
    pub situations: SituationsConfig,

    /// History list sizing.
    #[serde(default)]
    pub history: HistoryConfig,

    /// Cooldown ledger behavior.
    #[serde(default)]
    pub cooldowns: CooldownConfig,

    /// Starting snapshot used at session start and on reset.
    #[serde(default)]
    pub start: StartConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl DreamStoryConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `DREAMSTORY_SEED` overrides `world.seed` when it holds a valid `u64`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.world.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Check every value the simulation depends on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tick.validate()?;
        self.speed.validate()?;
        check_probability("situations.chance", self.situations.chance)?;
        if self.history.capacity == 0 {
            return Err(invalid("history.capacity must be at least 1"));
        }
        self.start.validate()
    }

    /// Build the starting snapshot from the `start` and `history` sections.
    pub fn initial_state(&self) -> GameState {
        GameState {
            needs: self.start.needs,
            time: self.start.time,
            day: 1,
            current_room: self.start.room,
            history: History::with_capacity(self.history.capacity),
            ..GameState::default()
        }
    }
}

fn check_probability(field: &str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(format!("{field} must be within [0, 1], got {value}")))
    }
}

fn check_positive(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{field} must be positive, got {value}")))
    }
}

/// World-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Random seed for reproducible sessions. `None` seeds from the OS.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl WorldConfig {
    /// Override the seed with `DREAMSTORY_SEED` when it parses as a `u64`.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var(SEED_ENV_VAR)
            && let Ok(seed) = val.trim().parse::<u64>()
        {
            self.seed = Some(seed);
        }
    }
}

/// Tick pacing and passive decay.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TickConfig {
    /// Timer period at speed 1, in real milliseconds.
    #[serde(default = "default_base_interval_ms")]
    pub base_interval_ms: u64,

    /// In-game hours added per tick at speed 1.
    ///
    /// Both the period and this advance scale with speed, so game time per
    /// real second grows with the square of the speed.
    #[serde(default = "default_hours_per_tick")]
    pub hours_per_tick: f64,

    /// Probability that a tick applies passive decay.
    #[serde(default = "default_decay_chance")]
    pub decay_chance: f64,

    /// Signed deltas applied when decay fires.
    #[serde(default)]
    pub decay: DecayConfig,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            base_interval_ms: default_base_interval_ms(),
            hours_per_tick: default_hours_per_tick(),
            decay_chance: default_decay_chance(),
            decay: DecayConfig::default(),
        }
    }
}

impl TickConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.base_interval_ms == 0 {
            return Err(invalid("tick.base_interval_ms must be at least 1"));
        }
        check_positive("tick.hours_per_tick", self.hours_per_tick)?;
        check_probability("tick.decay_chance", self.decay_chance)?;
        self.decay.validate()
    }
}

/// Signed per-need deltas of one passive decay step.
///
/// Health is deliberately absent: it never decays passively.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct DecayConfig {
    /// Energy delta.
    #[serde(default = "default_decay_energy")]
    pub energy: f64,
    /// Hunger delta.
    #[serde(default = "default_decay_hunger")]
    pub hunger: f64,
    /// Thirst delta.
    #[serde(default = "default_decay_thirst")]
    pub thirst: f64,
    /// Cleanliness delta.
    #[serde(default = "default_decay_cleanliness")]
    pub cleanliness: f64,
    /// Sleepiness delta.
    #[serde(default = "default_decay_sleepiness")]
    pub sleepiness: f64,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            energy: default_decay_energy(),
            hunger: default_decay_hunger(),
            thirst: default_decay_thirst(),
            cleanliness: default_decay_cleanliness(),
            sleepiness: default_decay_sleepiness(),
        }
    }
}

impl DecayConfig {
    /// The decay step as need deltas, in application order.
    pub const fn deltas(&self) -> [NeedDelta; 5] {
        [
            NeedDelta::new(Need::Energy, self.energy),
            NeedDelta::new(Need::Hunger, self.hunger),
            NeedDelta::new(Need::Thirst, self.thirst),
            NeedDelta::new(Need::Cleanliness, self.cleanliness),
            NeedDelta::new(Need::Sleepiness, self.sleepiness),
        ]
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for delta in self.deltas() {
            if !delta.amount.is_finite() {
                return Err(invalid(format!(
                    "tick.decay.{} must be finite, got {}",
                    delta.need, delta.amount
                )));
            }
        }
        Ok(())
    }
}

/// Bounds and step for speed changes.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SpeedConfig {
    /// Slowest allowed speed.
    #[serde(default = "default_speed_min")]
    pub min: f64,
    /// Fastest allowed speed.
    #[serde(default = "default_speed_max")]
    pub max: f64,
    /// Slider granularity.
    #[serde(default = "default_speed_step")]
    pub step: f64,
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self {
            min: default_speed_min(),
            max: default_speed_max(),
            step: default_speed_step(),
        }
    }
}

impl SpeedConfig {
    /// Snap `value` to the nearest step and clamp it into `[min, max]`.
    ///
    /// Non-finite input falls back to `min`.
    pub fn clamp(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return self.min;
        }
        let snapped = (value / self.step).round() * self.step;
        snapped.clamp(self.min, self.max)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        check_positive("speed.min", self.min)?;
        check_positive("speed.max", self.max)?;
        check_positive("speed.step", self.step)?;
        if self.min > self.max {
            return Err(invalid(format!(
                "speed.min ({}) must not exceed speed.max ({})",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Special situation tuning.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SituationsConfig {
    /// Firing probability applied to every situation whose condition holds.
    #[serde(default = "default_situation_chance")]
    pub chance: f64,
}

impl Default for SituationsConfig {
    fn default() -> Self {
        Self {
            chance: default_situation_chance(),
        }
    }
}

/// History list sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct HistoryConfig {
    /// Entries kept in each of `last_actions` and `special_events`.
    #[serde(default = "default_history_capacity")]
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: default_history_capacity(),
        }
    }
}

/// Cooldown ledger behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct CooldownConfig {
    /// Forget every recorded usage when the session is reset.
    #[serde(default)]
    pub clear_on_reset: bool,
}

/// Starting snapshot overrides.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct StartConfig {
    /// Starting needs; omitted needs keep their built-in values.
    #[serde(default)]
    pub needs: Needs,

    /// Starting hour of day.
    #[serde(default = "default_start_time")]
    pub time: f64,

    /// Starting room.
    #[serde(default = "default_start_room")]
    pub room: Room,
}

impl Default for StartConfig {
    fn default() -> Self {
        Self {
            needs: Needs::default(),
            time: default_start_time(),
            room: default_start_room(),
        }
    }
}

impl StartConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        ClockTime::new(1, self.time)?;
        for (need, value) in self.needs.iter() {
            if !(0.0..=100.0).contains(&value) {
                return Err(invalid(format!(
                    "start.needs.{need} must be within [0, 100], got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default log filter (trace, debug, info, warn, error) used when
    /// `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions for serde
// ---------------------------------------------------------------------------

const fn default_base_interval_ms() -> u64 {
    1000
}

const fn default_hours_per_tick() -> f64 {
    0.5
}

const fn default_decay_chance() -> f64 {
    0.3
}

const fn default_decay_energy() -> f64 {
    -1.0
}

const fn default_decay_hunger() -> f64 {
    1.0
}

const fn default_decay_thirst() -> f64 {
    1.0
}

const fn default_decay_cleanliness() -> f64 {
    -0.5
}

const fn default_decay_sleepiness() -> f64 {
    1.0
}

const fn default_speed_min() -> f64 {
    0.5
}

const fn default_speed_max() -> f64 {
    3.0
}

const fn default_speed_step() -> f64 {
    0.5
}

const fn default_situation_chance() -> f64 {
    0.3
}

const fn default_history_capacity() -> usize {
    DEFAULT_HISTORY_CAPACITY
}

const fn default_start_time() -> f64 {
    8.0
}

const fn default_start_room() -> Room {
    Room::Bedroom
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = DreamStoryConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tick.base_interval_ms, 1000);
        assert_eq!(config.tick.hours_per_tick, 0.5);
        assert_eq!(config.tick.decay_chance, 0.3);
        assert_eq!(config.situations.chance, 0.3);
        assert_eq!(config.history.capacity, 5);
        assert!(!config.cooldowns.clear_on_reset);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn default_initial_state_is_the_builtin_snapshot() {
        let config = DreamStoryConfig::default();
        assert_eq!(config.initial_state(), GameState::default());
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r"
world:
  seed: 123

tick:
  base_interval_ms: 250
  hours_per_tick: 0.25
  decay_chance: 0.5
  decay:
    energy: -2
    cleanliness: -1

speed:
  min: 1.0
  max: 2.0
  step: 0.25

situations:
  chance: 0.1

history:
  capacity: 3

cooldowns:
  clear_on_reset: true

start:
  time: 21.5
  room: kitchen
  needs:
    hunger: 90

logging:
  level: debug
";
        let config = DreamStoryConfig::parse(yaml);
        assert!(config.is_ok(), "{config:?}");
        let config = config.unwrap_or_default();

        assert_eq!(config.tick.base_interval_ms, 250);
        assert_eq!(config.tick.decay.energy, -2.0);
        assert_eq!(config.tick.decay.hunger, 1.0);
        assert_eq!(config.tick.decay.cleanliness, -1.0);
        assert_eq!(config.speed.step, 0.25);
        assert_eq!(config.situations.chance, 0.1);
        assert!(config.cooldowns.clear_on_reset);
        assert_eq!(config.logging.level, "debug");

        let state = config.initial_state();
        assert_eq!(state.time, 21.5);
        assert_eq!(state.current_room, Room::Kitchen);
        assert_eq!(state.needs.hunger, 90.0);
        assert_eq!(state.needs.energy, 80.0);
        assert_eq!(state.history.capacity, 3);
    }

    #[test]
    fn parse_empty_yaml() {
        let config = DreamStoryConfig::parse("");
        assert!(config.is_ok());
    }

    #[test]
    fn rejects_out_of_range_probability() {
        let result = DreamStoryConfig::parse("situations:\n  chance: 1.5\n");
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn rejects_zero_interval_and_capacity() {
        let interval = DreamStoryConfig::parse("tick:\n  base_interval_ms: 0\n");
        assert!(matches!(interval, Err(ConfigError::Invalid { .. })));

        let capacity = DreamStoryConfig::parse("history:\n  capacity: 0\n");
        assert!(matches!(capacity, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn rejects_start_hour_past_midnight() {
        let result = DreamStoryConfig::parse("start:\n  time: 24\n");
        assert!(matches!(
            result,
            Err(ConfigError::Clock {
                source: ClockError::InvalidHour { .. }
            })
        ));
    }

    #[test]
    fn rejects_malformed_yaml() {
        let result = DreamStoryConfig::parse("tick: [unterminated");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn speed_clamp_snaps_to_step() {
        let speed = SpeedConfig::default();
        assert_eq!(speed.clamp(1.3), 1.5);
        assert_eq!(speed.clamp(0.1), 0.5);
        assert_eq!(speed.clamp(9.0), 3.0);
        assert_eq!(speed.clamp(f64::NAN), 0.5);
    }

    #[test]
    fn decay_deltas_skip_health() {
        let deltas = DecayConfig::default().deltas();
        assert!(deltas.iter().all(|d| d.need != Need::Health));
        assert_eq!(deltas.len(), 5);
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("dreamstory-config.yaml");
        if path.exists() {
            let config = DreamStoryConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }
}
