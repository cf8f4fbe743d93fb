//! Game configuration with documented constants
//!
//! All magic numbers are collected here with explanations of their purpose
//! and how they interact with each other. Every field has a default, so a
//! TOML file only needs to name the values it overrides.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::core::error::{Result, SimError};
use crate::core::types::Vec2;

/// Configuration for the whole game session
///
/// Fixed at process start and shared read-only by every step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GameConfig {
    pub grid: GridConfig,
    pub heat: HeatConfig,
    pub temperature: TemperatureConfig,
    pub economy: EconomyConfig,
    pub shop: ShopConfig,
}

/// Game grid and tick rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Rows of the coarse game grid (where entities live)
    pub rows: u32,

    /// Columns of the coarse game grid
    pub columns: u32,

    /// Each game cell is split into `resolution × resolution` fine cells
    ///
    /// The temperature field and heat-point positions use fine units.
    pub resolution: u32,

    /// Ticks per real-time second
    ///
    /// Per-second rates below are divided by this to get per-tick rates.
    pub target_fps: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 10,
            columns: 10,
            resolution: 10,
            target_fps: 60,
        }
    }
}

/// Heat-point spawning, transport and decay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatConfig {
    /// Expected random heat-point spawns per tick
    ///
    /// Inter-arrival times are exponential with this rate. At 1/360 and
    /// 60 ticks/s, a new source drifts in roughly every 6 seconds.
    pub frequency: f64,

    /// Random heat points draw their strength uniformly from `[0, max_strength)`
    pub max_strength: f64,

    /// Smallest contribution (degrees) still considered perceptible
    ///
    /// Together with `decay_rate` this defines the effective radius.
    pub min_effect: f64,

    /// Exponential decay of a heat point's contribution per fine cell of distance
    pub decay_rate: f64,

    /// Wind speed in fine cells per second; the direction is random per run
    ///
    /// Must be positive: spawn positions are found by walking against the wind.
    pub wind_speed: f64,

    /// Mean delay (seconds) before the first random heat point
    pub first_heat_point_mean_seconds: f64,

    /// Strength of the heat point a controller emits when switched on
    ///
    /// Negative values cool.
    pub controller_strength: f64,
}

impl Default for HeatConfig {
    fn default() -> Self {
        Self {
            frequency: 1.0 / 360.0,
            max_strength: 10.0,
            min_effect: 0.001,
            decay_rate: 0.2,
            wind_speed: 10.0,
            first_heat_point_mean_seconds: 30.0,
            controller_strength: -10.0,
        }
    }
}

/// Ambient temperature synthesis and the farm survival band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemperatureConfig {
    /// Ambient temperature when the noise sample is 0
    pub ambient_low: f64,

    /// Ambient temperature when the noise sample is 1
    pub ambient_high: f64,

    /// Noise sampling scale per fine cell
    ///
    /// Smaller values give broader, smoother ambient patches.
    pub sample_scale: Vec2,

    /// Farms survive while every fine cell they cover stays in
    /// `[safe_low, safe_high]`
    pub safe_low: f64,
    pub safe_high: f64,
}

impl Default for TemperatureConfig {
    fn default() -> Self {
        Self {
            ambient_low: 18.0,
            ambient_high: 24.0,
            sample_scale: Vec2::new(0.05, 0.05),
            safe_low: 18.0,
            safe_high: 24.0,
        }
    }
}

/// Farm income and farm spawning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    /// Coins a fresh game starts with
    pub starting_coins: f64,

    /// Coins each farm earns per second
    pub coins_per_farm_second: f64,

    /// Score each farm earns per second
    pub score_per_farm_second: f64,

    /// Seconds between farm spawns
    pub farm_period_seconds: u32,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            starting_coins: 50.0,
            coins_per_farm_second: 1.0,
            score_per_farm_second: 10.0,
            farm_period_seconds: 100,
        }
    }
}

/// Shop prices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopConfig {
    pub sensor_cost: f64,
    pub controller_cost: f64,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            sensor_cost: 20.0,
            controller_cost: 40.0,
        }
    }
}

impl GameConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a (possibly partial) TOML document and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Fine-grid rows of the temperature field
    pub fn fine_rows(&self) -> usize {
        (self.grid.rows * self.grid.resolution) as usize
    }

    /// Fine-grid columns of the temperature field
    pub fn fine_columns(&self) -> usize {
        (self.grid.columns * self.grid.resolution) as usize
    }

    /// Size of the temperature field as (width, height) in fine units
    pub fn field_dimensions(&self) -> Vec2 {
        Vec2::new(self.fine_columns() as f64, self.fine_rows() as f64)
    }

    /// Wind magnitude per tick
    pub fn wind_per_tick(&self) -> f64 {
        self.heat.wind_speed / self.grid.target_fps as f64
    }

    pub fn coin_rate(&self) -> f64 {
        self.economy.coins_per_farm_second / self.grid.target_fps as f64
    }

    pub fn score_rate(&self) -> f64 {
        self.economy.score_per_farm_second / self.grid.target_fps as f64
    }

    /// Ticks between farm spawns
    pub fn farm_period_ticks(&self) -> u64 {
        self.economy.farm_period_seconds as u64 * self.grid.target_fps as u64
    }

    /// Real-time interval between ticks
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.grid.target_fps as f64)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(SimError::InvalidConfig(msg));

        if self.grid.rows == 0 || self.grid.columns == 0 {
            return invalid(format!(
                "game grid must be non-empty, got {}x{}",
                self.grid.columns, self.grid.rows
            ));
        }
        if self.grid.resolution == 0 {
            return invalid("resolution must be at least 1".into());
        }
        if self.grid.target_fps == 0 {
            return invalid("target_fps must be at least 1".into());
        }

        let floats = [
            ("heat.frequency", self.heat.frequency),
            ("heat.max_strength", self.heat.max_strength),
            ("heat.min_effect", self.heat.min_effect),
            ("heat.decay_rate", self.heat.decay_rate),
            ("heat.wind_speed", self.heat.wind_speed),
            ("heat.first_heat_point_mean_seconds", self.heat.first_heat_point_mean_seconds),
            ("heat.controller_strength", self.heat.controller_strength),
            ("temperature.ambient_low", self.temperature.ambient_low),
            ("temperature.ambient_high", self.temperature.ambient_high),
            ("temperature.sample_scale.x", self.temperature.sample_scale.x),
            ("temperature.sample_scale.y", self.temperature.sample_scale.y),
            ("temperature.safe_low", self.temperature.safe_low),
            ("temperature.safe_high", self.temperature.safe_high),
            ("economy.starting_coins", self.economy.starting_coins),
            ("economy.coins_per_farm_second", self.economy.coins_per_farm_second),
            ("economy.score_per_farm_second", self.economy.score_per_farm_second),
            ("shop.sensor_cost", self.shop.sensor_cost),
            ("shop.controller_cost", self.shop.controller_cost),
        ];
        // NaN slips through every ordered comparison below
        if let Some((name, value)) = floats.iter().find(|(_, v)| !v.is_finite()) {
            return invalid(format!("{} must be finite, got {}", name, value));
        }

        // A zero wind would make the spawn-position search walk forever
        if !(self.heat.wind_speed > 0.0 && self.heat.wind_speed.is_finite()) {
            return invalid(format!(
                "wind_speed must be positive, got {}",
                self.heat.wind_speed
            ));
        }
        if !(self.heat.frequency > 0.0 && self.heat.frequency.is_finite()) {
            return invalid(format!(
                "heat point frequency must be positive, got {}",
                self.heat.frequency
            ));
        }
        if self.heat.decay_rate <= 0.0 || self.heat.min_effect <= 0.0 {
            return invalid("decay_rate and min_effect must be positive".into());
        }
        if self.heat.max_strength < 0.0 {
            return invalid("max_strength must not be negative".into());
        }
        if self.heat.first_heat_point_mean_seconds < 0.0 {
            return invalid("first_heat_point_mean_seconds must not be negative".into());
        }

        if self.temperature.ambient_low > self.temperature.ambient_high {
            return invalid(format!(
                "ambient_low ({}) should be <= ambient_high ({})",
                self.temperature.ambient_low, self.temperature.ambient_high
            ));
        }
        if self.temperature.safe_low > self.temperature.safe_high {
            return invalid(format!(
                "safe_low ({}) should be <= safe_high ({})",
                self.temperature.safe_low, self.temperature.safe_high
            ));
        }

        if self.economy.farm_period_seconds == 0 {
            return invalid("farm_period_seconds must be at least 1".into());
        }
        if self.shop.sensor_cost < 0.0 || self.shop.controller_cost < 0.0 {
            return invalid("shop prices must not be negative".into());
        }

        Ok(())
    }
}
