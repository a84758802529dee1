use std::fmt;

use bevy::prelude::*;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::systems::{
    motion::{MotionConfig, SpawnRange},
    navigation::NavigationConfig,
};

const LATTICE_CONFIG_JSON: &str = include_str!("./content/lattice.json");

static LATTICE_CONFIG: Lazy<Result<LatticeConfig, LatticeConfigError>> =
    Lazy::new(|| LatticeConfig::from_json(LATTICE_CONFIG_JSON));

#[derive(Debug, Clone, PartialEq)]
pub enum LatticeConfigError {
    Parse(String),
    Invalid(String),
}

impl fmt::Display for LatticeConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(message) => write!(f, "{message}"),
            Self::Invalid(message) => write!(f, "invalid lattice config: {message}"),
        }
    }
}

impl std::error::Error for LatticeConfigError {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub rows: usize,
    pub cols: usize,
    pub gap: f32,
    /// Start with the lattice centred on its own origin instead of at zero.
    pub centered: bool,
    /// Half-extent of the square that counts as "on" a glyph.
    pub hit_radius: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 100,
            cols: 100,
            gap: 80.0,
            centered: true,
            hit_radius: 24.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub font_size: f32,
    pub glyph_color: [u8; 3],
    pub background_color: [u8; 3],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            font_size: 48.0,
            glyph_color: [0x8f, 0xb7, 0xd7],
            background_color: [0x10, 0x10, 0x18],
        }
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LatticeConfig {
    /// Fixed seed for a reproducible field; `None` draws a fresh field per launch.
    pub seed: Option<u64>,
    pub grid: GridConfig,
    pub motion: MotionConfig,
    pub navigation: NavigationConfig,
    pub render: RenderConfig,
}

impl LatticeConfig {
    pub fn from_json(json: &str) -> Result<Self, LatticeConfigError> {
        let config: LatticeConfig = serde_json::from_str(json).map_err(|error| {
            LatticeConfigError::Parse(format!("failed to parse lattice config: {error}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// The embedded config, or the defaults if it fails to load.
    pub fn load() -> Self {
        match LATTICE_CONFIG.as_ref() {
            Ok(config) => config.clone(),
            Err(error) => {
                warn!("{error}; falling back to default lattice config");
                LatticeConfig::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), LatticeConfigError> {
        let invalid = |message: String| -> Result<(), LatticeConfigError> {
            Err(LatticeConfigError::Invalid(message))
        };
        let grid = &self.grid;
        let motion = &self.motion;

        if grid.rows == 0 || grid.cols == 0 {
            return invalid(format!("grid must not be empty ({}x{})", grid.rows, grid.cols));
        }
        if !(grid.gap.is_finite() && grid.gap > 0.0) {
            return invalid(format!("gap must be positive, got {}", grid.gap));
        }
        if !(grid.hit_radius.is_finite() && grid.hit_radius >= 0.0) {
            return invalid(format!("hit radius must be non-negative, got {}", grid.hit_radius));
        }

        for (name, range) in [
            ("speed", motion.speed),
            ("amplitude", motion.amplitude),
            ("fade_delay", motion.fade_delay),
        ] {
            check_range(name, range)?;
        }

        let weights = motion.direction_weights.as_array();
        if weights.iter().any(|weight| !weight.is_finite() || *weight < 0.0) {
            return invalid(format!("direction weights must be non-negative, got {weights:?}"));
        }
        if weights.iter().sum::<f32>() <= 0.0 {
            return invalid(String::from("direction weights must not all be zero"));
        }

        let switch = motion.axis_switch;
        if !(0.0..=1.0).contains(&switch.probability) {
            return invalid(format!(
                "axis switch probability must be in [0, 1], got {}",
                switch.probability
            ));
        }
        if !(switch.epsilon.is_finite() && switch.epsilon >= 0.0) {
            return invalid(format!("axis switch epsilon must be non-negative, got {}", switch.epsilon));
        }

        if !(motion.min_scale.is_finite() && motion.max_scale.is_finite())
            || motion.min_scale > motion.max_scale
        {
            return invalid(format!(
                "min scale {} must not exceed max scale {}",
                motion.min_scale, motion.max_scale
            ));
        }
        if !(motion.max_distance.is_finite() && motion.max_distance > 0.0) {
            return invalid(format!("max distance must be positive, got {}", motion.max_distance));
        }
        for (name, rate) in [("fade_rate", motion.fade_rate), ("ease_rate", motion.ease_rate)] {
            if !(rate.is_finite() && rate >= 0.0) {
                return invalid(format!("{name} must be non-negative, got {rate}"));
            }
        }

        let navigation = &self.navigation;
        if !(navigation.slack.is_finite() && navigation.step.is_finite()) {
            return invalid(String::from("navigation slack and step must be finite"));
        }

        Ok(())
    }
}

fn check_range(name: &str, range: SpawnRange) -> Result<(), LatticeConfigError> {
    if !(range.min.is_finite() && range.max.is_finite()) || range.min < 0.0 || range.min > range.max {
        return Err(LatticeConfigError::Invalid(format!(
            "{name} range must satisfy 0 <= min <= max, got [{}, {}]",
            range.min, range.max
        )));
    }
    Ok(())
}
