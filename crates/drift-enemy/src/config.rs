//! Enemy tuning, loaded from YAML.

use std::path::{Path, PathBuf};

use drift_core::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Enemy;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid config: `{field}` {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Top-level configuration file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriftConfig {
    pub behavior: BehaviorConfig,
    pub archetype: EnemyArchetype,
}

impl DriftConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: DriftConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.behavior.validate()?;
        self.archetype.validate()
    }
}

/// Constants consulted by the tree's leaves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    pub patrol: PatrolConfig,
    pub steering: SteeringConfig,
}

impl BehaviorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.patrol.validate()?;
        self.steering.validate()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatrolConfig {
    /// Inner radius of the waypoint ring around spawn.
    pub ring_min: f32,
    /// Outer radius of the waypoint ring around spawn.
    pub ring_max: f32,
    /// Distance at which a waypoint counts as reached.
    pub arrival_tolerance: f32,
}

impl Default for PatrolConfig {
    fn default() -> Self {
        Self {
            ring_min: 200.0,
            ring_max: 500.0,
            arrival_tolerance: 50.0,
        }
    }
}

impl PatrolConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("patrol.ring_min", self.ring_min)?;
        non_negative("patrol.ring_max", self.ring_max)?;
        if self.ring_min > self.ring_max {
            return Err(invalid("patrol.ring_min", "must not exceed patrol.ring_max"));
        }
        positive("patrol.arrival_tolerance", self.arrival_tolerance)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SteeringConfig {
    /// Remaining heading error (radians) under which facing counts as done.
    pub facing_tolerance: f32,
    /// Per-frame velocity decay at `drag_reference_hz`.
    pub drag_factor: f32,
    pub drag_reference_hz: f32,
    /// Upper bound on how far ahead pursuit leads a moving target. Zero means pure seek.
    pub max_lead_seconds: f32,
}

impl Default for SteeringConfig {
    fn default() -> Self {
        Self {
            facing_tolerance: 0.2,
            drag_factor: 0.98,
            drag_reference_hz: 60.0,
            max_lead_seconds: 1.0,
        }
    }
}

impl SteeringConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("steering.facing_tolerance", self.facing_tolerance)?;
        positive("steering.drag_factor", self.drag_factor)?;
        if self.drag_factor > 1.0 {
            return Err(invalid("steering.drag_factor", "must be at most 1.0"));
        }
        positive("steering.drag_reference_hz", self.drag_reference_hz)?;
        non_negative("steering.max_lead_seconds", self.max_lead_seconds)
    }
}

/// Spawn stats for one enemy type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyArchetype {
    pub radius: f32,
    pub health: f32,
    pub vision_radius: f32,
    pub vision_hysteresis: f32,
    pub turn_speed: f32,
    pub acceleration: f32,
    pub max_speed: f32,
}

impl Default for EnemyArchetype {
    fn default() -> Self {
        Self {
            radius: 16.0,
            health: 100.0,
            vision_radius: 700.0,
            vision_hysteresis: 80.0,
            turn_speed: 3.0,
            acceleration: 220.0,
            max_speed: 260.0,
        }
    }
}

impl EnemyArchetype {
    /// New enemy at rest at `position`, facing +x.
    pub fn spawn(&self, id: u64, position: Vec2) -> Enemy {
        Enemy {
            id,
            position,
            velocity: Vec2::ZERO,
            angle: 0.0,
            radius: self.radius,
            health: self.health,
            vision_radius: self.vision_radius,
            vision_hysteresis: self.vision_hysteresis,
            turn_speed: self.turn_speed,
            acceleration: self.acceleration,
            max_speed: self.max_speed,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("archetype.radius", self.radius)?;
        positive("archetype.health", self.health)?;
        positive("archetype.vision_radius", self.vision_radius)?;
        non_negative("archetype.vision_hysteresis", self.vision_hysteresis)?;
        positive("archetype.turn_speed", self.turn_speed)?;
        positive("archetype.acceleration", self.acceleration)?;
        positive("archetype.max_speed", self.max_speed)
    }
}

fn invalid(field: &'static str, reason: &'static str) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must be finite and greater than zero"))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must be finite and non-negative"))
    }
}
