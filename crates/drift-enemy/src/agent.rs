use drift_core::Vec2;
use serde::{Deserialize, Serialize};

/// Kinematic state and stats of one enemy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Enemy {
    pub id: u64,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Facing, radians counter-clockwise from +x.
    pub angle: f32,
    pub radius: f32,
    pub health: f32,
    pub vision_radius: f32,
    /// Extra distance beyond `vision_radius` before an acquired target is lost.
    pub vision_hysteresis: f32,
    /// Radians per second.
    pub turn_speed: f32,
    /// Units per second squared.
    pub acceleration: f32,
    pub max_speed: f32,
}

impl Enemy {
    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

/// Snapshot of the tracked target, refreshed by the driver every step.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TargetState {
    pub position: Vec2,
    #[serde(default)]
    pub velocity: Vec2,
}

impl TargetState {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
        }
    }

    pub fn moving(position: Vec2, velocity: Vec2) -> Self {
        Self { position, velocity }
    }
}

/// Static world landmark (asteroid, station, ...). Read-only for the decision layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldFeature {
    pub position: Vec2,
    pub radius: f32,
}
