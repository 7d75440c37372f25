//! Explicit-Euler kinematics for thrust-driven agents.
//!
//! All helpers take `dt` in seconds and treat a negative or non-finite `dt` as zero, so a
//! bad frame time never launches an agent across the map.

use crate::{wrap_angle, Vec2};

fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() {
        dt.max(0.0)
    } else {
        0.0
    }
}

/// Rotate `angle` toward `bearing` by at most `turn_speed * dt`, along the shortest arc.
///
/// Returns the new angle and the remaining (wrapped) angular error.
pub fn turn_toward(angle: f32, bearing: f32, turn_speed: f32, dt: f32) -> (f32, f32) {
    let max_step = turn_speed.max(0.0) * sanitize_dt(dt);
    let diff = wrap_angle(bearing - angle);
    let step = diff.clamp(-max_step, max_step);
    let next = wrap_angle(angle + step);
    (next, wrap_angle(bearing - next))
}

/// Accelerate along `angle` for `dt` seconds, then clamp speed to `max_speed`.
pub fn thrust(velocity: Vec2, angle: f32, acceleration: f32, max_speed: f32, dt: f32) -> Vec2 {
    let v = velocity + Vec2::from_angle(angle) * (acceleration * sanitize_dt(dt));
    v.clamp_length(max_speed.max(0.0))
}

/// `p += v * dt`.
pub fn integrate_position(position: Vec2, velocity: Vec2, dt: f32) -> Vec2 {
    position + velocity * sanitize_dt(dt)
}

/// Frame-rate independent exponential drag: `v *= drag_factor ^ (dt * reference_hz)`.
///
/// `drag_factor` is the per-frame decay at `reference_hz`.
pub fn apply_drag(velocity: Vec2, drag_factor: f32, reference_hz: f32, dt: f32) -> Vec2 {
    velocity * drag_factor.powf(sanitize_dt(dt) * reference_hz)
}
