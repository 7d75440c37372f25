//! Perception, navigation and physics leaves.
//!
//! Each leaf is a plain function over `EnemyBlackboard`; `tree` wraps them in `Condition` /
//! `Action` nodes. Missing references (no target, no waypoint) are reported as `Failure`,
//! never as panics.

use drift_bt::Status;
use drift_core::{apply_drag, integrate_position, thrust, turn_toward, DeterministicRng, Vec2};

use crate::{EnemyBlackboard, PatrolConfig, SteeringConfig, Waypoint};

/// Which reference `face_target` turns toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceTarget {
    Player,
    Waypoint,
}

pub fn is_alive(bb: &EnemyBlackboard) -> bool {
    bb.agent.is_alive()
}

/// Two-threshold detection.
///
/// Acquired at `d <= vision_radius`, kept while `d <= vision_radius + vision_hysteresis`.
/// The result is written to `scratch.player_detected` on every call.
pub fn player_detected(bb: &mut EnemyBlackboard) -> bool {
    let was_detected = bb.scratch.player_detected;
    let detected = match bb.distance_to_target() {
        Some(d) if was_detected => d <= bb.agent.vision_radius + bb.agent.vision_hysteresis,
        Some(d) => d <= bb.agent.vision_radius,
        None => false,
    };

    if detected != was_detected {
        tracing::debug!(agent = bb.agent.id, detected, "detection changed");
    }
    bb.scratch.player_detected = detected;
    detected
}

/// Keep the current waypoint, or generate a new one when there is none or it was reached.
///
/// New waypoints sit at a uniform heading and a radius in `[ring_min, ring_max)` around the
/// spawn point, which is captured on first use.
pub fn ensure_waypoint(bb: &mut EnemyBlackboard, patrol: &PatrolConfig) -> Status {
    if bb.scratch.waypoint.is_some() && !bb.scratch.waypoint_reached {
        return Status::Success;
    }

    let spawn = *bb.scratch.spawn.get_or_insert(bb.agent.position);
    let heading = bb.rng.next_angle();
    let radius = bb.rng.next_f32_range(patrol.ring_min, patrol.ring_max);
    let serial = bb.scratch.waypoints_generated;
    bb.scratch.waypoints_generated = serial.wrapping_add(1);

    let point = spawn + Vec2::from_angle(heading) * radius;
    bb.scratch.waypoint = Some(Waypoint { point, serial });
    bb.scratch.waypoint_reached = false;

    tracing::debug!(agent = bb.agent.id, serial, x = point.x, y = point.y, "new waypoint");
    Status::Success
}

pub fn arrived_at_waypoint(bb: &EnemyBlackboard, tolerance: f32) -> bool {
    bb.scratch
        .waypoint
        .is_some_and(|w| bb.agent.position.distance(w.point) <= tolerance)
}

/// Like `arrived_at_waypoint`, but marks the waypoint reached so the next
/// `ensure_waypoint` replaces it.
pub fn check_waypoint_arrival(bb: &mut EnemyBlackboard, tolerance: f32) -> bool {
    let arrived = arrived_at_waypoint(bb, tolerance);
    if arrived {
        bb.scratch.waypoint_reached = true;
    }
    arrived
}

/// Turn toward `point` by at most `turn_speed * dt`; `Success` once within `tolerance`.
fn face_point(bb: &mut EnemyBlackboard, point: Vec2, tolerance: f32, dt: f32) -> Status {
    let agent = &mut bb.agent;
    let bearing = agent.position.angle_to(point);
    let (angle, error) = turn_toward(agent.angle, bearing, agent.turn_speed, dt);
    agent.angle = angle;
    if error.abs() < tolerance {
        Status::Success
    } else {
        Status::Running
    }
}

pub fn face_target(
    bb: &mut EnemyBlackboard,
    which: FaceTarget,
    steering: &SteeringConfig,
    dt: f32,
) -> Status {
    let point = match which {
        FaceTarget::Player => bb.target.map(|t| t.position),
        FaceTarget::Waypoint => bb.scratch.waypoint.map(|w| w.point),
    };
    let Some(point) = point else {
        return Status::Failure;
    };
    face_point(bb, point, steering.facing_tolerance, dt)
}

/// `v += forward * acceleration * dt`, clamped to `max_speed`.
pub fn thrust_forward(bb: &mut EnemyBlackboard, dt: f32) -> Status {
    let agent = &mut bb.agent;
    agent.velocity = thrust(
        agent.velocity,
        agent.angle,
        agent.acceleration,
        agent.max_speed,
        dt,
    );
    Status::Success
}

/// Explicit Euler position step followed by frame-rate independent drag.
pub fn move_to_position(bb: &mut EnemyBlackboard, steering: &SteeringConfig, dt: f32) -> Status {
    let agent = &mut bb.agent;
    agent.position = integrate_position(agent.position, agent.velocity, dt);
    agent.velocity = apply_drag(
        agent.velocity,
        steering.drag_factor,
        steering.drag_reference_hz,
        dt,
    );
    Status::Success
}

pub fn do_nothing(_bb: &mut EnemyBlackboard, _dt: f32) -> Status {
    Status::Success
}

/// Where pursuit aims: the target's position advanced by its velocity over the time the
/// enemy would need to cover the gap at top speed, capped at `max_lead_seconds`.
pub fn intercept_point(bb: &EnemyBlackboard, steering: &SteeringConfig) -> Option<Vec2> {
    let target = bb.target?;
    if steering.max_lead_seconds <= 0.0 {
        return Some(target.position);
    }
    let distance = bb.agent.position.distance(target.position);
    let lead = (distance / bb.agent.max_speed.max(f32::EPSILON)).min(steering.max_lead_seconds);
    Some(target.position + target.velocity * lead)
}

/// Seek regime's combined step: turn toward the intercept point, thrust, integrate.
///
/// Completes in one tick regardless of remaining heading error.
pub fn pursue_and_thrust(bb: &mut EnemyBlackboard, steering: &SteeringConfig, dt: f32) -> Status {
    let Some(aim) = intercept_point(bb, steering) else {
        return Status::Failure;
    };
    face_point(bb, aim, steering.facing_tolerance, dt);
    thrust_forward(bb, dt);
    move_to_position(bb, steering, dt);
    Status::Success
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EnemyArchetype, TargetState};

    fn board(target: Vec2) -> EnemyBlackboard {
        let enemy = EnemyArchetype::default().spawn(1, Vec2::ZERO);
        EnemyBlackboard::new(enemy, TargetState::at(target), 9)
    }

    #[test]
    fn intercept_leads_moving_target() {
        let mut bb = board(Vec2::new(260.0, 0.0));
        bb.target = Some(TargetState::moving(Vec2::new(260.0, 0.0), Vec2::new(0.0, 100.0)));
        let aim = intercept_point(&bb, &SteeringConfig::default()).unwrap();
        // 260 units at max_speed 260 => one second of lead.
        assert!((aim.x - 260.0).abs() < 1e-3);
        assert!((aim.y - 100.0).abs() < 1e-3);

        let pure = SteeringConfig {
            max_lead_seconds: 0.0,
            ..SteeringConfig::default()
        };
        assert_eq!(intercept_point(&bb, &pure), Some(Vec2::new(260.0, 0.0)));
    }

    #[test]
    fn lead_is_capped() {
        let mut bb = board(Vec2::new(2600.0, 0.0));
        bb.target = Some(TargetState::moving(Vec2::new(2600.0, 0.0), Vec2::new(0.0, 50.0)));
        let aim = intercept_point(&bb, &SteeringConfig::default()).unwrap();
        assert!((aim.y - 50.0).abs() < 1e-3);
    }

    #[test]
    fn pursuit_without_target_fails() {
        let mut bb = board(Vec2::new(10.0, 0.0));
        bb.target = None;
        assert_eq!(pursue_and_thrust(&mut bb, &SteeringConfig::default(), 0.1), Status::Failure);
        assert_eq!(bb.agent.position, Vec2::ZERO);
    }
}
