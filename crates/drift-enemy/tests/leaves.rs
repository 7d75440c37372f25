use drift_bt::Status;
use drift_core::Vec2;
use drift_enemy::leaves::{
    arrived_at_waypoint, check_waypoint_arrival, do_nothing, ensure_waypoint, face_target,
    is_alive, move_to_position, player_detected, thrust_forward,
};
use drift_enemy::{
    EnemyArchetype, EnemyBlackboard, FaceTarget, PatrolConfig, SteeringConfig, TargetState,
    Waypoint,
};

fn board_at(position: Vec2, target: Vec2) -> EnemyBlackboard {
    let archetype = EnemyArchetype {
        vision_radius: 700.0,
        vision_hysteresis: 80.0,
        ..EnemyArchetype::default()
    };
    EnemyBlackboard::new(archetype.spawn(1, position), TargetState::at(target), 1234)
}

#[test]
fn is_alive_tracks_health() {
    let mut bb = board_at(Vec2::ZERO, Vec2::ZERO);
    assert!(is_alive(&bb));
    bb.agent.health = 0.0;
    assert!(!is_alive(&bb));
    bb.agent.health = -5.0;
    assert!(!is_alive(&bb));
}

#[test]
fn detection_uses_entry_and_exit_thresholds() {
    let mut bb = board_at(Vec2::ZERO, Vec2::new(750.0, 0.0));

    // Not yet detected: 750 is outside the 700 entry radius.
    assert!(!player_detected(&mut bb));
    assert!(!bb.scratch.player_detected);

    bb.target = Some(TargetState::at(Vec2::new(700.0, 0.0)));
    assert!(player_detected(&mut bb));
    assert!(bb.scratch.player_detected);

    // Once detected, 750 and 780 are inside the exit radius.
    bb.target = Some(TargetState::at(Vec2::new(750.0, 0.0)));
    assert!(player_detected(&mut bb));
    bb.target = Some(TargetState::at(Vec2::new(780.0, 0.0)));
    assert!(player_detected(&mut bb));

    bb.target = Some(TargetState::at(Vec2::new(781.0, 0.0)));
    assert!(!player_detected(&mut bb));
    assert!(!bb.scratch.player_detected);

    // Lost again: 750 no longer re-acquires.
    bb.target = Some(TargetState::at(Vec2::new(750.0, 0.0)));
    assert!(!player_detected(&mut bb));
}

#[test]
fn detection_without_target_clears_flag() {
    let mut bb = board_at(Vec2::ZERO, Vec2::new(10.0, 0.0));
    assert!(player_detected(&mut bb));
    bb.target = None;
    assert!(!player_detected(&mut bb));
    assert!(!bb.scratch.player_detected);
}

#[test]
fn ensure_waypoint_generates_keeps_and_regenerates() {
    let patrol = PatrolConfig::default();
    let start = Vec2::new(100.0, -40.0);
    let mut bb = board_at(start, Vec2::new(5000.0, 0.0));
    assert_eq!(bb.scratch.waypoint, None);
    assert_eq!(bb.scratch.spawn, None);

    assert_eq!(ensure_waypoint(&mut bb, &patrol), Status::Success);
    let first = bb.scratch.waypoint.expect("waypoint generated");
    assert_eq!(bb.scratch.spawn, Some(start));
    let r = start.distance(first.point);
    assert!((200.0 - 1e-2..=500.0 + 1e-2).contains(&r), "radius {r}");

    // Not reached: same waypoint.
    bb.agent.position = Vec2::new(-300.0, 0.0);
    assert_eq!(ensure_waypoint(&mut bb, &patrol), Status::Success);
    assert_eq!(bb.scratch.waypoint, Some(first));

    // Reached: new waypoint, still centered on the original spawn.
    bb.scratch.waypoint_reached = true;
    assert_eq!(ensure_waypoint(&mut bb, &patrol), Status::Success);
    let second = bb.scratch.waypoint.expect("waypoint regenerated");
    assert_ne!(second.serial, first.serial);
    assert!(!bb.scratch.waypoint_reached);
    assert_eq!(bb.scratch.spawn, Some(start));
    let r = start.distance(second.point);
    assert!((200.0 - 1e-2..=500.0 + 1e-2).contains(&r), "radius {r}");
}

#[test]
fn arrival_is_inclusive_at_tolerance() {
    let mut bb = board_at(Vec2::ZERO, Vec2::new(5000.0, 0.0));
    assert!(!arrived_at_waypoint(&bb, 50.0));

    bb.scratch.waypoint = Some(Waypoint {
        point: Vec2::new(30.0, 40.0),
        serial: 0,
    });
    assert!(arrived_at_waypoint(&bb, 50.0));

    bb.scratch.waypoint = Some(Waypoint {
        point: Vec2::new(30.0, 40.1),
        serial: 0,
    });
    assert!(!arrived_at_waypoint(&bb, 50.0));
}

#[test]
fn check_arrival_marks_reached_only_on_success() {
    let mut bb = board_at(Vec2::ZERO, Vec2::new(5000.0, 0.0));
    assert!(!check_waypoint_arrival(&mut bb, 50.0));
    assert!(!bb.scratch.waypoint_reached);

    bb.scratch.waypoint = Some(Waypoint {
        point: Vec2::new(300.0, 0.0),
        serial: 0,
    });
    assert!(!check_waypoint_arrival(&mut bb, 50.0));
    assert!(!bb.scratch.waypoint_reached);

    bb.agent.position = Vec2::new(260.0, 0.0);
    assert!(check_waypoint_arrival(&mut bb, 50.0));
    assert!(bb.scratch.waypoint_reached);
}

#[test]
fn face_target_turns_at_most_turn_speed_per_tick() {
    let steering = SteeringConfig::default();
    let mut bb = board_at(Vec2::ZERO, Vec2::new(0.0, 100.0));
    bb.agent.turn_speed = 1.0;

    // Bearing is +PI/2; one 0.5s tick turns 0.5 rad.
    assert_eq!(face_target(&mut bb, FaceTarget::Player, &steering, 0.5), Status::Running);
    assert!((bb.agent.angle - 0.5).abs() < 1e-5);

    for _ in 0..3 {
        face_target(&mut bb, FaceTarget::Player, &steering, 0.5);
    }
    assert!((bb.agent.angle - core::f32::consts::FRAC_PI_2).abs() < 1e-5);
    assert_eq!(face_target(&mut bb, FaceTarget::Player, &steering, 0.5), Status::Success);
}

#[test]
fn face_target_takes_the_short_way_round() {
    let steering = SteeringConfig::default();
    let mut bb = board_at(Vec2::ZERO, Vec2::new(-100.0, -1.0));
    bb.agent.angle = 3.0;
    bb.agent.turn_speed = 0.1;

    face_target(&mut bb, FaceTarget::Player, &steering, 1.0);
    // Bearing is just past -PI; the short way from 3.0 is counter-clockwise through PI.
    assert!(bb.agent.angle > 3.0 || bb.agent.angle < -3.0, "{}", bb.agent.angle);
}

#[test]
fn face_target_fails_without_reference() {
    let steering = SteeringConfig::default();
    let mut bb = board_at(Vec2::ZERO, Vec2::new(10.0, 0.0));
    assert_eq!(face_target(&mut bb, FaceTarget::Waypoint, &steering, 0.1), Status::Failure);

    bb.target = None;
    assert_eq!(face_target(&mut bb, FaceTarget::Player, &steering, 0.1), Status::Failure);
    assert_eq!(bb.agent.angle, 0.0);
}

#[test]
fn thrust_accelerates_along_facing() {
    let mut bb = board_at(Vec2::ZERO, Vec2::ZERO);
    bb.agent.angle = core::f32::consts::FRAC_PI_2;
    bb.agent.acceleration = 100.0;
    assert_eq!(thrust_forward(&mut bb, 0.5), Status::Success);
    assert!(bb.agent.velocity.x.abs() < 1e-4);
    assert!((bb.agent.velocity.y - 50.0).abs() < 1e-4);
}

#[test]
fn thrust_never_leaves_speed_above_max() {
    let mut bb = board_at(Vec2::ZERO, Vec2::ZERO);
    bb.agent.max_speed = 100.0;
    bb.agent.acceleration = 1_000.0;

    for dt in [0.01, 0.1, 1.0, 5.0] {
        thrust_forward(&mut bb, dt);
        assert!(bb.agent.speed() <= 100.0 + 1e-3, "{}", bb.agent.speed());
    }

    // Starting above max: still clamped after one step.
    bb.agent.velocity = Vec2::new(900.0, 900.0);
    bb.agent.angle = 1.0;
    thrust_forward(&mut bb, 0.016);
    assert!(bb.agent.speed() <= 100.0 + 1e-3, "{}", bb.agent.speed());
}

#[test]
fn move_integrates_then_drags() {
    let steering = SteeringConfig::default();
    let mut bb = board_at(Vec2::new(1.0, 2.0), Vec2::ZERO);
    bb.agent.velocity = Vec2::new(120.0, -60.0);
    let before = bb.agent.speed();

    assert_eq!(move_to_position(&mut bb, &steering, 0.5), Status::Success);
    assert!((bb.agent.position.x - 61.0).abs() < 1e-4);
    assert!((bb.agent.position.y + 28.0).abs() < 1e-4);
    assert!(bb.agent.speed() < before);

    let expected = before * 0.98f32.powf(30.0);
    assert!((bb.agent.speed() - expected).abs() < 1e-2);
}

#[test]
fn do_nothing_always_succeeds() {
    let mut bb = board_at(Vec2::ZERO, Vec2::ZERO);
    bb.agent.health = 0.0;
    assert_eq!(do_nothing(&mut bb, 0.1), Status::Success);
}
