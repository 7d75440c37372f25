//! Assembly of the enemy tree.
//!
//! ```text
//! Selector
//! ├── Seek:   Sequence(is_alive, player_detected, pursue_and_thrust)
//! ├── Patrol: Sequence(is_alive, ensure_waypoint, face_target(waypoint),
//! │                    thrust_forward, move_to_position, check_waypoint_arrival)
//! └── Fallback: do_nothing
//! ```
//!
//! The regime is re-selected every tick; the only remembered state is the detection flag in
//! scratch. `do_nothing` guarantees the root never fails.

use drift_bt::{action, condition, labeled, selector, sequence, Node};

use crate::leaves::{self, FaceTarget};
use crate::{BehaviorConfig, EnemyBlackboard};

type BoxedNode = Box<dyn Node<EnemyBlackboard>>;

fn alive() -> BoxedNode {
    condition(|bb: &mut EnemyBlackboard| leaves::is_alive(bb))
}

fn seek(config: &BehaviorConfig) -> BoxedNode {
    let steering = config.steering;
    sequence(vec![
        alive(),
        condition(leaves::player_detected),
        action(move |bb: &mut EnemyBlackboard, dt| leaves::pursue_and_thrust(bb, &steering, dt)),
    ])
}

fn patrol(config: &BehaviorConfig) -> BoxedNode {
    let patrol = config.patrol;
    let steering = config.steering;
    sequence(vec![
        alive(),
        action(move |bb: &mut EnemyBlackboard, _| leaves::ensure_waypoint(bb, &patrol)),
        action(move |bb: &mut EnemyBlackboard, dt| {
            leaves::face_target(bb, FaceTarget::Waypoint, &steering, dt)
        }),
        action(leaves::thrust_forward),
        action(move |bb: &mut EnemyBlackboard, dt| leaves::move_to_position(bb, &steering, dt)),
        condition(move |bb: &mut EnemyBlackboard| {
            leaves::check_waypoint_arrival(bb, patrol.arrival_tolerance)
        }),
    ])
}

fn fallback() -> BoxedNode {
    action(leaves::do_nothing)
}

/// Build the canonical enemy root. Stateless: one instance serves every enemy.
pub fn build_enemy_tree(config: &BehaviorConfig) -> BoxedNode {
    selector(vec![seek(config), patrol(config), fallback()])
}

/// Same tree with `root`, `seek`, `patrol` and `fallback` labels for tracing.
pub fn build_enemy_tree_labeled(config: &BehaviorConfig) -> BoxedNode {
    labeled(
        "root",
        selector(vec![
            labeled("seek", seek(config)),
            labeled("patrol", patrol(config)),
            labeled("fallback", fallback()),
        ]),
    )
}

pub fn default_enemy_tree() -> BoxedNode {
    build_enemy_tree(&BehaviorConfig::default())
}
