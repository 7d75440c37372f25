//! Enemy decision layer built on `drift-bt`.
//!
//! One canonical tree (`build_enemy_tree`) is shared by every enemy; each enemy owns an
//! `EnemyBlackboard` holding its kinematic state, the tracked target and private scratch memory.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod agent;
pub mod blackboard;
pub mod config;
pub mod leaves;
pub mod tree;

pub use agent::{Enemy, TargetState, WorldFeature};
pub use blackboard::{EncounterContext, EnemyBlackboard, Regime, Scratch, Waypoint};
pub use config::{
    BehaviorConfig, ConfigError, DriftConfig, EnemyArchetype, PatrolConfig, SteeringConfig,
};
pub use leaves::FaceTarget;
pub use tree::{build_enemy_tree, build_enemy_tree_labeled, default_enemy_tree};
