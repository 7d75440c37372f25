//! Deterministic, engine-agnostic primitives shared by drift agents.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod kinematics;
pub mod math;
pub mod rng;

pub use kinematics::{apply_drag, integrate_position, thrust, turn_toward};
pub use math::{wrap_angle, Vec2};
pub use rng::{derive_seed, DeterministicRng, SplitMix64};
