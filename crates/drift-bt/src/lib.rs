//! Stateless behavior tree interpreter.
//!
//! Nodes are shared by every agent of an archetype; all per-agent memory lives in the
//! blackboard `B` that is threaded through each `tick`.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod bt;
pub mod driver;
pub mod nodes;

pub use bt::{Node, Status};
pub use driver::{update_agents, AgentBlackboard, UpdateReport};
pub use nodes::{
    action, condition, invert, labeled, selector, sequence, Action, Condition, Inverter, Labeled,
    Selector, Sequence,
};
