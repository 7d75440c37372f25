use std::fmt;
use std::sync::Arc;

use drift_bt::AgentBlackboard;
use drift_core::{SplitMix64, Vec2};
use drift_tools::{TraceHost, TraceSink};

use crate::{Enemy, TargetState, WorldFeature};

/// Patrol destination. `serial` identifies one generated waypoint: it only changes when a new
/// waypoint replaces the old one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    pub point: Vec2,
    pub serial: u32,
}

/// Cross-tick memory private to one enemy.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Scratch {
    pub player_detected: bool,
    pub waypoint: Option<Waypoint>,
    pub waypoint_reached: bool,
    /// Captured lazily, the first time a waypoint is generated.
    pub spawn: Option<Vec2>,
    pub waypoints_generated: u32,
}

/// Frame inputs shared by every enemy during one step.
#[derive(Debug, Clone)]
pub struct EncounterContext {
    pub target: Option<TargetState>,
    pub features: Arc<[WorldFeature]>,
}

impl EncounterContext {
    pub fn new(target: Option<TargetState>) -> Self {
        Self {
            target,
            features: Arc::from(Vec::new()),
        }
    }

    pub fn with_features(mut self, features: Arc<[WorldFeature]>) -> Self {
        self.features = features;
        self
    }
}

pub struct EnemyBlackboard {
    pub agent: Enemy,
    pub target: Option<TargetState>,
    pub features: Arc<[WorldFeature]>,
    pub rng: SplitMix64,
    /// Seconds accumulated by the driver.
    pub elapsed: f32,
    /// Steps accumulated by the driver.
    pub step: u64,
    pub scratch: Scratch,
    trace: Option<Box<dyn TraceSink>>,
}

impl EnemyBlackboard {
    pub fn new(agent: Enemy, target: TargetState, seed: u64) -> Self {
        Self {
            agent,
            target: Some(target),
            features: Arc::from(Vec::new()),
            rng: SplitMix64::new(seed),
            elapsed: 0.0,
            step: 0,
            scratch: Scratch::default(),
            trace: None,
        }
    }

    pub fn with_features(mut self, features: Arc<[WorldFeature]>) -> Self {
        self.features = features;
        self
    }

    /// Install a sink receiving events from labeled nodes.
    pub fn with_trace(mut self, sink: Box<dyn TraceSink>) -> Self {
        self.trace = Some(sink);
        self
    }

    pub fn take_trace(&mut self) -> Option<Box<dyn TraceSink>> {
        self.trace.take()
    }

    pub fn distance_to_target(&self) -> Option<f32> {
        self.target
            .map(|t| self.agent.position.distance(t.position))
    }
}

impl fmt::Debug for EnemyBlackboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnemyBlackboard")
            .field("agent", &self.agent)
            .field("target", &self.target)
            .field("features", &self.features.len())
            .field("elapsed", &self.elapsed)
            .field("step", &self.step)
            .field("scratch", &self.scratch)
            .field("tracing", &self.trace.is_some())
            .finish_non_exhaustive()
    }
}

impl AgentBlackboard for EnemyBlackboard {
    type Context = EncounterContext;

    fn refresh(&mut self, ctx: &EncounterContext, dt: f32) {
        self.target = ctx.target;
        self.features = Arc::clone(&ctx.features);
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
        self.step += 1;
    }

    fn is_alive(&self) -> bool {
        self.agent.is_alive()
    }

    fn agent_id(&self) -> u64 {
        self.agent.id
    }
}

impl TraceHost for EnemyBlackboard {
    fn trace_agent(&self) -> u64 {
        self.agent.id
    }

    fn trace_step(&self) -> u64 {
        self.step
    }

    fn trace_sink(&mut self) -> Option<&mut dyn TraceSink> {
        match &mut self.trace {
            Some(sink) => Some(&mut **sink),
            None => None,
        }
    }
}

/// Observable behavioral regime, derived from the blackboard rather than stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Regime {
    Seek,
    Patrol,
    Dead,
}

impl Regime {
    pub fn of(bb: &EnemyBlackboard) -> Self {
        if !bb.agent.is_alive() {
            Regime::Dead
        } else if bb.scratch.player_detected {
            Regime::Seek
        } else {
            Regime::Patrol
        }
    }
}
