//! Scripted encounter: an orbiting target, a spawned wave and a toy weapon.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::Path;
use std::rc::Rc;
use std::sync::Arc;

use anyhow::{Context, Result};
use drift_bt::{update_agents, Node, UpdateReport};
use drift_core::{derive_seed, Vec2};
use drift_enemy::{
    DriftConfig, EncounterContext, EnemyBlackboard, Regime, TargetState, WorldFeature,
};
use drift_tools::{TraceEvent, TraceLog, TraceSink};
use serde::{Deserialize, Serialize};

/// Simulation file: enemy tuning plus the scripted scenario.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimFile {
    #[serde(flatten)]
    pub drift: DriftConfig,
    pub scenario: ScenarioConfig,
}

impl SimFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let file: SimFile = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        file.drift
            .validate()
            .with_context(|| format!("invalid config {}", path.display()))?;
        Ok(file)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Radius of the ring enemies spawn on.
    pub spawn_ring: f32,
    /// Radius of the target's circular path around the origin.
    pub orbit_radius: f32,
    /// Target angular speed, radians per second.
    pub orbit_speed: f32,
    /// Enemies within this distance of the target take damage.
    pub weapon_range: f32,
    /// Damage per second dealt to each enemy in range.
    pub weapon_dps: f32,
    /// Log regime counts every N steps (0 disables periodic reports).
    pub report_every: u64,
    #[serde(default)]
    pub features: Vec<WorldFeature>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            spawn_ring: 900.0,
            orbit_radius: 600.0,
            orbit_speed: 0.4,
            weapon_range: 120.0,
            weapon_dps: 60.0,
            report_every: 300,
            features: Vec::new(),
        }
    }
}

impl ScenarioConfig {
    /// Target state after `elapsed` seconds.
    pub fn target_at(&self, elapsed: f32) -> TargetState {
        let theta = self.orbit_speed * elapsed;
        let position = Vec2::from_angle(theta) * self.orbit_radius;
        // d/dt of (r cos wt, r sin wt)
        let velocity = Vec2::new(-theta.sin(), theta.cos()) * (self.orbit_radius * self.orbit_speed);
        TargetState::moving(position, velocity)
    }
}

/// Trace sink shared by every enemy so one log covers the wave.
#[derive(Clone, Default)]
pub struct SharedTrace(Rc<RefCell<TraceLog>>);

impl SharedTrace {
    pub fn snapshot(&self) -> TraceLog {
        TraceLog {
            events: self.0.borrow().events.clone(),
        }
    }
}

impl TraceSink for SharedTrace {
    fn emit(&mut self, event: TraceEvent) {
        self.0.borrow_mut().push(event);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegimeCounts {
    pub seek: usize,
    pub patrol: usize,
    pub dead: usize,
}

impl RegimeCounts {
    pub fn of(enemies: &[EnemyBlackboard]) -> Self {
        let mut counts = Self::default();
        for bb in enemies {
            match Regime::of(bb) {
                Regime::Seek => counts.seek += 1,
                Regime::Patrol => counts.patrol += 1,
                Regime::Dead => counts.dead += 1,
            }
        }
        counts
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub steps: u64,
    pub spawned: usize,
    pub survivors: usize,
    pub reaped: usize,
    /// Steps each enemy spent seeking, by id.
    pub seek_steps: BTreeMap<u64, u64>,
}

pub struct Encounter {
    pub config: SimFile,
    pub enemies: Vec<EnemyBlackboard>,
    features: Arc<[WorldFeature]>,
    elapsed: f32,
    trace: Option<SharedTrace>,
}

impl Encounter {
    pub fn spawn(config: SimFile, count: u64, seed: u64, trace: Option<SharedTrace>) -> Self {
        let features: Arc<[WorldFeature]> = Arc::from(config.scenario.features.clone());
        let initial_target = config.scenario.target_at(0.0);

        let enemies = (0..count)
            .map(|id| {
                let theta = core::f32::consts::TAU * (id as f32) / (count.max(1) as f32);
                let spawn = Vec2::from_angle(theta) * config.scenario.spawn_ring;
                let agent = config.drift.archetype.spawn(id, spawn);
                let bb = EnemyBlackboard::new(agent, initial_target, derive_seed(seed, id, 0))
                    .with_features(Arc::clone(&features));
                match &trace {
                    Some(sink) => bb.with_trace(Box::new(sink.clone())),
                    None => bb,
                }
            })
            .collect();

        Self {
            config,
            enemies,
            features,
            elapsed: 0.0,
            trace,
        }
    }

    pub fn trace(&self) -> Option<TraceLog> {
        self.trace.as_ref().map(SharedTrace::snapshot)
    }

    fn apply_weapon(&mut self, target: TargetState, dt: f32) {
        let scenario = &self.config.scenario;
        for bb in self.enemies.iter_mut() {
            if bb.agent.position.distance(target.position) <= scenario.weapon_range {
                bb.agent.health -= scenario.weapon_dps * dt;
                if !bb.agent.is_alive() {
                    tracing::info!(enemy = bb.agent.id, t = self.elapsed, "enemy destroyed");
                }
            }
        }
    }

    /// Advance one step: move the target, apply damage, then drive the enemy tree.
    pub fn step<N>(&mut self, root: &N, dt: f32) -> UpdateReport
    where
        N: Node<EnemyBlackboard> + ?Sized,
    {
        self.elapsed += dt;
        let target = self.config.scenario.target_at(self.elapsed);
        self.apply_weapon(target, dt);

        let ctx = EncounterContext::new(Some(target)).with_features(Arc::clone(&self.features));
        update_agents(dt, &mut self.enemies, root, &ctx)
    }

    pub fn run<N>(&mut self, root: &N, steps: u64, dt: f32) -> Summary
    where
        N: Node<EnemyBlackboard> + ?Sized,
    {
        let mut summary = Summary {
            spawned: self.enemies.len(),
            ..Summary::default()
        };
        let report_every = self.config.scenario.report_every;

        for step in 1..=steps {
            let report = self.step(root, dt);
            summary.steps = step;
            summary.reaped += report.reaped;

            for bb in &self.enemies {
                if Regime::of(bb) == Regime::Seek {
                    *summary.seek_steps.entry(bb.agent.id).or_default() += 1;
                }
            }

            if report_every > 0 && step % report_every == 0 {
                let counts = RegimeCounts::of(&self.enemies);
                tracing::info!(
                    step,
                    t = self.elapsed,
                    seek = counts.seek,
                    patrol = counts.patrol,
                    reaped = summary.reaped,
                    "encounter"
                );
            }
            if self.enemies.is_empty() {
                tracing::info!(step, "all enemies destroyed");
                break;
            }
        }

        summary.survivors = self.enemies.len();
        summary
    }
}
