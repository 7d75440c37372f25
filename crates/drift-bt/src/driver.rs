use crate::bt::{Node, Status};

/// Per-agent state that the coordinator can refresh, tick and reap.
pub trait AgentBlackboard {
    /// Shared, read-only frame inputs (tracked target, static world features, ...).
    type Context;

    /// Copy current external references from `ctx` and advance the elapsed-time accumulator.
    fn refresh(&mut self, ctx: &Self::Context, dt: f32);

    fn is_alive(&self) -> bool;

    /// Stable identifier used in logs.
    fn agent_id(&self) -> u64;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateReport {
    pub ticked: usize,
    pub reaped: usize,
    pub success: usize,
    pub running: usize,
    pub failure: usize,
}

/// Advance every agent by one simulation step.
///
/// Dead agents are removed first (survivors keep their relative order) and their blackboards
/// dropped. Each survivor is then refreshed from `ctx` and ticked once against `root`, in
/// storage order. A root `Failure` is logged and otherwise ignored.
pub fn update_agents<B, N>(dt: f32, agents: &mut Vec<B>, root: &N, ctx: &B::Context) -> UpdateReport
where
    B: AgentBlackboard,
    N: Node<B> + ?Sized,
{
    let mut report = UpdateReport::default();

    agents.retain(|agent| {
        let alive = agent.is_alive();
        if !alive {
            tracing::debug!(agent = agent.agent_id(), "reaping dead agent");
            report.reaped += 1;
        }
        alive
    });

    for agent in agents.iter_mut() {
        agent.refresh(ctx, dt);
        match root.tick(agent, dt) {
            Status::Success => report.success += 1,
            Status::Running => report.running += 1,
            Status::Failure => {
                tracing::warn!(agent = agent.agent_id(), "root returned failure; ignoring");
                report.failure += 1;
            }
        }
        report.ticked += 1;
    }

    report
}
