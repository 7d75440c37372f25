#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// One labeled node evaluation.
///
/// Plain data so it can be recorded during simulation and rendered later by tooling.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceEvent {
    pub agent: u64,
    pub step: u64,
    pub node: Cow<'static, str>,
    pub status: Cow<'static, str>,
}

impl TraceEvent {
    pub fn new(
        agent: u64,
        step: u64,
        node: impl Into<Cow<'static, str>>,
        status: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            agent,
            step,
            node: node.into(),
            status: status.into(),
        }
    }
}

pub trait TraceSink {
    fn emit(&mut self, event: TraceEvent);
}

#[derive(Debug, Default)]
pub struct NullTraceSink;

impl TraceSink for NullTraceSink {
    fn emit(&mut self, _event: TraceEvent) {}
}

#[derive(Debug, Default)]
pub struct VecTraceSink {
    pub events: Vec<TraceEvent>,
}

impl TraceSink for VecTraceSink {
    fn emit(&mut self, event: TraceEvent) {
        self.events.push(event);
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceLog {
    pub events: Vec<TraceEvent>,
}

impl TraceLog {
    pub fn push(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events recorded for one agent, in emission order.
    pub fn for_agent(&self, agent: u64) -> impl Iterator<Item = &TraceEvent> {
        self.events.iter().filter(move |e| e.agent == agent)
    }
}

impl TraceSink for TraceLog {
    fn emit(&mut self, event: TraceEvent) {
        self.push(event);
    }
}

/// Implemented by blackboards that can receive node traces.
///
/// Blackboards without a sink installed return `None` and pay nothing beyond the check.
pub trait TraceHost {
    fn trace_agent(&self) -> u64;
    fn trace_step(&self) -> u64;
    fn trace_sink(&mut self) -> Option<&mut dyn TraceSink>;

    fn emit_trace(&mut self, node: Cow<'static, str>, status: &'static str) {
        let agent = self.trace_agent();
        let step = self.trace_step();
        if let Some(sink) = self.trace_sink() {
            sink.emit(TraceEvent::new(agent, step, node, status));
        }
    }
}
