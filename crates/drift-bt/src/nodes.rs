use std::borrow::Cow;

use drift_tools::TraceHost;

use crate::bt::{Node, Status};

/// AND-like composite: ticks children left to right and returns the first non-`Success`.
///
/// Children after the one that stopped evaluation are not ticked this frame. An empty
/// sequence succeeds.
pub struct Sequence<B> {
    children: Vec<Box<dyn Node<B>>>,
}

impl<B> Sequence<B> {
    pub fn new(children: Vec<Box<dyn Node<B>>>) -> Self {
        Self { children }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl<B> Node<B> for Sequence<B> {
    fn tick(&self, blackboard: &mut B, dt: f32) -> Status {
        for child in &self.children {
            match child.tick(blackboard, dt) {
                Status::Success => continue,
                other => return other,
            }
        }
        Status::Success
    }
}

/// OR-like composite: ticks children left to right and returns the first non-`Failure`.
///
/// An empty selector fails.
pub struct Selector<B> {
    children: Vec<Box<dyn Node<B>>>,
}

impl<B> Selector<B> {
    pub fn new(children: Vec<Box<dyn Node<B>>>) -> Self {
        Self { children }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl<B> Node<B> for Selector<B> {
    fn tick(&self, blackboard: &mut B, dt: f32) -> Status {
        for child in &self.children {
            match child.tick(blackboard, dt) {
                Status::Failure => continue,
                other => return other,
            }
        }
        Status::Failure
    }
}

/// Decorator mapping `Success <-> Failure`; `Running` is passed through.
pub struct Inverter<N> {
    child: N,
}

impl<N> Inverter<N> {
    pub fn new(child: N) -> Self {
        Self { child }
    }
}

impl<B, N> Node<B> for Inverter<N>
where
    N: Node<B>,
{
    fn tick(&self, blackboard: &mut B, dt: f32) -> Status {
        self.child.tick(blackboard, dt).invert()
    }
}

/// Boolean test against the blackboard.
///
/// The predicate gets mutable access because some perception tests record what they saw
/// (e.g. hysteresis state) for the next tick.
pub struct Condition<F> {
    cond: F,
}

impl<F> Condition<F> {
    pub fn new(cond: F) -> Self {
        Self { cond }
    }
}

impl<B, F> Node<B> for Condition<F>
where
    F: Fn(&mut B) -> bool,
{
    fn tick(&self, blackboard: &mut B, _dt: f32) -> Status {
        Status::from((self.cond)(blackboard))
    }
}

/// Effectful step; returns whatever status the function computes.
pub struct Action<F> {
    run: F,
}

impl<F> Action<F> {
    pub fn new(run: F) -> Self {
        Self { run }
    }
}

impl<B, F> Node<B> for Action<F>
where
    F: Fn(&mut B, f32) -> Status,
{
    fn tick(&self, blackboard: &mut B, dt: f32) -> Status {
        (self.run)(blackboard, dt)
    }
}

/// Debug wrapper attaching a caller-supplied label to a subtree.
///
/// Labels are never consulted for control flow. Each tick reports the child's status to
/// `tracing` at TRACE level and to the blackboard's trace sink, if one is installed.
pub struct Labeled<N> {
    label: Cow<'static, str>,
    child: N,
}

impl<N> Labeled<N> {
    pub fn new(label: impl Into<Cow<'static, str>>, child: N) -> Self {
        Self {
            label: label.into(),
            child,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl<B, N> Node<B> for Labeled<N>
where
    B: TraceHost,
    N: Node<B>,
{
    fn tick(&self, blackboard: &mut B, dt: f32) -> Status {
        let status = self.child.tick(blackboard, dt);
        tracing::trace!(
            node = %self.label,
            agent = blackboard.trace_agent(),
            status = status.as_str(),
            "bt tick"
        );
        blackboard.emit_trace(self.label.clone(), status.as_str());
        status
    }
}

pub fn sequence<B: 'static>(children: Vec<Box<dyn Node<B>>>) -> Box<dyn Node<B>> {
    Box::new(Sequence::new(children))
}

pub fn selector<B: 'static>(children: Vec<Box<dyn Node<B>>>) -> Box<dyn Node<B>> {
    Box::new(Selector::new(children))
}

pub fn invert<B: 'static>(child: Box<dyn Node<B>>) -> Box<dyn Node<B>> {
    Box::new(Inverter::new(child))
}

pub fn condition<B, F>(cond: F) -> Box<dyn Node<B>>
where
    B: 'static,
    F: Fn(&mut B) -> bool + 'static,
{
    Box::new(Condition::new(cond))
}

pub fn action<B, F>(run: F) -> Box<dyn Node<B>>
where
    B: 'static,
    F: Fn(&mut B, f32) -> Status + 'static,
{
    Box::new(Action::new(run))
}

pub fn labeled<B>(label: impl Into<Cow<'static, str>>, child: Box<dyn Node<B>>) -> Box<dyn Node<B>>
where
    B: TraceHost + 'static,
{
    Box::new(Labeled::new(label, child))
}
