use std::rc::Rc;
use std::sync::Arc;

/// Result of one tick. `Running` means "not finished, ask me again next tick".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Success,
    Failure,
    Running,
}

impl Status {
    pub fn is_success(self) -> bool {
        self == Status::Success
    }

    pub fn is_failure(self) -> bool {
        self == Status::Failure
    }

    pub fn is_running(self) -> bool {
        self == Status::Running
    }

    /// `Success <-> Failure`; `Running` passes through.
    pub fn invert(self) -> Status {
        match self {
            Status::Success => Status::Failure,
            Status::Failure => Status::Success,
            Status::Running => Status::Running,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Success => "success",
            Status::Failure => "failure",
            Status::Running => "running",
        }
    }
}

impl From<bool> for Status {
    fn from(value: bool) -> Self {
        if value {
            Status::Success
        } else {
            Status::Failure
        }
    }
}

/// A tree participant.
///
/// `tick` takes `&self`: a node never owns per-agent state, so one instance can serve every
/// agent whose blackboard has shape `B`.
pub trait Node<B> {
    fn tick(&self, blackboard: &mut B, dt: f32) -> Status;
}

impl<B, N> Node<B> for Box<N>
where
    N: Node<B> + ?Sized,
{
    fn tick(&self, blackboard: &mut B, dt: f32) -> Status {
        (**self).tick(blackboard, dt)
    }
}

impl<B, N> Node<B> for Arc<N>
where
    N: Node<B> + ?Sized,
{
    fn tick(&self, blackboard: &mut B, dt: f32) -> Status {
        (**self).tick(blackboard, dt)
    }
}

impl<B, N> Node<B> for Rc<N>
where
    N: Node<B> + ?Sized,
{
    fn tick(&self, blackboard: &mut B, dt: f32) -> Status {
        (**self).tick(blackboard, dt)
    }
}

impl<B, N> Node<B> for &N
where
    N: Node<B> + ?Sized,
{
    fn tick(&self, blackboard: &mut B, dt: f32) -> Status {
        (**self).tick(blackboard, dt)
    }
}
