use crate::error::RecognitionError;
use std::fmt;
use uuid::Uuid;

/// Identifies one capture session. Events tagged with a session that has
/// since been torn down are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raw signals from the speech capture collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureEvent {
    SessionStarted,
    /// A finalized utterance. Partial results are never delivered.
    Result(String),
    Error(RecognitionError),
    /// The capture session ended on its own.
    End,
}

/// Everything the listening loop reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopEvent {
    Capture { session: SessionId, event: CaptureEvent },
    /// The delay after a recognition error elapsed.
    ResumeDue,
    /// The delay after a forced teardown elapsed.
    RestartDue,
}
