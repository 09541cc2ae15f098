use serde::{Deserialize, Serialize};

/// Lifecycle states of the listening loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListenState {
    /// Not capturing. Initial state and the state after an explicit stop.
    Idle,
    /// A capture session is armed (or about to be re-armed after an error).
    Listening,
    /// Capture paused while one utterance is dispatched.
    Processing,
    /// Capture torn down after clustered failures, fresh session pending.
    Restarting,
}

impl Default for ListenState {
    fn default() -> Self {
        Self::Idle
    }
}

/// Requests for a state transition. The graph decides whether they apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenRequest {
    Start,
    UtteranceReceived,
    DispatchCompleted,
    FailureThresholdReached,
    RestartCompleted,
    Stop,
}

pub struct ListenGraph;

impl ListenGraph {
    /// Pure function: (Current State, Request) -> New State
    /// Returns None if the transition is invalid/ignored.
    pub fn transition(current: ListenState, request: ListenRequest) -> Option<ListenState> {
        use ListenRequest::*;
        use ListenState::*;

        match (current, request) {
            (Idle, Start) => Some(Listening),

            (Listening, UtteranceReceived) => Some(Processing),
            (Listening, FailureThresholdReached) => Some(Restarting),

            (Processing, DispatchCompleted) => Some(Listening),

            (Restarting, RestartCompleted) => Some(Listening),

            // stop wins from any active state
            (Listening | Processing | Restarting, Stop) => Some(Idle),

            _ => None,
        }
    }
}
