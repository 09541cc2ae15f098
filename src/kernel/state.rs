use super::event::SessionId;
use super::listening::ListenState;
use super::telemetry::ActionLog;

/// Consecutive failed commands or recognition errors. Any success resets it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecoveryCounter {
    count: u32,
}

impl RecoveryCounter {
    pub fn get(&self) -> u32 {
        self.count
    }

    pub fn increment(&mut self) -> u32 {
        self.count = self.count.saturating_add(1);
        self.count
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }

    pub fn reached(&self, threshold: u32) -> bool {
        self.count >= threshold
    }
}

/// Strict state delta. Apart from log appends during dispatch, this is the
/// only way supervisor state mutates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateDelta {
    Transition(ListenState),
    SessionOpened(SessionId),
    SessionCleared,
    CommandSucceeded,
    Failure,
    Restarted,
    Stopped,
}

#[derive(Debug)]
pub struct SupervisorState {
    pub listen: ListenState,
    pub session: Option<SessionId>,
    pub recovery: RecoveryCounter,
    pub log: ActionLog,
    /// Set by an explicit stop. Nothing re-arms capture afterwards.
    pub stopped: bool,
    pub restarts: u32,
    pub sessions_opened: u32,
}

impl SupervisorState {
    pub fn new(log_capacity: usize) -> Self {
        Self {
            listen: ListenState::Idle,
            session: None,
            recovery: RecoveryCounter::default(),
            log: ActionLog::with_capacity(log_capacity),
            stopped: false,
            restarts: 0,
            sessions_opened: 0,
        }
    }

    /// Pure reduction: State + Delta -> Mutated State
    pub fn reduce(&mut self, delta: StateDelta) {
        match delta {
            StateDelta::Transition(next) => self.listen = next,
            StateDelta::SessionOpened(id) => {
                self.session = Some(id);
                self.sessions_opened += 1;
            }
            StateDelta::SessionCleared => self.session = None,
            StateDelta::CommandSucceeded => self.recovery.reset(),
            StateDelta::Failure => {
                self.recovery.increment();
            }
            StateDelta::Restarted => {
                self.recovery.reset();
                self.restarts += 1;
            }
            StateDelta::Stopped => {
                self.stopped = true;
                self.session = None;
            }
        }
    }
}
