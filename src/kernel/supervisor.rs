use tracing::{debug, info, warn};

use super::event::{CaptureEvent, LoopEvent, SessionId};
use super::listening::{ListenGraph, ListenRequest, ListenState};
use super::scheduler::SideEffect;
use super::state::{StateDelta, SupervisorState};
use crate::config::RecoveryConfig;
use crate::error::RecognitionError;
use crate::intent::{DispatchOutcome, Utterance};

pub const RESTARTED_STATUS: &str = "Voice assistant restarted";

/// Decides how the listening loop reacts to capture signals and command
/// outcomes. Every step is pure: it mutates owned state and returns the side
/// effects for the driver to execute. Nothing here awaits.
///
/// Failures (recognition errors and unhandled commands) bump a consecutive
/// counter. Any handled command resets it. Once it reaches the configured
/// threshold, capture is torn down and a fresh session is started after the
/// restart delay.
pub struct RecoverySupervisor {
    pub state: SupervisorState,
    config: RecoveryConfig,
}

impl RecoverySupervisor {
    pub fn new(config: RecoveryConfig) -> Self {
        Self {
            state: SupervisorState::new(config.action_log_capacity),
            config,
        }
    }

    pub fn config(&self) -> &RecoveryConfig {
        &self.config
    }

    pub fn listen_state(&self) -> ListenState {
        self.state.listen
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.state.recovery.get()
    }

    pub fn start(&mut self) -> Vec<SideEffect> {
        if self.state.stopped || !self.transition(ListenRequest::Start) {
            return Vec::new();
        }
        info!(threshold = self.config.failure_threshold, "Listening started");
        self.open_session()
    }

    /// Routes one loop event to the matching step.
    pub fn step(&mut self, event: LoopEvent) -> Vec<SideEffect> {
        match event {
            LoopEvent::Capture { session, event } => self.on_capture(session, event),
            LoopEvent::ResumeDue => self.on_resume_due(),
            LoopEvent::RestartDue => self.on_restart_due(),
        }
    }

    pub fn on_capture(&mut self, session: SessionId, event: CaptureEvent) -> Vec<SideEffect> {
        if self.state.session != Some(session) {
            debug!(%session, "Dropped event from a stale capture session");
            return Vec::new();
        }

        match event {
            CaptureEvent::SessionStarted => {
                debug!(%session, "Capture session live");
                Vec::new()
            }
            CaptureEvent::Result(text) => {
                let utterance = Utterance::new(&text);
                if utterance.is_empty() {
                    return Vec::new();
                }
                if !self.transition(ListenRequest::UtteranceReceived) {
                    return Vec::new();
                }
                vec![SideEffect::PauseCapture, SideEffect::Dispatch(utterance)]
            }
            CaptureEvent::Error(error) if error.is_abort() => {
                debug!(%session, "Capture aborted");
                Vec::new()
            }
            CaptureEvent::Error(error) => self.on_recognition_error(error),
            CaptureEvent::End => {
                if self.state.stopped || self.state.listen != ListenState::Listening {
                    return Vec::new();
                }
                info!(%session, "Capture session ended, re-arming");
                self.state.reduce(StateDelta::SessionCleared);
                self.open_session()
            }
        }
    }

    fn on_recognition_error(&mut self, error: RecognitionError) -> Vec<SideEffect> {
        warn!(error = %error, "Recognition error");
        self.state.reduce(StateDelta::SessionCleared);
        self.state.reduce(StateDelta::Failure);
        self.state.log.append(format!("recognition error: {}", error), false, None);

        let mut effects = vec![SideEffect::StopCapture];
        if self.state.listen != ListenState::Listening {
            // dispatch completion re-arms capture
            return effects;
        }
        if self.threshold_reached() {
            effects.extend(self.begin_restart());
        } else {
            effects.push(SideEffect::Schedule {
                after: self.config.resume_delay(),
                event: LoopEvent::ResumeDue,
            });
        }
        effects
    }

    /// Processing -> Listening. Capture is re-armed exactly once per
    /// dispatch, unless the loop was stopped meanwhile or a restart is due.
    pub fn on_dispatch_complete(&mut self, outcome: &DispatchOutcome) -> Vec<SideEffect> {
        if outcome.handled {
            self.state.reduce(StateDelta::CommandSucceeded);
        } else {
            self.state.reduce(StateDelta::Failure);
        }

        if self.state.stopped || !self.transition(ListenRequest::DispatchCompleted) {
            return Vec::new();
        }

        if self.threshold_reached() {
            return self.begin_restart();
        }

        match self.state.session {
            Some(_) => vec![SideEffect::ResumeCapture],
            None => self.open_session(),
        }
    }

    pub fn on_resume_due(&mut self) -> Vec<SideEffect> {
        if self.state.stopped || self.state.listen != ListenState::Listening || self.state.session.is_some() {
            return Vec::new();
        }
        self.open_session()
    }

    pub fn on_restart_due(&mut self) -> Vec<SideEffect> {
        if self.state.stopped || !self.transition(ListenRequest::RestartCompleted) {
            return Vec::new();
        }
        self.state.reduce(StateDelta::Restarted);
        self.state.log.append("voice assistant restarted", true, None);
        info!(restarts = self.state.restarts, "Voice assistant restarted");

        let mut effects = self.open_session();
        effects.push(SideEffect::Status(RESTARTED_STATUS.to_string()));
        effects
    }

    /// Idempotent. After a stop nothing re-arms capture.
    pub fn stop(&mut self) -> Vec<SideEffect> {
        if self.state.stopped {
            return Vec::new();
        }
        let had_session = self.state.session.is_some();
        self.transition(ListenRequest::Stop);
        self.state.reduce(StateDelta::Stopped);
        info!("Listening stopped");

        if had_session {
            vec![SideEffect::StopCapture]
        } else {
            Vec::new()
        }
    }

    fn begin_restart(&mut self) -> Vec<SideEffect> {
        if !self.transition(ListenRequest::FailureThresholdReached) {
            return Vec::new();
        }
        warn!(
            failures = self.state.recovery.get(),
            "Failure threshold reached, restarting capture"
        );

        let mut effects = Vec::new();
        if self.state.session.is_some() {
            self.state.reduce(StateDelta::SessionCleared);
            effects.push(SideEffect::StopCapture);
        }
        effects.push(SideEffect::Schedule {
            after: self.config.restart_delay(),
            event: LoopEvent::RestartDue,
        });
        effects
    }

    fn open_session(&mut self) -> Vec<SideEffect> {
        let session = SessionId::new();
        self.state.reduce(StateDelta::SessionOpened(session));
        vec![SideEffect::StartCapture(session)]
    }

    fn threshold_reached(&self) -> bool {
        self.state.recovery.reached(self.config.failure_threshold)
    }

    fn transition(&mut self, request: ListenRequest) -> bool {
        match ListenGraph::transition(self.state.listen, request) {
            Some(next) => {
                debug!(from = ?self.state.listen, to = ?next, ?request, "Listen transition");
                self.state.reduce(StateDelta::Transition(next));
                true
            }
            None => {
                debug!(state = ?self.state.listen, ?request, "Ignored listen request");
                false
            }
        }
    }
}
