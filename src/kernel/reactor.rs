use std::collections::VecDeque;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::cancel::LoopHandle;
use super::event::{CaptureEvent, LoopEvent};
use super::scheduler::{Scheduler, SideEffect};
use super::supervisor::RecoverySupervisor;
use crate::audio::capture::{CaptureSink, SpeechCapture};
use crate::config::RecoveryConfig;
use crate::intent::CommandDispatcher;
use crate::store::Notifier;

const EVENT_QUEUE: usize = 64;

/// Async driver around the recovery supervisor. Owns capture, the
/// dispatcher and the timers; the supervisor decides, this executes.
///
/// Commands are dispatched inline, so at most one is in flight and the next
/// one is only listened for after the previous one finished.
pub struct ListeningLoop<C: SpeechCapture> {
    supervisor: RecoverySupervisor,
    dispatcher: CommandDispatcher,
    capture: C,
    notifier: Arc<dyn Notifier>,
    tx: mpsc::Sender<LoopEvent>,
    receiver: mpsc::Receiver<LoopEvent>,
    scheduler: Scheduler,
    cancel: CancellationToken,
}

impl<C: SpeechCapture> ListeningLoop<C> {
    pub fn new(config: RecoveryConfig, dispatcher: CommandDispatcher, capture: C) -> Self {
        Self::with_cancel(config, dispatcher, capture, CancellationToken::new())
    }

    /// Stops when `cancel` fires, e.g. on ctrl-c or when stdin closes.
    pub fn with_cancel(
        config: RecoveryConfig,
        dispatcher: CommandDispatcher,
        capture: C,
        cancel: CancellationToken,
    ) -> Self {
        let (tx, receiver) = mpsc::channel(EVENT_QUEUE);
        let notifier = dispatcher.context().storefront.notifier.clone();
        Self {
            supervisor: RecoverySupervisor::new(config),
            dispatcher,
            capture,
            notifier,
            scheduler: Scheduler::new(tx.clone(), cancel.child_token()),
            tx,
            receiver,
            cancel,
        }
    }

    pub fn handle(&self) -> LoopHandle {
        LoopHandle::new(self.cancel.clone())
    }

    pub fn supervisor(&self) -> &RecoverySupervisor {
        &self.supervisor
    }

    /// Runs until stopped, then hands the supervisor back for inspection.
    pub async fn run(mut self) -> RecoverySupervisor {
        info!("Listening loop started");
        let effects = self.supervisor.start();
        self.apply(effects).await;

        loop {
            let event = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => break,
                event = self.receiver.recv() => event,
            };
            let Some(event) = event else { break };

            let effects = self.supervisor.step(event);
            self.apply(effects).await;
        }

        let effects = self.supervisor.stop();
        self.apply(effects).await;
        self.cancel.cancel();
        info!(
            restarts = self.supervisor.state.restarts,
            logged = self.supervisor.state.log.len(),
            "Listening loop stopped"
        );
        self.supervisor
    }

    async fn apply(&mut self, effects: Vec<SideEffect>) {
        let mut queue: VecDeque<SideEffect> = effects.into();

        while let Some(effect) = queue.pop_front() {
            match effect {
                SideEffect::StartCapture(session) => {
                    let sink = CaptureSink::new(session, self.tx.clone());
                    if let Err(error) = self.capture.start(sink) {
                        warn!(error = %error, "Capture failed to start");
                        queue.extend(self.supervisor.on_capture(session, CaptureEvent::Error(error)));
                    }
                }
                SideEffect::PauseCapture => self.capture.pause(),
                SideEffect::ResumeCapture => self.capture.resume(),
                SideEffect::StopCapture => self.capture.stop(),
                SideEffect::Dispatch(utterance) => {
                    let outcome = self
                        .dispatcher
                        .dispatch(&utterance, &mut self.supervisor.state.log)
                        .await;
                    if self.cancel.is_cancelled() {
                        queue.extend(self.supervisor.stop());
                    }
                    queue.extend(self.supervisor.on_dispatch_complete(&outcome));
                }
                SideEffect::Schedule { after, event } => self.scheduler.schedule(after, event),
                SideEffect::Status(message) => self.notifier.status(&message),
            }
        }
    }
}
