use super::event::{LoopEvent, SessionId};
use crate::intent::Utterance;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Work the supervisor asks the driver to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SideEffect {
    StartCapture(SessionId),
    PauseCapture,
    ResumeCapture,
    StopCapture,
    Dispatch(Utterance),
    Schedule { after: Duration, event: LoopEvent },
    Status(String),
}

/// Arms one-shot timers that feed events back into the loop. Every pending
/// timer dies with the loop's cancellation token.
#[derive(Clone)]
pub struct Scheduler {
    tx: mpsc::Sender<LoopEvent>,
    cancel: CancellationToken,
}

impl Scheduler {
    pub fn new(tx: mpsc::Sender<LoopEvent>, cancel: CancellationToken) -> Self {
        Self { tx, cancel }
    }

    pub fn schedule(&self, after: Duration, event: LoopEvent) {
        let tx = self.tx.clone();
        let cancel = self.cancel.clone();
        debug!(?after, ?event, "Timer armed");
        tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {}
                _ = tokio::time::sleep(after) => {
                    let _ = tx.send(event).await;
                }
            }
        });
    }
}
