use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::RecognitionError;
use crate::kernel::event::{CaptureEvent, LoopEvent, SessionId};

/// Delivers capture events into the listening loop, tagged with the session
/// they belong to.
#[derive(Debug, Clone)]
pub struct CaptureSink {
    session: SessionId,
    tx: mpsc::Sender<LoopEvent>,
}

impl CaptureSink {
    pub fn new(session: SessionId, tx: mpsc::Sender<LoopEvent>) -> Self {
        Self { session, tx }
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    /// Returns false once the loop is gone.
    pub async fn emit(&self, event: CaptureEvent) -> bool {
        self.tx
            .send(LoopEvent::Capture { session: self.session, event })
            .await
            .is_ok()
    }

    pub fn try_emit(&self, event: CaptureEvent) -> bool {
        self.tx
            .try_send(LoopEvent::Capture { session: self.session, event })
            .is_ok()
    }
}

/// A continuous speech recognizer. Only finalized results are delivered.
///
/// Implementations must not block: the loop calls these from its own task.
pub trait SpeechCapture: Send {
    fn start(&mut self, sink: CaptureSink) -> Result<(), RecognitionError>;
    fn pause(&mut self);
    fn resume(&mut self);
    fn stop(&mut self);
}

type LineSource = Box<dyn AsyncRead + Send + Unpin>;

/// Reads one utterance per line from stdin. Lines are only consumed while a
/// session is active; EOF cancels the shutdown token.
pub struct StdinCapture {
    active: watch::Sender<Option<CaptureSink>>,
    current: Option<CaptureSink>,
    shutdown: CancellationToken,
    source: Option<LineSource>,
    reader: Option<JoinHandle<()>>,
}

impl StdinCapture {
    pub fn new(shutdown: CancellationToken) -> Self {
        Self::with_reader(tokio::io::stdin(), shutdown)
    }

    /// Same line protocol over any byte source.
    pub fn with_reader(source: impl AsyncRead + Send + Unpin + 'static, shutdown: CancellationToken) -> Self {
        let (active, _) = watch::channel(None);
        Self {
            active,
            current: None,
            shutdown,
            source: Some(Box::new(source)),
            reader: None,
        }
    }

    fn spawn_reader(&mut self) {
        let Some(source) = self.source.take() else {
            return;
        };
        let mut active = self.active.subscribe();
        let shutdown = self.shutdown.clone();

        self.reader = Some(tokio::spawn(async move {
            let mut lines = BufReader::new(source).lines();
            loop {
                if active_sink(&mut active).await.is_none() {
                    return;
                }

                let line = tokio::select! {
                    _ = shutdown.cancelled() => return,
                    line = lines.next_line() => line,
                };

                let event = match line {
                    Ok(Some(line)) if line.trim().is_empty() => continue,
                    Ok(Some(line)) => CaptureEvent::Result(line),
                    Ok(None) => {
                        info!("stdin closed");
                        shutdown.cancel();
                        return;
                    }
                    Err(e) => {
                        warn!(error = %e, "stdin read failed");
                        CaptureEvent::Error(RecognitionError::Failed(e.to_string()))
                    }
                };

                // the session may have been replaced while the read was pending
                let Some(sink) = active_sink(&mut active).await else {
                    return;
                };
                if !sink.emit(event).await {
                    return;
                }
            }
        }));
    }
}

/// Waits until a session is active and returns its sink. `None` once the
/// capture side is gone.
async fn active_sink(active: &mut watch::Receiver<Option<CaptureSink>>) -> Option<CaptureSink> {
    loop {
        if let Some(sink) = active.borrow_and_update().clone() {
            return Some(sink);
        }
        active.changed().await.ok()?;
    }
}

impl SpeechCapture for StdinCapture {
    fn start(&mut self, sink: CaptureSink) -> Result<(), RecognitionError> {
        debug!(session = %sink.session(), "Capture session starting");
        self.spawn_reader();
        sink.try_emit(CaptureEvent::SessionStarted);
        self.current = Some(sink.clone());
        self.active.send_replace(Some(sink));
        Ok(())
    }

    fn pause(&mut self) {
        self.active.send_replace(None);
    }

    fn resume(&mut self) {
        self.active.send_replace(self.current.clone());
    }

    fn stop(&mut self) {
        self.current = None;
        self.active.send_replace(None);
    }
}

impl Drop for StdinCapture {
    fn drop(&mut self) {
        if let Some(reader) = self.reader.take() {
            reader.abort();
        }
    }
}
