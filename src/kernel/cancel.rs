use tokio_util::sync::CancellationToken;

/// Stops a running listening loop. Cheap to clone; any clone may stop it.
///
/// Stopping tears capture down and cancels pending timers. A dispatch that is
/// already running finishes but does not re-arm capture.
#[derive(Debug, Clone)]
pub struct LoopHandle {
    cancel: CancellationToken,
}

impl LoopHandle {
    pub fn new(cancel: CancellationToken) -> Self {
        Self { cancel }
    }

    pub fn stop(&self) {
        self.cancel.cancel();
    }

    pub fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn token(&self) -> CancellationToken {
        self.cancel.clone()
    }
}
