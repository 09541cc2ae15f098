//! Listening loop kernel.
//!
//! Pure decisions live in [`supervisor::RecoverySupervisor`] and the
//! [`listening::ListenGraph`]; [`reactor::ListeningLoop`] is the only part
//! that awaits.

pub mod cancel;
pub mod event;
pub mod listening;
pub mod reactor;
pub mod scheduler;
pub mod state;
pub mod supervisor;
pub mod telemetry;

pub use cancel::LoopHandle;
pub use event::{CaptureEvent, LoopEvent, SessionId};
pub use listening::{ListenGraph, ListenRequest, ListenState};
pub use reactor::ListeningLoop;
pub use scheduler::SideEffect;
pub use supervisor::RecoverySupervisor;
