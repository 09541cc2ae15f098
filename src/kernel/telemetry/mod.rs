//! Action log: outcome accounting for the listening loop.
//!
//! # OWNERSHIP
//! The log is owned by the recovery supervisor. The dispatcher only appends
//! to it, through a `&mut` borrow handed over for the duration of one
//! dispatch. Nothing is persisted.
//!
//! # PRIVACY INVARIANT
//! Entries describe what was done, never what was said. Card numbers and CVVs
//! must never reach a description.

pub mod event;
pub mod metrics;
pub mod recorder;

pub use event::ActionLogEntry;
pub use metrics::ActionLogSnapshot;
pub use recorder::ActionLog;
