use super::event::ActionLogEntry;
use crate::intent::types::IntentCategory;
use std::collections::{HashMap, VecDeque};

#[derive(Debug, Clone, Default)]
pub struct ActionLogSnapshot {
    pub total: u64,
    pub succeeded: u64,
    pub failed: u64,
    /// Failures at the tail of the log with no success after them.
    pub trailing_failures: u64,
    pub failure_rate: f64,
    pub by_category: HashMap<IntentCategory, CategoryStats>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryStats {
    pub handled: u64,
    pub unhandled: u64,
}

pub fn compute_snapshot(entries: &VecDeque<ActionLogEntry>) -> ActionLogSnapshot {
    let mut snap = ActionLogSnapshot::default();

    for entry in entries {
        snap.total += 1;
        if entry.success {
            snap.succeeded += 1;
            snap.trailing_failures = 0;
        } else {
            snap.failed += 1;
            snap.trailing_failures += 1;
        }

        if let Some(category) = entry.category {
            let stats = snap.by_category.entry(category).or_default();
            if entry.success {
                stats.handled += 1;
            } else {
                stats.unhandled += 1;
            }
        }
    }

    if snap.total > 0 {
        snap.failure_rate = snap.failed as f64 / snap.total as f64;
    }

    snap
}
