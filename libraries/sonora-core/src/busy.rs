//! In-flight flags per action class
//!
//! Each user-triggered action sets its flag for the duration of its request.
//! The core only records the state; callers must not start an action whose
//! flag is set. There is no timeout: a request that never resolves (or a
//! future that is dropped mid-flight) leaves its flag set.

use std::sync::atomic::{AtomicBool, Ordering};

/// User-triggered action classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Submit,
    Retry,
    SaveSession,
    DeleteSession,
    Commit,
}

impl ActionKind {
    pub const ALL: [ActionKind; 5] = [
        ActionKind::Submit,
        ActionKind::Retry,
        ActionKind::SaveSession,
        ActionKind::DeleteSession,
        ActionKind::Commit,
    ];

    fn index(self) -> usize {
        match self {
            ActionKind::Submit => 0,
            ActionKind::Retry => 1,
            ActionKind::SaveSession => 2,
            ActionKind::DeleteSession => 3,
            ActionKind::Commit => 4,
        }
    }
}

/// Busy flags, shareable with whatever renders them (`Arc<BusyFlags>`)
#[derive(Debug, Default)]
pub struct BusyFlags {
    flags: [AtomicBool; 5],
}

impl BusyFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self, kind: ActionKind) -> bool {
        self.flags[kind.index()].load(Ordering::Acquire)
    }

    pub fn any_busy(&self) -> bool {
        ActionKind::ALL.iter().any(|kind| self.is_busy(*kind))
    }

    pub(crate) fn set(&self, kind: ActionKind) {
        self.flags[kind.index()].store(true, Ordering::Release);
    }

    pub(crate) fn clear(&self, kind: ActionKind) {
        self.flags[kind.index()].store(false, Ordering::Release);
    }
}
