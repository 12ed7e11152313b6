//! Ephemeral "copied" notices, keyed by record id.
//!
//! A notice lives for exactly two seconds after it is posted and then
//! clears itself; clearing a notice that has already expired, or that
//! belongs to a record deleted in the meantime, is a guarded no-op.
//! The copy command also uses the notice window to keep the process
//! alive long enough for X11 clipboard contents to be pasted.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// How long a notice stays visible.
pub const NOTICE_TTL: Duration = Duration::from_secs(2);

struct Notice {
    message: String,
    posted: Instant,
}

/// In-memory board of transient per-record notices.
#[derive(Default)]
pub struct NoticeBoard {
    notices: HashMap<i64, Notice>,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Post (or replace) the notice for a record.
    pub fn post(&mut self, record_id: i64, message: impl Into<String>) {
        self.notices.insert(
            record_id,
            Notice {
                message: message.into(),
                posted: Instant::now(),
            },
        );
    }

    /// The active notice for a record, if it has not expired.
    pub fn active(&self, record_id: i64) -> Option<&str> {
        self.active_at(record_id, Instant::now())
    }

    /// Like [`NoticeBoard::active`] with an explicit clock, for tests.
    pub fn active_at(&self, record_id: i64, now: Instant) -> Option<&str> {
        self.notices
            .get(&record_id)
            .filter(|n| now.duration_since(n.posted) < NOTICE_TTL)
            .map(|n| n.message.as_str())
    }

    /// Drop the notice for a record. Missing or expired entries are
    /// fine — deleting a record before its notice fires must not error.
    pub fn clear(&mut self, record_id: i64) {
        self.notices.remove(&record_id);
    }

    /// Remove every expired notice.
    pub fn sweep(&mut self) {
        let now = Instant::now();
        self.notices
            .retain(|_, n| now.duration_since(n.posted) < NOTICE_TTL);
    }
}
