//! Short-lived user-visible messages

use serde::Serialize;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

const MAX_NOTICES: usize = 32;

/// Notice category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Info,
    Warning,
    Shock,
}

/// A message shown for a limited time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub expires_at: Instant,
}

/// Holds notices until they expire
#[derive(Debug, Clone)]
pub struct NoticeBoard {
    ttl: Duration,
    notices: VecDeque<Notice>,
}

impl NoticeBoard {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            notices: VecDeque::new(),
        }
    }

    /// Post a notice visible until `now + ttl`
    pub fn post(&mut self, kind: NoticeKind, message: impl Into<String>, now: Instant) {
        self.prune(now);
        if self.notices.len() == MAX_NOTICES {
            self.notices.pop_front();
        }
        self.notices.push_back(Notice {
            kind,
            message: message.into(),
            expires_at: now + self.ttl,
        });
    }

    /// Notices still visible at `now`, oldest first
    pub fn visible(&self, now: Instant) -> impl Iterator<Item = &Notice> {
        self.notices.iter().filter(move |n| now < n.expires_at)
    }

    /// Drop expired notices
    pub fn prune(&mut self, now: Instant) {
        self.notices.retain(|n| now < n.expires_at);
    }

    pub fn clear(&mut self) {
        self.notices.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notices_expire_after_ttl() {
        let mut board = NoticeBoard::new(Duration::from_secs(3));
        let now = Instant::now();
        board.post(NoticeKind::Info, "Bought 1 share", now);

        assert_eq!(board.visible(now + Duration::from_millis(2999)).count(), 1);
        assert_eq!(board.visible(now + Duration::from_secs(3)).count(), 0);

        board.prune(now + Duration::from_secs(5));
        assert_eq!(board.visible(now).count(), 0);
    }

    #[test]
    fn test_board_is_bounded() {
        let mut board = NoticeBoard::new(Duration::from_secs(3));
        let now = Instant::now();
        for i in 0..(MAX_NOTICES + 5) {
            board.post(NoticeKind::Warning, format!("notice {i}"), now);
        }
        let visible: Vec<_> = board.visible(now).collect();
        assert_eq!(visible.len(), MAX_NOTICES);
        assert_eq!(visible[0].message, "notice 5");
    }
}
