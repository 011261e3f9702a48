//! Transient player-facing messages. Purely observational.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::schedule::duration_ms;

/// Undrained notifications kept for hosts that never call `drain`.
pub const OUTBOX_LIMIT: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    InsufficientFunds,
    OutOfStock,
    CaptureSuccess,
    CaptureFailure,
    Victory,
    Defeat,
    Purchase,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub posted_at_ms: u64,
    pub expires_at_ms: u64,
}

#[derive(Debug)]
pub struct Notifier {
    display_ms: u64,
    current: Option<Notification>,
    outbox: Vec<Notification>,
}

impl Notifier {
    pub fn new(display: Duration) -> Self {
        Self {
            display_ms: duration_ms(display),
            current: None,
            outbox: Vec::new(),
        }
    }

    /// Replaces whatever is on display.
    pub fn post(&mut self, kind: NotificationKind, message: impl Into<String>, now_ms: u64) {
        let notification = Notification {
            kind,
            message: message.into(),
            posted_at_ms: now_ms,
            expires_at_ms: now_ms.saturating_add(self.display_ms),
        };
        if self.outbox.len() == OUTBOX_LIMIT {
            self.outbox.remove(0);
        }
        self.outbox.push(notification.clone());
        self.current = Some(notification);
    }

    pub fn current(&self, now_ms: u64) -> Option<&Notification> {
        self.current
            .as_ref()
            .filter(|notification| notification.expires_at_ms > now_ms)
    }

    pub fn expire(&mut self, now_ms: u64) {
        if self.current(now_ms).is_none() {
            self.current = None;
        }
    }

    /// Everything posted since the last drain, oldest first, up to
    /// [`OUTBOX_LIMIT`] entries.
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.outbox)
    }
}
