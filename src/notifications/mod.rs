//! Transient user-facing notices.
//!
//! # Responsibilities
//! - Hold at most one notice at a time
//! - Clear a notice after its time-to-live, unless a newer one replaced it
//!
//! # Design Decisions
//! - Backed by a watch channel so any number of views can render the slot
//! - Each notice carries a sequence number; a timer only clears its own notice

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A message shown to the user for a limited time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub seq: u64,
    pub level: NoticeLevel,
    pub text: String,
}

/// Shared notice slot.
#[derive(Debug, Clone)]
pub struct Notifier {
    slot: Arc<watch::Sender<Option<Notice>>>,
    next_seq: Arc<AtomicU64>,
}

impl Notifier {
    pub fn new() -> Self {
        let (slot, _) = watch::channel(None);
        Self {
            slot: Arc::new(slot),
            next_seq: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Replace the current notice and schedule its removal.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn show(&self, level: NoticeLevel, text: impl Into<String>, ttl: Duration) -> u64 {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        let notice = Notice { seq, level, text: text.into() };

        match level {
            NoticeLevel::Success => tracing::info!(seq, text = %notice.text, "Notice"),
            NoticeLevel::Error => tracing::warn!(seq, text = %notice.text, "Notice"),
        }
        self.slot.send_replace(Some(notice));

        let slot = self.slot.clone();
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            slot.send_if_modified(|current| {
                if current.as_ref().is_some_and(|n| n.seq == seq) {
                    *current = None;
                    true
                } else {
                    false
                }
            });
        });

        seq
    }

    pub fn success(&self, text: impl Into<String>, ttl: Duration) -> u64 {
        self.show(NoticeLevel::Success, text, ttl)
    }

    pub fn error(&self, text: impl Into<String>, ttl: Duration) -> u64 {
        self.show(NoticeLevel::Error, text, ttl)
    }

    /// Notice currently on display.
    pub fn current(&self) -> Option<Notice> {
        self.slot.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Notice>> {
        self.slot.subscribe()
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_notice_clears_after_ttl() {
        let notifier = Notifier::new();
        notifier.success("Guardado", Duration::from_millis(3500));

        tokio::time::sleep(Duration::from_millis(3499)).await;
        assert_eq!(notifier.current().unwrap().text, "Guardado");

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(notifier.current().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_old_timer_does_not_clear_newer_notice() {
        let notifier = Notifier::new();
        notifier.error("first", Duration::from_secs(1));
        tokio::time::sleep(Duration::from_millis(500)).await;
        let second = notifier.success("second", Duration::from_secs(3));

        tokio::time::sleep(Duration::from_millis(600)).await;
        let current = notifier.current().unwrap();
        assert_eq!(current.seq, second);
        assert_eq!(current.level, NoticeLevel::Success);

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert!(notifier.current().is_none());
    }
}
