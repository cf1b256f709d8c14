//! User-visible notifications.
//!
//! The gateway reports outcomes (and every failure it absorbs) as
//! [`Notice`]s on an unbounded channel. The front end drains the receiver
//! and shows each notice once. Every notice is also logged.

use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

/// A transient, user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// Sending half of the notification channel.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: mpsc::UnboundedSender<Notice>,
}

/// Receiving half of the notification channel.
#[derive(Debug)]
pub struct NoticeReceiver {
    rx: mpsc::UnboundedReceiver<Notice>,
}

impl Notifier {
    /// Create a connected notifier/receiver pair.
    pub fn channel() -> (Notifier, NoticeReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Notifier { tx }, NoticeReceiver { rx })
    }

    pub fn success(&self, message: impl Into<String>) {
        self.send(NoticeKind::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.send(NoticeKind::Error, message.into());
    }

    pub fn info(&self, message: impl Into<String>) {
        self.send(NoticeKind::Info, message.into());
    }

    fn send(&self, kind: NoticeKind, message: String) {
        match kind {
            NoticeKind::Error => warn!(notice = %message),
            NoticeKind::Success | NoticeKind::Info => debug!(notice = %message),
        }
        // A closed receiver means nobody is displaying notices any more; the
        // log line above still records it.
        let _ = self.tx.send(Notice { kind, message });
    }
}

impl NoticeReceiver {
    /// Take every notice queued so far without waiting.
    pub fn drain(&mut self) -> Vec<Notice> {
        let mut notices = Vec::new();
        while let Ok(notice) = self.rx.try_recv() {
            notices.push(notice);
        }
        notices
    }

    /// Wait for the next notice. Returns `None` once every notifier is gone.
    pub async fn recv(&mut self) -> Option<Notice> {
        self.rx.recv().await
    }
}
