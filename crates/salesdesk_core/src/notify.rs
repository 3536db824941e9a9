//! Fire-and-forget user notices.
//!
//! # Invariants
//! - Notifiers never fail and return nothing to the caller.
//! - `LogNotifier` logs titles only; descriptions may contain user names.

use log::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Failure,
}

/// A toast-style message for the view layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn failure(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Failure,
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Sink for user-visible notices.
pub trait Notifier {
    fn notify(&self, notice: &Notice);
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify(&self, notice: &Notice) {
        (**self).notify(notice);
    }
}

/// Default notifier when no view layer is attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: &Notice) {
        match notice.kind {
            NoticeKind::Success => info!(
                "event=notice module=notify status=ok title={:?}",
                notice.title
            ),
            NoticeKind::Failure => warn!(
                "event=notice module=notify status=error title={:?}",
                notice.title
            ),
        }
    }
}
