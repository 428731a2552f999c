//! Toast notifications for transient user feedback.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::config::DEFAULT_TOAST_DURATION_MS;

/// Toast notification kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    #[default]
    Info,
}

impl ToastKind {
    /// Returns the icon for this kind.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Success => "✓",
            Self::Error => "✗",
            Self::Info => "ℹ",
        }
    }
}

/// A toast waiting to be queued; the manager assigns its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewToast {
    pub kind: ToastKind,
    pub title: String,
    pub description: Option<String>,
}

impl NewToast {
    /// Creates a toast of the given kind.
    pub fn new(kind: ToastKind, title: impl Into<String>) -> Self {
        Self { kind, title: title.into(), description: None }
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self::new(ToastKind::Success, title)
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::new(ToastKind::Error, title)
    }

    pub fn info(title: impl Into<String>) -> Self {
        Self::new(ToastKind::Info, title)
    }

    /// Adds a description below the title.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A queued toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToastMessage {
    /// Unique id assigned on queueing.
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: ToastKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug)]
struct Entry {
    message: ToastMessage,
    created_at: Instant,
}

/// Ordered queue of toasts, shared between whoever raises them and whoever
/// shows them.
#[derive(Debug)]
pub struct ToastManager {
    /// Display time before a toast expires
    duration: Duration,
    /// Active toasts, oldest first
    toasts: Mutex<Vec<Entry>>,
}

impl Default for ToastManager {
    fn default() -> Self {
        Self::with_duration(Duration::from_millis(DEFAULT_TOAST_DURATION_MS))
    }
}

impl ToastManager {
    /// Creates a manager with the default display duration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a manager with a custom display duration.
    pub fn with_duration(duration: Duration) -> Self {
        Self { duration, toasts: Mutex::new(Vec::new()) }
    }

    /// Returns the display duration.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    fn entries(&self) -> MutexGuard<'_, Vec<Entry>> {
        self.toasts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queues a toast and returns its id.
    pub fn add_toast(&self, toast: NewToast) -> Uuid {
        self.add_toast_at(toast, Instant::now())
    }

    fn add_toast_at(&self, toast: NewToast, created_at: Instant) -> Uuid {
        let id = Uuid::new_v4();
        debug!(%id, kind = ?toast.kind, title = %toast.title, "Queued toast");

        let message = ToastMessage { id, kind: toast.kind, title: toast.title, description: toast.description };
        self.entries().push(Entry { message, created_at });
        id
    }

    /// Removes a toast. Unknown ids are ignored.
    pub fn remove_toast(&self, id: Uuid) {
        self.entries().retain(|entry| entry.message.id != id);
    }

    /// Returns the active toasts in insertion order.
    pub fn messages(&self) -> Vec<ToastMessage> {
        self.entries().iter().map(|entry| entry.message.clone()).collect()
    }

    /// Removes toasts whose display time has elapsed at `now` and returns them.
    pub fn expire_due(&self, now: Instant) -> Vec<ToastMessage> {
        let mut entries = self.entries();
        let (expired, active): (Vec<_>, Vec<_>) = entries
            .drain(..)
            .partition(|entry| now.saturating_duration_since(entry.created_at) >= self.duration);
        *entries = active;
        expired.into_iter().map(|entry| entry.message).collect()
    }

    /// Removes and returns every active toast.
    pub fn drain(&self) -> Vec<ToastMessage> {
        self.entries().drain(..).map(|entry| entry.message).collect()
    }

    /// Returns `true` if any active toast is an error.
    pub fn has_errors(&self) -> bool {
        self.entries().iter().any(|entry| entry.message.kind == ToastKind::Error)
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}
