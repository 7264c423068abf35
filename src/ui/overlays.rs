//! Overlay state drawn on top of the table: the modal popup hosting the form,
//! the confirm dialog guarding destructive actions, and the toast
//! notification. Each one is `Some(payload)` while open and `None` when
//! closed, so closing always drops whatever the overlay was carrying.

use std::time::{Duration, Instant};

use ratatui::style::{Color, Style};

/// How long a notification stays up before it closes on its own.
pub const NOTIFICATION_TIMEOUT: Duration = Duration::from_millis(3000);

/// Modal surface with a title and arbitrary content.
#[derive(Debug)]
pub struct Popup<T> {
    open: Option<(String, T)>,
}

impl<T> Default for Popup<T> {
    fn default() -> Self {
        Self { open: None }
    }
}

impl<T> Popup<T> {
    pub fn open(&mut self, title: impl Into<String>, content: T) {
        self.open = Some((title.into(), content));
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn title(&self) -> Option<&str> {
        self.open.as_ref().map(|(title, _)| title.as_str())
    }

    pub fn content(&self) -> Option<&T> {
        self.open.as_ref().map(|(_, content)| content)
    }

    pub fn content_mut(&mut self) -> Option<&mut T> {
        self.open.as_mut().map(|(_, content)| content)
    }

    /// Close the popup, handing back its content.
    pub fn close(&mut self) -> Option<T> {
        self.open.take().map(|(_, content)| content)
    }
}

/// Payload of an open confirm dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmRequest<A> {
    pub title: String,
    pub subtitle: String,
    pub action: A,
}

/// Yes/no prompt carrying the action to run on confirmation.
#[derive(Debug)]
pub struct ConfirmDialog<A> {
    pending: Option<ConfirmRequest<A>>,
}

impl<A> Default for ConfirmDialog<A> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<A> ConfirmDialog<A> {
    pub fn open(&mut self, title: impl Into<String>, subtitle: impl Into<String>, action: A) {
        self.pending = Some(ConfirmRequest {
            title: title.into(),
            subtitle: subtitle.into(),
            action,
        });
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    pub fn request(&self) -> Option<&ConfirmRequest<A>> {
        self.pending.as_ref()
    }

    /// Close the dialog and return its action. A second call returns `None`,
    /// so the action runs at most once per opening.
    pub fn confirm(&mut self) -> Option<A> {
        self.pending.take().map(|request| request.action)
    }

    /// Close the dialog, dropping its action.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Info,
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Info => "info",
            Severity::Warning => "warning",
        }
    }

    pub(crate) fn style(&self) -> Style {
        match self {
            Severity::Success => Style::default().fg(Color::Green),
            Severity::Error => Style::default().fg(Color::Red),
            Severity::Info => Style::default().fg(Color::Cyan),
            Severity::Warning => Style::default().fg(Color::Yellow),
        }
    }
}

/// A visible toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub severity: Severity,
    pub opened_at: Instant,
}

/// Transient status message that closes itself after
/// [`NOTIFICATION_TIMEOUT`] or when dismissed.
#[derive(Debug, Default)]
pub struct Notification {
    current: Option<Toast>,
}

impl Notification {
    pub fn show(&mut self, message: impl Into<String>, severity: Severity) {
        self.show_at(message, severity, Instant::now());
    }

    /// Show a toast as if it opened at `now`. A new toast replaces the old one
    /// and restarts the timer.
    pub fn show_at(&mut self, message: impl Into<String>, severity: Severity, now: Instant) {
        self.current = Some(Toast {
            message: message.into(),
            severity,
            opened_at: now,
        });
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }

    /// Close the toast if it has been up for the full timeout. Returns `true`
    /// when this call closed it.
    pub fn tick(&mut self, now: Instant) -> bool {
        let expired = self.current.as_ref().is_some_and(|toast| {
            now.saturating_duration_since(toast.opened_at) >= NOTIFICATION_TIMEOUT
        });
        if expired {
            self.current = None;
        }
        expired
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }
}
