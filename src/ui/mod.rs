//! Ratatui front-end: the employee screen, its overlays, and the terminal
//! event loop.

mod app;
mod forms;
mod helpers;
mod overlays;
mod terminal;

pub use app::{App, ConfirmAction};
pub use forms::{EmployeeField, EmployeeForm, FieldErrors, Submission, ValidationError};
pub use overlays::{
    ConfirmDialog, ConfirmRequest, Notification, Popup, Severity, Toast, NOTIFICATION_TIMEOUT,
};
pub use terminal::run_app;
