//! Core library surface for the employee records TUI.
//!
//! The binary only parses options, sets up logging, and hands a store to the
//! screen; everything else lives behind these modules so tests can drive it
//! without a terminal.
pub mod cli;
pub mod db;
pub mod logging;
pub mod models;
pub mod paths;
pub mod table;
pub mod ui;

/// Session store operations.
pub use db::{
    delete_employee, fetch_employees, insert_employee, open_session_store, seed_employees,
    update_employee,
};

pub use models::{Department, Employee, EmployeeDraft, RecordIdentity};

pub use table::{compute_view, Column, Filter, Sort, SortDirection, TableState, View};

/// The interactive screen and its event loop.
pub use ui::{run_app, App};
