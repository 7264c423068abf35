//! Session record store split across logical submodules.

mod connection;
mod employees;
mod seed;

pub use connection::open_session_store;
pub use employees::{
    delete_employee, fetch_employee, fetch_employees, insert_employee, update_employee,
};
pub use seed::seed_employees;
