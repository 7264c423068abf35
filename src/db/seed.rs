use anyhow::{Context, Result};
use log::info;
use rusqlite::Connection;

use super::employees::insert_employee;
use crate::models::{Department, EmployeeDraft};

/// Demo roster loaded at startup so the table has something to page through.
const SEED_ROSTER: &[(&str, &str, &str, Department)] = &[
    ("Ann Lee", "ann.lee@example.com", "5550101001", Department::Development),
    ("Bo Jansen", "bo.jansen@example.com", "5550101002", Department::Marketing),
    ("Carmen Diaz", "carmen.diaz@example.com", "5550101003", Department::Accounting),
    ("Dev Patel", "dev.patel@example.com", "5550101004", Department::Hr),
    ("Elif Kaya", "elif.kaya@example.com", "5550101005", Department::Development),
    ("Farah Haddad", "farah.haddad@example.com", "5550101006", Department::Marketing),
    ("Gus Moreau", "gus.moreau@example.com", "5550101007", Department::Development),
    ("Hana Sato", "hana.sato@example.com", "5550101008", Department::Accounting),
];

/// Insert the demo roster. Returns the number of rows written.
pub fn seed_employees(conn: &Connection) -> Result<usize> {
    for (full_name, email, mobile, department) in SEED_ROSTER {
        let draft = EmployeeDraft {
            full_name: full_name.to_string(),
            email: email.to_string(),
            mobile: mobile.to_string(),
            department: *department,
        };
        insert_employee(conn, &draft).context("failed to seed employee roster")?;
    }
    info!("seeded {} employees", SEED_ROSTER.len());
    Ok(SEED_ROSTER.len())
}
