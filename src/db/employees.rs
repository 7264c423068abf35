use anyhow::{Context, Result};
use log::{debug, warn};
use rusqlite::{params, Connection, OptionalExtension};

use crate::models::{Employee, EmployeeDraft};

/// Retrieve every employee in insertion order. Display ordering is the table
/// engine's job, so the query stays on the primary key.
pub fn fetch_employees(conn: &Connection) -> Result<Vec<Employee>> {
    let mut stmt = conn
        .prepare("SELECT id, full_name, email, mobile, department FROM employees ORDER BY id")
        .context("failed to prepare employee query")?;

    let employees = stmt
        .query_map([], |row| {
            Ok(Employee {
                id: row.get(0)?,
                full_name: row.get(1)?,
                email: row.get(2)?,
                mobile: row.get(3)?,
                department: row.get(4)?,
            })
        })
        .context("failed to load employees")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect employees")?;

    Ok(employees)
}

/// Look up a single employee by id.
pub fn fetch_employee(conn: &Connection, id: i64) -> Result<Option<Employee>> {
    conn.query_row(
        "SELECT id, full_name, email, mobile, department FROM employees WHERE id = ?1",
        params![id],
        |row| {
            Ok(Employee {
                id: row.get(0)?,
                full_name: row.get(1)?,
                email: row.get(2)?,
                mobile: row.get(3)?,
                department: row.get(4)?,
            })
        },
    )
    .optional()
    .context("failed to load employee")
}

/// Insert a new employee and return the stored row. Ids are assigned as one
/// past the current maximum, starting at 1 for an empty store, so an id is
/// never reused while the record holding it still exists.
pub fn insert_employee(conn: &Connection, draft: &EmployeeDraft) -> Result<Employee> {
    let id: i64 = conn
        .query_row("SELECT COALESCE(MAX(id), 0) + 1 FROM employees", [], |row| {
            row.get(0)
        })
        .context("failed to compute next employee id")?;

    conn.execute(
        "INSERT INTO employees (id, full_name, email, mobile, department)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![id, draft.full_name, draft.email, draft.mobile, draft.department],
    )
    .context("failed to insert employee")?;

    debug!("inserted employee {id}");
    Ok(Employee {
        id,
        full_name: draft.full_name.clone(),
        email: draft.email.clone(),
        mobile: draft.mobile.clone(),
        department: draft.department,
    })
}

/// Overwrite the employee with `id`. Returns `false` without touching the
/// store when no row matches; a record deleted while its edit form was open
/// is simply dropped.
pub fn update_employee(conn: &Connection, id: i64, draft: &EmployeeDraft) -> Result<bool> {
    let updated = conn
        .execute(
            "UPDATE employees
             SET full_name = ?1, email = ?2, mobile = ?3, department = ?4
             WHERE id = ?5",
            params![draft.full_name, draft.email, draft.mobile, draft.department, id],
        )
        .context("failed to update employee")?;

    if updated == 0 {
        warn!("update ignored: employee {id} not found");
        Ok(false)
    } else {
        debug!("updated employee {id}");
        Ok(true)
    }
}

/// Remove the employee with `id`. Deleting an unknown id is a no-op that
/// returns `false`.
pub fn delete_employee(conn: &Connection, id: i64) -> Result<bool> {
    let deleted = conn
        .execute("DELETE FROM employees WHERE id = ?1", params![id])
        .context("failed to delete employee")?;

    if deleted == 0 {
        warn!("delete ignored: employee {id} not found");
        Ok(false)
    } else {
        debug!("deleted employee {id}");
        Ok(true)
    }
}
