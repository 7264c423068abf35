//! Domain models shared by the record store, the table engine, and the TUI.
//! They stay plain data holders so the other layers can focus on persistence
//! and presentation.

use std::fmt;
use std::str::FromStr;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use thiserror::Error;

/// Departments an employee can belong to. The set is fixed; the form cycles
/// through it instead of accepting free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Department {
    Development,
    Marketing,
    Accounting,
    Hr,
}

impl Department {
    /// Every department in display order.
    pub const ALL: [Department; 4] = [
        Department::Development,
        Department::Marketing,
        Department::Accounting,
        Department::Hr,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Development => "Development",
            Department::Marketing => "Marketing",
            Department::Accounting => "Accounting",
            Department::Hr => "HR",
        }
    }

    /// Next department in [`Department::ALL`], wrapping around.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|d| *d == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous department in [`Department::ALL`], wrapping around.
    pub fn previous(self) -> Self {
        let idx = Self::ALL.iter().position(|d| *d == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown department '{0}'")]
pub struct UnknownDepartment(pub String);

impl FromStr for Department {
    type Err = UnknownDepartment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Department::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownDepartment(s.to_string()))
    }
}

impl ToSql for Department {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Department {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|err| FromSqlError::Other(Box::new(err)))
    }
}

/// Identity of a record being edited. Stored records are always `Existing`;
/// only a form buffer for a brand new employee carries `New`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordIdentity {
    New,
    Existing(i64),
}

impl RecordIdentity {
    pub fn id(&self) -> Option<i64> {
        match self {
            RecordIdentity::New => None,
            RecordIdentity::Existing(id) => Some(*id),
        }
    }
}

/// A stored employee row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    /// Primary key assigned by the store. Never zero.
    pub id: i64,
    /// Display name, required.
    pub full_name: String,
    /// Contact address; also the target of the row's `mailto:` link.
    pub email: String,
    /// Phone number as typed, formatting characters included.
    pub mobile: String,
    pub department: Department,
}

impl Employee {
    /// `mailto:` target used when the user opens a row.
    pub fn mailto(&self) -> String {
        format!("mailto:{}", self.email.trim())
    }
}

/// Validated field values without an identity. The store turns a draft into
/// an [`Employee`] on insert, or overwrites an existing row with it on update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeDraft {
    pub full_name: String,
    pub email: String,
    /// At least ten digits once validated.
    pub mobile: String,
    pub department: Department,
}

impl From<&Employee> for EmployeeDraft {
    fn from(employee: &Employee) -> Self {
        Self {
            full_name: employee.full_name.clone(),
            email: employee.email.clone(),
            mobile: employee.mobile.clone(),
            department: employee.department,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn department_parses_case_insensitively() {
        assert_eq!("hr".parse::<Department>(), Ok(Department::Hr));
        assert_eq!(" Marketing ".parse::<Department>(), Ok(Department::Marketing));
        assert!("Legal".parse::<Department>().is_err());
    }

    #[test]
    fn department_cycle_wraps() {
        assert_eq!(Department::Hr.next(), Department::Development);
        assert_eq!(Department::Development.previous(), Department::Hr);
    }

    #[test]
    fn identity_exposes_id_only_when_existing() {
        assert_eq!(RecordIdentity::New.id(), None);
        assert_eq!(RecordIdentity::Existing(7).id(), Some(7));
    }
}
