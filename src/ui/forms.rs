use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use regex::Regex;
use thiserror::Error;

use crate::models::{Department, Employee, EmployeeDraft, RecordIdentity};

/// Minimum number of digits a mobile number must carry.
const MIN_MOBILE_DIGITS: usize = 10;

/// Something, an `@`, something, a dot, something. No whitespace anywhere.
static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// Why a single field failed validation. The messages are shown inline next
/// to the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("This field is required.")]
    Required,
    #[error("Email is not valid.")]
    InvalidEmail,
    #[error("Minimum 10 numbers required.")]
    MobileTooShort,
}

/// Fields of the employee form in focus order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum EmployeeField {
    #[default]
    FullName,
    Email,
    Mobile,
    Department,
}

impl EmployeeField {
    pub const ALL: [EmployeeField; 4] = [
        EmployeeField::FullName,
        EmployeeField::Email,
        EmployeeField::Mobile,
        EmployeeField::Department,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EmployeeField::FullName => "Full Name",
            EmployeeField::Email => "Email",
            EmployeeField::Mobile => "Mobile",
            EmployeeField::Department => "Department",
        }
    }

    fn next(self) -> Self {
        match self {
            EmployeeField::FullName => EmployeeField::Email,
            EmployeeField::Email => EmployeeField::Mobile,
            EmployeeField::Mobile => EmployeeField::Department,
            EmployeeField::Department => EmployeeField::FullName,
        }
    }

    fn previous(self) -> Self {
        match self {
            EmployeeField::FullName => EmployeeField::Department,
            EmployeeField::Email => EmployeeField::FullName,
            EmployeeField::Mobile => EmployeeField::Email,
            EmployeeField::Department => EmployeeField::Mobile,
        }
    }
}

/// Per-field validation failures. Empty means the buffer is valid.
pub type FieldErrors = BTreeMap<EmployeeField, ValidationError>;

/// What a successful submit hands back to the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub identity: RecordIdentity,
    pub draft: EmployeeDraft,
}

/// Editable buffer for one employee. Created blank for a new record or
/// pre-filled from an existing one; edits never touch the store until the
/// screen receives a [`Submission`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeForm {
    identity: RecordIdentity,
    pub(crate) full_name: String,
    pub(crate) email: String,
    pub(crate) mobile: String,
    pub(crate) department: Option<Department>,
    pub(crate) active: EmployeeField,
    pub(crate) errors: FieldErrors,
}

impl EmployeeForm {
    /// Blank form for a new employee.
    pub fn create() -> Self {
        Self {
            identity: RecordIdentity::New,
            full_name: String::new(),
            email: String::new(),
            mobile: String::new(),
            department: None,
            active: EmployeeField::FullName,
            errors: FieldErrors::new(),
        }
    }

    /// Form pre-populated from a stored employee, keeping its id.
    pub fn edit(employee: &Employee) -> Self {
        Self {
            identity: RecordIdentity::Existing(employee.id),
            full_name: employee.full_name.clone(),
            email: employee.email.clone(),
            mobile: employee.mobile.clone(),
            department: Some(employee.department),
            active: EmployeeField::FullName,
            errors: FieldErrors::new(),
        }
    }

    pub fn identity(&self) -> RecordIdentity {
        self.identity
    }

    pub fn is_create(&self) -> bool {
        self.identity == RecordIdentity::New
    }

    /// Popup title for this form.
    pub fn title(&self) -> &'static str {
        if self.is_create() {
            "New Employee"
        } else {
            "Edit Employee"
        }
    }

    pub fn active(&self) -> EmployeeField {
        self.active
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, field: EmployeeField) -> Option<ValidationError> {
        self.errors.get(&field).copied()
    }

    pub fn focus(&mut self, field: EmployeeField) {
        self.active = field;
    }

    pub fn focus_next(&mut self) {
        self.active = self.active.next();
    }

    pub fn focus_previous(&mut self) {
        self.active = self.active.previous();
    }

    /// Append a character to the active text field. The department field
    /// only reacts to cycling, so characters are rejected there.
    pub fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        let accepted = match self.active {
            EmployeeField::FullName => {
                self.full_name.push(ch);
                true
            }
            EmployeeField::Email => {
                self.email.push(ch);
                true
            }
            EmployeeField::Mobile => {
                if ch.is_ascii_digit() || matches!(ch, ' ' | '-' | '+' | '(' | ')') {
                    self.mobile.push(ch);
                    true
                } else {
                    false
                }
            }
            EmployeeField::Department => false,
        };
        if accepted {
            self.errors.remove(&self.active);
        }
        accepted
    }

    /// Remove the last character from the active field.
    pub fn backspace(&mut self) {
        let changed = match self.active {
            EmployeeField::FullName => self.full_name.pop().is_some(),
            EmployeeField::Email => self.email.pop().is_some(),
            EmployeeField::Mobile => self.mobile.pop().is_some(),
            EmployeeField::Department => false,
        };
        if changed {
            self.errors.remove(&self.active);
        }
    }

    /// Step the department selection forward (or backward). An unset
    /// department starts at the first (or last) entry.
    pub fn cycle_department(&mut self, forward: bool) {
        self.department = Some(match (self.department, forward) {
            (Some(current), true) => current.next(),
            (Some(current), false) => current.previous(),
            (None, true) => Department::ALL[0],
            (None, false) => Department::ALL[Department::ALL.len() - 1],
        });
        self.errors.remove(&EmployeeField::Department);
    }

    /// Check every field and return the failures.
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        if self.full_name.trim().is_empty() {
            errors.insert(EmployeeField::FullName, ValidationError::Required);
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.insert(EmployeeField::Email, ValidationError::Required);
        } else if !EMAIL_PATTERN.is_match(email) {
            errors.insert(EmployeeField::Email, ValidationError::InvalidEmail);
        }

        let digits = self.mobile.chars().filter(|c| c.is_ascii_digit()).count();
        if digits < MIN_MOBILE_DIGITS {
            errors.insert(EmployeeField::Mobile, ValidationError::MobileTooShort);
        }

        if self.department.is_none() {
            errors.insert(EmployeeField::Department, ValidationError::Required);
        }

        errors
    }

    /// Validate the buffer. On success return the trimmed values with the
    /// form's identity; on failure record the per-field errors, move focus to
    /// the first bad field, and return `None`.
    pub fn submit(&mut self) -> Option<Submission> {
        let errors = self.validate();
        if let Some(first) = errors.keys().next() {
            self.active = *first;
            self.errors = errors;
            return None;
        }

        let department = self.department?;
        self.errors.clear();
        Some(Submission {
            identity: self.identity,
            draft: EmployeeDraft {
                full_name: self.full_name.trim().to_string(),
                email: self.email.trim().to_string(),
                mobile: self.mobile.trim().to_string(),
                department,
            },
        })
    }

    fn display_value(&self, field: EmployeeField) -> String {
        match field {
            EmployeeField::FullName => self.full_name.clone(),
            EmployeeField::Email => self.email.clone(),
            EmployeeField::Mobile => self.mobile.clone(),
            EmployeeField::Department => self
                .department
                .map(|d| format!("< {d} >"))
                .unwrap_or_default(),
        }
    }

    /// Render one field line, followed by its error when present.
    pub(crate) fn build_lines(&self, field: EmployeeField) -> Vec<Line<'static>> {
        let value = self.display_value(field);
        let is_active = self.active == field;

        let display = if value.is_empty() {
            match field {
                EmployeeField::Department => "<choose with ←/→>".to_string(),
                _ => "<required>".to_string(),
            }
        } else {
            value.clone()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        let mut lines = vec![Line::from(vec![
            Span::raw(format!("{}: ", field.label())),
            Span::styled(display, style),
        ])];

        if let Some(error) = self.error(field) {
            lines.push(Line::from(Span::styled(
                format!("  {error}"),
                Style::default().fg(Color::Red),
            )));
        }

        lines
    }

    /// Character count of the requested field, for cursor placement.
    pub(crate) fn value_len(&self, field: EmployeeField) -> usize {
        match field {
            EmployeeField::FullName => self.full_name.chars().count(),
            EmployeeField::Email => self.email.chars().count(),
            EmployeeField::Mobile => self.mobile.chars().count(),
            EmployeeField::Department => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn type_text(form: &mut EmployeeForm, text: &str) {
        for ch in text.chars() {
            form.push_char(ch);
        }
    }

    fn filled_create_form() -> EmployeeForm {
        let mut form = EmployeeForm::create();
        type_text(&mut form, "Ann Lee");
        form.focus(EmployeeField::Email);
        type_text(&mut form, "ann@example.com");
        form.focus(EmployeeField::Mobile);
        type_text(&mut form, "555 010 1001");
        form.cycle_department(true);
        form
    }

    #[test]
    fn create_starts_blank_with_new_identity() {
        let form = EmployeeForm::create();
        assert_eq!(form.identity(), RecordIdentity::New);
        assert!(form.full_name.is_empty());
        assert_eq!(form.department, None);
        assert_eq!(form.title(), "New Employee");
    }

    #[test]
    fn edit_preserves_identity_and_values() {
        let employee = Employee {
            id: 9,
            full_name: "Bo".into(),
            email: "bo@example.com".into(),
            mobile: "5550101002".into(),
            department: Department::Marketing,
        };
        let mut form = EmployeeForm::edit(&employee);
        assert_eq!(form.identity(), RecordIdentity::Existing(9));

        let submission = form.submit().unwrap();
        assert_eq!(submission.identity, RecordIdentity::Existing(9));
        assert_eq!(submission.draft, EmployeeDraft::from(&employee));
    }

    #[test]
    fn empty_full_name_is_rejected_with_inline_error() {
        let mut form = filled_create_form();
        form.focus(EmployeeField::FullName);
        for _ in 0.."Ann Lee".len() {
            form.backspace();
        }

        assert_eq!(form.submit(), None);
        assert_eq!(
            form.error(EmployeeField::FullName),
            Some(ValidationError::Required)
        );
        assert_eq!(form.errors().len(), 1);
        assert_eq!(
            ValidationError::Required.to_string(),
            "This field is required."
        );
    }

    #[test]
    fn malformed_email_is_rejected() {
        for bad in ["ann", "ann@", "ann@example", "a nn@example.com", "@example.com"] {
            let mut form = filled_create_form();
            form.email = bad.to_string();
            assert_eq!(form.submit(), None, "{bad} should be rejected");
            assert_eq!(
                form.error(EmployeeField::Email),
                Some(ValidationError::InvalidEmail)
            );
        }
    }

    #[test]
    fn short_mobile_and_missing_department_are_reported() {
        let mut form = EmployeeForm::create();
        type_text(&mut form, "Ann");
        form.focus(EmployeeField::Email);
        type_text(&mut form, "ann@example.com");
        form.focus(EmployeeField::Mobile);
        type_text(&mut form, "12345");

        assert_eq!(form.submit(), None);
        assert_eq!(
            form.error(EmployeeField::Mobile),
            Some(ValidationError::MobileTooShort)
        );
        assert_eq!(
            form.error(EmployeeField::Department),
            Some(ValidationError::Required)
        );
        assert_eq!(form.active(), EmployeeField::Mobile);
    }

    #[test]
    fn valid_submission_trims_values() {
        let mut form = filled_create_form();
        form.focus(EmployeeField::FullName);
        form.push_char(' ');

        let submission = form.submit().unwrap();
        assert_eq!(submission.identity, RecordIdentity::New);
        assert_eq!(submission.draft.full_name, "Ann Lee");
        assert_eq!(submission.draft.department, Department::Development);
        assert!(form.errors().is_empty());
    }

    #[test]
    fn editing_a_field_clears_its_error() {
        let mut form = EmployeeForm::create();
        form.submit();
        assert!(form.error(EmployeeField::FullName).is_some());

        form.focus(EmployeeField::FullName);
        form.push_char('A');
        assert_eq!(form.error(EmployeeField::FullName), None);
        assert!(form.error(EmployeeField::Email).is_some());
    }

    #[test]
    fn mobile_rejects_letters_and_department_rejects_typing() {
        let mut form = EmployeeForm::create();
        form.focus(EmployeeField::Mobile);
        assert!(!form.push_char('x'));
        assert!(form.push_char('5'));
        form.focus(EmployeeField::Department);
        assert!(!form.push_char('H'));
    }

    #[test]
    fn focus_cycles_through_all_fields() {
        let mut form = EmployeeForm::create();
        for expected in EmployeeField::ALL.iter().skip(1) {
            form.focus_next();
            assert_eq!(form.active(), *expected);
        }
        form.focus_next();
        assert_eq!(form.active(), EmployeeField::FullName);
        form.focus_previous();
        assert_eq!(form.active(), EmployeeField::Department);
    }

    #[test]
    fn department_cycles_backward_from_unset() {
        let mut form = EmployeeForm::create();
        form.cycle_department(false);
        assert_eq!(form.department, Some(Department::Hr));
    }
}
