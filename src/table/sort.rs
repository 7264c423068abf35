use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::Column;
use crate::models::Employee;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Arrow shown next to the sorted column header.
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// Active sort: a column plus a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub column: Column,
    pub direction: SortDirection,
}

impl Sort {
    pub fn ascending(column: Column) -> Self {
        Self {
            column,
            direction: SortDirection::Ascending,
        }
    }

    /// Sort that results from the user selecting `column` while `current` is
    /// active. Picking the same column flips the direction; a different column
    /// starts over in ascending order.
    pub fn toggled(current: Option<Sort>, column: Column) -> Sort {
        match current {
            Some(sort) if sort.column == column => Sort {
                column,
                direction: sort.direction.flipped(),
            },
            _ => Sort::ascending(column),
        }
    }

    pub fn compare(&self, a: &Employee, b: &Employee) -> Ordering {
        let ordering = compare_column(self.column, a, b);
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Ascending comparison of two employees on one column.
pub fn compare_column(column: Column, a: &Employee, b: &Employee) -> Ordering {
    match column {
        Column::FullName => compare_text(&a.full_name, &b.full_name),
        Column::Email => compare_text(&a.email, &b.email),
        Column::Mobile => compare_phone(&a.mobile, &b.mobile),
        Column::Department => compare_text(a.department.as_str(), b.department.as_str()),
    }
}

/// Collation-style ordering: accents and case are ignored on the first pass,
/// so "Élodie" sits between "Adam" and "Zoe". Ties fall back to the lowercase
/// text and then the raw text, which keeps the order total.
fn compare_text(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

/// Decompose, drop combining marks, lowercase.
fn collation_key(value: &str) -> String {
    value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Phone numbers compare by their digits as a number when both sides carry
/// digits, so formatting characters and leading zeros do not matter.
fn compare_phone(a: &str, b: &str) -> Ordering {
    let da = significant_digits(a);
    let db = significant_digits(b);
    if da.is_empty() || db.is_empty() {
        return compare_text(a, b);
    }
    da.len()
        .cmp(&db.len())
        .then_with(|| da.cmp(&db))
        .then_with(|| compare_text(a, b))
}

fn significant_digits(value: &str) -> String {
    let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() && !digits.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
