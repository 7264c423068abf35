use super::Column;
use crate::models::Employee;

/// How a filter value is matched against a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Contains,
    StartsWith,
    Equals,
}

/// A single selection rule over the record set. Matching is
/// case-insensitive; only an empty value matches everything. Whitespace is
/// matched like any other character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub field: Column,
    pub op: FilterOp,
    pub value: String,
}

impl Filter {
    pub fn contains(field: Column, value: impl Into<String>) -> Self {
        Self {
            field,
            op: FilterOp::Contains,
            value: value.into(),
        }
    }

    /// The screen's search box: substring match on the full name.
    pub fn name_search(query: impl Into<String>) -> Self {
        Self::contains(Column::FullName, query)
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn matches(&self, employee: &Employee) -> bool {
        if self.is_empty() {
            return true;
        }
        let needle = self.value.to_lowercase();
        let haystack = self.field.value(employee).to_lowercase();
        match self.op {
            FilterOp::Contains => haystack.contains(&needle),
            FilterOp::StartsWith => haystack.starts_with(&needle),
            FilterOp::Equals => haystack == needle,
        }
    }

    /// Records that pass the filter, in their original order.
    pub fn apply<'a>(&self, records: &'a [Employee]) -> Vec<&'a Employee> {
        records.iter().filter(|e| self.matches(e)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Department;

    fn employee(id: i64, name: &str, department: Department) -> Employee {
        Employee {
            id,
            full_name: name.to_string(),
            email: String::new(),
            mobile: String::new(),
            department,
        }
    }

    #[test]
    fn substring_on_name_is_case_insensitive() {
        let records = vec![
            employee(1, "Ann", Department::Hr),
            employee(2, "Bo", Department::Hr),
        ];
        let hits = Filter::name_search("an").apply(&records);
        assert_eq!(hits.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1]);

        let hits = Filter::name_search("AN").apply(&records);
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn empty_value_keeps_everything_in_order() {
        let records = vec![
            employee(3, "Cy", Department::Hr),
            employee(1, "Ann", Department::Hr),
        ];
        let hits = Filter::name_search("").apply(&records);
        assert_eq!(hits.iter().map(|e| e.id).collect::<Vec<_>>(), vec![3, 1]);
    }

    #[test]
    fn space_is_matched_literally() {
        let records = vec![
            employee(1, "Ann Lee", Department::Hr),
            employee(2, "Bo", Department::Hr),
        ];
        let filter = Filter::name_search(" ");
        assert!(!filter.is_empty());
        let hits = filter.apply(&records);
        assert_eq!(hits.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn other_operators() {
        let ann = employee(1, "Ann Lee", Department::Marketing);
        let starts = Filter {
            field: Column::FullName,
            op: FilterOp::StartsWith,
            value: "lee".into(),
        };
        assert!(!starts.matches(&ann));

        let equals = Filter {
            field: Column::Department,
            op: FilterOp::Equals,
            value: "marketing".into(),
        };
        assert!(equals.matches(&ann));
    }
}
