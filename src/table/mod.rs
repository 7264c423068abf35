//! Table view engine: turns the full employee list into the filtered, sorted,
//! paginated slice the screen renders. Everything here is a pure function of
//! the records plus [`TableState`]; the state only remembers which column is
//! sorted, which page is showing, how many rows a page holds, and the active
//! filter.

mod filter;
mod sort;

pub use filter::{Filter, FilterOp};
pub use sort::{compare_column, Sort, SortDirection};

use crate::models::Employee;

/// Page sizes offered by the rows-per-page control.
pub const PAGE_SIZES: [usize; 3] = [5, 10, 25];

/// Sortable table columns in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    FullName,
    Email,
    Mobile,
    Department,
}

impl Column {
    pub const ALL: [Column; 4] = [
        Column::FullName,
        Column::Email,
        Column::Mobile,
        Column::Department,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Column::FullName => "Employee Name",
            Column::Email => "Email Address",
            Column::Mobile => "Mobile Number",
            Column::Department => "Department",
        }
    }

    pub fn value<'a>(&self, employee: &'a Employee) -> &'a str {
        match self {
            Column::FullName => &employee.full_name,
            Column::Email => &employee.email,
            Column::Mobile => &employee.mobile,
            Column::Department => employee.department.as_str(),
        }
    }

    /// Column bound to a number key (`1`-based, display order).
    pub fn from_shortcut(key: char) -> Option<Column> {
        let idx = key.to_digit(10)? as usize;
        idx.checked_sub(1).and_then(|i| Column::ALL.get(i).copied())
    }
}

/// One rendered page of the table.
#[derive(Debug, Clone, PartialEq)]
pub struct View<'a> {
    pub rows: Vec<&'a Employee>,
    /// Number of records that passed the filter, before slicing.
    pub total: usize,
    /// Page actually shown. May be lower than the requested page when the
    /// filtered set no longer reaches that far.
    pub page: usize,
    pub page_size: usize,
}

impl View<'_> {
    pub fn page_count(&self) -> usize {
        page_count(self.total, self.page_size)
    }

    /// "1-5 of 12" style label for the pagination footer.
    pub fn range_label(&self) -> String {
        if self.total == 0 {
            return "0 of 0".to_string();
        }
        let start = self.page * self.page_size + 1;
        let end = start + self.rows.len() - 1;
        format!("{start}-{end} of {}", self.total)
    }
}

/// Number of pages needed for `total` rows. An empty set still has one
/// (empty) page.
pub fn page_count(total: usize, page_size: usize) -> usize {
    let page_size = page_size.max(1);
    total.div_ceil(page_size).max(1)
}

/// Filter, sort, and slice `records`.
///
/// A `page` past the end of the filtered set is clamped to the last page that
/// still has rows, and the returned [`View::page`] says which page was used.
pub fn compute_view<'a>(
    records: &'a [Employee],
    filter: Option<&Filter>,
    sort: Option<Sort>,
    page: usize,
    page_size: usize,
) -> View<'a> {
    let page_size = page_size.max(1);

    let mut rows: Vec<&Employee> = match filter {
        Some(filter) => filter.apply(records),
        None => records.iter().collect(),
    };

    if let Some(sort) = sort {
        // `sort_by` is stable, so equal keys keep their filtered order.
        rows.sort_by(|a, b| sort.compare(a, b));
    }

    let total = rows.len();
    let page = page.min(page_count(total, page_size) - 1);
    let start = page * page_size;
    let end = (start + page_size).min(total);
    let rows: Vec<&Employee> = rows.drain(start..end).collect();

    View {
        rows,
        total,
        page,
        page_size,
    }
}

/// Sort, paging, and filter state owned by the screen.
#[derive(Debug, Clone, PartialEq)]
pub struct TableState {
    sort: Option<Sort>,
    page: usize,
    page_size: usize,
    filter: Option<Filter>,
}

impl Default for TableState {
    fn default() -> Self {
        Self::new(PAGE_SIZES[0])
    }
}

impl TableState {
    pub fn new(page_size: usize) -> Self {
        Self {
            sort: None,
            page: 0,
            page_size: page_size.max(1),
            filter: None,
        }
    }

    pub fn sort(&self) -> Option<Sort> {
        self.sort
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn filter(&self) -> Option<&Filter> {
        self.filter.as_ref()
    }

    /// Replace the active filter. The page goes back to the first one since
    /// the old page index refers to a different result set.
    pub fn set_filter(&mut self, filter: Option<Filter>) {
        self.filter = filter.filter(|f| !f.is_empty());
        self.page = 0;
    }

    /// Sort by `column`, flipping direction when it is already the sorted one.
    pub fn toggle_sort(&mut self, column: Column) -> Sort {
        let sort = Sort::toggled(self.sort, column);
        self.sort = Some(sort);
        sort
    }

    pub fn clear_sort(&mut self) {
        self.sort = None;
    }

    /// Advance one page if `total` filtered rows reach past the current one.
    pub fn next_page(&mut self, total: usize) -> bool {
        if self.page + 1 < page_count(total, self.page_size) {
            self.page += 1;
            true
        } else {
            false
        }
    }

    pub fn previous_page(&mut self) -> bool {
        if self.page > 0 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    /// Change the page size and go back to the first page.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 0;
    }

    /// Step through [`PAGE_SIZES`], wrapping around. Returns the new size.
    pub fn cycle_page_size(&mut self) -> usize {
        let next = PAGE_SIZES
            .iter()
            .copied()
            .find(|size| *size > self.page_size)
            .unwrap_or(PAGE_SIZES[0]);
        self.set_page_size(next);
        next
    }

    /// Compute the current view and remember the page it settled on, so a
    /// delete that empties the last page leaves the user on the new last page.
    pub fn view<'a>(&mut self, records: &'a [Employee]) -> View<'a> {
        let view = compute_view(
            records,
            self.filter.as_ref(),
            self.sort,
            self.page,
            self.page_size,
        );
        self.page = view.page;
        view
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::Department;

    fn employee(id: i64, name: &str) -> Employee {
        Employee {
            id,
            full_name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            mobile: format!("555000{id:04}"),
            department: Department::Development,
        }
    }

    fn roster(n: i64) -> Vec<Employee> {
        (1..=n).map(|id| employee(id, &format!("Person {id:02}"))).collect()
    }

    fn ids(view: &View<'_>) -> Vec<i64> {
        view.rows.iter().map(|e| e.id).collect()
    }

    #[test]
    fn page_length_is_page_size_except_on_last_page() {
        let records = roster(12);
        for page_size in [1usize, 5, 10, 25] {
            let pages = page_count(records.len(), page_size);
            for page in 0..pages {
                let view = compute_view(&records, None, None, page, page_size);
                let remaining = records.len() - page * page_size;
                assert_eq!(view.rows.len(), page_size.min(remaining));
                assert_eq!(view.total, 12);
                if page + 1 < pages {
                    assert_eq!(view.rows.len(), page_size);
                }
            }
        }
    }

    #[test]
    fn view_is_a_subset_of_the_filtered_set() {
        let mut records = roster(9);
        records.push(employee(10, "Anna"));
        records.push(employee(11, "Hannah"));
        let filter = Filter::name_search("an");

        let view = compute_view(&records, Some(&filter), None, 0, 5);
        assert_eq!(view.total, 2);
        assert_eq!(ids(&view), vec![10, 11]);
    }

    #[test]
    fn name_filter_scenario() {
        let records = vec![employee(1, "Ann"), employee(2, "Bo")];
        let filter = Filter::name_search("an");
        let view = compute_view(&records, Some(&filter), None, 0, 5);
        assert_eq!(ids(&view), vec![1]);
    }

    #[test]
    fn descending_reverses_and_stable_sort_round_trips() {
        let records = vec![
            employee(1, "Cy"),
            employee(2, "Ann"),
            employee(3, "Bo"),
            employee(4, "Ann"),
        ];

        let mut state = TableState::new(10);
        state.toggle_sort(Column::FullName);
        let ascending = ids(&state.view(&records));
        assert_eq!(ascending, vec![2, 4, 3, 1]);

        state.toggle_sort(Column::FullName);
        let descending = ids(&state.view(&records));
        assert_eq!(descending, vec![1, 3, 2, 4]);

        state.toggle_sort(Column::FullName);
        assert_eq!(ids(&state.view(&records)), ascending);
    }

    #[test]
    fn accented_names_sort_among_plain_ones() {
        let records = vec![employee(1, "Zoe"), employee(2, "Élodie"), employee(3, "Adam")];
        let view = compute_view(&records, None, Some(Sort::ascending(Column::FullName)), 0, 5);
        let names: Vec<&str> = view.rows.iter().map(|e| e.full_name.as_str()).collect();
        assert_eq!(names, vec!["Adam", "Élodie", "Zoe"]);
    }

    #[test]
    fn page_past_the_end_clamps_to_last_page() {
        let records = roster(7);
        let view = compute_view(&records, None, None, 4, 5);
        assert_eq!(view.page, 1);
        assert_eq!(ids(&view), vec![6, 7]);

        let view = compute_view(&[], None, None, 3, 5);
        assert_eq!(view.page, 0);
        assert!(view.rows.is_empty());
        assert_eq!(view.range_label(), "0 of 0");
    }

    #[test]
    fn delete_emptying_last_page_moves_state_back() {
        let mut records = roster(6);
        let mut state = TableState::new(5);
        assert!(state.next_page(records.len()));
        assert_eq!(ids(&state.view(&records)), vec![6]);

        records.pop();
        let view = state.view(&records);
        assert_eq!(view.page, 0);
        assert_eq!(state.page(), 0);
        assert_eq!(view.rows.len(), 5);
    }

    #[test]
    fn replacing_filter_resets_page() {
        let records = roster(12);
        let mut state = TableState::new(5);
        state.next_page(records.len());
        state.next_page(records.len());
        assert_eq!(state.page(), 2);

        state.set_filter(Some(Filter::name_search("person")));
        assert_eq!(state.page(), 0);

        state.next_page(records.len());
        state.set_filter(Some(Filter::name_search("")));
        assert_eq!(state.page(), 0);
        assert!(state.filter().is_none());
    }

    #[test]
    fn whitespace_query_stays_an_active_filter() {
        let records = vec![employee(1, "Ann Lee"), employee(2, "Bo")];
        let mut state = TableState::new(5);
        state.set_filter(Some(Filter::name_search(" ")));
        assert!(state.filter().is_some());
        assert_eq!(ids(&state.view(&records)), vec![1]);
    }

    #[test]
    fn paging_stops_at_bounds() {
        let mut state = TableState::new(5);
        assert!(!state.previous_page());
        assert!(state.next_page(6));
        assert!(!state.next_page(6));
        assert!(state.previous_page());
    }

    #[test]
    fn cycling_page_size_wraps_and_resets_page() {
        let mut state = TableState::new(5);
        state.next_page(20);
        assert_eq!(state.cycle_page_size(), 10);
        assert_eq!(state.page(), 0);
        assert_eq!(state.cycle_page_size(), 25);
        assert_eq!(state.cycle_page_size(), 5);
    }

    #[test]
    fn range_label_counts_from_one() {
        let records = roster(12);
        let view = compute_view(&records, None, None, 2, 5);
        assert_eq!(view.range_label(), "11-12 of 12");
        assert_eq!(view.page_count(), 3);
    }

    #[test]
    fn shortcut_keys_map_to_columns() {
        assert_eq!(Column::from_shortcut('1'), Some(Column::FullName));
        assert_eq!(Column::from_shortcut('4'), Some(Column::Department));
        assert_eq!(Column::from_shortcut('0'), None);
        assert_eq!(Column::from_shortcut('5'), None);
    }
}

#[cfg(test)]
mod property_tests {
    use std::cmp::Ordering;

    use proptest::prelude::*;

    use super::*;
    use crate::models::Department;

    /// Small alphabets so generated rosters carry duplicate names and the
    /// generated queries actually hit something.
    fn records() -> impl Strategy<Value = Vec<Employee>> {
        prop::collection::vec(("[abAB é]{0,4}", 0usize..4), 0..40).prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(index, (name, department))| Employee {
                    id: index as i64 + 1,
                    email: format!("{}@example.com", name.trim()),
                    full_name: name,
                    mobile: format!("555{index:07}"),
                    department: Department::ALL[department],
                })
                .collect()
        })
    }

    fn column() -> impl Strategy<Value = Column> {
        (0usize..4).prop_map(|index| Column::ALL[index])
    }

    proptest! {
        /// The page is drawn from the filtered set and holds
        /// `min(page_size, remaining)` rows.
        #[test]
        fn view_is_a_filtered_slice(
            records in records(),
            query in "[abé ]{0,2}",
            page in 0usize..12,
            page_size in 1usize..30,
        ) {
            let filter = Filter::name_search(query);
            let filtered: Vec<i64> = filter.apply(&records).iter().map(|e| e.id).collect();
            let view = compute_view(&records, Some(&filter), None, page, page_size);

            prop_assert_eq!(view.total, filtered.len());
            prop_assert!(view.rows.iter().all(|e| filtered.contains(&e.id)));
            let remaining = view.total.saturating_sub(view.page * page_size);
            prop_assert_eq!(view.rows.len(), page_size.min(remaining));
        }

        /// Whatever page is requested, the view lands on one that exists, and
        /// a page that already exists is left alone.
        #[test]
        fn page_clamp_lands_on_a_valid_page(
            records in records(),
            page in 0usize..50,
            page_size in 1usize..30,
        ) {
            let view = compute_view(&records, None, None, page, page_size);

            prop_assert!(view.page < view.page_count());
            if view.total > 0 {
                prop_assert!(view.page * page_size < view.total);
            }
            if page < page_count(records.len(), page_size) {
                prop_assert_eq!(view.page, page);
            }
        }

        /// Ascending, descending, ascending again gives the first order back,
        /// and rows with equal keys keep their input order in both directions.
        #[test]
        fn sort_round_trips_and_is_stable(records in records(), column in column()) {
            let page_size = records.len().max(1);
            let ascending = Sort::ascending(column);
            let descending = Sort::toggled(Some(ascending), column);
            let run = |sort: Sort| -> Vec<Employee> {
                compute_view(&records, None, Some(sort), 0, page_size)
                    .rows
                    .into_iter()
                    .cloned()
                    .collect()
            };

            let first = run(ascending);
            let reversed = run(descending);
            let again = run(Sort::toggled(Some(descending), column));
            prop_assert_eq!(&first, &again);

            for (rows, expected) in [(&first, Ordering::Less), (&reversed, Ordering::Greater)] {
                for pair in rows.windows(2) {
                    let ordering = compare_column(column, &pair[0], &pair[1]);
                    prop_assert!(ordering == expected || ordering == Ordering::Equal);
                    if ordering == Ordering::Equal {
                        prop_assert!(pair[0].id < pair[1].id);
                    }
                }
            }
        }
    }
}
