//! Table view model
//!
//! Pure function of (employee list, search text, sort, page) → visible rows.
//! Rendering lives in [`crate::ui`]; everything here is testable without a
//! terminal.

use shared::models::Employee;

/// Fixed page size
pub const PAGE_SIZE: usize = 10;

/// Sortable columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    Email,
    Position,
}

impl SortField {
    pub fn label(&self) -> &'static str {
        match self {
            SortField::Name => "Name",
            SortField::Email => "Email",
            SortField::Position => "Position",
        }
    }

    fn key<'a>(&self, employee: &'a Employee) -> &'a str {
        match self {
            SortField::Name => &employee.name,
            SortField::Email => &employee.email,
            SortField::Position => &employee.position,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            SortOrder::Asc => "▲",
            SortOrder::Desc => "▼",
        }
    }
}

/// Current search / sort / page selection
#[derive(Debug, Clone)]
pub struct TableQuery {
    pub search: String,
    pub sort_field: SortField,
    pub sort_order: SortOrder,
    /// 1-based page number; clamped when applied
    pub page: usize,
}

impl Default for TableQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort_field: SortField::Name,
            sort_order: SortOrder::Asc,
            page: 1,
        }
    }
}

impl TableQuery {
    /// Clicking a column: same column toggles direction, a new column starts
    /// ascending. Either way the view jumps back to page 1.
    pub fn toggle_sort(&mut self, field: SortField) {
        if self.sort_field == field {
            self.sort_order = self.sort_order.toggled();
        } else {
            self.sort_field = field;
            self.sort_order = SortOrder::Asc;
        }
        self.page = 1;
    }
}

/// One page of visible rows plus pagination facts
#[derive(Debug)]
pub struct TablePage<'a> {
    pub rows: Vec<&'a Employee>,
    /// Employees matching the search (across all pages)
    pub total: usize,
    /// Clamped 1-based page number
    pub page: usize,
    pub total_pages: usize,
}

impl TablePage<'_> {
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

fn matches(employee: &Employee, needle: &str) -> bool {
    employee.name.to_lowercase().contains(needle)
        || employee.email.to_lowercase().contains(needle)
        || employee.position.to_lowercase().contains(needle)
}

/// Compute the visible rows for the current query
pub fn visible<'a>(employees: &'a [Employee], query: &TableQuery) -> TablePage<'a> {
    let needle = query.search.trim().to_lowercase();

    let mut rows: Vec<&Employee> = employees
        .iter()
        .filter(|e| needle.is_empty() || matches(e, &needle))
        .collect();

    // sort_by is stable: equal keys keep their incoming order
    rows.sort_by(|a, b| {
        let ka = query.sort_field.key(a).to_lowercase();
        let kb = query.sort_field.key(b).to_lowercase();
        match query.sort_order {
            SortOrder::Asc => ka.cmp(&kb),
            SortOrder::Desc => kb.cmp(&ka),
        }
    });

    let total = rows.len();
    let total_pages = total.div_ceil(PAGE_SIZE).max(1);
    let page = query.page.clamp(1, total_pages);
    let start = (page - 1) * PAGE_SIZE;
    let rows = rows.into_iter().skip(start).take(PAGE_SIZE).collect();

    TablePage {
        rows,
        total,
        page,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn employee(id: i64, name: &str, email: &str, position: &str) -> Employee {
        let now = Utc::now();
        Employee {
            id,
            name: name.into(),
            email: email.into(),
            position: position.into(),
            created_at: now,
            updated_at: now,
        }
    }

    fn sample() -> Vec<Employee> {
        vec![
            employee(1, "John Doe", "john@example.com", "Engineer"),
            employee(2, "Alice Smith", "alice@example.com", "Manager"),
            employee(3, "Bob Brown", "bob@johnson-corp.com", "Analyst"),
            employee(4, "carol white", "carol@example.com", "engineer"),
            employee(5, "Dave Green", "dave@example.com", "Johnson Account Lead"),
        ]
    }

    #[test]
    fn search_matches_name_email_and_position_case_insensitively() {
        let employees = sample();
        let query = TableQuery {
            search: "JOHN".into(),
            ..Default::default()
        };
        let page = visible(&employees, &query);
        assert_eq!(page.total, 3);
        let names: Vec<&str> = page.rows.iter().map(|e| e.name.as_str()).collect();
        // name match, email-domain match, position match; name-ascending default
        assert_eq!(names, vec!["Bob Brown", "Dave Green", "John Doe"]);
    }

    #[test]
    fn default_sort_is_name_ascending_case_insensitive() {
        let employees = sample();
        let page = visible(&employees, &TableQuery::default());
        let names: Vec<&str> = page.rows.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Alice Smith", "Bob Brown", "carol white", "Dave Green", "John Doe"]
        );
    }

    #[test]
    fn toggling_same_column_flips_direction() {
        let mut query = TableQuery::default();
        query.toggle_sort(SortField::Name);
        assert_eq!(query.sort_order, SortOrder::Desc);
        query.toggle_sort(SortField::Name);
        assert_eq!(query.sort_order, SortOrder::Asc);
    }

    #[test]
    fn switching_column_resets_to_ascending_and_first_page() {
        let mut query = TableQuery {
            page: 3,
            sort_order: SortOrder::Desc,
            ..Default::default()
        };
        query.toggle_sort(SortField::Email);
        assert_eq!(query.sort_field, SortField::Email);
        assert_eq!(query.sort_order, SortOrder::Asc);
        assert_eq!(query.page, 1);
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let employees = vec![
            employee(1, "Ann", "a1@example.com", "Engineer"),
            employee(2, "ann", "a2@example.com", "Engineer"),
            employee(3, "ANN", "a3@example.com", "Engineer"),
        ];
        let query = TableQuery::default();
        let page = visible(&employees, &query);
        let ids: Vec<i64> = page.rows.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn pagination_splits_25_employees_into_three_pages() {
        let employees: Vec<Employee> = (0..25)
            .map(|i| {
                employee(
                    i,
                    &format!("Employee {:02}", i),
                    &format!("e{i}@example.com"),
                    "Engineer",
                )
            })
            .collect();

        let page3 = visible(
            &employees,
            &TableQuery {
                page: 3,
                ..Default::default()
            },
        );
        assert_eq!(page3.rows.len(), 5);
        assert_eq!(page3.total, 25);
        assert_eq!(page3.total_pages, 3);
        assert!(page3.has_prev());
        assert!(!page3.has_next());
    }

    #[test]
    fn out_of_range_page_is_clamped() {
        let employees = sample();
        let page = visible(
            &employees,
            &TableQuery {
                page: 99,
                ..Default::default()
            },
        );
        assert_eq!(page.page, 1);
        assert_eq!(page.rows.len(), 5);
    }

    #[test]
    fn empty_list_yields_single_empty_page() {
        let page = visible(&[], &TableQuery::default());
        assert!(page.rows.is_empty());
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
        assert!(!page.has_next());
        assert!(!page.has_prev());
    }
}
