use crate::models::{PaymentMethod, StudentRecord};

/// Entries on the launch screen, in display order. The first three map to
/// admin roles; the last opens the student identity picker.
pub(crate) const ROLE_OPTIONS: [&str; 4] = [
    "Super Admin",
    "Boys Hostel Admin",
    "Girls Hostel Admin",
    "Student",
];

/// Year filter cycle for the student table. `None` means "all years".
const YEAR_FILTERS: [Option<&str>; 5] = [None, Some("1st"), Some("2nd"), Some("3rd"), Some("4th")];

fn clamp_selection(selected: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        selected.min(len - 1)
    }
}

fn step_selection(selected: usize, offset: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let max = len as isize - 1;
    (selected as isize + offset).clamp(0, max) as usize
}

/// Backing state for the role picker shown at launch and after logout.
#[derive(Default)]
pub(crate) struct RolePicker {
    pub(crate) selected: usize,
}

impl RolePicker {
    pub(crate) fn move_selection(&mut self, offset: isize) {
        self.selected = step_selection(self.selected, offset, ROLE_OPTIONS.len());
    }
}

/// Backing state for choosing which student record the portal represents.
pub(crate) struct StudentPicker {
    pub(crate) students: Vec<StudentRecord>,
    pub(crate) selected: usize,
}

impl StudentPicker {
    pub(crate) fn new(students: Vec<StudentRecord>) -> Self {
        Self {
            students,
            selected: 0,
        }
    }

    pub(crate) fn current(&self) -> Option<&StudentRecord> {
        self.students.get(self.selected)
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        self.selected = step_selection(self.selected, offset, self.students.len());
    }
}

/// Backing state for the student management table. Rows are cloned out of
/// the record store whenever the underlying collection or the filter
/// changes, so drawing never touches the store.
pub(crate) struct StudentTable {
    pub(crate) rows: Vec<StudentRecord>,
    year_index: usize,
    pub(crate) selected: usize,
}

impl StudentTable {
    pub(crate) fn new(rows: Vec<StudentRecord>) -> Self {
        Self {
            rows,
            year_index: 0,
            selected: 0,
        }
    }

    /// Replace the visible rows after a mutation or filter change, keeping
    /// the selection in bounds.
    pub(crate) fn set_rows(&mut self, rows: Vec<StudentRecord>) {
        self.rows = rows;
        self.selected = clamp_selection(self.selected, self.rows.len());
    }

    pub(crate) fn current(&self) -> Option<&StudentRecord> {
        self.rows.get(self.selected)
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        self.selected = step_selection(self.selected, offset, self.rows.len());
    }

    /// Advance the year filter cycle and return the newly active filter.
    pub(crate) fn cycle_year_filter(&mut self) -> Option<String> {
        self.year_index = (self.year_index + 1) % YEAR_FILTERS.len();
        self.year_filter()
    }

    pub(crate) fn year_filter(&self) -> Option<String> {
        YEAR_FILTERS[self.year_index].map(str::to_string)
    }

    /// Label for the filter indicator above the table.
    pub(crate) fn year_label(&self) -> String {
        match YEAR_FILTERS[self.year_index] {
            Some(year) => format!("{year} year"),
            None => "all years".to_string(),
        }
    }
}

/// Selection state for the admin request inbox. Only leave requests carry
/// actions, so the selection ranges over those.
#[derive(Default)]
pub(crate) struct RequestBoard {
    pub(crate) selected: usize,
}

impl RequestBoard {
    pub(crate) fn move_selection(&mut self, offset: isize, leave_count: usize) {
        self.selected = step_selection(self.selected, offset, leave_count);
    }
}

/// Selection state for the staff roster.
#[derive(Default)]
pub(crate) struct StaffTable {
    pub(crate) selected: usize,
}

impl StaffTable {
    pub(crate) fn move_selection(&mut self, offset: isize, len: usize) {
        self.selected = step_selection(self.selected, offset, len);
    }

    pub(crate) fn ensure_in_bounds(&mut self, len: usize) {
        self.selected = clamp_selection(self.selected, len);
    }
}

/// Meal columns of the menu editor grid.
pub(crate) const MEAL_COLUMNS: usize = 3;

/// Cell cursor for the 7x3 menu editor.
#[derive(Default)]
pub(crate) struct MenuGrid {
    pub(crate) day: usize,
    pub(crate) meal: usize,
}

impl MenuGrid {
    pub(crate) fn move_cursor(&mut self, day_offset: isize, meal_offset: isize, days: usize) {
        self.day = step_selection(self.day, day_offset, days);
        self.meal = step_selection(self.meal, meal_offset, MEAL_COLUMNS);
    }
}

/// Backing state for the student payments screen: which payment method the
/// selection cursor is on.
pub(crate) struct PaymentScreen {
    pub(crate) method_index: usize,
}

/// Methods offered, in display order.
pub(crate) const PAYMENT_METHODS: [PaymentMethod; 2] = [PaymentMethod::Card, PaymentMethod::Upi];

impl PaymentScreen {
    pub(crate) fn new() -> Self {
        Self { method_index: 0 }
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        self.method_index = step_selection(self.method_index, offset, PAYMENT_METHODS.len());
    }

    pub(crate) fn method(&self) -> PaymentMethod {
        PAYMENT_METHODS[self.method_index]
    }
}
