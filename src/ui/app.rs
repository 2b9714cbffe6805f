use std::mem;

use anyhow::Result;
use crossterm::event::KeyCode;
use open::that as open_link;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use crate::models::{
    Hostel, HostelRequest, MenuDay, PaymentMethod, PaymentReceipt, RequestKind, RequestStatus,
    StaffMember, StudentRecord,
};
use crate::receipt;
use crate::session::{Role, Session};
use crate::store::{RecordStore, RoomChangeOutcome, TOTAL_ROOMS};

use super::forms::{
    LeaveField, LeaveForm, RoomField, RoomForm, StaffField, StaffForm, StudentField, StudentForm,
};
use super::helpers::{centered_rect, column, hint_line, surface_error};
use super::screens::{
    MenuGrid, PaymentScreen, RequestBoard, RolePicker, StaffTable, StudentPicker, StudentTable,
    PAYMENT_METHODS, ROLE_OPTIONS,
};

/// Footer space reserved for the status line plus navigation hints.
const FOOTER_HEIGHT: u16 = 4;

/// High-level navigation states: one named view is visible at a time.
/// Keeping this explicit makes it easy to reason about which rendering path
/// runs and what the keyboard shortcuts should do.
enum Screen {
    RolePicker(RolePicker),
    StudentPicker(StudentPicker),
    // Admin sections.
    Dashboard,
    Students(StudentTable),
    Rooms,
    Requests(RequestBoard),
    Staff(StaffTable),
    MenuEditor(MenuGrid),
    // Student portal sections.
    Profile,
    Leave,
    Payments(PaymentScreen),
    MenuView,
}

/// Fine-grained modes scoped to the current screen, mostly modal forms and
/// confirmations layered over it.
enum Mode {
    Normal,
    AddingStudent(StudentForm),
    EditingStudent { id: String, form: StudentForm },
    ConfirmStudentDelete { id: String, name: String },
    ReassigningRoom(RoomForm),
    AddingStaff(StaffForm),
    ConfirmStaffDelete { index: usize, name: String },
    EditingMenuCell { day: usize, meal: usize, value: String },
    SubmittingLeave(LeaveForm),
    ConfirmPayment { method: PaymentMethod },
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI.
pub struct App {
    store: RecordStore,
    requests: Vec<HostelRequest>,
    staff: Vec<StaffMember>,
    menu: Vec<MenuDay>,
    receipts: Vec<PaymentReceipt>,
    fee_paid: bool,
    session: Option<Session>,
    screen: Screen,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(
        store: RecordStore,
        requests: Vec<HostelRequest>,
        staff: Vec<StaffMember>,
        menu: Vec<MenuDay>,
    ) -> Self {
        Self {
            store,
            requests,
            staff,
            menu,
            receipts: Vec::new(),
            fee_paid: false,
            session: None,
            screen: Screen::RolePicker(RolePicker::default()),
            mode: Mode::Normal,
            status: None,
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::AddingStudent(form) => self.handle_add_student(code, form)?,
            Mode::EditingStudent { id, form } => self.handle_edit_student(code, id, form)?,
            Mode::ConfirmStudentDelete { id, name } => {
                self.handle_confirm_student_delete(code, id, name)?
            }
            Mode::ReassigningRoom(form) => self.handle_reassign_room(code, form)?,
            Mode::AddingStaff(form) => self.handle_add_staff(code, form)?,
            Mode::ConfirmStaffDelete { index, name } => {
                self.handle_confirm_staff_delete(code, index, name)?
            }
            Mode::EditingMenuCell { day, meal, value } => {
                self.handle_menu_cell(code, day, meal, value)?
            }
            Mode::SubmittingLeave(form) => self.handle_leave_form(code, form)?,
            Mode::ConfirmPayment { method } => self.handle_confirm_payment(code, method)?,
        };

        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        if let KeyCode::Char('q') = code {
            *exit = true;
            return Ok(Mode::Normal);
        }

        // Section switching and logout are session-wide; everything else is
        // scoped to the visible screen.
        match self.session {
            Some(Session::Admin(_)) => {
                if self.handle_admin_nav(code) {
                    return Ok(Mode::Normal);
                }
            }
            Some(Session::Student { .. }) => {
                if self.handle_portal_nav(code) {
                    return Ok(Mode::Normal);
                }
            }
            None => {}
        }

        let mut next_mode: Option<Mode> = None;
        let mut status_to_set: Option<(String, StatusKind)> = None;
        let mut chosen_role: Option<usize> = None;
        let mut chosen_student: Option<String> = None;
        let mut back_to_role_picker = false;
        let mut reload_students = false;
        let mut request_decision: Option<(usize, bool)> = None;
        let mut open_receipt = false;

        match self.screen {
            Screen::RolePicker(ref mut picker) => match code {
                KeyCode::Esc => *exit = true,
                KeyCode::Up => picker.move_selection(-1),
                KeyCode::Down => picker.move_selection(1),
                KeyCode::Enter => chosen_role = Some(picker.selected),
                _ => {}
            },
            Screen::StudentPicker(ref mut picker) => match code {
                KeyCode::Esc => back_to_role_picker = true,
                KeyCode::Up => picker.move_selection(-1),
                KeyCode::Down => picker.move_selection(1),
                KeyCode::Enter => {
                    chosen_student = picker.current().map(|record| record.id.clone());
                }
                _ => {}
            },
            Screen::Dashboard | Screen::Profile | Screen::MenuView => {}
            Screen::Students(ref mut table) => match code {
                KeyCode::Up => table.move_selection(-1),
                KeyCode::Down => table.move_selection(1),
                KeyCode::Char('y') => {
                    table.cycle_year_filter();
                    reload_students = true;
                }
                KeyCode::Char('+') => next_mode = Some(Mode::AddingStudent(StudentForm::new())),
                KeyCode::Char('e') | KeyCode::Char('E') => {
                    if let Some(record) = table.current() {
                        next_mode = Some(Mode::EditingStudent {
                            id: record.id.clone(),
                            form: StudentForm::from_record(record),
                        });
                    } else {
                        status_to_set = Some((
                            "No student selected to edit.".to_string(),
                            StatusKind::Error,
                        ));
                    }
                }
                KeyCode::Char('-') => {
                    if let Some(record) = table.current() {
                        next_mode = Some(Mode::ConfirmStudentDelete {
                            id: record.id.clone(),
                            name: record.name.clone(),
                        });
                    } else {
                        status_to_set = Some((
                            "No student selected to delete.".to_string(),
                            StatusKind::Error,
                        ));
                    }
                }
                _ => {}
            },
            Screen::Rooms => {
                if let KeyCode::Enter = code {
                    next_mode = Some(Mode::ReassigningRoom(RoomForm::default()));
                }
            }
            Screen::Requests(ref mut board) => {
                let leave_count = self.requests.iter().filter(|r| r.is_leave()).count();
                match code {
                    KeyCode::Up => board.move_selection(-1, leave_count),
                    KeyCode::Down => board.move_selection(1, leave_count),
                    KeyCode::Char('a') | KeyCode::Char('A') => {
                        if leave_count > 0 {
                            request_decision = Some((board.selected, true));
                        }
                    }
                    KeyCode::Char('r') | KeyCode::Char('R') => {
                        if leave_count > 0 {
                            request_decision = Some((board.selected, false));
                        }
                    }
                    _ => {}
                }
            }
            Screen::Staff(ref mut table) => {
                let len = self.staff.len();
                match code {
                    KeyCode::Up => table.move_selection(-1, len),
                    KeyCode::Down => table.move_selection(1, len),
                    KeyCode::Char('+') => next_mode = Some(Mode::AddingStaff(StaffForm::new())),
                    KeyCode::Char('-') => {
                        if let Some(member) = self.staff.get(table.selected) {
                            next_mode = Some(Mode::ConfirmStaffDelete {
                                index: table.selected,
                                name: member.name.clone(),
                            });
                        } else {
                            status_to_set = Some((
                                "No staff member selected to remove.".to_string(),
                                StatusKind::Error,
                            ));
                        }
                    }
                    _ => {}
                }
            }
            Screen::MenuEditor(ref mut grid) => {
                let days = self.menu.len();
                match code {
                    KeyCode::Up => grid.move_cursor(-1, 0, days),
                    KeyCode::Down => grid.move_cursor(1, 0, days),
                    KeyCode::Left => grid.move_cursor(0, -1, days),
                    KeyCode::Right => grid.move_cursor(0, 1, days),
                    KeyCode::Enter => {
                        if let Some(entry) = self.menu.get(grid.day) {
                            let value = match grid.meal {
                                0 => entry.breakfast.clone(),
                                1 => entry.lunch.clone(),
                                _ => entry.dinner.clone(),
                            };
                            next_mode = Some(Mode::EditingMenuCell {
                                day: grid.day,
                                meal: grid.meal,
                                value,
                            });
                        }
                    }
                    KeyCode::Char('s') | KeyCode::Char('S') => {
                        status_to_set = Some((
                            "Weekly food menu saved. Students now see the updated menu."
                                .to_string(),
                            StatusKind::Info,
                        ));
                    }
                    _ => {}
                }
            }
            Screen::Leave => {
                if let KeyCode::Enter = code {
                    next_mode = Some(Mode::SubmittingLeave(LeaveForm::default()));
                }
            }
            Screen::Payments(ref mut pay) => match code {
                KeyCode::Up => pay.move_selection(-1),
                KeyCode::Down => pay.move_selection(1),
                KeyCode::Enter => {
                    if self.fee_paid {
                        status_to_set = Some((
                            "Fee already paid for this session.".to_string(),
                            StatusKind::Info,
                        ));
                    } else {
                        next_mode = Some(Mode::ConfirmPayment {
                            method: pay.method(),
                        });
                    }
                }
                KeyCode::Char('o') | KeyCode::Char('O') => open_receipt = true,
                _ => {}
            },
        }

        if let Some(index) = chosen_role {
            self.select_role(index);
        }
        if let Some(id) = chosen_student {
            self.start_student_session(id);
        }
        if back_to_role_picker {
            self.logout();
        }
        if reload_students {
            self.reload_student_table();
        }
        if let Some((index, approve)) = request_decision {
            self.decide_leave_request(index, approve);
        }
        if open_receipt {
            self.open_latest_receipt();
        }
        if let Some((text, kind)) = status_to_set {
            self.set_status(text, kind);
        }

        Ok(next_mode.unwrap_or(Mode::Normal))
    }

    /// Admin section switching. Returns true when the key was consumed.
    fn handle_admin_nav(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('1') => self.screen = Screen::Dashboard,
            KeyCode::Char('2') => self.open_students_screen(),
            KeyCode::Char('3') => self.screen = Screen::Rooms,
            KeyCode::Char('4') => self.screen = Screen::Requests(RequestBoard::default()),
            KeyCode::Char('5') => self.screen = Screen::Staff(StaffTable::default()),
            KeyCode::Char('6') => self.screen = Screen::MenuEditor(MenuGrid::default()),
            KeyCode::Char('l') | KeyCode::Char('L') => self.logout(),
            KeyCode::Esc => self.screen = Screen::Dashboard,
            _ => return false,
        }
        self.clear_status();
        true
    }

    /// Student portal section switching.
    fn handle_portal_nav(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('1') => self.screen = Screen::Profile,
            KeyCode::Char('2') => self.screen = Screen::Leave,
            KeyCode::Char('3') => self.screen = Screen::Payments(PaymentScreen::new()),
            KeyCode::Char('4') => self.screen = Screen::MenuView,
            KeyCode::Char('l') | KeyCode::Char('L') => self.logout(),
            KeyCode::Esc => self.screen = Screen::Profile,
            _ => return false,
        }
        self.clear_status();
        true
    }

    fn select_role(&mut self, index: usize) {
        match index {
            0 => self.sign_in_admin(Role::SuperAdmin),
            1 => self.sign_in_admin(Role::BoysAdmin),
            2 => self.sign_in_admin(Role::GirlsAdmin),
            _ => {
                let students = self.all_students();
                if students.is_empty() {
                    self.set_status("No student records available.", StatusKind::Error);
                } else {
                    self.screen = Screen::StudentPicker(StudentPicker::new(students));
                    self.clear_status();
                }
            }
        }
    }

    fn sign_in_admin(&mut self, role: Role) {
        self.session = Some(Session::Admin(role));
        self.screen = Screen::Dashboard;
        self.clear_status();
    }

    fn start_student_session(&mut self, id: String) {
        self.session = Some(Session::Student { id });
        self.fee_paid = false;
        self.receipts.clear();
        self.screen = Screen::Profile;
        self.clear_status();
    }

    /// Drop back to the role picker, clearing everything session-scoped.
    fn logout(&mut self) {
        self.session = None;
        self.fee_paid = false;
        self.receipts.clear();
        self.screen = Screen::RolePicker(RolePicker::default());
        self.clear_status();
    }

    fn admin_role(&self) -> Option<Role> {
        match self.session {
            Some(Session::Admin(role)) => Some(role),
            _ => None,
        }
    }

    fn current_student_record(&self) -> Option<StudentRecord> {
        match &self.session {
            Some(Session::Student { id }) => self.store.find_by_id(id).cloned(),
            _ => None,
        }
    }

    fn all_students(&self) -> Vec<StudentRecord> {
        self.store
            .list(&Role::SuperAdmin.record_filter(None))
            .into_iter()
            .cloned()
            .collect()
    }

    /// Rows visible to the active admin role, optionally narrowed by year.
    fn visible_students(&self, year: Option<String>) -> Vec<StudentRecord> {
        let role = self.admin_role().unwrap_or(Role::SuperAdmin);
        self.store
            .list(&role.record_filter(year))
            .into_iter()
            .cloned()
            .collect()
    }

    fn open_students_screen(&mut self) {
        let rows = self.visible_students(None);
        self.screen = Screen::Students(StudentTable::new(rows));
    }

    /// Refresh the student table after a mutation or filter change. No-op on
    /// other screens.
    fn reload_student_table(&mut self) {
        let year = match &self.screen {
            Screen::Students(table) => table.year_filter(),
            _ => return,
        };
        let rows = self.visible_students(year);
        if let Screen::Students(table) = &mut self.screen {
            table.set_rows(rows);
        }
    }

    fn decide_leave_request(&mut self, leave_index: usize, approve: bool) {
        let target = self
            .requests
            .iter_mut()
            .filter(|request| request.is_leave())
            .nth(leave_index);
        if let Some(request) = target {
            request.status = if approve {
                RequestStatus::Approved
            } else {
                RequestStatus::Rejected
            };
            let student = request.student.clone();
            let verb = if approve { "accepted" } else { "rejected" };
            self.set_status(
                format!("Request from {student} has been {verb}."),
                StatusKind::Info,
            );
        }
    }

    fn open_latest_receipt(&mut self) {
        let Some(receipt) = self.receipts.first().cloned() else {
            self.set_status("No recent payments.", StatusKind::Info);
            return;
        };
        let Some(student) = self.current_student_record() else {
            self.set_status("Student record not found.", StatusKind::Error);
            return;
        };
        match receipt::write_file(&receipt, &student) {
            Ok(path) => {
                if let Err(err) = open_link(&path) {
                    self.set_status(
                        format!("Failed to open receipt: {err}"),
                        StatusKind::Error,
                    );
                } else {
                    self.set_status(format!("Opened receipt {}.", receipt.id), StatusKind::Info);
                }
            }
            Err(err) => self.set_status(surface_error(&err), StatusKind::Error),
        }
    }

    fn handle_add_student(&mut self, code: KeyCode, mut form: StudentForm) -> Result<Mode> {
        match code {
            KeyCode::Esc => return Ok(Mode::Normal),
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.prev_field(),
            KeyCode::Left | KeyCode::Right => {
                form.toggle_hostel();
            }
            KeyCode::Backspace => {
                form.error = None;
                form.backspace();
            }
            KeyCode::Enter => match form.parse_record() {
                Ok(record) => {
                    let label = record.clone().normalized().display_name();
                    match self.store.add(record) {
                        Ok(()) => {
                            self.reload_student_table();
                            self.set_status(
                                format!("Successfully added new student: {label}."),
                                StatusKind::Info,
                            );
                            return Ok(Mode::Normal);
                        }
                        Err(err) => form.error = Some(err.to_string()),
                    }
                }
                Err(err) => form.error = Some(surface_error(&err)),
            },
            KeyCode::Char(ch) => {
                form.error = None;
                if !(ch == ' ' && form.toggle_hostel()) {
                    form.push_char(ch);
                }
            }
            _ => {}
        }
        Ok(Mode::AddingStudent(form))
    }

    fn handle_edit_student(
        &mut self,
        code: KeyCode,
        id: String,
        mut form: StudentForm,
    ) -> Result<Mode> {
        match code {
            KeyCode::Esc => return Ok(Mode::Normal),
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.prev_field(),
            KeyCode::Left | KeyCode::Right => {
                form.toggle_hostel();
            }
            KeyCode::Backspace => {
                form.error = None;
                form.backspace();
            }
            KeyCode::Enter => {
                let patch = form.parse_patch();
                match self.store.edit(&id, patch) {
                    Ok(()) => {
                        self.reload_student_table();
                        self.set_status(
                            format!("Changes saved successfully for {} ({id}).", form.name.trim()),
                            StatusKind::Info,
                        );
                        return Ok(Mode::Normal);
                    }
                    Err(err) => form.error = Some(err.to_string()),
                }
            }
            KeyCode::Char(ch) => {
                form.error = None;
                if !(ch == ' ' && form.toggle_hostel()) {
                    form.push_char(ch);
                }
            }
            _ => {}
        }
        Ok(Mode::EditingStudent { id, form })
    }

    fn handle_confirm_student_delete(
        &mut self,
        code: KeyCode,
        id: String,
        name: String,
    ) -> Result<Mode> {
        match code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                match self.store.delete(&id) {
                    Ok(()) => {
                        self.reload_student_table();
                        self.set_status(
                            format!("Student {name} ({id}) successfully deleted."),
                            StatusKind::Info,
                        );
                    }
                    Err(err) => self.set_status(err.to_string(), StatusKind::Error),
                }
                Ok(Mode::Normal)
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Ok(Mode::Normal),
            _ => Ok(Mode::ConfirmStudentDelete { id, name }),
        }
    }

    fn handle_reassign_room(&mut self, code: KeyCode, mut form: RoomForm) -> Result<Mode> {
        match code {
            KeyCode::Esc => return Ok(Mode::Normal),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => form.toggle_field(),
            KeyCode::Backspace => {
                form.error = None;
                form.backspace();
            }
            KeyCode::Enter => match form.parse_inputs() {
                Ok((id, room)) => match self.store.reassign_room(&id, &room) {
                    Ok(RoomChangeOutcome::NoChange) => {
                        self.set_status(
                            format!("Room is already set to {room}. No change made."),
                            StatusKind::Info,
                        );
                        return Ok(Mode::Normal);
                    }
                    Ok(RoomChangeOutcome::Changed { old_room, new_room }) => {
                        let normalized = id.trim().to_uppercase();
                        let label = self
                            .store
                            .find_by_id(&normalized)
                            .map(StudentRecord::display_name)
                            .unwrap_or(normalized);
                        self.reload_student_table();
                        self.set_status(
                            format!(
                                "Success! {label} has been moved from Room {old_room} to Room {new_room}."
                            ),
                            StatusKind::Info,
                        );
                        return Ok(Mode::Normal);
                    }
                    Err(err) => form.error = Some(err.to_string()),
                },
                Err(err) => form.error = Some(surface_error(&err)),
            },
            KeyCode::Char(ch) => {
                form.error = None;
                form.push_char(ch);
            }
            _ => {}
        }
        Ok(Mode::ReassigningRoom(form))
    }

    fn handle_add_staff(&mut self, code: KeyCode, mut form: StaffForm) -> Result<Mode> {
        match code {
            KeyCode::Esc => return Ok(Mode::Normal),
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.prev_field(),
            KeyCode::Left | KeyCode::Right => {
                form.toggle_hostel();
            }
            KeyCode::Backspace => {
                form.error = None;
                form.backspace();
            }
            KeyCode::Enter => match form.parse_inputs() {
                Ok(member) => {
                    let name = member.name.clone();
                    self.staff.push(member);
                    self.set_status(format!("Added staff member {name}."), StatusKind::Info);
                    return Ok(Mode::Normal);
                }
                Err(err) => form.error = Some(surface_error(&err)),
            },
            KeyCode::Char(ch) => {
                form.error = None;
                if !(ch == ' ' && form.toggle_hostel()) {
                    form.push_char(ch);
                }
            }
            _ => {}
        }
        Ok(Mode::AddingStaff(form))
    }

    fn handle_confirm_staff_delete(
        &mut self,
        code: KeyCode,
        index: usize,
        name: String,
    ) -> Result<Mode> {
        match code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                if index < self.staff.len() {
                    self.staff.remove(index);
                    let len = self.staff.len();
                    if let Screen::Staff(table) = &mut self.screen {
                        table.ensure_in_bounds(len);
                    }
                    self.set_status(
                        format!("Removed {name} from the roster."),
                        StatusKind::Info,
                    );
                }
                Ok(Mode::Normal)
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Ok(Mode::Normal),
            _ => Ok(Mode::ConfirmStaffDelete { index, name }),
        }
    }

    fn handle_menu_cell(
        &mut self,
        code: KeyCode,
        day: usize,
        meal: usize,
        mut value: String,
    ) -> Result<Mode> {
        match code {
            KeyCode::Esc => return Ok(Mode::Normal),
            KeyCode::Enter => {
                if let Some(entry) = self.menu.get_mut(day) {
                    let trimmed = value.trim().to_string();
                    let slot = match meal {
                        0 => &mut entry.breakfast,
                        1 => &mut entry.lunch,
                        _ => &mut entry.dinner,
                    };
                    *slot = trimmed;
                    let meal_name = meal_label(meal);
                    let day_name = entry.day.clone();
                    self.set_status(
                        format!("Updated {day_name} {meal_name}."),
                        StatusKind::Info,
                    );
                }
                return Ok(Mode::Normal);
            }
            KeyCode::Backspace => {
                value.pop();
            }
            KeyCode::Char(ch) => {
                if !ch.is_control() {
                    value.push(ch);
                }
            }
            _ => {}
        }
        Ok(Mode::EditingMenuCell { day, meal, value })
    }

    fn handle_leave_form(&mut self, code: KeyCode, mut form: LeaveForm) -> Result<Mode> {
        match code {
            KeyCode::Esc => return Ok(Mode::Normal),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => form.toggle_field(),
            KeyCode::Backspace => {
                form.error = None;
                form.backspace();
            }
            KeyCode::Enter => match form.parse_inputs() {
                Ok((dates, reason, needs_proof)) => match self.current_student_record() {
                    Some(record) => {
                        self.requests.push(HostelRequest {
                            student: record.name,
                            kind: RequestKind::Leave {
                                dates,
                                reason,
                                needs_proof,
                            },
                            status: RequestStatus::Pending,
                        });
                        self.set_status(
                            "Leave request submitted! Waiting for staff approval.",
                            StatusKind::Info,
                        );
                        return Ok(Mode::Normal);
                    }
                    None => form.error = Some("Student record not found.".to_string()),
                },
                Err(err) => form.error = Some(surface_error(&err)),
            },
            KeyCode::Char(ch) => {
                form.error = None;
                form.push_char(ch);
            }
            _ => {}
        }
        Ok(Mode::SubmittingLeave(form))
    }

    fn handle_confirm_payment(&mut self, code: KeyCode, method: PaymentMethod) -> Result<Mode> {
        match code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                self.perform_payment(method);
                Ok(Mode::Normal)
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Ok(Mode::Normal),
            _ => Ok(Mode::ConfirmPayment { method }),
        }
    }

    /// Simulated payment: flip the due status, record a receipt, and write
    /// the receipt file so it can be opened from the history list.
    fn perform_payment(&mut self, method: PaymentMethod) {
        let Some(student) = self.current_student_record() else {
            self.set_status("Student record not found.", StatusKind::Error);
            return;
        };
        let receipt = receipt::issue(receipt::FEE_AMOUNT, method);
        self.fee_paid = true;
        match receipt::write_file(&receipt, &student) {
            Ok(_path) => self.set_status(
                format!(
                    "Payment successful via {method}! Receipt {} saved.",
                    receipt.id
                ),
                StatusKind::Info,
            ),
            Err(err) => self.set_status(
                format!(
                    "Payment recorded, but writing the receipt failed: {}",
                    surface_error(&err)
                ),
                StatusKind::Error,
            ),
        }
        self.receipts.insert(0, receipt);
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    // --- Rendering -------------------------------------------------------

    pub fn draw(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(frame.area());

        self.draw_header(frame, chunks[0]);

        match &self.screen {
            Screen::RolePicker(picker) => self.draw_role_picker(frame, chunks[1], picker),
            Screen::StudentPicker(picker) => self.draw_student_picker(frame, chunks[1], picker),
            Screen::Dashboard => self.draw_dashboard(frame, chunks[1]),
            Screen::Students(table) => self.draw_students(frame, chunks[1], table),
            Screen::Rooms => self.draw_rooms(frame, chunks[1]),
            Screen::Requests(board) => self.draw_requests(frame, chunks[1], board),
            Screen::Staff(table) => self.draw_staff(frame, chunks[1], table),
            Screen::MenuEditor(grid) => self.draw_menu_editor(frame, chunks[1], Some(grid)),
            Screen::Profile => self.draw_profile(frame, chunks[1]),
            Screen::Leave => self.draw_leave(frame, chunks[1]),
            Screen::Payments(pay) => self.draw_payments(frame, chunks[1], pay),
            Screen::MenuView => self.draw_menu_editor(frame, chunks[1], None),
        }

        match &self.mode {
            Mode::Normal => {}
            Mode::AddingStudent(form) => {
                self.draw_student_form(frame, chunks[1], form, "Add New Student")
            }
            Mode::EditingStudent { form, .. } => {
                self.draw_student_form(frame, chunks[1], form, "Edit Profile")
            }
            Mode::ConfirmStudentDelete { id, name } => self.draw_confirm(
                frame,
                chunks[1],
                "Confirm Deletion",
                vec![
                    Line::from(format!(
                        "Permanently delete the record for {name} ({id})?"
                    )),
                    Line::from("This action cannot be undone."),
                ],
            ),
            Mode::ReassigningRoom(form) => self.draw_room_form(frame, chunks[1], form),
            Mode::AddingStaff(form) => self.draw_staff_form(frame, chunks[1], form),
            Mode::ConfirmStaffDelete { name, .. } => self.draw_confirm(
                frame,
                chunks[1],
                "Remove Staff Member",
                vec![Line::from(format!("Remove {name} from the roster?"))],
            ),
            Mode::EditingMenuCell { day, meal, value } => {
                self.draw_menu_cell_editor(frame, chunks[1], *day, *meal, value)
            }
            Mode::SubmittingLeave(form) => self.draw_leave_form(frame, chunks[1], form),
            Mode::ConfirmPayment { method } => self.draw_confirm(
                frame,
                chunks[1],
                "Confirm Payment",
                vec![
                    Line::from(format!(
                        "Confirm payment of {} via {method}?",
                        receipt::FEE_AMOUNT
                    )),
                    Line::from("Simulated - no real transaction."),
                ],
            ),
        }

        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let subtitle = match &self.session {
            Some(Session::Admin(role)) => format!("{} Dashboard", role.title()),
            Some(Session::Student { .. }) => match self.current_student_record() {
                Some(record) => format!("Welcome, {}", record.name),
                None => "Student Portal".to_string(),
            },
            None => "Hostel Management Portal".to_string(),
        };
        let paragraph = Paragraph::new(Line::from(vec![
            Span::styled(
                "Hostel Desk",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  -  "),
            Span::raw(subtitle),
        ]))
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(paragraph, area);
    }

    fn draw_role_picker(&self, frame: &mut Frame, area: Rect, picker: &RolePicker) {
        let popup_area = centered_rect(40, 50, area);
        let block = Block::default().title("Sign In As").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let items: Vec<ListItem> = ROLE_OPTIONS
            .iter()
            .map(|option| ListItem::new(*option))
            .collect();
        let list = List::new(items)
            .highlight_style(Style::default().fg(Color::Yellow))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        state.select(Some(picker.selected));
        frame.render_stateful_widget(list, inner, &mut state);
    }

    fn draw_student_picker(&self, frame: &mut Frame, area: Rect, picker: &StudentPicker) {
        let popup_area = centered_rect(60, 60, area);
        let block = Block::default()
            .title("Choose Your Record")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let items: Vec<ListItem> = picker
            .students
            .iter()
            .map(|record| {
                ListItem::new(format!(
                    "{} {} ({} Hostel)",
                    column(&record.id, 8),
                    column(&record.name, 24),
                    record.hostel
                ))
            })
            .collect();
        let list = List::new(items)
            .highlight_style(Style::default().fg(Color::Yellow))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        state.select(Some(picker.selected));
        frame.render_stateful_widget(list, inner, &mut state);
    }

    fn draw_stat_cards(&self, frame: &mut Frame, area: Rect, cards: &[(&str, String)]) {
        if cards.is_empty() || area.height == 0 {
            return;
        }
        let percent = (100 / cards.len() as u16).max(1);
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Percentage(percent); cards.len()])
            .split(area);

        for (chunk, (title, value)) in chunks.iter().zip(cards) {
            let paragraph = Paragraph::new(Line::from(Span::styled(
                value.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )))
            .alignment(Alignment::Center)
            .block(Block::default().title(*title).borders(Borders::ALL));
            frame.render_widget(paragraph, *chunk);
        }
    }

    fn draw_dashboard(&self, frame: &mut Frame, area: Rect) {
        let total = self.store.count();
        let vacant = TOTAL_ROOMS.saturating_sub(total);
        let pending = self
            .requests
            .iter()
            .filter(|request| request.status == RequestStatus::Pending)
            .count();

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(area);

        self.draw_stat_cards(
            frame,
            rows[0],
            &[
                ("Total Students", total.to_string()),
                ("Total Rooms", TOTAL_ROOMS.to_string()),
                ("Filled Rooms", total.to_string()),
                ("Vacant Rooms", vacant.to_string()),
            ],
        );
        self.draw_stat_cards(
            frame,
            rows[1],
            &[
                (
                    "Boys Hostel",
                    self.store.count_by_hostel(Hostel::Boys).to_string(),
                ),
                (
                    "Girls Hostel",
                    self.store.count_by_hostel(Hostel::Girls).to_string(),
                ),
                ("Pending Requests", pending.to_string()),
            ],
        );
    }

    fn draw_students(&self, frame: &mut Frame, area: Rect, table: &StudentTable) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);

        let summary = Paragraph::new(format!(
            "Showing {} - {} student(s)",
            table.year_label(),
            table.rows.len()
        ));
        frame.render_widget(summary, rows[0]);

        let header = Paragraph::new(Span::styled(
            format!(
                "  {} {} {} {} {}",
                column("ID", 8),
                column("Name (Hostel)", 26),
                column("Year", 6),
                column("Room", 8),
                "Contact"
            ),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(header, rows[1]);

        let items: Vec<ListItem> = table
            .rows
            .iter()
            .map(|record| {
                ListItem::new(format!(
                    "{} {} {} {} {}",
                    column(&record.id, 8),
                    column(&format!("{} ({})", record.name, record.hostel), 26),
                    column(&record.year, 6),
                    column(&record.room, 8),
                    record.contact
                ))
            })
            .collect();
        let list = List::new(items)
            .highlight_style(Style::default().fg(Color::Yellow))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        state.select(if table.rows.is_empty() {
            None
        } else {
            Some(table.selected)
        });
        frame.render_stateful_widget(list, rows[2], &mut state);
    }

    fn draw_rooms(&self, frame: &mut Frame, area: Rect) {
        let total = self.store.count();
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        self.draw_stat_cards(
            frame,
            rows[0],
            &[
                ("Total Rooms", TOTAL_ROOMS.to_string()),
                ("Filled", total.to_string()),
                ("Vacant", TOTAL_ROOMS.saturating_sub(total).to_string()),
            ],
        );

        let help = Paragraph::new(vec![
            Line::from(""),
            Line::from("Press Enter to move a student to a different room."),
            Line::from(Span::styled(
                "Reassigning to the student's current room makes no change.",
                Style::default().fg(Color::Gray),
            )),
        ]);
        frame.render_widget(help, rows[1]);
    }

    fn draw_requests(&self, frame: &mut Frame, area: Rect, board: &RequestBoard) {
        let leaves: Vec<&HostelRequest> =
            self.requests.iter().filter(|r| r.is_leave()).collect();

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(leaves.len() as u16 + 2),
                Constraint::Min(0),
            ])
            .split(area);

        let mut leave_lines = Vec::new();
        for (idx, request) in leaves.iter().enumerate() {
            let pointer = if idx == board.selected { "> " } else { "  " };
            if let RequestKind::Leave {
                dates,
                reason,
                needs_proof,
            } = &request.kind
            {
                let proof = if *needs_proof { "Yes" } else { "No" };
                let status_style = match request.status {
                    RequestStatus::Pending => Style::default().fg(Color::Yellow),
                    RequestStatus::Approved => Style::default().fg(Color::Green),
                    RequestStatus::Rejected => Style::default().fg(Color::Red),
                    RequestStatus::New => Style::default(),
                };
                leave_lines.push(Line::from(vec![
                    Span::raw(format!(
                        "{pointer}{} {} {} ",
                        column(&request.student, 16),
                        column(dates, 14),
                        column(&format!("{reason} (Proof: {proof})"), 34),
                    )),
                    Span::styled(request.status.to_string(), status_style),
                ]));
            }
        }
        if leave_lines.is_empty() {
            leave_lines.push(Line::from("No leave requests."));
        }
        let leave_block = Paragraph::new(leave_lines)
            .block(Block::default().title("Leave Requests").borders(Borders::ALL));
        frame.render_widget(leave_block, rows[0]);

        let mut other_lines = Vec::new();
        for request in &self.requests {
            match &request.kind {
                RequestKind::ChangeRoom { reason } => {
                    other_lines.push(Line::from(format!(
                        "Change Room from {}: {reason} [{}]",
                        request.student, request.status
                    )));
                }
                RequestKind::Feedback { message } => {
                    other_lines.push(Line::from(format!(
                        "Feedback from {}: {message}",
                        request.student
                    )));
                }
                RequestKind::Leave { .. } => {}
            }
        }
        if other_lines.is_empty() {
            other_lines.push(Line::from("Nothing else waiting."));
        }
        let other_block = Paragraph::new(other_lines)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title("Special Requests & Feedback")
                    .borders(Borders::ALL),
            );
        frame.render_widget(other_block, rows[1]);
    }

    fn draw_staff(&self, frame: &mut Frame, area: Rect, table: &StaffTable) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(area);

        let header = Paragraph::new(Span::styled(
            format!(
                "  {} {} {} {}",
                column("Name", 22),
                column("Role", 18),
                column("Hostel", 7),
                "Contact"
            ),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(header, rows[0]);

        let items: Vec<ListItem> = self
            .staff
            .iter()
            .map(|member| {
                ListItem::new(format!(
                    "{} {} {} {}",
                    column(&member.name, 22),
                    column(&member.role, 18),
                    column(&member.hostel.to_string(), 7),
                    member.contact
                ))
            })
            .collect();
        let list = List::new(items)
            .highlight_style(Style::default().fg(Color::Yellow))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        state.select(if self.staff.is_empty() {
            None
        } else {
            Some(table.selected)
        });
        frame.render_stateful_widget(list, rows[1], &mut state);
    }

    /// Shared renderer for the admin menu editor and the read-only student
    /// view; `grid` carries the cell cursor when editing is allowed.
    fn draw_menu_editor(&self, frame: &mut Frame, area: Rect, grid: Option<&MenuGrid>) {
        let mut lines = vec![Line::from(Span::styled(
            format!(
                "{} {} {} {}",
                column("Day", 11),
                column("Breakfast", 24),
                column("Lunch", 24),
                "Dinner"
            ),
            Style::default().add_modifier(Modifier::BOLD),
        ))];

        for (day_idx, entry) in self.menu.iter().enumerate() {
            let mut spans = vec![Span::raw(column(&entry.day, 11)), Span::raw(" ")];
            let cells = [&entry.breakfast, &entry.lunch, &entry.dinner];
            for (meal_idx, cell) in cells.iter().enumerate() {
                let selected = grid
                    .map(|g| g.day == day_idx && g.meal == meal_idx)
                    .unwrap_or(false);
                let style = if selected {
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                spans.push(Span::styled(column(cell, 24), style));
                spans.push(Span::raw(" "));
            }
            lines.push(Line::from(spans));
        }

        let title = if grid.is_some() {
            "Weekly Menu Editor"
        } else {
            "Weekly Food Menu"
        };
        let paragraph =
            Paragraph::new(lines).block(Block::default().title(title).borders(Borders::ALL));
        frame.render_widget(paragraph, area);
    }

    fn draw_profile(&self, frame: &mut Frame, area: Rect) {
        let lines = match self.current_student_record() {
            Some(record) => vec![
                Line::from(Span::styled(
                    record.name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(format!("Student ID:  {}", record.id)),
                Line::from(format!("Year:        {}", record.year)),
                Line::from(format!(
                    "Hostel/Room: {} Hostel | Room {}",
                    record.hostel, record.room
                )),
                Line::from(format!("Contact:     {}", record.contact)),
                Line::from(format!("Parent:      {}", record.parent)),
                Line::from(format!("Address:     {}", record.address)),
            ],
            None => vec![Line::from(
                "Student record not found. Contact the hostel office.",
            )],
        };
        let paragraph = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().title("My Profile").borders(Borders::ALL));
        frame.render_widget(paragraph, area);
    }

    fn draw_leave(&self, frame: &mut Frame, area: Rect) {
        let mut lines = vec![
            Line::from("Press Enter to submit a new leave request."),
            Line::from(""),
        ];

        let own_name = self.current_student_record().map(|record| record.name);
        let latest = own_name.as_ref().and_then(|name| {
            self.requests
                .iter()
                .rev()
                .find(|request| request.is_leave() && &request.student == name)
        });
        match latest {
            Some(request) => {
                if let RequestKind::Leave { reason, .. } = &request.kind {
                    let style = match request.status {
                        RequestStatus::Pending => Style::default().fg(Color::Yellow),
                        RequestStatus::Approved => Style::default().fg(Color::Green),
                        RequestStatus::Rejected => Style::default().fg(Color::Red),
                        RequestStatus::New => Style::default(),
                    };
                    lines.push(Line::from(vec![
                        Span::raw("Current status: "),
                        Span::styled(
                            format!("{} (Request for: {reason})", request.status),
                            style,
                        ),
                    ]));
                }
            }
            None => lines.push(Line::from("No leave request on file.")),
        }

        let paragraph = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().title("Leave Requests").borders(Borders::ALL));
        frame.render_widget(paragraph, area);
    }

    fn draw_payments(&self, frame: &mut Frame, area: Rect, pay: &PaymentScreen) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(PAYMENT_METHODS.len() as u16 + 2),
                Constraint::Min(0),
            ])
            .split(area);

        let (due_text, due_style) = if self.fee_paid {
            ("Paid", Style::default().fg(Color::Green))
        } else {
            ("Due", Style::default().fg(Color::Red))
        };
        let fee = Paragraph::new(Line::from(vec![
            Span::raw(format!("Hostel Fee (Semester): {}  -  ", receipt::FEE_AMOUNT)),
            Span::styled(due_text, due_style.add_modifier(Modifier::BOLD)),
        ]))
        .block(Block::default().title("Fees").borders(Borders::ALL));
        frame.render_widget(fee, rows[0]);

        let items: Vec<ListItem> = PAYMENT_METHODS
            .iter()
            .map(|method| ListItem::new(method.to_string()))
            .collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .title("Payment Method")
                    .borders(Borders::ALL),
            )
            .highlight_style(Style::default().fg(Color::Yellow))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        state.select(Some(pay.method_index));
        frame.render_stateful_widget(list, rows[1], &mut state);

        let mut history = Vec::new();
        for receipt in &self.receipts {
            history.push(Line::from(format!(
                "Paid: {} | {} | via {} | Receipt {}",
                receipt.amount, receipt.paid_at, receipt.method, receipt.id
            )));
        }
        if history.is_empty() {
            history.push(Line::from(Span::styled(
                "No recent payments.",
                Style::default().fg(Color::Gray),
            )));
        }
        let history_block = Paragraph::new(history).block(
            Block::default()
                .title("Payment History")
                .borders(Borders::ALL),
        );
        frame.render_widget(history_block, rows[2]);
    }

    fn draw_student_form(&self, frame: &mut Frame, area: Rect, form: &StudentForm, title: &str) {
        let popup_area = centered_rect(60, 70, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title(title.to_string()).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let fields = [
            StudentField::Id,
            StudentField::Name,
            StudentField::Year,
            StudentField::Room,
            StudentField::Contact,
            StudentField::Hostel,
            StudentField::Parent,
            StudentField::Address,
        ];
        let mut lines: Vec<Line> = fields.iter().map(|field| form.build_line(*field)).collect();
        lines.push(Line::from(""));
        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Tab to switch fields, Enter to save, Esc to cancel.",
                Style::default().fg(Color::Gray),
            )));
        }
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);

        if form.active != StudentField::Hostel {
            if let Some(row) = fields.iter().position(|field| *field == form.active) {
                let prefix = form.active.label().len() as u16 + 2;
                frame.set_cursor_position((
                    inner.x + prefix + form.value_len(form.active) as u16,
                    inner.y + row as u16,
                ));
            }
        }
    }

    fn draw_room_form(&self, frame: &mut Frame, area: Rect, form: &RoomForm) {
        let popup_area = centered_rect(50, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Room Change").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = vec![
            form.build_line(RoomField::StudentId),
            form.build_line(RoomField::NewRoom),
            Line::from(""),
        ];
        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Tab to switch fields, Enter to apply, Esc to cancel.",
                Style::default().fg(Color::Gray),
            )));
        }
        frame.render_widget(Paragraph::new(lines), inner);

        let (row, prefix, len) = match form.active {
            RoomField::StudentId => (0u16, "Student ID: ".len() as u16, form.student_id.chars().count()),
            RoomField::NewRoom => (1u16, "New Room: ".len() as u16, form.new_room.chars().count()),
        };
        frame.set_cursor_position((inner.x + prefix + len as u16, inner.y + row));
    }

    fn draw_staff_form(&self, frame: &mut Frame, area: Rect, form: &StaffForm) {
        let popup_area = centered_rect(50, 40, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Add Staff Member")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = vec![
            form.build_line(StaffField::Name),
            form.build_line(StaffField::Role),
            form.build_line(StaffField::Hostel),
            form.build_line(StaffField::Contact),
            Line::from(""),
        ];
        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Tab to switch fields, Enter to save, Esc to cancel.",
                Style::default().fg(Color::Gray),
            )));
        }
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn draw_leave_form(&self, frame: &mut Frame, area: Rect, form: &LeaveForm) {
        let popup_area = centered_rect(55, 40, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("New Leave Request")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let proof_hint = if form.needs_proof() {
            Span::styled(
                "Medical proof required: Yes",
                Style::default().fg(Color::Yellow),
            )
        } else {
            Span::styled(
                "Medical proof required: No",
                Style::default().fg(Color::Gray),
            )
        };
        let mut lines = vec![
            form.build_line(LeaveField::Dates),
            form.build_line(LeaveField::Reason),
            Line::from(proof_hint),
            Line::from(""),
        ];
        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Tab to switch fields, Enter to submit, Esc to cancel.",
                Style::default().fg(Color::Gray),
            )));
        }
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
    }

    fn draw_menu_cell_editor(
        &self,
        frame: &mut Frame,
        area: Rect,
        day: usize,
        meal: usize,
        value: &str,
    ) {
        let popup_area = centered_rect(50, 25, area);
        frame.render_widget(Clear, popup_area);

        let day_name = self
            .menu
            .get(day)
            .map(|entry| entry.day.clone())
            .unwrap_or_default();
        let block = Block::default()
            .title(format!("{day_name} - {}", meal_label(meal)))
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            Line::from(vec![
                Span::raw("Menu: "),
                Span::styled(value.to_string(), Style::default().fg(Color::Yellow)),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "Enter to apply, Esc to cancel.",
                Style::default().fg(Color::Gray),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
        frame.set_cursor_position((
            inner.x + "Menu: ".len() as u16 + value.chars().count() as u16,
            inner.y,
        ));
    }

    fn draw_confirm(&self, frame: &mut Frame, area: Rect, title: &str, mut lines: Vec<Line>) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title(title.to_string()).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Press Y to confirm or N / Esc to cancel.",
            Style::default().fg(Color::Gray),
        )));
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let first = match &self.status {
            Some(status) => Line::from(Span::styled(status.text.clone(), status.kind.style())),
            None => self.screen_hints(),
        };
        let lines = vec![first, self.nav_hints()];
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn screen_hints(&self) -> Line<'static> {
        if !matches!(self.mode, Mode::Normal) {
            return match self.mode {
                Mode::ConfirmStudentDelete { .. }
                | Mode::ConfirmStaffDelete { .. }
                | Mode::ConfirmPayment { .. } => {
                    hint_line(&[("Y", "confirm"), ("N/Esc", "cancel")])
                }
                _ => hint_line(&[("Tab", "next field"), ("Enter", "save"), ("Esc", "cancel")]),
            };
        }
        match &self.screen {
            Screen::RolePicker(_) => hint_line(&[("Up/Down", "select"), ("Enter", "sign in")]),
            Screen::StudentPicker(_) => {
                hint_line(&[("Up/Down", "select"), ("Enter", "choose"), ("Esc", "back")])
            }
            Screen::Dashboard => hint_line(&[("2", "manage students"), ("3", "rooms")]),
            Screen::Students(_) => hint_line(&[
                ("Up/Down", "select"),
                ("+", "add"),
                ("e", "edit"),
                ("-", "delete"),
                ("y", "year filter"),
            ]),
            Screen::Rooms => hint_line(&[("Enter", "reassign room")]),
            Screen::Requests(_) => {
                hint_line(&[("Up/Down", "select"), ("a", "accept"), ("r", "reject")])
            }
            Screen::Staff(_) => hint_line(&[("Up/Down", "select"), ("+", "add"), ("-", "remove")]),
            Screen::MenuEditor(_) => hint_line(&[
                ("Arrows", "choose cell"),
                ("Enter", "edit"),
                ("s", "save menu"),
            ]),
            Screen::Profile => hint_line(&[("2", "leave"), ("3", "payments"), ("4", "menu")]),
            Screen::Leave => hint_line(&[("Enter", "new request")]),
            Screen::Payments(_) => hint_line(&[
                ("Up/Down", "method"),
                ("Enter", "pay"),
                ("o", "open receipt"),
            ]),
            Screen::MenuView => hint_line(&[("1", "profile")]),
        }
    }

    fn nav_hints(&self) -> Line<'static> {
        match self.session {
            Some(Session::Admin(_)) => hint_line(&[
                ("1-6", "sections"),
                ("l", "logout"),
                ("q", "quit"),
            ]),
            Some(Session::Student { .. }) => hint_line(&[
                ("1-4", "sections"),
                ("l", "logout"),
                ("q", "quit"),
            ]),
            None => hint_line(&[("q", "quit")]),
        }
    }
}

fn meal_label(meal: usize) -> &'static str {
    match meal {
        0 => "breakfast",
        1 => "lunch",
        _ => "dinner",
    }
}
