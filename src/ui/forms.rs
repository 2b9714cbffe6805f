use anyhow::{anyhow, Result};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::{Hostel, StaffMember, StudentRecord};
use crate::store::RecordPatch;

fn field_style(is_active: bool, is_empty: bool) -> Style {
    if is_active {
        Style::default().fg(Color::Yellow)
    } else if is_empty {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    }
}

fn input_line(field_name: &str, value: &str, placeholder: &str, is_active: bool) -> Line<'static> {
    let display = if value.is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    };
    Line::from(vec![
        Span::raw(format!("{field_name}: ")),
        Span::styled(display, field_style(is_active, value.is_empty())),
    ])
}

/// Fields of the student add/edit form, in focus order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub(crate) enum StudentField {
    #[default]
    Id,
    Name,
    Year,
    Room,
    Contact,
    Hostel,
    Parent,
    Address,
}

impl StudentField {
    const ORDER: [StudentField; 8] = [
        StudentField::Id,
        StudentField::Name,
        StudentField::Year,
        StudentField::Room,
        StudentField::Contact,
        StudentField::Hostel,
        StudentField::Parent,
        StudentField::Address,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            StudentField::Id => "ID",
            StudentField::Name => "Name",
            StudentField::Year => "Year",
            StudentField::Room => "Room",
            StudentField::Contact => "Contact",
            StudentField::Hostel => "Hostel",
            StudentField::Parent => "Parent",
            StudentField::Address => "Address",
        }
    }
}

/// Internal state of the student form. The same struct backs both the add
/// flow and the edit modal; editing locks the id and name fields because
/// neither is part of the partial update the store applies.
#[derive(Debug, Clone)]
pub(crate) struct StudentForm {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) year: String,
    pub(crate) room: String,
    pub(crate) contact: String,
    pub(crate) hostel: Hostel,
    pub(crate) parent: String,
    pub(crate) address: String,
    pub(crate) active: StudentField,
    pub(crate) editing: bool,
    pub(crate) error: Option<String>,
}

impl StudentForm {
    /// Empty form for the add flow.
    pub(crate) fn new() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            year: String::new(),
            room: String::new(),
            contact: String::new(),
            hostel: Hostel::Boys,
            parent: String::new(),
            address: String::new(),
            active: StudentField::Id,
            editing: false,
            error: None,
        }
    }

    /// Populate the form from an existing record when editing. Focus starts
    /// past the locked id and name fields.
    pub(crate) fn from_record(record: &StudentRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            year: record.year.clone(),
            room: record.room.clone(),
            contact: record.contact.clone(),
            hostel: record.hostel,
            parent: record.parent.clone(),
            address: record.address.clone(),
            active: StudentField::Year,
            editing: true,
            error: None,
        }
    }

    /// Whether the field is read-only in the current flow. The edit modal
    /// displays the id and name but never accepts input for them.
    fn is_locked(&self, field: StudentField) -> bool {
        self.editing && matches!(field, StudentField::Id | StudentField::Name)
    }

    /// Move focus to the next field, skipping locked fields.
    pub(crate) fn next_field(&mut self) {
        self.step_field(1);
    }

    /// Move focus to the previous field, skipping locked fields.
    pub(crate) fn prev_field(&mut self) {
        self.step_field(StudentField::ORDER.len() as isize - 1);
    }

    fn step_field(&mut self, step: isize) {
        let order = &StudentField::ORDER;
        let len = order.len() as isize;
        let mut index = order.iter().position(|f| *f == self.active).unwrap_or(0) as isize;
        loop {
            index = (index + step).rem_euclid(len);
            let candidate = order[index as usize];
            if !self.is_locked(candidate) {
                self.active = candidate;
                return;
            }
        }
    }

    /// Append a character to the active text field. The hostel field is a
    /// toggle and ignores typed characters; locked fields reject input.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() || self.active == StudentField::Hostel {
            return false;
        }
        if self.is_locked(self.active) {
            return false;
        }
        self.field_mut().push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) {
        if self.active == StudentField::Hostel || self.is_locked(self.active) {
            return;
        }
        self.field_mut().pop();
    }

    /// Flip the hostel bucket when the hostel field has focus.
    pub(crate) fn toggle_hostel(&mut self) -> bool {
        if self.active == StudentField::Hostel {
            self.hostel = self.hostel.toggled();
            true
        } else {
            false
        }
    }

    fn field_mut(&mut self) -> &mut String {
        match self.active {
            StudentField::Id => &mut self.id,
            StudentField::Name => &mut self.name,
            StudentField::Year => &mut self.year,
            StudentField::Room => &mut self.room,
            StudentField::Contact => &mut self.contact,
            StudentField::Hostel => unreachable!("hostel field has no text buffer"),
            StudentField::Parent => &mut self.parent,
            StudentField::Address => &mut self.address,
        }
    }

    fn value_of(&self, field: StudentField) -> String {
        match field {
            StudentField::Id => self.id.clone(),
            StudentField::Name => self.name.clone(),
            StudentField::Year => self.year.clone(),
            StudentField::Room => self.room.clone(),
            StudentField::Contact => self.contact.clone(),
            StudentField::Hostel => self.hostel.to_string(),
            StudentField::Parent => self.parent.clone(),
            StudentField::Address => self.address.clone(),
        }
    }

    /// Character count of a field's current value, for cursor placement.
    pub(crate) fn value_len(&self, field: StudentField) -> usize {
        self.value_of(field).chars().count()
    }

    /// Validate and build a full record for the add flow. The store applies
    /// its own normalization on top; the form only enforces that the two
    /// identifying fields are present.
    pub(crate) fn parse_record(&self) -> Result<StudentRecord> {
        if self.id.trim().is_empty() {
            return Err(anyhow!("Student ID is required."));
        }
        if self.name.trim().is_empty() {
            return Err(anyhow!("Student name is required."));
        }
        Ok(StudentRecord {
            id: self.id.clone(),
            name: self.name.clone(),
            year: self.year.clone(),
            room: self.room.clone(),
            contact: self.contact.clone(),
            hostel: self.hostel,
            parent: self.parent.clone(),
            address: self.address.clone(),
        })
    }

    /// Build the partial update for the edit flow. Every editable attribute
    /// is submitted; the id never appears in the patch.
    pub(crate) fn parse_patch(&self) -> RecordPatch {
        RecordPatch {
            hostel: Some(self.hostel),
            room: Some(self.room.trim().to_string()),
            year: Some(self.year.trim().to_string()),
            contact: Some(self.contact.trim().to_string()),
            parent: Some(self.parent.trim().to_string()),
            address: Some(self.address.trim().to_string()),
        }
    }

    /// Render a styled line for the modal form widget.
    pub(crate) fn build_line(&self, field: StudentField) -> Line<'static> {
        let value = self.value_of(field);
        let is_active = self.active == field;

        if field == StudentField::Hostel {
            return Line::from(vec![
                Span::raw("Hostel: "),
                Span::styled(value, field_style(is_active, false)),
                Span::styled(
                    if is_active { "  (Space to toggle)" } else { "" },
                    Style::default().fg(Color::DarkGray),
                ),
            ]);
        }
        if self.is_locked(field) {
            return Line::from(vec![
                Span::raw(format!("{}: ", field.label())),
                Span::raw(value),
                Span::styled("  (locked)", Style::default().fg(Color::DarkGray)),
            ]);
        }

        let placeholder = match field {
            StudentField::Id | StudentField::Name => "<required>",
            _ => "<optional>",
        };
        input_line(field.label(), &value, placeholder, is_active)
    }
}

/// Fields of the room-reassignment form.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub(crate) enum RoomField {
    #[default]
    StudentId,
    NewRoom,
}

/// Form state for moving a student to a different room.
#[derive(Debug, Clone, Default)]
pub(crate) struct RoomForm {
    pub(crate) student_id: String,
    pub(crate) new_room: String,
    pub(crate) active: RoomField,
    pub(crate) error: Option<String>,
}

impl RoomForm {
    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            RoomField::StudentId => RoomField::NewRoom,
            RoomField::NewRoom => RoomField::StudentId,
        };
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            RoomField::StudentId => self.student_id.push(ch),
            RoomField::NewRoom => self.new_room.push(ch),
        }
        true
    }

    pub(crate) fn backspace(&mut self) {
        match self.active {
            RoomField::StudentId => {
                self.student_id.pop();
            }
            RoomField::NewRoom => {
                self.new_room.pop();
            }
        }
    }

    /// Validate the inputs; id normalization happens in the store.
    pub(crate) fn parse_inputs(&self) -> Result<(String, String)> {
        let id = self.student_id.trim();
        if id.is_empty() {
            return Err(anyhow!("Student ID is required."));
        }
        let room = self.new_room.trim();
        if room.is_empty() {
            return Err(anyhow!("New room is required."));
        }
        Ok((id.to_string(), room.to_string()))
    }

    pub(crate) fn build_line(&self, field: RoomField) -> Line<'static> {
        let (label, value, is_active) = match field {
            RoomField::StudentId => (
                "Student ID",
                &self.student_id,
                self.active == RoomField::StudentId,
            ),
            RoomField::NewRoom => ("New Room", &self.new_room, self.active == RoomField::NewRoom),
        };
        input_line(label, value, "<required>", is_active)
    }
}

/// Fields of the staff form.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub(crate) enum StaffField {
    #[default]
    Name,
    Role,
    Hostel,
    Contact,
}

/// Form state for adding a staff member to the roster.
#[derive(Debug, Clone)]
pub(crate) struct StaffForm {
    pub(crate) name: String,
    pub(crate) role: String,
    pub(crate) hostel: Hostel,
    pub(crate) contact: String,
    pub(crate) active: StaffField,
    pub(crate) error: Option<String>,
}

impl StaffForm {
    pub(crate) fn new() -> Self {
        Self {
            name: String::new(),
            role: String::new(),
            hostel: Hostel::Boys,
            contact: String::new(),
            active: StaffField::Name,
            error: None,
        }
    }

    pub(crate) fn next_field(&mut self) {
        self.active = match self.active {
            StaffField::Name => StaffField::Role,
            StaffField::Role => StaffField::Hostel,
            StaffField::Hostel => StaffField::Contact,
            StaffField::Contact => StaffField::Name,
        };
    }

    pub(crate) fn prev_field(&mut self) {
        self.active = match self.active {
            StaffField::Name => StaffField::Contact,
            StaffField::Role => StaffField::Name,
            StaffField::Hostel => StaffField::Role,
            StaffField::Contact => StaffField::Hostel,
        };
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() || self.active == StaffField::Hostel {
            return false;
        }
        match self.active {
            StaffField::Name => self.name.push(ch),
            StaffField::Role => self.role.push(ch),
            StaffField::Contact => self.contact.push(ch),
            StaffField::Hostel => {}
        }
        true
    }

    pub(crate) fn backspace(&mut self) {
        match self.active {
            StaffField::Name => {
                self.name.pop();
            }
            StaffField::Role => {
                self.role.pop();
            }
            StaffField::Contact => {
                self.contact.pop();
            }
            StaffField::Hostel => {}
        }
    }

    pub(crate) fn toggle_hostel(&mut self) -> bool {
        if self.active == StaffField::Hostel {
            self.hostel = self.hostel.toggled();
            true
        } else {
            false
        }
    }

    pub(crate) fn parse_inputs(&self) -> Result<StaffMember> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(anyhow!("Staff name is required."));
        }
        let role = self.role.trim();
        if role.is_empty() {
            return Err(anyhow!("Staff role is required."));
        }
        Ok(StaffMember {
            name: name.to_string(),
            role: role.to_string(),
            hostel: self.hostel,
            contact: self.contact.trim().to_string(),
        })
    }

    pub(crate) fn build_line(&self, field: StaffField) -> Line<'static> {
        let is_active = self.active == field;
        match field {
            StaffField::Name => input_line("Name", &self.name, "<required>", is_active),
            StaffField::Role => input_line("Role", &self.role, "<required>", is_active),
            StaffField::Contact => input_line("Contact", &self.contact, "<optional>", is_active),
            StaffField::Hostel => Line::from(vec![
                Span::raw("Hostel: "),
                Span::styled(self.hostel.to_string(), field_style(is_active, false)),
                Span::styled(
                    if is_active { "  (Space to toggle)" } else { "" },
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
        }
    }
}

/// Fields of the leave-request form.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub(crate) enum LeaveField {
    #[default]
    Dates,
    Reason,
}

/// Form state for a student submitting a leave request.
#[derive(Debug, Clone, Default)]
pub(crate) struct LeaveForm {
    pub(crate) dates: String,
    pub(crate) reason: String,
    pub(crate) active: LeaveField,
    pub(crate) error: Option<String>,
}

impl LeaveForm {
    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            LeaveField::Dates => LeaveField::Reason,
            LeaveField::Reason => LeaveField::Dates,
        };
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            LeaveField::Dates => self.dates.push(ch),
            LeaveField::Reason => self.reason.push(ch),
        }
        true
    }

    pub(crate) fn backspace(&mut self) {
        match self.active {
            LeaveField::Dates => {
                self.dates.pop();
            }
            LeaveField::Reason => {
                self.reason.pop();
            }
        }
    }

    /// Medical and sickness reasons require a proof document; the flag is
    /// recomputed live so the form can show the requirement before submit.
    pub(crate) fn needs_proof(&self) -> bool {
        let reason = self.reason.to_lowercase();
        reason.contains("medical") || reason.contains("sick")
    }

    /// Validate and return `(dates, reason, needs_proof)`.
    pub(crate) fn parse_inputs(&self) -> Result<(String, String, bool)> {
        let dates = self.dates.trim();
        if dates.is_empty() {
            return Err(anyhow!("Leave dates are required."));
        }
        let reason = self.reason.trim();
        if reason.is_empty() {
            return Err(anyhow!("Leave reason is required."));
        }
        Ok((dates.to_string(), reason.to_string(), self.needs_proof()))
    }

    pub(crate) fn build_line(&self, field: LeaveField) -> Line<'static> {
        let (label, value, is_active) = match field {
            LeaveField::Dates => ("Dates", &self.dates, self.active == LeaveField::Dates),
            LeaveField::Reason => ("Reason", &self.reason, self.active == LeaveField::Reason),
        };
        input_line(label, value, "<required>", is_active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn student_form_requires_id_and_name() {
        let mut form = StudentForm::new();
        assert!(form.parse_record().is_err());
        form.id = "s9999".to_string();
        assert!(form.parse_record().is_err());
        form.name = "Test User".to_string();
        assert!(form.parse_record().is_ok());
    }

    #[test]
    fn editing_form_skips_the_locked_fields() {
        let record = crate::store::seed::default_students().remove(0);
        let mut form = StudentForm::from_record(&record);
        assert_eq!(form.active, StudentField::Year);
        for _ in 0..StudentField::ORDER.len() * 2 {
            assert_ne!(form.active, StudentField::Id);
            assert_ne!(form.active, StudentField::Name);
            form.next_field();
        }
        for _ in 0..StudentField::ORDER.len() * 2 {
            form.prev_field();
            assert_ne!(form.active, StudentField::Id);
            assert_ne!(form.active, StudentField::Name);
        }
        form.active = StudentField::Id;
        assert!(!form.push_char('X'));
        form.active = StudentField::Year;
        assert!(form.push_char('X'));
    }

    #[test]
    fn edit_flow_cannot_change_id_or_name() {
        let (snapshot, _saves) = crate::store::snapshot::testing::MemorySnapshot::empty();
        let mut store = crate::store::RecordStore::new(Box::new(snapshot));
        store.initialize().expect("initialize");
        let record = store.find_by_id("S1001").expect("seed record").clone();

        let mut form = StudentForm::from_record(&record);
        form.active = StudentField::Name;
        assert!(!form.push_char('X'));
        form.backspace();
        assert_eq!(form.name, record.name);

        form.active = StudentField::Room;
        form.room.clear();
        assert!(form.push_char('2'));

        store.edit(&record.id, form.parse_patch()).expect("edit");
        let stored = store.find_by_id("S1001").expect("edited record");
        assert_eq!(stored.name, record.name);
        assert_eq!(stored.room, "2");
    }

    #[test]
    fn staff_form_navigates_both_directions() {
        let mut form = StaffForm::new();
        form.next_field();
        assert_eq!(form.active, StaffField::Role);
        form.prev_field();
        assert_eq!(form.active, StaffField::Name);
        form.prev_field();
        assert_eq!(form.active, StaffField::Contact);
        form.next_field();
        assert_eq!(form.active, StaffField::Name);
    }

    #[test]
    fn patch_trims_but_keeps_every_editable_field() {
        let record = crate::store::seed::default_students().remove(0);
        let mut form = StudentForm::from_record(&record);
        form.room = " 212 ".to_string();
        let patch = form.parse_patch();
        assert_eq!(patch.room.as_deref(), Some("212"));
        assert!(patch.hostel.is_some());
        assert!(patch.year.is_some());
        assert!(patch.contact.is_some());
        assert!(patch.parent.is_some());
        assert!(patch.address.is_some());
    }

    #[test]
    fn medical_reasons_require_proof() {
        let mut form = LeaveForm::default();
        form.reason = "Family event".to_string();
        assert!(!form.needs_proof());
        form.reason = "Medical checkup".to_string();
        assert!(form.needs_proof());
        form.reason = "feeling sick".to_string();
        assert!(form.needs_proof());
    }
}
