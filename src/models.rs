//! Domain models that mirror the persisted snapshot shape and get passed
//! throughout the TUI. The intent is that these types stay light-weight data
//! holders so other layers can focus on presentation and persistence logic.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The two hostel buckets every student belongs to. Serialized as the plain
/// strings "Boys"/"Girls" so the snapshot stays a flat, readable JSON array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hostel {
    Boys,
    Girls,
}

impl Hostel {
    /// Flip between the two buckets. Forms use this for the toggle-style
    /// hostel field instead of free-text input.
    pub fn toggled(self) -> Self {
        match self {
            Hostel::Boys => Hostel::Girls,
            Hostel::Girls => Hostel::Boys,
        }
    }
}

impl fmt::Display for Hostel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hostel::Boys => write!(f, "Boys"),
            Hostel::Girls => write!(f, "Girls"),
        }
    }
}

/// One resident. The field names double as the snapshot's JSON keys, so
/// renaming any of them is a persistence format change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// Unique identifier, normalized to upper-case before storage. Immutable
    /// once created; edit flows bubble it back to the store untouched.
    pub id: String,
    pub name: String,
    /// Ordinal year label ("1st", "2nd", ...). Kept free-form on purpose.
    pub year: String,
    /// Free-form room label such as "101A".
    pub room: String,
    pub contact: String,
    pub hostel: Hostel,
    /// Parent or guardian name.
    pub parent: String,
    pub address: String,
}

impl StudentRecord {
    /// Trim every string field and upper-case the id. Applied once at
    /// creation so later lookups can compare ids exactly.
    pub fn normalized(mut self) -> Self {
        self.id = self.id.trim().to_uppercase();
        self.name = self.name.trim().to_string();
        self.year = self.year.trim().to_string();
        self.room = self.room.trim().to_string();
        self.contact = self.contact.trim().to_string();
        self.parent = self.parent.trim().to_string();
        self.address = self.address.trim().to_string();
        self
    }

    /// `Name (ID)` label used by status messages and confirmations.
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.name, self.id)
    }
}

/// Lifecycle states for requests handled on the admin side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStatus {
    New,
    Pending,
    Approved,
    Rejected,
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            RequestStatus::New => "New",
            RequestStatus::Pending => "Pending",
            RequestStatus::Approved => "Approved",
            RequestStatus::Rejected => "Rejected",
        };
        write!(f, "{text}")
    }
}

/// Payload for the three request flavors the admin inbox distinguishes.
#[derive(Debug, Clone)]
pub enum RequestKind {
    Leave {
        /// Free-form date range such as "12/01 - 15/01".
        dates: String,
        reason: String,
        /// Whether the stated reason requires uploading a medical proof.
        needs_proof: bool,
    },
    ChangeRoom {
        reason: String,
    },
    Feedback {
        message: String,
    },
}

/// A request or feedback entry submitted by a student. These reset to the
/// seed set on every launch; only student records persist.
#[derive(Debug, Clone)]
pub struct HostelRequest {
    pub student: String,
    pub kind: RequestKind,
    pub status: RequestStatus,
}

impl HostelRequest {
    pub fn is_leave(&self) -> bool {
        matches!(self.kind, RequestKind::Leave { .. })
    }
}

/// One member of the hostel staff roster.
#[derive(Debug, Clone)]
pub struct StaffMember {
    pub name: String,
    /// Role title such as "Head Guard" or "Warden Assistant".
    pub role: String,
    pub hostel: Hostel,
    pub contact: String,
}

/// One row of the weekly food menu.
#[derive(Debug, Clone)]
pub struct MenuDay {
    pub day: String,
    pub breakfast: String,
    pub lunch: String,
    pub dinner: String,
}

/// Payment channels offered by the simulated fee flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Card,
    Upi,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Card => write!(f, "CARD"),
            PaymentMethod::Upi => write!(f, "UPI"),
        }
    }
}

/// Record of one simulated fee payment, kept for the in-session history list
/// and rendered into the downloadable receipt file.
#[derive(Debug, Clone)]
pub struct PaymentReceipt {
    pub id: String,
    pub amount: String,
    pub method: PaymentMethod,
    /// Human-readable transaction time, e.g. "2026-08-30 14:03:21".
    pub paid_at: String,
}
