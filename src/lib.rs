//! Core library surface for the Hostel Desk TUI application.
//!
//! The public modules exposed here provide an intentionally small API so the
//! `bin` target as well as potential external tooling can reuse the same
//! pieces: the student record store, the session/role projection, and the
//! interactive application itself.
pub mod models;
pub mod receipt;
pub mod session;
pub mod store;
pub mod ui;

/// The domain types other layers manipulate most often.
pub use models::{Hostel, StudentRecord};

/// The persistence-backed student collection and its filter/patch helpers.
pub use store::{RecordFilter, RecordPatch, RecordStore, RoomChangeOutcome, StoreError};

/// Session roles and their record-visibility projection.
pub use session::{Role, Session};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
