//! Binary entry point that glues the JSON-backed record store to the TUI.
//! Bootstrapping is a straight line: open the snapshot file, load or seed
//! the student collection, hydrate the session-scoped seed data, and drive
//! the Ratatui event loop until the user exits.
use hostel_desk::store::seed;
use hostel_desk::store::snapshot::JsonSnapshotStore;
use hostel_desk::{run_app, App, RecordStore};

/// Initialize persistence, load the student records, and launch the TUI.
///
/// Returning a `Result` bubbles up fatal initialization problems (for example
/// a home directory that cannot be resolved) to the terminal instead of
/// crashing silently.
fn main() -> anyhow::Result<()> {
    let snapshot = JsonSnapshotStore::open_default()?;
    let mut store = RecordStore::new(Box::new(snapshot));
    store.initialize()?;

    let mut app = App::new(
        store,
        seed::default_requests(),
        seed::default_staff(),
        seed::default_menu(),
    );
    run_app(&mut app)
}
