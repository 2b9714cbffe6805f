//! Ratatui front-end: screen state, modal forms, and the event loop. Only
//! the application container and the entry point leak out of this module;
//! everything else is an implementation detail of the interface.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
