//! ArchiAI TUI - terminal front-end for generating architecture plans
//!
//! Collects a project description, runs generation in the background and
//! presents the resulting plan across tabs with Markdown/text export.

pub mod app;
pub mod events;
pub mod input;
pub mod state;
pub mod ui;

pub use app::App;
pub use state::AppState;
