// ABOUTME: Library half of the archiai binary
// ABOUTME: Logging setup and rendering of generated plans for the command line

pub mod logging;
pub mod output;

pub use logging::{init_logging, LogTarget};
pub use output::{render_plan, styles_table, write_output, OutputFormat};
