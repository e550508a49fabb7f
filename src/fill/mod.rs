pub mod exec;
pub mod output;
pub mod walk;

pub use exec::{exec, run, FillOptions};
pub use output::{output_json, output_summary, Reporter};
pub use walk::{fill_window, FillStats, PROGRESS_EVERY_DAYS};
