mod commands;
mod run;
mod utils;

pub use commands::Cli;
pub use run::{exit_status, print_report, run};
pub use utils::init_logging;
