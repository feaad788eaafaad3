pub mod add;
pub mod backup;
pub mod config;
pub mod db;
pub mod del;
pub mod exam;
pub mod examgoal;
pub mod export;
pub mod goal;
pub mod init;
pub mod list;
pub mod log;
pub mod report;
pub mod stats;
pub mod timer;
pub mod todo;

use crate::ui::messages::warning;
use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
pub(crate) fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}
