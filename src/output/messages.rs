//! Basic message output functions.

use super::colors::*;

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{RED}{BOLD}Error:{RESET} {}", msg);
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{YELLOW}Warning:{RESET} {}", msg);
}

/// Print a progress detail, only in verbose mode.
pub fn print_verbose(verbose: bool, msg: &str) {
    if verbose {
        println!("{GRAY}{}{RESET}", msg);
    }
}

/// Print the message shown when the user presses Ctrl+C.
pub fn print_cancelled() {
    eprintln!();
    eprintln!();
    eprintln!("{YELLOW}Cancelled.{RESET}");
}
