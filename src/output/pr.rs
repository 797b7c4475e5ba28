//! Pull request workflow output.

use super::colors::*;

/// Print the URL of a freshly created PR.
pub fn print_pr_created(url: &str) {
    println!("{GREEN}{BOLD}PR created:{RESET} {}", url);
}

/// Print the link for opening the PR in a browser (interactive mode).
pub fn print_pr_creation_url(url: &str) {
    println!("{GREEN}{BOLD}PR creation URL:{RESET} {}", url);
}

/// Print a success message after an immediate merge.
pub fn print_pr_merged(url: &str, method: &str) {
    println!("{GREEN}{BOLD}PR merged:{RESET} {} {GRAY}({}){RESET}", url, method);
}

/// Print a success message after auto-merge was enabled.
pub fn print_auto_merge_enabled(url: &str, method: &str) {
    println!(
        "{GREEN}{BOLD}Auto-merge enabled:{RESET} {} {GRAY}({}){RESET}",
        url, method
    );
}

/// Print a message after the original branch was fast-forwarded.
pub fn print_synced(branch: &str) {
    println!("{GREEN}Synced{RESET} {} with remote.", branch);
}

/// Print the result of `acp checkout`.
pub fn print_checked_out(branch: &str) {
    println!("{GREEN}Now on branch:{RESET} {}", branch);
}

/// The two commands that recover or discard a parked stash entry.
pub fn stash_recovery_commands(label: &str) -> [String; 2] {
    [
        format!("git stash apply 'stash^{{/{}}}'", label),
        format!("git stash drop 'stash^{{/{}}}'", label),
    ]
}

/// Warn that unstaged changes were left in the stash, with recovery commands.
pub fn print_stash_kept(label: &str, reason: &str) {
    let [apply, discard] = stash_recovery_commands(label);
    eprintln!(
        "{YELLOW}Warning:{RESET} Could not restore your unstaged changes automatically ({}).",
        reason
    );
    eprintln!("Your changes are saved in the stash as: {BOLD}{}{RESET}", label);
    eprintln!("To restore them:  {CYAN}{}{RESET}", apply);
    eprintln!("Then remove it:   {CYAN}{}{RESET}", discard);
}

/// Tell the user where they stand after a failed run.
pub fn print_branch_state(current: Option<&str>, original: &str) {
    match current {
        Some(current) if current == original => {
            eprintln!("{GRAY}Restored original branch:{RESET} {}", original);
        }
        Some(current) => {
            eprintln!(
                "{YELLOW}Current branch:{RESET} {} {GRAY}(original: {}){RESET}",
                current, original
            );
            eprintln!("Run '{CYAN}git checkout {}{RESET}' to go back.", original);
        }
        None => {
            eprintln!(
                "{YELLOW}Could not determine current branch.{RESET} Original branch was: {}",
                original
            );
        }
    }
}
