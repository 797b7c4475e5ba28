//! Shell completion scripts for acp.
//!
//! The hidden `acp completions <shell>` command writes a script to stdout:
//!
//! ```text
//! acp completions zsh > ~/.zfunc/_acp
//! acp completions fish > ~/.config/fish/completions/acp.fish
//! ```

use std::io::Write;

use clap::Command;
use clap_complete::{generate, Shell};

use crate::error::{AcpError, Result};

/// Shells we can generate completions for.
pub const SUPPORTED_SHELLS: &[&str] = &["bash", "zsh", "fish"];

/// Supported shell types for completion scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellType {
    Bash,
    Zsh,
    Fish,
}

impl ShellType {
    /// Parse a shell by name (`bash`, `zsh`, `fish`) or by path (`/bin/zsh`).
    pub fn from_name(name: &str) -> Result<Self> {
        let name = std::path::Path::new(name)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(name);

        match name {
            "bash" => Ok(ShellType::Bash),
            "zsh" => Ok(ShellType::Zsh),
            "fish" => Ok(ShellType::Fish),
            _ => Err(AcpError::InvalidOptions(format!(
                "Unsupported shell: '{}'. Supported shells are: {}",
                name,
                SUPPORTED_SHELLS.join(", ")
            ))),
        }
    }

    pub fn to_clap_shell(self) -> Shell {
        match self {
            ShellType::Bash => Shell::Bash,
            ShellType::Zsh => Shell::Zsh,
            ShellType::Fish => Shell::Fish,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ShellType::Bash => "bash",
            ShellType::Zsh => "zsh",
            ShellType::Fish => "fish",
        }
    }
}

impl std::fmt::Display for ShellType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Render the completion script for `cmd`.
pub fn generate_completion_script(shell: ShellType, cmd: &mut Command) -> String {
    let name = cmd.get_name().to_string();
    let mut buf = Vec::new();
    generate(shell.to_clap_shell(), cmd, name, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Write the completion script for `cmd` to stdout.
pub fn print_completion_script(shell: ShellType, cmd: &mut Command) -> Result<()> {
    let script = generate_completion_script(shell, cmd);
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(script.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
